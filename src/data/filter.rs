use super::model::{IncidentRecord, IncidentTable};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Filter predicate: rows whose attack type equals the selection
// ---------------------------------------------------------------------------

/// Return the rows whose attack type equals `attack_type`, in table order.
///
/// An attack type that never occurs simply yields an empty view.
pub fn filter_by_attack_type<'a>(
    table: &'a IncidentTable,
    attack_type: &str,
) -> Vec<&'a IncidentRecord> {
    table
        .records()
        .iter()
        .filter(|rec| rec.attack_type == attack_type)
        .collect()
}

/// Reject selections outside the table's attack-type domain.
pub fn validate_selection(table: &IncidentTable, attack_type: &str) -> Result<()> {
    if table.contains_attack_type(attack_type) {
        return Ok(());
    }
    Err(DashboardError::InvalidSelection {
        selection: attack_type.to_string(),
        available: table.attack_types().to_vec(),
    })
}
