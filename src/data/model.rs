use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_COUNTRY: &str = "Country";
pub const COL_ATTACK_TYPE: &str = "Attack Type";
pub const COL_ATTACK_SOURCE: &str = "Attack Source";
pub const COL_DEFENSE: &str = "Defense Mechanism Used";
pub const COL_FINANCIAL_LOSS: &str = "Financial Loss (in Million $)";
pub const COL_AFFECTED_USERS: &str = "Number of Affected Users";
pub const COL_RESOLUTION_TIME: &str = "Incident Resolution Time (in Hours)";

/// Every column the loader insists on, in the order they are reported
/// when missing.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_COUNTRY,
    COL_ATTACK_TYPE,
    COL_ATTACK_SOURCE,
    COL_DEFENSE,
    COL_FINANCIAL_LOSS,
    COL_AFFECTED_USERS,
    COL_RESOLUTION_TIME,
];

// ---------------------------------------------------------------------------
// IncidentRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single cybersecurity incident (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Attack Type")]
    pub attack_type: String,
    #[serde(rename = "Attack Source")]
    pub attack_source: String,
    #[serde(rename = "Defense Mechanism Used")]
    pub defense_mechanism: String,
    /// Financial loss in millions of US dollars.
    #[serde(rename = "Financial Loss (in Million $)")]
    pub financial_loss_musd: f64,
    #[serde(rename = "Number of Affected Users")]
    pub affected_users: u64,
    #[serde(rename = "Incident Resolution Time (in Hours)")]
    pub resolution_time_hours: f64,
}

// ---------------------------------------------------------------------------
// IncidentTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full incident table in file order, with the attack-type domain
/// pre-computed in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentTable {
    records: Vec<IncidentRecord>,
    attack_types: Vec<String>,
}

impl IncidentTable {
    /// Build the table and its attack-type index from loaded records.
    pub fn from_records(records: Vec<IncidentRecord>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut attack_types = Vec::new();
        for rec in &records {
            if seen.insert(rec.attack_type.as_str()) {
                attack_types.push(rec.attack_type.clone());
            }
        }
        IncidentTable {
            records,
            attack_types,
        }
    }

    /// All rows, in file order.
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Distinct attack types in the order they first appear.
    pub fn attack_types(&self) -> &[String] {
        &self.attack_types
    }

    pub fn contains_attack_type(&self, attack_type: &str) -> bool {
        self.attack_types.iter().any(|t| t == attack_type)
    }

    /// Number of incidents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    country: &str,
    attack_type: &str,
    loss: f64,
    users: u64,
    source: &str,
    defense: &str,
    hours: f64,
) -> IncidentRecord {
    IncidentRecord {
        country: country.to_string(),
        attack_type: attack_type.to_string(),
        attack_source: source.to_string(),
        defense_mechanism: defense.to_string(),
        financial_loss_musd: loss,
        affected_users: users,
        resolution_time_hours: hours,
    }
}
