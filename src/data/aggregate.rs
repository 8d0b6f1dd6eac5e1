use std::collections::HashMap;

use serde::Serialize;

use super::filter::{filter_by_attack_type, validate_selection};
use super::model::{IncidentRecord, IncidentTable};
use crate::error::Result;

/// Maximum number of countries in the financial-loss ranking.
pub const TOP_COUNTRIES: usize = 10;

// ---------------------------------------------------------------------------
// Aggregate view rows
// ---------------------------------------------------------------------------

/// A group key with a summed measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// A group key with a row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Everything the dashboard derives from one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateViews<'a> {
    /// Rows matching the selection, in table order.
    pub filtered: Vec<&'a IncidentRecord>,
    /// Summed loss per country, descending, at most [`TOP_COUNTRIES`].
    pub by_country_loss_top10: Vec<GroupTotal>,
    pub by_attack_source_count: Vec<GroupCount>,
    /// Counted over the whole table, independent of the selection.
    pub by_attack_type_count: Vec<GroupCount>,
    pub by_defense_count: Vec<GroupCount>,
    /// Raw resolution times of `filtered`, for histogram binning.
    pub resolution_time_values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter the table by `attack_type` and compute every aggregate view.
///
/// Fails with [`DashboardError::InvalidSelection`](crate::error::DashboardError)
/// when the attack type does not occur in the table.
pub fn aggregate<'a>(table: &'a IncidentTable, attack_type: &str) -> Result<AggregateViews<'a>> {
    validate_selection(table, attack_type)?;
    Ok(aggregate_unchecked(table, attack_type))
}

/// Same as [`aggregate`] without the domain check: an unmatched attack type
/// produces empty views (the attack-type distribution is still computed
/// over the full table).
pub fn aggregate_unchecked<'a>(table: &'a IncidentTable, attack_type: &str) -> AggregateViews<'a> {
    let filtered = filter_by_attack_type(table, attack_type);

    let mut by_country_loss_top10 =
        sum_by(filtered.iter().copied(), |r| &r.country, |r| r.financial_loss_musd);
    by_country_loss_top10.sort_by(|a, b| b.total.total_cmp(&a.total));
    by_country_loss_top10.truncate(TOP_COUNTRIES);

    let by_attack_source_count = count_by(filtered.iter().copied(), |r| &r.attack_source);
    let by_defense_count = count_by(filtered.iter().copied(), |r| &r.defense_mechanism);
    let by_attack_type_count = count_by(table.records().iter(), |r| &r.attack_type);

    let resolution_time_values = filtered.iter().map(|r| r.resolution_time_hours).collect();

    AggregateViews {
        filtered,
        by_country_loss_top10,
        by_attack_source_count,
        by_attack_type_count,
        by_defense_count,
        resolution_time_values,
    }
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Sum `measure` per key; groups come out in first-encountered order.
fn sum_by<'a>(
    rows: impl Iterator<Item = &'a IncidentRecord>,
    key: impl Fn(&'a IncidentRecord) -> &'a String,
    measure: impl Fn(&IncidentRecord) -> f64,
) -> Vec<GroupTotal> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();
    for row in rows {
        let k = key(row);
        let idx = *slots.entry(k.as_str()).or_insert_with(|| {
            groups.push(GroupTotal {
                key: k.clone(),
                total: 0.0,
            });
            groups.len() - 1
        });
        groups[idx].total += measure(row);
    }
    groups
}

/// Count rows per key, most frequent first; ties keep first-encountered order.
fn count_by<'a>(
    rows: impl Iterator<Item = &'a IncidentRecord>,
    key: impl Fn(&'a IncidentRecord) -> &'a String,
) -> Vec<GroupCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();
    for row in rows {
        let k = key(row);
        let idx = *slots.entry(k.as_str()).or_insert_with(|| {
            groups.push(GroupCount {
                key: k.clone(),
                count: 0,
            });
            groups.len() - 1
        });
        groups[idx].count += 1;
    }
    // `sort_by` is stable, so equal counts stay in encounter order.
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
