use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::charts::builders;
use crate::charts::geo::country_centroid;
use crate::charts::ChartDescription;
use crate::data::aggregate::{aggregate, aggregate_unchecked, AggregateViews};
use crate::data::model::IncidentTable;
use crate::error::Result;

// ---------------------------------------------------------------------------
// DashboardFrame – everything drawn for one selection
// ---------------------------------------------------------------------------

/// The label and six charts rendered for a single selection.  A frame is
/// always built completely before it replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub selection: String,
    pub label: String,
    pub filtered_rows: usize,
    pub map: ChartDescription,
    pub country_loss: ChartDescription,
    pub attack_types: ChartDescription,
    pub attack_sources: ChartDescription,
    pub defenses: ChartDescription,
    pub resolution_time: ChartDescription,
}

impl DashboardFrame {
    /// Run the full filter → aggregate → chart pipeline for `selection`.
    pub fn render(table: &IncidentTable, selection: &str) -> Result<Self> {
        let started = Instant::now();
        let views = aggregate(table, selection)?;
        let frame = Self::from_views(selection, &views);
        warn_unplaceable(&views);
        log::debug!(
            "Rendered '{selection}': {} rows, {} countries, {} sources, {} defenses in {:?}",
            views.filtered.len(),
            views.by_country_loss_top10.len(),
            views.by_attack_source_count.len(),
            views.by_defense_count.len(),
            started.elapsed()
        );
        Ok(frame)
    }

    /// Frame for a table with nothing to select.
    fn empty(table: &IncidentTable) -> Self {
        Self::from_views("", &aggregate_unchecked(table, ""))
    }

    fn from_views(selection: &str, views: &AggregateViews<'_>) -> Self {
        DashboardFrame {
            selection: selection.to_string(),
            label: selection_label(selection),
            filtered_rows: views.filtered.len(),
            map: builders::map_chart(&views.filtered),
            country_loss: builders::country_loss_chart(&views.by_country_loss_top10),
            attack_types: builders::attack_type_chart(&views.by_attack_type_count),
            attack_sources: builders::attack_source_chart(&views.by_attack_source_count),
            defenses: builders::defense_chart(&views.by_defense_count),
            resolution_time: builders::resolution_time_chart(&views.resolution_time_values),
        }
    }

    /// The six charts in dashboard order.
    pub fn charts(&self) -> [&ChartDescription; 6] {
        [
            &self.map,
            &self.country_loss,
            &self.attack_types,
            &self.attack_sources,
            &self.defenses,
            &self.resolution_time,
        ]
    }
}

/// Countries the map renderer has no centroid for are dropped from the map.
fn warn_unplaceable(views: &AggregateViews<'_>) {
    let mut unknown: Vec<&str> = views
        .filtered
        .iter()
        .map(|r| r.country.as_str())
        .filter(|c| country_centroid(c).is_none())
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    if !unknown.is_empty() {
        log::warn!("No map position for: {}", unknown.join(", "));
    }
}

/// Text shown above the charts.
pub fn selection_label(selection: &str) -> String {
    format!("The Attack Type chosen by user was: {selection}")
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The dashboard state, independent of rendering: the shared read-only
/// table, the current selection and the frame last rendered for it.
#[derive(Debug, Clone)]
pub struct DashboardState {
    table: Arc<IncidentTable>,
    selection: String,
    frame: DashboardFrame,
}

impl DashboardState {
    /// Render the initial frame.  Fails when `default_selection` is not one
    /// of the table's attack types.
    pub fn new(table: Arc<IncidentTable>, default_selection: &str) -> Result<Self> {
        let frame = DashboardFrame::render(&table, default_selection)?;
        Ok(Self {
            table,
            selection: default_selection.to_string(),
            frame,
        })
    }

    pub fn table(&self) -> &IncidentTable {
        &self.table
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn frame(&self) -> &DashboardFrame {
        &self.frame
    }

    /// Switch to `attack_type`.  The new frame replaces the old one only
    /// once it has been fully built; on error nothing changes.
    pub fn select(&mut self, attack_type: &str) -> Result<&DashboardFrame> {
        let frame = DashboardFrame::render(&self.table, attack_type)?;
        self.selection = attack_type.to_string();
        self.frame = frame;
        Ok(&self.frame)
    }

    /// Install a freshly loaded table.  The selection survives when the new
    /// table still contains it, otherwise the first attack type is used.
    pub fn replace_table(&mut self, table: Arc<IncidentTable>) -> Result<&DashboardFrame> {
        let selection = if table.contains_attack_type(&self.selection) {
            Some(self.selection.clone())
        } else {
            table.attack_types().first().cloned()
        };

        let frame = match &selection {
            Some(sel) => DashboardFrame::render(&table, sel)?,
            None => DashboardFrame::empty(&table),
        };
        log::info!(
            "Dataset replaced: {} incidents, selection '{}'",
            table.len(),
            frame.selection
        );

        self.selection = selection.unwrap_or_default();
        self.table = table;
        self.frame = frame;
        Ok(&self.frame)
    }
}
