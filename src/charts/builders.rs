use super::histogram::{bin_values, RESOLUTION_BINS};
use super::{
    BarChart, ChartDescription, ChartKind, ChartStyle, GeoChart, HistogramChart, Orientation,
    PieChart, Projection,
};
use crate::color::{generate_palette, named, ColorScale, Rgb};
use crate::data::aggregate::{GroupCount, GroupTotal};
use crate::data::model::IncidentRecord;

pub const MAP_TITLE: &str = "Affected Users by Country";
pub const COUNTRY_LOSS_TITLE: &str = "Top 10 Countries by Financial Loss (in Millions)";
pub const ATTACK_TYPE_TITLE: &str = "Attack Type Distribution";
pub const ATTACK_SOURCE_TITLE: &str = "Attack Source Distribution";
pub const DEFENSE_TITLE: &str = "Defense Mechanisms Used";
pub const RESOLUTION_TITLE: &str = "Incident Resolution Time (in Hours)";

/// Inner radius of the attack-type donut.
pub const DONUT_HOLE: f64 = 0.3;

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// One marker per filtered incident, coloured by affected users.
///
/// Rows are not merged: a country with several incidents is plotted once
/// per incident.
pub fn map_chart(filtered: &[&IncidentRecord]) -> ChartDescription {
    let locations: Vec<String> = filtered.iter().map(|r| r.country.clone()).collect();
    let z = filtered.iter().map(|r| r.affected_users as f64).collect();
    let text = locations.clone();

    ChartDescription {
        title: MAP_TITLE.to_string(),
        style: ChartStyle::default(),
        kind: ChartKind::Geo(GeoChart {
            locations,
            z,
            text,
            color_scale: ColorScale::Reds,
            colorbar_title: "Affected Users".to_string(),
            marker_line_color: named::DARK_GRAY,
            marker_line_width: 0.5,
            projection: Projection::Equirectangular,
            show_frame: false,
            show_coastlines: false,
            geo_background: named::NAVY,
        }),
    }
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// Vertical crimson bars for the top countries by summed loss.
pub fn country_loss_chart(top: &[GroupTotal]) -> ChartDescription {
    let (labels, values) = top.iter().map(|g| (g.key.clone(), g.total)).unzip();
    bar_chart(
        COUNTRY_LOSS_TITLE,
        labels,
        values,
        Orientation::Vertical,
        named::CRIMSON,
        Some("M"),
    )
}

/// Vertical orange bars, one per attack source.
pub fn attack_source_chart(counts: &[GroupCount]) -> ChartDescription {
    let (labels, values) = unzip_counts(counts);
    bar_chart(
        ATTACK_SOURCE_TITLE,
        labels,
        values,
        Orientation::Vertical,
        named::ORANGE,
        None,
    )
}

/// Horizontal green bars, one per defense mechanism.
pub fn defense_chart(counts: &[GroupCount]) -> ChartDescription {
    let (labels, values) = unzip_counts(counts);
    bar_chart(
        DEFENSE_TITLE,
        labels,
        values,
        Orientation::Horizontal,
        named::GREEN,
        None,
    )
}

fn bar_chart(
    title: &str,
    labels: Vec<String>,
    values: Vec<f64>,
    orientation: Orientation,
    color: Rgb,
    value_suffix: Option<&str>,
) -> ChartDescription {
    ChartDescription {
        title: title.to_string(),
        style: ChartStyle::default(),
        kind: ChartKind::Bar(BarChart {
            labels,
            values,
            orientation,
            color,
            value_suffix: value_suffix.map(str::to_string),
        }),
    }
}

fn unzip_counts(counts: &[GroupCount]) -> (Vec<String>, Vec<f64>) {
    counts.iter().map(|g| (g.key.clone(), g.count as f64)).unzip()
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Donut chart of attack types over the whole table.
pub fn attack_type_chart(counts: &[GroupCount]) -> ChartDescription {
    let (labels, values) = unzip_counts(counts);
    ChartDescription {
        title: ATTACK_TYPE_TITLE.to_string(),
        style: ChartStyle::default(),
        kind: ChartKind::Pie(PieChart {
            labels,
            values,
            colors: generate_palette(counts.len()),
            hole: DONUT_HOLE,
        }),
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Purple 20-bin histogram of resolution times.
pub fn resolution_time_chart(values: &[f64]) -> ChartDescription {
    ChartDescription {
        title: RESOLUTION_TITLE.to_string(),
        style: ChartStyle::default(),
        kind: ChartKind::Histogram(HistogramChart {
            values: values.to_vec(),
            bins: bin_values(values, RESOLUTION_BINS),
            color: named::PURPLE,
        }),
    }
}
