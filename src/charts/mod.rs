//! Chart layer: renderer-neutral chart descriptions and their builders.
//!
//! Architecture:
//! ```text
//!   AggregateViews
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ builders  │  one pure function per dashboard panel
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ ChartDescription  │  kind + parallel label/value vectors + style
//!   └──────────────────┘
//!        │
//!        ▼
//!     ui::plot (egui_plot)
//! ```

use serde::Serialize;

use crate::color::{named, ColorScale, Rgb};

pub mod builders;
pub mod geo;
pub mod histogram;

pub use histogram::HistogramBin;

// ---------------------------------------------------------------------------
// ChartDescription
// ---------------------------------------------------------------------------

/// A complete, renderable description of one dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub title: String,
    pub style: ChartStyle,
    pub kind: ChartKind,
}

/// Page-level styling shared by every chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartStyle {
    /// `None` means fully transparent.
    pub paper_background: Option<Rgb>,
    pub font_color: Rgb,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            paper_background: None,
            font_color: named::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Geo(GeoChart),
    Bar(BarChart),
    Pie(PieChart),
    Histogram(HistogramChart),
}

impl ChartKind {
    /// Number of data items (points, bars, slices or raw histogram values).
    pub fn len(&self) -> usize {
        match self {
            ChartKind::Geo(g) => g.locations.len(),
            ChartKind::Bar(b) => b.labels.len(),
            ChartKind::Pie(p) => p.labels.len(),
            ChartKind::Histogram(h) => h.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every parallel sequence has the same length.
    pub fn is_consistent(&self) -> bool {
        match self {
            ChartKind::Geo(g) => g.locations.len() == g.z.len() && g.z.len() == g.text.len(),
            ChartKind::Bar(b) => b.labels.len() == b.values.len(),
            ChartKind::Pie(p) => p.labels.len() == p.values.len() && p.values.len() == p.colors.len(),
            ChartKind::Histogram(h) => {
                h.bins.iter().map(|b| b.count).sum::<usize>()
                    == h.values.iter().filter(|v| v.is_finite()).count()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

/// How the map projects longitude/latitude onto the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Projection {
    Equirectangular,
}

/// Geo chart: one coloured marker per location entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoChart {
    /// Country names, resolved by the renderer.
    pub locations: Vec<String>,
    /// Colour-encoded value per location.
    pub z: Vec<f64>,
    /// Hover text per location.
    pub text: Vec<String>,
    pub color_scale: ColorScale,
    pub colorbar_title: String,
    pub marker_line_color: Rgb,
    pub marker_line_width: f32,
    pub projection: Projection,
    pub show_frame: bool,
    pub show_coastlines: bool,
    pub geo_background: Rgb,
}

impl GeoChart {
    /// Observed `(min, max)` of `z`, or `None` when there are no points.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// Categories along x, values up the y axis.
    Vertical,
    /// Categories along y, values along the x axis.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    /// Category per bar, in drawing order.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub orientation: Orientation,
    pub color: Rgb,
    /// Appended to value-axis tick labels (e.g. `M` for millions).
    pub value_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Rgb>,
    /// Inner radius as a fraction of the outer radius (0 = full pie).
    pub hole: f64,
}

impl PieChart {
    /// Start/end angles in radians for every slice, clockwise from twelve
    /// o'clock like the usual pie layout.  Empty when the total is zero.
    pub fn slice_angles(&self) -> Vec<(f64, f64)> {
        let total: f64 = self.values.iter().sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut start = std::f64::consts::FRAC_PI_2;
        self.values
            .iter()
            .map(|v| {
                let sweep = v / total * std::f64::consts::TAU;
                let slice = (start, start - sweep);
                start -= sweep;
                slice
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    /// Raw observations.
    pub values: Vec<f64>,
    /// Equal-width bins spanning the observed range.
    pub bins: Vec<HistogramBin>,
    pub color: Rgb,
}
