use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use threat_lens::charts::geo::country_centroid;
use threat_lens::charts::{
    BarChart as BarDescription, ChartDescription, ChartKind, GeoChart, HistogramChart, Orientation,
    PieChart,
};
use threat_lens::DashboardFrame;

use super::color32;

const PLOT_HEIGHT: f32 = 320.0;
const MAP_HEIGHT: f32 = 420.0;
const MARKER_RADIUS: f32 = 6.0;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the six charts of `frame` in a two-column grid.
pub fn chart_grid(ui: &mut Ui, frame: &DashboardFrame) {
    let rows = [
        [&frame.map, &frame.country_loss],
        [&frame.attack_types, &frame.attack_sources],
        [&frame.defenses, &frame.resolution_time],
    ];

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for pair in rows {
                ui.columns(2, |cols| {
                    for (col, chart) in cols.iter_mut().zip(pair) {
                        chart_panel(col, chart);
                    }
                });
                ui.add_space(20.0);
            }
        });
}

fn chart_panel(ui: &mut Ui, chart: &ChartDescription) {
    ui.label(
        RichText::new(&chart.title)
            .strong()
            .color(color32(chart.style.font_color)),
    );
    if chart.kind.is_empty() {
        ui.label(RichText::new("No incidents for this selection").weak());
    }

    match &chart.kind {
        ChartKind::Geo(geo) => geo_plot(ui, &chart.title, geo),
        ChartKind::Bar(bar) => bar_plot(ui, &chart.title, bar),
        ChartKind::Pie(pie) => pie_plot(ui, &chart.title, pie),
        ChartKind::Histogram(hist) => histogram_plot(ui, &chart.title, hist),
    }
}

// ---------------------------------------------------------------------------
// Geo map
// ---------------------------------------------------------------------------

/// Markers sharing a colour bucket are drawn as one plot series.
const COLOR_BUCKETS: usize = 16;

/// One colour bucket of map markers.
#[derive(Debug, Default, Clone, PartialEq)]
struct MarkerBucket {
    positions: Vec<[f64; 2]>,
    /// Smallest and largest value that landed in the bucket.
    range: Option<(f64, f64)>,
}

/// Index of the colour bucket for `value` on `[min, max]`.  A degenerate
/// range maps everything onto the top colour.
fn color_bucket(value: f64, min: f64, max: f64) -> usize {
    if max <= min || !value.is_finite() {
        return COLOR_BUCKETS - 1;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    (t * (COLOR_BUCKETS - 1) as f64).round() as usize
}

/// Group every placeable marker by colour.  Rows keep their own marker, so
/// repeated countries stay repeated; countries without a centroid are dropped.
fn marker_buckets(geo: &GeoChart, z_min: f64, z_max: f64) -> Vec<MarkerBucket> {
    let mut buckets = vec![MarkerBucket::default(); COLOR_BUCKETS];
    for (location, &z) in geo.locations.iter().zip(&geo.z) {
        let Some((lon, lat)) = country_centroid(location) else {
            continue;
        };
        let bucket = &mut buckets[color_bucket(z, z_min, z_max)];
        bucket.positions.push([lon, lat]);
        bucket.range = Some(match bucket.range {
            None => (z, z),
            Some((lo, hi)) => (lo.min(z), hi.max(z)),
        });
    }
    buckets
}

fn geo_plot(ui: &mut Ui, id: &str, geo: &GeoChart) {
    let (z_min, z_max) = geo.z_range().unwrap_or((0.0, 0.0));
    let buckets = marker_buckets(geo, z_min, z_max);

    // Hover text per distinct marker position.
    let mut sites: Vec<([f64; 2], String)> = Vec::new();
    for (location, text) in geo.locations.iter().zip(&geo.text) {
        if let Some((lon, lat)) = country_centroid(location) {
            if !sites.iter().any(|(pos, _)| *pos == [lon, lat]) {
                sites.push(([lon, lat], text.clone()));
            }
        }
    }

    Plot::new(id)
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .show_axes(geo.show_frame)
        .show_grid(geo.show_frame)
        .allow_scroll(false)
        .label_formatter(move |name, value| {
            if name.is_empty() {
                return String::new();
            }
            let site = sites
                .iter()
                .find(|(pos, _)| (pos[0] - value.x).abs() < 1.0 && (pos[1] - value.y).abs() < 1.0);
            match site {
                Some((_, text)) => format!("{text}\n{name}"),
                None => format!("{name}\n({:.1}, {:.1})", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            let background = color32(geo.geo_background);
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(vec![
                    [-180.0, -90.0],
                    [180.0, -90.0],
                    [180.0, 90.0],
                    [-180.0, 90.0],
                ]))
                .fill_color(background)
                .stroke(Stroke::new(0.5, Color32::DARK_GRAY)),
            );

            let outline: Vec<[f64; 2]> = buckets
                .iter()
                .flat_map(|b| b.positions.iter().copied())
                .collect();
            if !outline.is_empty() {
                plot_ui.points(
                    Points::new(outline)
                        .radius(MARKER_RADIUS + geo.marker_line_width)
                        .color(color32(geo.marker_line_color))
                        .filled(true),
                );
            }

            let unit = geo.colorbar_title.to_lowercase();
            for (i, bucket) in buckets.iter().enumerate() {
                let Some((lo, hi)) = bucket.range else {
                    continue;
                };
                let t = i as f64 / (COLOR_BUCKETS - 1) as f64;
                let fill = if z_max > z_min {
                    geo.color_scale.sample(t)
                } else {
                    geo.color_scale.color_for(lo, z_min, z_max)
                };
                plot_ui.points(
                    Points::new(bucket.positions.clone())
                        .radius(MARKER_RADIUS)
                        .color(color32(fill))
                        .filled(true)
                        .name(format!("{lo:.0} - {hi:.0} {unit}")),
                );
            }
        });

    colorbar(ui, geo, z_min, z_max);
}

/// Horizontal gradient strip followed by the value range.
fn colorbar(ui: &mut Ui, geo: &GeoChart, z_min: f64, z_max: f64) {
    const SEGMENTS: usize = 32;

    ui.horizontal(|ui: &mut Ui| {
        ui.label(&geo.colorbar_title);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(200.0, 12.0), Sense::hover());
        let step = rect.width() / SEGMENTS as f32;
        for i in 0..SEGMENTS {
            let t = i as f64 / (SEGMENTS - 1) as f64;
            let left = rect.left() + step * i as f32;
            let segment = egui::Rect::from_min_max(
                egui::pos2(left, rect.top()),
                egui::pos2(left + step, rect.bottom()),
            );
            ui.painter()
                .rect_filled(segment, 0.0, color32(geo.color_scale.sample(t)));
        }
        ui.label(format!("{z_min:.0} - {z_max:.0}"));
    });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, id: &str, chart: &BarDescription) {
    let color = color32(chart.color);
    let bars: Vec<Bar> = chart
        .labels
        .iter()
        .zip(&chart.values)
        .enumerate()
        .map(|(i, (label, &value))| Bar::new(i as f64, value).name(label).fill(color))
        .collect();

    let mut bars = BarChart::new(bars).width(0.7);
    if chart.orientation == Orientation::Horizontal {
        bars = bars.horizontal();
    }

    let labels = chart.labels.clone();
    let category_axis = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        category_label(&labels, mark.value)
    };
    let suffix = chart.value_suffix.clone().unwrap_or_default();
    let value_axis =
        move |mark: GridMark, _range: &RangeInclusive<f64>| value_tick(mark.value, &suffix);

    let plot = Plot::new(id)
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false);
    let plot = match chart.orientation {
        Orientation::Vertical => plot
            .x_axis_formatter(category_axis)
            .y_axis_formatter(value_axis)
            .include_y(0.0),
        Orientation::Horizontal => plot
            .y_axis_formatter(category_axis)
            .x_axis_formatter(value_axis)
            .include_x(0.0),
    };

    plot.show(ui, |plot_ui| plot_ui.bar_chart(bars));
}

/// Value-axis tick text: at most two decimals, trailing zeros dropped.
fn value_tick(value: f64, suffix: &str) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    let text = if text == "-0" { "0" } else { text };
    format!("{text}{suffix}")
}

/// Category name for an axis grid mark sitting on a bar position.
fn category_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

fn pie_plot(ui: &mut Ui, id: &str, pie: &PieChart) {
    const ARC_STEP: f64 = 0.05;
    let total: f64 = pie.values.iter().sum();
    let slices = pie.slice_angles();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(egui_plot::Legend::default())
        .show(ui, |plot_ui| {
            for (((label, &value), &color), &(start, end)) in pie
                .labels
                .iter()
                .zip(&pie.values)
                .zip(&pie.colors)
                .zip(&slices)
            {
                let fill = color32(color);
                let steps = (((start - end) / ARC_STEP).ceil() as usize).max(1);
                let step = (start - end) / steps as f64;

                // Ring segments are drawn as convex quads.
                for k in 0..steps {
                    let a0 = start - step * k as f64;
                    let a1 = a0 - step;
                    let quad = vec![
                        [a0.cos(), a0.sin()],
                        [a1.cos(), a1.sin()],
                        [pie.hole * a1.cos(), pie.hole * a1.sin()],
                        [pie.hole * a0.cos(), pie.hole * a0.sin()],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(quad))
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, fill))
                            .name(label),
                    );
                }

                let mid = (start + end) / 2.0;
                let r = (1.0 + pie.hole) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(r * mid.cos(), r * mid.sin()),
                    RichText::new(format!("{:.1}%", value / total * 100.0))
                        .color(Color32::WHITE),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, id: &str, hist: &HistogramChart) {
    let color = color32(hist.color);
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(color)
                .stroke(Stroke::new(0.5, Color32::BLACK))
                .name(format!("{:.1} - {:.1} h", bin.start, bin.end))
        })
        .collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_label("Hours")
        .y_axis_label("Incidents")
        .include_y(0.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));
}
