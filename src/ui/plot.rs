use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use launch_dash::engine::OutcomeView;

use crate::color::outcome_color;
use crate::state::{AppState, Session};

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render the outcome pie and the payload scatter side by side.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view launch records  (File → Open…)");
            });
            return;
        }
    };

    ui.columns(2, |cols: &mut [Ui]| {
        outcome_pie(&mut cols[0], session);
        correlation_scatter(&mut cols[1], session);
    });
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(text);
    });
}

/// Pie chart of the outcome view.
fn outcome_pie(ui: &mut Ui, session: &Session) {
    let view = &session.outcome_view;
    ui.heading(view.title());

    if view.is_empty() {
        placeholder(ui, "No launches recorded for this site.");
        return;
    }

    // (legend label, count, colour) per slice
    let slices: Vec<(String, usize, Color32)> = match view {
        OutcomeView::BySite(counts) => counts
            .iter()
            .map(|c| (c.site.clone(), c.count, session.site_colors.color_for(&c.site)))
            .collect(),
        OutcomeView::ByOutcome { counts, .. } => counts
            .iter()
            .map(|c| (c.class.to_string(), c.count, outcome_color(c.class)))
            .collect(),
    };
    let counts: Vec<usize> = slices.iter().map(|(_, n, _)| *n).collect();
    let spans = pie_spans(&counts);

    Plot::new("outcome_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for ((label, _, color), &(start, end)) in slices.iter().zip(&spans) {
                // same name merges the pieces into one legend entry
                for piece in wedge_pieces(start, end) {
                    let points: PlotPoints = piece.into_iter().collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(label)
                            .fill_color(*color)
                            .stroke(Stroke::new(1.0, *color)),
                    );
                }

                let [x, y] = point_on_circle((start + end) / 2.0, 0.65);
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), format!("{:.1}%", (end - start) * 100.0))
                        .color(Color32::WHITE),
                );
            }
        });
}

/// Scatter of payload mass against outcome class, one series per booster
/// category.
fn correlation_scatter(ui: &mut Ui, session: &Session) {
    let view = &session.correlation_view;
    ui.heading(view.title.as_str());

    if view.is_empty() {
        placeholder(ui, "No launches in the selected payload range.");
        return;
    }

    let [lo, hi] = session.selection.payload_range();

    Plot::new("correlation_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(lo)
        .include_x(hi)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in view.booster_categories() {
                let points: PlotPoints = view
                    .points
                    .iter()
                    .filter(|p| p.booster_category == category)
                    .map(|p| [p.payload_mass_kg, f64::from(p.outcome.value())])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(session.booster_colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Points table (bottom panel)
// ---------------------------------------------------------------------------

/// Tabular listing of the correlation view.
pub fn points_table(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        return;
    };
    let view = &session.correlation_view;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("class");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, view.points.len(), |mut row| {
                let p = &view.points[row.index()];
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.colored_label(outcome_color(p.outcome), p.outcome.to_string());
                });
                row.col(|ui| {
                    ui.label(p.booster_category.as_str());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Split a full turn into consecutive `(start, end)` fractions, one per
/// count. Empty when the counts sum to zero.
fn pie_spans(counts: &[usize]) -> Vec<(f64, f64)> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    counts
        .iter()
        .map(|&n| {
            let end = start + n as f64 / total as f64;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Point at `radius` for a fraction of a turn, starting at 12 o'clock and
/// running clockwise.
fn point_on_circle(fraction: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - fraction * TAU;
    [radius * angle.cos(), radius * angle.sin()]
}

/// A slice cut into wedges of at most a quarter turn. egui only fills
/// convex polygons, so a wide slice cannot be drawn as one outline.
fn wedge_pieces(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let n = ((end - start) / 0.25).ceil().max(1.0) as usize;
    let width = (end - start) / n as f64;
    (0..n)
        .map(|i| {
            let a = start + i as f64 * width;
            wedge_points(a, a + width)
        })
        .collect()
}

/// Closed outline of a unit-circle wedge: centre, then the arc.
fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let segments = (((end - start) * 128.0).ceil() as usize).max(2);
    std::iter::once([0.0, 0.0])
        .chain((0..=segments).map(|i| {
            let f = start + (end - start) * i as f64 / segments as f64;
            point_on_circle(f, 1.0)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_spans_cover_full_turn() {
        let spans = pie_spans(&[15, 10]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].0, 0.0);
        assert!((spans[0].1 - 0.6).abs() < 1e-12);
        assert_eq!(spans[0].1, spans[1].0);
        assert!((spans[1].1 - 1.0).abs() < 1e-12);
        assert!(pie_spans(&[]).is_empty());
        assert!(pie_spans(&[0, 0]).is_empty());
    }

    #[test]
    fn test_wide_slice_split_into_convex_pieces() {
        assert_eq!(wedge_pieces(0.0, 0.2).len(), 1);
        assert_eq!(wedge_pieces(0.0, 0.6).len(), 3);
        let whole = wedge_pieces(0.0, 1.0);
        assert_eq!(whole.len(), 4);
        let last = whole[3].last().unwrap();
        assert!(last[0].abs() < 1e-9 && (last[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wedge_starts_at_centre_and_stays_on_unit_circle() {
        let pts = wedge_points(0.0, 0.25);
        assert_eq!(pts[0], [0.0, 0.0]);
        for p in &pts[1..] {
            assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-9);
        }
        // 12 o'clock to 3 o'clock
        let first = pts[1];
        let last = pts[pts.len() - 1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }
}
