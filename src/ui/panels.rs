use eframe::egui::{self, Color32, RichText, Ui};

use launch_dash::config::SliderConfig;
use launch_dash::engine::ALL_SITES;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render the control panel. Both controls feed one combined selection
/// update per frame.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    // Copy out what the widgets edit so `state` can be mutated afterwards.
    let sites: Vec<String> = session
        .dataset
        .all_sites()
        .into_iter()
        .map(str::to_string)
        .collect();
    let (min_payload, max_payload) = (session.dataset.min_payload(), session.dataset.max_payload());
    let mut raw_site = session.selection.site().to_string();
    let [mut lo, mut hi] = session.selection.payload_range();
    let slider = state.config.slider;
    let mut changed = false;

    ui.strong("Launch site");
    egui::ComboBox::from_id_salt("site_select")
        .selected_text(site_label(&raw_site))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            changed |= ui
                .selectable_value(&mut raw_site, ALL_SITES.to_string(), site_label(ALL_SITES))
                .changed();
            for site in &sites {
                changed |= ui
                    .selectable_value(&mut raw_site, site.clone(), site.as_str())
                    .changed();
            }
        });
    ui.add_space(8.0);

    ui.strong("Payload range (kg)");
    changed |= ui
        .add(
            egui::Slider::new(&mut lo, slider.min..=slider.max)
                .step_by(slider.step)
                .text("from"),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut hi, slider.min..=slider.max)
                .step_by(slider.step)
                .text("to"),
        )
        .changed();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for label in mark_labels(&slider) {
            ui.small(label);
        }
    });

    if ui.small_button("Reset").clicked() {
        raw_site = ALL_SITES.to_string();
        lo = min_payload;
        hi = max_payload;
        changed = true;
    }

    if changed {
        state.select(&raw_site, [lo, hi]);
    }

    ui.separator();
    if let Some(session) = &state.session {
        ui.label(format!(
            "{} launches at {}",
            session.outcome_view.total(),
            session.selection.site().title()
        ));
        ui.label(format!(
            "{} launches in payload range",
            session.correlation_view.len()
        ));
    }
}

/// Tick labels shown under the payload sliders, one per slider step.
fn mark_labels(slider: &SliderConfig) -> Vec<String> {
    slider.marks().into_iter().map(|m| format!("{m:.0}")).collect()
}

fn site_label(raw: &str) -> &str {
    if raw == ALL_SITES {
        "All Sites"
    } else {
        raw
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} launches loaded from {} sites",
                session.dataset.len(),
                session.dataset.sites().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match launch_dash::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
