mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::LaunchDashApp;
use eframe::egui;
use launch_dash::config::DashboardConfig;
use launch_dash::data::loader;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load()?;

    // Command-line path wins over the config file's data_path.
    let data_path: Option<PathBuf> = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone());

    let mut state = AppState::new(config.clone());
    if let Some(path) = data_path {
        let dataset = loader::load_file(&path)
            .with_context(|| format!("loading launch records from {}", path.display()))?;
        state.set_dataset(dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Dash – Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
