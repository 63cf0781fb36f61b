mod app;
mod color;
mod data;
mod select;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::AbsorbanceApp;
use data::absorbance::absorbance_series;
use data::model::AnalysisConfig;
use eframe::egui;
use select::{user_interface, ConsolePrompt};
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::default();
    let cwd = std::env::current_dir().context("reading current directory")?;

    let mut prompts = ConsolePrompt::stdio();
    let mut stdout = std::io::stdout();
    let Some((folder, dataset)) = user_interface(&cwd, &mut prompts, &mut stdout)? else {
        return Ok(());
    };
    if dataset.is_empty() {
        println!("Nothing to plot");
        return Ok(());
    }

    let series = absorbance_series(&dataset, &config)
        .with_context(|| format!("computing absorbance for {}", folder.display()))?;
    for point in &series {
        log::info!("{point}");
    }

    let label = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string());
    let state = AppState::new(label, series);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    // Blocks until the window is closed.
    eframe::run_native(
        ui::plot::PLOT_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(AbsorbanceApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
