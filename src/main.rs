mod app;
mod color;
mod state;
mod ui;

use app::RepoDashApp;
use eframe::egui;
use repo_dash::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load().unwrap_or_else(|e| {
        log::error!("Ignoring settings: {e:#}");
        DashboardConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Repo Dash – GitHub Repository Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(RepoDashApp::new(&config)))),
    )
}
