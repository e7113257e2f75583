use eframe::egui::{self, Color32, RichText, Ui};

use repo_dash::config::DashboardConfig;

use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RepoDashApp {
    pub state: AppState,
}

impl RepoDashApp {
    /// Build the app and open the configured dataset, if any.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::from_config(config);
        if let Some(path) = &config.dataset {
            state.open(path);
        }
        Self { state }
    }
}

impl eframe::App for RepoDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: policy and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    central_panel(ui, &self.state);
                });
        });
    }
}

fn central_panel(ui: &mut Ui, state: &AppState) {
    let (Some(session), Some(dashboard)) = (&state.session, &state.dashboard) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a repository dataset to begin  (File → Open…)");
        });
        return;
    };

    tables::dataset_overview(ui, session);
    ui.separator();

    ui.label(RichText::new(dashboard.resolve_summary.to_string()).italics());
    for notice in &dashboard.notices {
        ui.label(RichText::new(notice.to_string()).color(Color32::from_rgb(220, 140, 0)));
    }

    ui.add_space(8.0);
    ui.heading(dashboard.headline());
    ui.strong("Dataset Summary");
    tables::summary_stats(ui, &dashboard.stats);
    ui.separator();

    ui.heading("Stars vs Forks");
    plot::stars_vs_forks(ui, dashboard, &state.colors);
    ui.separator();

    ui.heading(format!("Top {} Repositories by Stars", dashboard.top.len()));
    plot::top_repositories(ui, dashboard);
    ui.separator();

    ui.heading("Most Popular Programming Languages");
    plot::language_counts(ui, dashboard, &state.colors);

    if state.show_raw {
        ui.separator();
        ui.heading("Raw Data");
        tables::raw_data(ui, &dashboard.view);
    }
}
