use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use repo_dash::data::session::Dashboard;

use crate::color::LanguageColors;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Stars vs forks
// ---------------------------------------------------------------------------

/// Scatter of stars against forks, one series per language.
pub fn stars_vs_forks(ui: &mut Ui, dashboard: &Dashboard, colors: &LanguageColors) {
    Plot::new("stars_vs_forks")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("stars_count")
        .y_axis_label("forks_count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (language, points) in &dashboard.stars_vs_forks {
                plot_ui.points(
                    Points::new(points.clone())
                        .name(language)
                        .color(colors.color_for(language))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top repositories
// ---------------------------------------------------------------------------

/// Horizontal bars of the highest-starred repositories, best at the top.
pub fn top_repositories(ui: &mut Ui, dashboard: &Dashboard) {
    let n = dashboard.top.len();
    let bars: Vec<Bar> = dashboard
        .top
        .iter()
        .enumerate()
        .map(|(rank, repo)| {
            Bar::new((n - rank) as f64, repo.stars.unwrap_or(0) as f64)
                .name(&repo.repository)
                .fill(Color32::from_rgb(135, 206, 235))
        })
        .collect();
    let labels: Vec<String> = dashboard
        .top
        .iter()
        .map(|repo| repo.repository.clone())
        .collect();

    Plot::new("top_repositories")
        .height(CHART_HEIGHT)
        .x_axis_label("Stars")
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > f64::EPSILON || pos < 1.0 || pos > n as f64 {
                return String::new();
            }
            labels[n - pos as usize].clone()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Stars"));
        });
}

// ---------------------------------------------------------------------------
// Language popularity
// ---------------------------------------------------------------------------

/// Vertical bars of repositories per language.
pub fn language_counts(ui: &mut Ui, dashboard: &Dashboard, colors: &LanguageColors) {
    let bars: Vec<Bar> = dashboard
        .languages
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let name = entry.value.to_string();
            Bar::new(i as f64, entry.count as f64)
                .fill(colors.color_for(&name))
                .name(name)
        })
        .collect();
    let labels: Vec<String> = dashboard
        .languages
        .iter()
        .map(|entry| entry.value.to_string())
        .collect();

    Plot::new("language_counts")
        .height(CHART_HEIGHT)
        .x_axis_label("Programming Language")
        .y_axis_label("Number of Repositories")
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > f64::EPSILON || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Repositories"));
        });
}
