use eframe::egui::{self, Color32, RichText, Ui};

use repo_dash::data::filter::{ALL_LANGUAGES, LanguageSelection, StarRange};
use repo_dash::data::resolve::MissingValuePolicy;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – policy and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Handle Missing Data");
    ui.separator();

    if state.session.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.label("How do you want to handle missing values?");
    let mut policy = state.policy;
    for option in MissingValuePolicy::ALL {
        ui.radio_value(&mut policy, option, option.label());
    }
    if policy != state.policy {
        state.set_policy(policy);
    }

    ui.add_space(8.0);
    ui.heading("Filter Options");
    ui.separator();

    // ---- Language ----
    ui.strong("Select Programming Language");
    let mut language = state.params.language.clone();
    egui::ComboBox::from_id_salt("language")
        .selected_text(language.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut language, LanguageSelection::All, ALL_LANGUAGES);
            for lang in &state.options.languages {
                ui.selectable_value(&mut language, LanguageSelection::Only(lang.clone()), lang);
            }
        });
    if language != state.params.language {
        state.set_language(language);
    }

    ui.add_space(8.0);

    // ---- Star range ----
    ui.strong("Select star range");
    let bounds = state.options.bounds;
    let mut stars = state.params.stars;
    ui.add(egui::Slider::new(&mut stars.min, bounds.min..=bounds.max).text("min"));
    ui.add(egui::Slider::new(&mut stars.max, bounds.min..=bounds.max).text("max"));
    if stars != state.params.stars {
        // Dragging one handle past the other moves both.
        let stars = if stars.min > stars.max {
            if stars.min != state.params.stars.min {
                StarRange::new(stars.min, stars.min)
            } else {
                StarRange::new(stars.max, stars.max)
            }
        } else {
            stars
        };
        state.set_star_range(stars);
    }

    ui.add_space(8.0);
    ui.checkbox(&mut state.show_raw, "Show Raw Data");
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

        if let (Some(session), Some(dashboard)) = (&state.session, &state.dashboard) {
            ui.label(format!(
                "{} repositories loaded, {} visible",
                session.table().len(),
                dashboard.view.len()
            ));
        }

        if let Some(path) = &state.dataset_path {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
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
        .set_title("Open repository dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
