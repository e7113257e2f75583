use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use repo_dash::data::aggregate::ColumnStats;
use repo_dash::data::model::Table;
use repo_dash::data::session::Session;

const PREVIEW_ROWS: usize = 5;

/// Column list, schema check and the first rows of the loaded table.
pub fn dataset_overview(ui: &mut Ui, session: &Session) {
    ui.heading("Columns in the dataset");
    ui.label(session.table().column_names.join(", "));

    match session.schema_notice() {
        Some(notice) => {
            ui.label(RichText::new(notice.to_string()).color(Color32::RED));
        }
        None => {
            ui.label(
                RichText::new("All required columns are present!")
                    .color(Color32::from_rgb(40, 160, 70)),
            );
        }
    }

    ui.add_space(8.0);
    ui.heading("Preview of the Dataset");
    cell_grid(ui, "preview", &session.table().head(PREVIEW_ROWS));
}

/// Summary statistics laid out like `DataFrame.describe()`: one column per
/// numeric field, one row per statistic.
pub fn summary_stats(ui: &mut Ui, stats: &[ColumnStats]) {
    if stats.is_empty() {
        ui.label("No numeric columns.");
        return;
    }
    egui::ScrollArea::horizontal()
        .id_salt("summary_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("summary_stats")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    for s in stats {
                        ui.strong(&s.column);
                    }
                    ui.end_row();

                    let rows: Vec<_> = stats.iter().map(ColumnStats::entries).collect();
                    for stat in 0..rows[0].len() {
                        ui.strong(rows[0][stat].0);
                        for entries in &rows {
                            ui.monospace(fmt_stat(entries[stat].1));
                        }
                        ui.end_row();
                    }
                });
        });
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "NaN".to_string(),
    }
}

/// Every row of the filtered view in a scrollable table.
pub fn raw_data(ui: &mut Ui, view: &Table) {
    if view.column_names.is_empty() {
        return;
    }
    egui::ScrollArea::horizontal()
        .id_salt("raw_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .columns(Column::auto().at_least(60.0), view.column_names.len())
                .min_scrolled_height(0.0)
                .max_scroll_height(400.0)
                .header(22.0, |mut header| {
                    for name in &view.column_names {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, view.len(), |mut row| {
                        let record = &view.rows[row.index()];
                        for name in &view.column_names {
                            row.col(|ui| {
                                ui.label(record.get(name).to_string());
                            });
                        }
                    });
                });
        });
}

fn cell_grid(ui: &mut Ui, id: &str, table: &Table) {
    egui::ScrollArea::horizontal().id_salt(id).show(ui, |ui: &mut Ui| {
        egui::Grid::new(id).striped(true).show(ui, |ui: &mut Ui| {
            for name in &table.column_names {
                ui.strong(name);
            }
            ui.end_row();
            for record in &table.rows {
                for name in &table.column_names {
                    ui.label(record.get(name).to_string());
                }
                ui.end_row();
            }
        });
    });
}
