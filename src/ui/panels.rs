use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use crate::color::wavelength_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Right side panel – per-image values
// ---------------------------------------------------------------------------

/// Render the table of wavelength, absorbance and source image.
pub fn values_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Images");
    ui.separator();

    if state.series.is_empty() {
        ui.label("No images processed.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            Grid::new("values_grid")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("nm");
                    ui.strong("Absorbance");
                    ui.strong("Image");
                    ui.end_row();

                    for point in &state.series {
                        ui.label(
                            RichText::new(format!("{}", point.wavelength))
                                .color(wavelength_color(point.wavelength)),
                        );
                        ui.label(format!("{:.4}", point.absorbance));
                        ui.label(&point.source);
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} images plotted",
            state.folder_label,
            state.series.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_markers, "Markers")
            .clicked()
        {
            state.show_markers = !state.show_markers;
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export absorbance")
        .add_filter("CSV", &["csv"])
        .set_file_name("absorbance.csv")
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
