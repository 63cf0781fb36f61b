use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::color::wavelength_color;
use crate::state::AppState;

pub const PLOT_TITLE: &str = "Absorbance vs Wavelength";

// ---------------------------------------------------------------------------
// Absorbance plot (central panel)
// ---------------------------------------------------------------------------

/// Render mean absorbance against wavelength in the central panel.
pub fn absorbance_plot(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(PLOT_TITLE);
    });

    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No absorbance values to plot.");
        });
        return;
    }

    Plot::new("absorbance_plot")
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Absorbance")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = state.plot_points().into_iter().collect();
            plot_ui.line(
                Line::new(points)
                    .name("mean absorbance")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );

            if !state.show_markers {
                return;
            }
            // One marker per image so its wavelength colour and name show on hover.
            for point in &state.series {
                let marker = Points::new(vec![[point.wavelength, point.absorbance]])
                    .name(&point.source)
                    .color(wavelength_color(point.wavelength))
                    .radius(5.0);
                plot_ui.points(marker);
            }
        });
}
