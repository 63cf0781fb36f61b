use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AbsorbanceApp {
    pub state: AppState,
}

impl AbsorbanceApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AbsorbanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: per-image values ----
        egui::SidePanel::right("values_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::values_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::absorbance_plot(ui, &self.state);
        });
    }
}
