//! AI window: model probabilities, confidence, direction, and engine mode.

use crate::ui::window::{AppState, AppWindow, value_row};
use eframe::egui;

pub struct AiView {
    open: bool,
}

impl Default for AiView {
    fn default() -> Self {
        Self { open: true }
    }
}

impl AppWindow for AiView {
    fn name(&self) -> &str {
        "AI Prediction"
    }
    fn is_open(&self) -> bool {
        self.open
    }
    fn toggle(&mut self) {
        self.open = !self.open;
    }

    fn show(&mut self, ctx: &egui::Context, state: &AppState<'_>) {
        let v = &state.dashboard.view;
        egui::Window::new(self.name())
            .open(&mut self.open)
            .default_pos([260.0, 200.0])
            .show(ctx, |ui| {
                egui::Grid::new("ai_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        value_row(ui, "Prob. down", &v.ai_down);
                        value_row(ui, "Confidence", &v.ai_conf);
                        value_row(ui, "Direction", &v.ai_dir);
                        value_row(ui, "Engine", v.use_lstm);
                    });
            });
    }
}
