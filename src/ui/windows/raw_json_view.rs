//! Raw JSON window: the last payload exactly as received, for troubleshooting.

use crate::ui::window::{AppState, AppWindow};
use eframe::egui;

#[derive(Default)]
pub struct RawJsonView {
    open: bool,
}

impl AppWindow for RawJsonView {
    fn name(&self) -> &str {
        "Raw JSON"
    }
    fn is_open(&self) -> bool {
        self.open
    }
    fn toggle(&mut self) {
        self.open = !self.open;
    }

    fn show(&mut self, ctx: &egui::Context, state: &AppState<'_>) {
        let dashboard = state.dashboard;
        egui::Window::new(self.name())
            .open(&mut self.open)
            .default_size([420.0, 360.0])
            .show(ctx, |ui| {
                ui.label(format!("Frames received: {}", dashboard.frames_seen));
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.monospace(dashboard.view.raw_json.as_str());
                });
            });
    }
}
