//! Signals window: pre/confirm flags with their timestamps, loop start, and
//! open trade count.

use crate::engine::display::SignalState;
use crate::ui::colors;
use crate::ui::window::{AppState, AppWindow, value_row};
use eframe::egui::{self, RichText};

pub struct SignalsView {
    open: bool,
}

impl Default for SignalsView {
    fn default() -> Self {
        Self { open: true }
    }
}

impl AppWindow for SignalsView {
    fn name(&self) -> &str {
        "Signals"
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
            .default_pos([500.0, 200.0])
            .show(ctx, |ui| {
                egui::Grid::new("signals_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        signal_row(ui, "Pre-signal", v.pre_signal);
                        value_row(ui, "Pre time", &v.pre_ts);
                        signal_row(ui, "Confirm signal", v.confirm_signal);
                        value_row(ui, "Confirm time", &v.confirm_ts);
                        value_row(ui, "Loop started", &v.loop_started);
                        value_row(ui, "Open trades", &v.open_trades);
                    });
            });
    }
}

fn signal_row(ui: &mut egui::Ui, label: &str, signal: SignalState) {
    ui.label(label);
    ui.label(RichText::new(signal.text()).strong().color(colors::signal(signal)))
        .on_hover_text(signal.class());
    ui.end_row();
}
