//! Controls window: manual BUY/SELL, AI auto order, and model retraining.

use crate::engine::status::CommandStatus;
use crate::types::OrderSide;
use crate::ui::colors;
use crate::ui::window::{AppState, AppWindow};
use eframe::egui::{self, Color32, RichText};

pub struct ControlsView {
    open: bool,
}

impl Default for ControlsView {
    fn default() -> Self {
        Self { open: true }
    }
}

impl AppWindow for ControlsView {
    fn name(&self) -> &str {
        "Controls"
    }
    fn is_open(&self) -> bool {
        self.open
    }
    fn toggle(&mut self) {
        self.open = !self.open;
    }

    fn show(&mut self, ctx: &egui::Context, state: &AppState<'_>) {
        let statuses = &state.dashboard.statuses;
        egui::Window::new(self.name())
            .open(&mut self.open)
            .default_pos([740.0, 200.0])
            .show(ctx, |ui| {
                ui.label("Manual trade");
                ui.horizontal(|ui| {
                    for (side, color) in [
                        (OrderSide::Buy, colors::BUY),
                        (OrderSide::Sell, colors::SELL),
                        (OrderSide::Auto, colors::AUTO),
                    ] {
                        let caption = match side {
                            OrderSide::Auto => "AUTO ORDER".to_owned(),
                            other => other.to_string(),
                        };
                        if action_button(ui, &caption, color).clicked() {
                            state.commands.submit_order(side);
                        }
                    }
                });
                status_line(ui, &statuses.trade);

                ui.separator();
                ui.label("Model");
                if action_button(ui, "TRAIN AI", colors::TRAIN).clicked() {
                    state.commands.trigger_retrain();
                }
                status_line(ui, &statuses.train);
            });
    }
}

fn action_button(ui: &mut egui::Ui, caption: &str, fill: Color32) -> egui::Response {
    ui.add(egui::Button::new(RichText::new(caption).strong().color(Color32::WHITE)).fill(fill))
}

fn status_line(ui: &mut egui::Ui, status: &CommandStatus) {
    ui.horizontal(|ui| {
        if status.is_in_flight() {
            ui.spinner();
        }
        ui.label(RichText::new(status.text()).color(colors::command(status)));
    });
}
