//! Market window: price, technical indicators, and regime.

use crate::ui::window::{AppState, AppWindow, value_row};
use eframe::egui;

pub struct MarketView {
    open: bool,
}

impl Default for MarketView {
    fn default() -> Self {
        Self { open: true }
    }
}

impl AppWindow for MarketView {
    fn name(&self) -> &str {
        "Market"
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
            .default_pos([16.0, 200.0])
            .show(ctx, |ui| {
                egui::Grid::new("market_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        value_row(ui, "Symbol", &v.symbol);
                        value_row(ui, "Price", &v.price);
                        value_row(ui, "RSI", &v.rsi);
                        value_row(ui, "RSI zone", &v.rsi_zone);
                        value_row(ui, "MACD hist", &v.macd_hist);
                        value_row(ui, "ATR", &v.atr);
                        value_row(ui, "ADX", &v.adx);
                        value_row(ui, "Regime", &v.regime);
                    });
            });
    }
}
