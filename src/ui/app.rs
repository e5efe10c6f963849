//! Application orchestrator: owns the dashboard state and drives the window
//! system.

use std::sync::mpsc::{self as std_mpsc, Receiver as StdReceiver};

use crate::config::Config;
use crate::engine::state::DashboardState;
use crate::engine::status::ConnectionStatus;
use crate::network::commands::CommandDispatcher;
use crate::network::{AppMessage, UiSender, client};
use crate::ui::colors;
use crate::ui::window::{AppState, AppWindow};
use crate::ui::windows::{
    ai_view::AiView, controls_view::ControlsView, market_view::MarketView,
    raw_json_view::RawJsonView, signals_view::SignalsView,
};
use eframe::egui::{self, RichText};
use tokio::runtime::Runtime;

// ── App struct ─────────────────────────────────────────────────────────────────

/// The top-level application, implementing [`eframe::App`].
///
/// `App` only:
/// 1. Drains the incoming message channel into [`DashboardState`].
/// 2. Renders the header panel (symbol, connection, headline numbers).
/// 3. Delegates every detail window to the registered `windows` vec.
pub struct App {
    rx: StdReceiver<AppMessage>,
    state: DashboardState,
    commands: CommandDispatcher<egui::Context>,
    windows: Vec<Box<dyn AppWindow>>,
    /// Hosts the stream listener and command tasks; dropped last.
    _runtime: Runtime,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime, config: &Config) -> Self {
        let (tx, rx) = std_mpsc::channel();
        let ui = UiSender::new(tx, cc.egui_ctx.clone());

        // The one stream connection for the lifetime of the process.
        runtime.spawn(client::run_stream_listener(config.stream_url(), ui.clone()));

        let commands =
            CommandDispatcher::new(runtime.handle().clone(), reqwest::Client::new(), config, ui);

        // Register all detail windows. Adding a new window = one line here.
        let windows: Vec<Box<dyn AppWindow>> = vec![
            Box::new(MarketView::default()),
            Box::new(AiView::default()),
            Box::new(SignalsView::default()),
            Box::new(ControlsView::default()),
            Box::new(RawJsonView::default()),
        ];

        Self {
            rx,
            state: DashboardState::default(),
            commands,
            windows,
            _runtime: runtime,
        }
    }
}

fn status_pill(ui: &mut egui::Ui, status: ConnectionStatus) {
    ui.label(RichText::new("●").color(colors::connection(status)))
        .on_hover_text(status.marker_class());
    ui.label(status.label());
}

fn headline(ui: &mut egui::Ui, caption: &str, value: &str) {
    ui.vertical(|ui| {
        ui.small(caption);
        ui.label(RichText::new(value).size(28.0).strong().monospace());
    });
}

// ── eframe::App ────────────────────────────────────────────────────────────────

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── 1. Drain incoming messages ────────────────────────────────────────
        while let Ok(msg) = self.rx.try_recv() {
            self.state.apply(msg);
        }

        // ── 2. Header panel ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let view = &self.state.view;
            ui.horizontal(|ui| {
                ui.heading("AI Trading Dashboard");
                ui.label(RichText::new(&view.symbol).strong().monospace());
                ui.separator();
                status_pill(ui, self.state.connection);
            });

            ui.horizontal(|ui| {
                headline(ui, "Price", &view.price_big);
                ui.add_space(24.0);
                headline(ui, "AI Prob. Up", &view.ai_up_big);
                ui.add_space(24.0);
                ui.vertical(|ui| {
                    ui.label(format!("Direction: {}", view.ai_dir_small));
                    ui.label(format!("RSI zone: {}", view.rsi_zone_small));
                    ui.label(format!("Regime: {}", view.regime_small));
                });
            });

            // Toggle buttons for all windows.
            ui.horizontal_wrapped(|ui| {
                for w in &mut self.windows {
                    if ui.selectable_label(w.is_open(), w.name()).clicked() {
                        w.toggle();
                    }
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |_ui| {});

        // ── 3. Floating detail windows ────────────────────────────────────────
        let state = AppState {
            dashboard: &self.state,
            commands: &self.commands,
        };
        for w in &mut self.windows {
            w.show(ctx, &state);
        }
    }
}
