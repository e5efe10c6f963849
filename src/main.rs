mod config;
mod engine;
mod error;
mod network;
mod types;
mod ui;
mod utils;

use clap::Parser;

use crate::config::Config;
use crate::ui::app::App;

fn main() -> error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!(
        "Dashboard backend: stream {}, orders {}, retrain {}",
        config.stream_url(),
        config.order_url(),
        config.train_url()
    );

    // Background runtime for the stream listener and command tasks; the UI
    // stays on the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("dashboard-net")
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1040.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AI Trading Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, runtime, &config)))),
    )?;
    Ok(())
}
