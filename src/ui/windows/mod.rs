//! Registered UI windows, each implementing `AppWindow`.

pub mod ai_view;
pub mod controls_view;
pub mod market_view;
pub mod raw_json_view;
pub mod signals_view;
