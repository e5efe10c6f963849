//! UI layer: App orchestrator, AppWindow trait, colour palette, and windows.

pub mod app;
pub mod colors;
pub mod window;
pub mod windows;
