//! The `AppWindow` trait and the shared `AppState` view passed to each window.
//!
//! To add a new dashboard window:
//! 1. Create a new file in `ui/windows/`.
//! 2. Implement `AppWindow` for your struct.
//! 3. Push `Box::new(MyWindow::default())` into `App::windows` in `App::new()`.

use crate::engine::state::DashboardState;
use crate::network::commands::CommandDispatcher;

/// Read-only view of dashboard state shared with every window's `show` call,
/// plus the dispatcher for windows that trigger backend actions.
pub struct AppState<'a> {
    pub dashboard: &'a DashboardState,
    pub commands: &'a CommandDispatcher<egui::Context>,
}

/// Trait implemented by every dashboard window/panel.
///
/// Each window owns its own open/closed flag. The orchestrator (`App`) simply
/// iterates over all registered windows and calls `show` on each frame.
pub trait AppWindow {
    /// Display name shown on the toggle button and as the egui window title.
    fn name(&self) -> &str;

    /// Whether this window is currently visible.
    fn is_open(&self) -> bool;

    /// Toggle the window's open/closed state.
    fn toggle(&mut self);

    /// Draw the window contents.  Called every frame by `App::update`.
    fn show(&mut self, ctx: &egui::Context, state: &AppState<'_>);
}

/// Two-column label/value row used by the grid-based windows.
pub fn value_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(label);
    ui.monospace(value);
    ui.end_row();
}
