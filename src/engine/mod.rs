//! Engine sub-modules: display projection, status state machines, and the
//! dashboard state they make up.

pub mod display;
pub mod state;
pub mod status;
