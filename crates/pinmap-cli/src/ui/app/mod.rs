//! TUI application module
//!
//! This module contains the main TUI application logic, organized into focused sub-modules.

// TUI application implementation modules
mod event_loop;
mod key_handling;
mod lifecycle;
mod mouse_handling;
mod pin_operations;
mod test_helpers;
mod tui_app;

pub use tui_app::TuiApp;
