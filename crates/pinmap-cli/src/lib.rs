//! Library interface for pinmap-cli
//!
//! Exposes the TUI components for the binary and for integration testing
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

/// Configuration management
pub mod config;

/// UI module is public for integration testing
pub mod ui;

// Public API exports for integration testing
pub use config::ConfigManager;
pub use ui::TuiApp;
pub use ui::event_source::{CrosstermEventSource, InputEventSource};
#[cfg(any(test, feature = "test-util"))]
pub use ui::event_source::ScriptedEventSource;
pub use ui::flow::{FlowAction, PinDraft, SubmissionFlow};
pub use ui::map_state::MapState;
pub use ui::state::{Alert, AlertKind, UiState};
