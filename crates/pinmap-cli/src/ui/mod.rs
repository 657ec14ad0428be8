//! User interface (TUI) subsystem for pinmap.
//! Provides the map view, the new-pin dialogs, input handling, and rendering.

// Publicly exposed modules
/// Input event source abstraction (public so tests can inject events)
pub mod event_source;
/// Results of background requests
pub mod events;
/// New-pin submission flow
pub mod flow;
/// Single-line text fields
pub mod input;
/// Layout calculation utilities
pub mod layout;
/// Map controller state
pub mod map_state;
/// Marker set and hit testing
pub mod markers;
/// Rendering components
pub mod renderer;
/// UI state management
pub mod state;
/// Theme colors
pub mod theme;
/// Geographic projection onto terminal cells
pub mod viewport;

/// TUI application and main event loop (contains sub-modules)
pub mod app;

// Re-exports
pub use app::TuiApp;
