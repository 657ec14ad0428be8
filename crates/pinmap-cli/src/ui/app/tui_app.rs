//! Main TUI application struct and core state management

use pinmap_core::PinService;
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::ConfigManager;
use crate::ui::event_source::InputEventSource;
use crate::ui::events::AppEvent;
use crate::ui::flow::SubmissionFlow;
use crate::ui::layout::LayoutCache;
use crate::ui::map_state::MapState;
use crate::ui::renderer::Renderer;
use crate::ui::state::UiState;

/// Main TUI application
pub struct TuiApp<B: Backend> {
    /// Terminal instance used to render the UI
    pub(super) terminal: Terminal<B>,
    /// Source of input events (abstracted for testing)
    pub(super) event_source: Box<dyn InputEventSource>,
    /// Sender handed to background requests
    pub(super) event_sender: mpsc::UnboundedSender<AppEvent>,
    /// Channel receiving results of background requests
    pub(super) event_receiver: mpsc::UnboundedReceiver<AppEvent>,
    /// Pin server client
    pub(super) service: Arc<dyn PinService>,
    /// Viewport, markers, and open popup
    pub(super) map: MapState,
    /// New-pin flow
    pub(super) flow: SubmissionFlow,
    /// Alerts and status line
    pub(super) state: UiState,
    /// Responsible for drawing UI components
    pub(super) renderer: Renderer,
    /// Cache of actual rendered layout dimensions
    pub(super) layout_cache: LayoutCache,
    /// Effective configuration, persisted on theme changes
    pub(super) config: ConfigManager,
}

// Note: all input is sourced from `event_source` to allow test injection without
// altering application behavior.
