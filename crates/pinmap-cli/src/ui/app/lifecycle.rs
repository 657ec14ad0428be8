//! Application lifecycle operations (constructors, initialization, raw mode)

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use pinmap_core::{PinService, Result};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::tui_app::TuiApp;
use crate::config::ConfigManager;
use crate::ui::event_source::{CrosstermEventSource, InputEventSource};
use crate::ui::flow::SubmissionFlow;
use crate::ui::layout::LayoutCache;
use crate::ui::map_state::MapState;
use crate::ui::renderer::Renderer;
use crate::ui::state::UiState;

impl<B: Backend> TuiApp<B> {
    /// Creates an app drawing to `backend` and reading input from `event_source`.
    ///
    /// The map starts at the configured center and zoom with no markers; call
    /// [`TuiApp::reload_pins`] to request the first load.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be initialized.
    pub fn new(
        backend: B,
        event_source: Box<dyn InputEventSource>,
        service: Arc<dyn PinService>,
        config: ConfigManager,
    ) -> Result<Self> {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();
        let terminal = Terminal::new(backend)?;
        let settings = config.get();

        tracing::info!(
            "Starting map at ({}, {}) zoom {} using {} service",
            settings.map.center_lat,
            settings.map.center_lng,
            settings.map.zoom,
            service.name()
        );

        Ok(Self {
            terminal,
            event_source,
            event_sender,
            event_receiver,
            service,
            map: MapState::new(&settings.map),
            flow: SubmissionFlow::default(),
            state: UiState::default(),
            renderer: Renderer::new(settings.ui.theme),
            layout_cache: LayoutCache::new(),
            config,
        })
    }
}

impl TuiApp<CrosstermBackend<io::Stdout>> {
    /// Creates an app on the real terminal
    ///
    /// # Errors
    /// Returns an error if terminal initialization or clearing fails.
    pub fn new_crossterm(service: Arc<dyn PinService>, config: ConfigManager) -> Result<Self> {
        let mut app = Self::new(
            CrosstermBackend::new(io::stdout()),
            Box::new(CrosstermEventSource::new()),
            service,
            config,
        )?;
        app.terminal.clear()?;
        Ok(app)
    }

    /// Enables raw mode, the alternate screen, and mouse capture
    ///
    /// # Errors
    /// Returns an error if the terminal rejects any of the modes.
    pub fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restores the terminal to its normal state
    ///
    /// # Errors
    /// Returns an error if disabling raw mode or leaving the alternate screen fails.
    pub fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}
