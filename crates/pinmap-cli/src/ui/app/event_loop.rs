//! Main event loop and event processing logic

use crossterm::event::{Event, KeyEventKind};
use pinmap_core::{Error, Result};
use ratatui::backend::Backend;

use super::tui_app::TuiApp;
use crate::ui::renderer::RenderCtx;

impl<B: Backend> TuiApp<B> {
    /// Run the main event loop until quit
    ///
    /// This processes both input events and the results of background requests
    /// concurrently using `tokio::select!`, rendering after each one.
    ///
    /// # Errors
    /// Returns an error if reading input or rendering fails.
    pub async fn run_event_loop(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                event_result = self.event_source.next_event() => {
                    match event_result {
                        Ok(Some(event)) => {
                            if self.handle_input(&event) {
                                tracing::info!("Quit requested");
                                break;
                            }
                        }
                        Ok(None) => break,
                        Err(error) => {
                            return Err(Error::Io(error));
                        }
                    }
                }

                Some(app_event) = self.event_receiver.recv() => {
                    self.handle_app_event(app_event);
                }
            }

            self.render()?;
        }

        Ok(())
    }

    /// Handle an input event and return true if the app should quit
    pub(super) fn handle_input(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key_event(key)
            }
            Event::Mouse(mouse) => {
                self.handle_mouse_event(mouse);
                false
            }
            _ => false,
        }
    }

    /// Cycles to the next theme and saves it to the config file
    pub(super) fn cycle_theme(&mut self) {
        let new_theme = self.renderer.theme().next();
        self.renderer.set_theme(new_theme);

        if let Err(error) = self.config.set_theme(new_theme) {
            tracing::warn!("Failed to save theme {new_theme:?}: {error}");
        }
    }

    /// Renders the UI to the terminal
    ///
    /// # Errors
    /// Returns an error if drawing to the terminal fails.
    pub fn render(&mut self) -> Result<()> {
        let renderer = &self.renderer;
        let mut ctx = RenderCtx {
            map: &self.map,
            flow: &self.flow,
            state: &self.state,
            tiles: &self.config.get().tiles,
            layout_cache: &mut self.layout_cache,
        };

        self.terminal.draw(|frame| {
            renderer.render(frame, &mut ctx);
        })?;

        Ok(())
    }
}
