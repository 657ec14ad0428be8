//! Keyboard input handling and dispatch

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::Backend;

use super::tui_app::TuiApp;
use crate::ui::flow::FlowAction;

/// Columns moved by one horizontal arrow press
const PAN_COLUMNS: i32 = 4;
/// Rows moved by one vertical arrow press
const PAN_ROWS: i32 = 2;

impl<B: Backend> TuiApp<B> {
    /// Handles a single key event and returns true if the app should quit
    pub(super) fn handle_key_event(&mut self, key: &KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Char('q' | 'c'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return true;
        }

        // Alerts block everything else until dismissed
        if self.state.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_alert();
            }
            return false;
        }

        if !self.flow.is_idle() {
            self.handle_flow_key(key);
            return false;
        }

        self.handle_map_key(key)
    }

    fn handle_flow_key(&mut self, key: &KeyEvent) {
        match self.flow.handle_key(key) {
            FlowAction::None => {}
            FlowAction::Cancelled => tracing::debug!("New pin cancelled"),
            FlowAction::Submit(draft) => self.spawn_submission(draft),
        }
    }

    /// Keys available while no dialog is open; returns true on quit
    fn handle_map_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cycle_theme();
            }
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => self.reload_pins(),
            KeyCode::Char('a') => {
                self.map.close_popup();
                self.flow.begin(self.map.viewport.center());
            }
            KeyCode::Char('c') => self.map.viewport.recenter(),
            KeyCode::Char('+' | '=') => self.map.viewport.zoom_in(),
            KeyCode::Char('-') => self.map.viewport.zoom_out(),
            KeyCode::Left => self.map.viewport.pan(-PAN_COLUMNS, 0),
            KeyCode::Right => self.map.viewport.pan(PAN_COLUMNS, 0),
            KeyCode::Up => self.map.viewport.pan(0, -PAN_ROWS),
            KeyCode::Down => self.map.viewport.pan(0, PAN_ROWS),
            KeyCode::Tab => self.map.cycle_popup(),
            KeyCode::Esc => {
                self.map.close_popup();
            }
            _ => {}
        }
        false
    }
}
