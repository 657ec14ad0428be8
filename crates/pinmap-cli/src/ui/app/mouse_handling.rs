//! Mouse input: marker selection, new-pin clicks, and wheel zoom

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use super::tui_app::TuiApp;

impl<B: Backend> TuiApp<B> {
    /// Handles a mouse event; ignored while a dialog or alert is open
    pub(super) fn handle_mouse_event(&mut self, mouse: &MouseEvent) {
        if self.state.alert.is_some() || !self.flow.is_idle() {
            return;
        }
        // Nothing has been drawn yet, so there is no map to click on
        let Some(area) = self.layout_cache.map_area else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_map_click(area, mouse.column, mouse.row);
            }
            MouseEventKind::ScrollUp => self.map.viewport.zoom_in(),
            MouseEventKind::ScrollDown => self.map.viewport.zoom_out(),
            _ => {}
        }
    }

    fn handle_map_click(&mut self, area: Rect, column: u16, row: u16) {
        if let Some(index) = self
            .map
            .markers
            .hit_test(&self.map.viewport, area, column, row)
        {
            self.map.open_popup = Some(index);
            return;
        }

        let Some(location) = self.map.viewport.cell_to_latlng(area, column, row) else {
            return;
        };
        tracing::debug!("Map clicked at ({}, {})", location.lat, location.lng);
        self.map.close_popup();
        self.flow.begin(location);
    }
}
