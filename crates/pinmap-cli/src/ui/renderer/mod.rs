//! UI rendering module
//!
//! The map fills the screen above a one-line status bar. Marker popups, the
//! submission dialogs and alerts are drawn on top of the map.

mod dialogs;
mod map;

use pinmap_core::{Theme, TileConfig};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::flow::SubmissionFlow;
use super::layout::LayoutCache;
use super::map_state::MapState;
use super::state::UiState;
use super::theme::ThemeColors as _;

pub use map::{MARKER_SYMBOL, PENDING_SYMBOL};

/// Handles rendering of the TUI
pub struct Renderer {
    theme: Theme,
}

/// Rendering context with all necessary references
pub struct RenderCtx<'ctx> {
    /// Map controller
    pub map: &'ctx MapState,
    /// New-pin flow
    pub flow: &'ctx SubmissionFlow,
    /// Alerts and status line
    pub state: &'ctx UiState,
    /// Tile source shown in the status bar and the attribution on the map
    pub tiles: &'ctx TileConfig,
    /// Layout cache to populate with actual rendered dimensions
    pub layout_cache: &'ctx mut LayoutCache,
}

impl Renderer {
    /// Creates a new Renderer with the specified theme
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Gets the current theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Sets the theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Renders the entire UI
    pub fn render(&self, frame: &mut Frame, ctx: &mut RenderCtx<'_>) {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let map_area = map::render_map(frame, split[0], ctx, self.theme);
        ctx.layout_cache.map_area = Some(map_area);
        self.render_status_bar(frame, split[1], ctx);

        if let Some(marker) = ctx.map.popup_marker() {
            dialogs::render_marker_popup(frame, map_area, ctx.map, marker, self.theme);
        }
        dialogs::render_flow(frame, map_area, ctx.map, ctx.flow, self.theme);
        if let Some(alert) = &ctx.state.alert {
            dialogs::render_alert(frame, frame.area(), alert, self.theme);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let viewport = &ctx.map.viewport;
        let center = viewport.center();
        let status = if ctx.state.loading {
            "Loading pins..."
        } else {
            ctx.state.status.as_deref().unwrap_or("Ready")
        };

        let separator = Span::styled(" │ ", Style::default().fg(self.theme.unfocused_border()));
        let line = Line::from(vec![
            Span::styled(format!(" {status}"), Style::default().fg(self.theme.highlight())),
            separator.clone(),
            Span::raw(format!("{} pins", ctx.map.markers.len())),
            separator.clone(),
            Span::raw(format!(
                "z{} ({:.4}, {:.4})",
                viewport.zoom(),
                center.lat,
                center.lng
            )),
            separator.clone(),
            Span::raw(format!("tiles: {}", ctx.tiles.url_template)),
            separator,
            Span::styled(
                "a add · r reload · q quit",
                Style::default().fg(self.theme.unfocused_border()),
            ),
        ]);

        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(self.theme.text())),
            area,
        );
    }
}
