use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Block, Borders, Widget,
        canvas::{Canvas, Map, MapResolution},
    },
};

use pinmap_core::{LatLng, Theme};

use super::RenderCtx;
use crate::ui::map_state::MapState;
use crate::ui::theme::ThemeColors as _;

/// Cell symbol for a pin marker.
pub const MARKER_SYMBOL: &str = "●";
/// Cell symbol for the location of a pin being added.
pub const PENDING_SYMBOL: &str = "✚";

/// Draws the framed basemap with markers and returns the inner map area.
pub fn render_map(frame: &mut Frame, area: Rect, ctx: &RenderCtx<'_>, theme: Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("─── Pinmap ")
        .title_bottom(Line::from(format!(" {} ", ctx.tiles.attribution)).right_aligned())
        .border_style(Style::default().fg(theme.focused_border()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bounds = ctx.map.viewport.bounds(inner);
    let land = theme.land();
    let basemap = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(move |painter| {
            painter.draw(&Map {
                color: land,
                resolution: MapResolution::High,
            });
        });
    frame.render_widget(basemap, inner);

    frame.render_widget(
        MarkerOverlay {
            map: ctx.map,
            pending: ctx.flow.location(),
            marker_color: theme.marker(),
            selected_color: theme.highlight(),
        },
        inner,
    );

    inner
}

/// Draws one cell per marker on top of the basemap.
struct MarkerOverlay<'ctx> {
    map: &'ctx MapState,
    pending: Option<LatLng>,
    marker_color: Color,
    selected_color: Color,
}

impl Widget for MarkerOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let viewport = &self.map.viewport;
        for (index, marker) in self.map.markers.iter().enumerate() {
            let Some(position) = viewport.latlng_to_cell(area, marker.pin.location()) else {
                continue;
            };
            let selected = self.map.open_popup == Some(index);
            if let Some(cell) = buf.cell_mut(position) {
                let color = if selected {
                    self.selected_color
                } else {
                    self.marker_color
                };
                cell.set_symbol(MARKER_SYMBOL)
                    .set_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
            }
        }

        if let Some(position) = self
            .pending
            .and_then(|location| viewport.latlng_to_cell(area, location))
            && let Some(cell) = buf.cell_mut(position)
        {
            cell.set_symbol(PENDING_SYMBOL)
                .set_style(Style::default().fg(self.selected_color));
        }
    }
}
