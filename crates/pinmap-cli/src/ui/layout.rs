//! Layout calculation utilities for UI components
//!
//! The renderer records the map area it actually drew so mouse clicks are
//! projected through the same rectangle.

use ratatui::layout::Rect;

/// Cache of actual rendered layout dimensions
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutCache {
    /// Inner map area (inside the border) from the last render
    pub map_area: Option<Rect>,
}

impl LayoutCache {
    /// Creates a new empty layout cache
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rectangle of `width` x `height` centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rectangle of `width` x `height` placed just below and right of `anchor`.
///
/// Flips above or left of the anchor when it would leave `area`, and shrinks to fit.
pub fn anchored_rect(anchor: (u16, u16), width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let (column, row) = anchor;
    let right = area.x + area.width;
    let bottom = area.y + area.height;

    let x = if column.saturating_add(1).saturating_add(width) <= right {
        column.saturating_add(1)
    } else {
        column.saturating_sub(width).max(area.x)
    };
    let y = if row.saturating_add(1).saturating_add(height) <= bottom {
        row.saturating_add(1)
    } else {
        row.saturating_sub(height).max(area.y)
    };

    Rect {
        x: x.min(right - width),
        y: y.min(bottom - height),
        width,
        height,
    }
}
