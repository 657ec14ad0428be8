//! The single map controller shared by the renderer and the input handlers.

use pinmap_core::MapConfig;

use super::markers::{Marker, MarkerLayer};
use super::viewport::MapViewport;

/// Viewport, markers, and the open marker popup.
#[derive(Debug)]
pub struct MapState {
    /// Visible region
    pub viewport: MapViewport,
    /// Markers from the latest applied load
    pub markers: MarkerLayer,
    /// Index of the marker whose popup is open
    pub open_popup: Option<usize>,
}

impl MapState {
    /// Creates the map at the configured center and zoom with no markers.
    pub fn new(config: &MapConfig) -> Self {
        Self {
            viewport: MapViewport::from_config(config),
            markers: MarkerLayer::default(),
            open_popup: None,
        }
    }

    /// Marker whose popup is open.
    pub fn popup_marker(&self) -> Option<&Marker> {
        self.open_popup.and_then(|index| self.markers.get(index))
    }

    /// Opens the popup of the marker after the open one, wrapping around.
    pub fn cycle_popup(&mut self) {
        if self.markers.is_empty() {
            self.open_popup = None;
            return;
        }
        self.open_popup = Some(
            self.open_popup
                .map_or(0, |index| (index + 1) % self.markers.len()),
        );
    }

    /// Closes the open popup; returns whether one was open.
    pub fn close_popup(&mut self) -> bool {
        self.open_popup.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_core::Pin;

    fn map_with(count: usize) -> MapState {
        let mut map = MapState::new(&MapConfig::default());
        let generation = map.markers.next_generation();
        let pins = (0..count)
            .map(|index| Pin {
                name: format!("Pin {index}"),
                lat: 24.79,
                lng: 85.0 + index as f64 * 0.001,
                author: "asha".to_owned(),
                image_url: None,
            })
            .collect();
        map.markers.apply(generation, pins);
        map
    }

    #[test]
    fn test_cycle_popup_wraps() {
        let mut map = map_with(2);
        map.cycle_popup();
        assert_eq!(map.open_popup, Some(0));
        map.cycle_popup();
        assert_eq!(map.open_popup, Some(1));
        map.cycle_popup();
        assert_eq!(map.open_popup, Some(0));
        assert_eq!(map.popup_marker().map(|marker| marker.pin.name.as_str()), Some("Pin 0"));
    }

    #[test]
    fn test_cycle_popup_without_markers() {
        let mut map = map_with(0);
        map.cycle_popup();
        assert_eq!(map.open_popup, None);
        assert!(!map.close_popup());
    }
}
