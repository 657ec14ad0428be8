//! Marker set shown on the map.

use pinmap_core::{Pin, PinPopup};
use ratatui::layout::Rect;

use super::viewport::MapViewport;

/// A pin placed on the map together with its popup content.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// The pin as received from the server
    pub pin: Pin,
    /// Popup shown when the marker is selected
    pub popup: PinPopup,
}

impl Marker {
    fn new(pin: Pin) -> Self {
        let popup = PinPopup::for_pin(&pin);
        Self { pin, popup }
    }
}

/// The map's markers, replaced wholesale by each completed load.
///
/// Loads are numbered; only the answer to the most recently issued load is applied,
/// so a slow stale response can't overwrite newer data.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    issued_generation: u64,
}

impl MarkerLayer {
    /// Reserves the generation number for a new load request.
    pub fn next_generation(&mut self) -> u64 {
        self.issued_generation += 1;
        self.issued_generation
    }

    /// Whether `generation` is the most recently issued load.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.issued_generation
    }

    /// Replaces the markers with `pins` if `generation` is the newest load.
    ///
    /// Returns whether the pins were applied. Pins with invalid coordinates are skipped.
    pub fn apply(&mut self, generation: u64, pins: Vec<Pin>) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(
                "Discarding stale pin load {generation} (newest is {})",
                self.issued_generation
            );
            return false;
        }

        self.markers = pins
            .into_iter()
            .filter(|pin| {
                let valid = pin.location().is_valid();
                if !valid {
                    tracing::warn!(
                        "Skipping pin {:?} with invalid coordinates ({}, {})",
                        pin.name,
                        pin.lat,
                        pin.lng
                    );
                }
                valid
            })
            .map(Marker::new)
            .collect();
        true
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether there are no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Marker at `index`.
    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// All markers in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Marker drawn at or next to a cell, nearest first.
    pub fn hit_test(
        &self,
        viewport: &MapViewport,
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<usize> {
        self.markers
            .iter()
            .enumerate()
            .filter_map(|(index, marker)| {
                let (marker_column, marker_row) =
                    viewport.latlng_to_cell(area, marker.pin.location())?;
                let distance = marker_column.abs_diff(column).max(marker_row.abs_diff(row));
                (distance <= 1).then_some((distance, index))
            })
            .min()
            .map(|(_, index)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_core::LatLng;

    fn pin(name: &str, lat: f64, lng: f64) -> Pin {
        Pin {
            name: name.to_owned(),
            lat,
            lng,
            author: "asha".to_owned(),
            image_url: None,
        }
    }

    #[test]
    fn test_apply_replaces_markers() {
        let mut layer = MarkerLayer::default();
        let first = layer.next_generation();
        assert!(layer.apply(first, vec![pin("A", 24.79, 85.0), pin("B", 24.8, 85.01)]));
        assert_eq!(layer.len(), 2);

        let second = layer.next_generation();
        assert!(layer.apply(second, vec![pin("A", 24.79, 85.0), pin("B", 24.8, 85.01)]));
        assert_eq!(layer.len(), 2, "Reloading must not duplicate markers");
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut layer = MarkerLayer::default();
        let stale = layer.next_generation();
        let fresh = layer.next_generation();

        assert!(layer.apply(fresh, vec![pin("Fresh", 1.0, 1.0)]));
        assert!(!layer.apply(stale, vec![pin("Stale", 2.0, 2.0)]));
        assert_eq!(layer.get(0).map(|marker| marker.pin.name.as_str()), Some("Fresh"));
    }

    #[test]
    fn test_invalid_coordinates_skipped() {
        let mut layer = MarkerLayer::default();
        let generation = layer.next_generation();
        layer.apply(generation, vec![pin("Good", 10.0, 10.0), pin("Bad", 95.0, 10.0)]);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_hit_test_finds_adjacent_marker() {
        let area = Rect::new(0, 0, 60, 20);
        let viewport = MapViewport::new(LatLng::new(24.7954, 85.0039), 14);
        let target = viewport.cell_to_latlng(area, 30, 10).unwrap();

        let mut layer = MarkerLayer::default();
        let generation = layer.next_generation();
        layer.apply(generation, vec![pin("Here", target.lat, target.lng)]);

        assert_eq!(layer.hit_test(&viewport, area, 30, 10), Some(0));
        assert_eq!(layer.hit_test(&viewport, area, 31, 11), Some(0));
        assert_eq!(layer.hit_test(&viewport, area, 33, 10), None);
    }
}
