//! Projection between geographic coordinates and terminal cells.
//!
//! At zoom `z` one 256px slippy-map tile spans `360 / 2^z` degrees of longitude and
//! is drawn as [`TILE_COLUMNS`] terminal columns. Rows are [`ROW_ASPECT`] times taller
//! than columns are wide, and the latitude span of a row shrinks with
//! `cos(center latitude)`, which keeps shapes undistorted near the center.

use pinmap_core::config::{MAX_ZOOM, MIN_ZOOM};
use pinmap_core::{LatLng, MapConfig};
use ratatui::layout::Rect;

/// Terminal columns drawn per 256px tile.
const TILE_COLUMNS: f64 = 32.0;
/// Height of a terminal row relative to its width.
const ROW_ASPECT: f64 = 2.0;
/// Latitude beyond which the map stops panning (Web Mercator limit).
const MAX_LATITUDE: f64 = 85.0511;

/// Geographic extent of the visible map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Westernmost longitude
    pub west: f64,
    /// Easternmost longitude
    pub east: f64,
    /// Southernmost latitude
    pub south: f64,
    /// Northernmost latitude
    pub north: f64,
}

/// Center and zoom of the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    center: LatLng,
    zoom: u8,
    home_center: LatLng,
    home_zoom: u8,
}

impl MapViewport {
    /// Creates a viewport; the given center and zoom are also the recenter target.
    pub fn new(center: LatLng, zoom: u8) -> Self {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Self {
            center,
            zoom,
            home_center: center,
            home_zoom: zoom,
        }
    }

    /// Creates the initial viewport from configuration.
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.center(), config.zoom)
    }

    /// Current center.
    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    fn degrees_per_column(&self) -> f64 {
        360.0 / (2_f64.powi(i32::from(self.zoom)) * TILE_COLUMNS)
    }

    fn degrees_per_row(&self) -> f64 {
        self.degrees_per_column() * ROW_ASPECT * self.center.lat.to_radians().cos().max(0.01)
    }

    /// Geographic extent covered by `area`.
    pub fn bounds(&self, area: Rect) -> Bounds {
        let half_width = f64::from(area.width) / 2.0 * self.degrees_per_column();
        let half_height = f64::from(area.height) / 2.0 * self.degrees_per_row();
        Bounds {
            west: self.center.lng - half_width,
            east: self.center.lng + half_width,
            south: self.center.lat - half_height,
            north: self.center.lat + half_height,
        }
    }

    /// Geographic coordinate at the middle of a cell.
    ///
    /// Returns `None` outside `area` and beyond the Mercator latitude limit. Longitudes
    /// past the antimeridian wrap into `[-180, 180]`.
    pub fn cell_to_latlng(&self, area: Rect, column: u16, row: u16) -> Option<LatLng> {
        if column < area.x
            || row < area.y
            || column >= area.x.saturating_add(area.width)
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }
        let bounds = self.bounds(area);
        let offset_x = f64::from(column - area.x) + 0.5;
        let offset_y = f64::from(row - area.y) + 0.5;
        let lat = offset_y.mul_add(-self.degrees_per_row(), bounds.north);
        // Past the poles there is no map to place a pin on
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&lat) {
            return None;
        }
        let lng = offset_x.mul_add(self.degrees_per_column(), bounds.west);
        Some(LatLng::new(lat, wrap_longitude(lng)))
    }

    /// Cell containing `point`, or `None` when it is off screen.
    pub fn latlng_to_cell(&self, area: Rect, point: LatLng) -> Option<(u16, u16)> {
        let bounds = self.bounds(area);
        let offset_x = ((point.lng - bounds.west) / self.degrees_per_column()).floor();
        let offset_y = ((bounds.north - point.lat) / self.degrees_per_row()).floor();
        if !offset_x.is_finite()
            || !offset_y.is_finite()
            || offset_x < 0.0
            || offset_y < 0.0
            || offset_x >= f64::from(area.width)
            || offset_y >= f64::from(area.height)
        {
            return None;
        }
        Some((area.x + offset_x as u16, area.y + offset_y as u16))
    }

    /// Moves the center by whole cells (positive `columns` east, positive `rows` south).
    pub fn pan(&mut self, columns: i32, rows: i32) {
        let lng = f64::from(columns).mul_add(self.degrees_per_column(), self.center.lng);
        let lat = f64::from(rows).mul_add(-self.degrees_per_row(), self.center.lat);
        self.center = LatLng::new(
            lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            wrap_longitude(lng),
        );
    }

    /// Zooms in one level, stopping at the maximum.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    /// Zooms out one level, stopping at the minimum.
    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Returns to the initial center and zoom.
    pub fn recenter(&mut self) {
        self.center = self.home_center;
        self.zoom = self.home_zoom;
    }
}

/// Wraps a longitude into `[-180, 180]`.
fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        lng
    } else {
        (lng + 180.0).rem_euclid(360.0) - 180.0
    }
}
