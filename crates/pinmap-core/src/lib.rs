//! Core types and traits for pinmap.
//!
//! This crate provides the pin data model, popup content, configuration,
//! error handling, and the [`PinService`] trait the clients implement.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// Configuration loading and defaults.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Marker popup content.
pub mod popup;
/// Lock helpers.
pub mod sync;
/// Trait definitions for pin services.
pub mod traits;
/// Pin, coordinate, and submission types.
pub mod types;

pub use config::{MapConfig, PinmapConfig, ServerConfig, Theme, TileConfig, UiConfig};
pub use error::{Error, Result};
pub use popup::PinPopup;
pub use sync::IgnoreLock;
pub use traits::PinService;
pub use types::{CreatedPin, ImageAttachment, LatLng, NewPin, Pin, mime_for_path};
