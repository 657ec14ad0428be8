//! Configuration for the server connection, the initial map view, the tile source, and the UI.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, LatLng, Result};

/// Environment variable overriding the state directory.
pub const ENV_PINMAP_FOLDER: &str = "PINMAP_FOLDER";
/// Lowest zoom level the map accepts.
pub const MIN_ZOOM: u8 = 1;
/// Highest zoom level the map accepts.
pub const MAX_ZOOM: u8 = 19;

/// Complete pinmap configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinmapConfig {
    /// Pin server connection
    pub server: ServerConfig,
    /// Initial map view
    pub map: MapConfig,
    /// Tile layer source
    pub tiles: TileConfig,
    /// Terminal UI preferences
    pub ui: UiConfig,
}

/// Pin server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the `/api/...` paths are resolved against
    pub base_url: String,
    /// Timeout in seconds for each request
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_owned(),
            timeout_seconds: 30,
        }
    }
}

/// Initial map view (Gaya, Bihar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude of the initial center
    pub center_lat: f64,
    /// Longitude of the initial center
    pub center_lng: f64,
    /// Initial zoom level
    pub zoom: u8,
}

impl MapConfig {
    /// Initial center as a coordinate pair.
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 24.7954,
            center_lng: 85.0039,
            zoom: 14,
        }
    }
}

/// Tile layer source and its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Slippy-map URL template
    pub url_template: String,
    /// Attribution text shown on the map
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
            attribution: "© OpenStreetMap contributors".to_owned(),
        }
    }
}

/// Terminal UI preferences.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme
    pub theme: Theme,
}

/// UI theme name.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// Nord color palette
    Nord,
    /// Dracula color palette
    Dracula,
    /// Gruvbox color palette
    Gruvbox,
    /// Tokyo Night color palette
    #[default]
    TokyoNight,
    /// Catppuccin color palette
    Catppuccin,
    /// Monochrome color palette
    Monochrome,
}

impl Theme {
    /// Gets the next theme in sequence
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Nord => Self::Dracula,
            Self::Dracula => Self::Gruvbox,
            Self::Gruvbox => Self::TokyoNight,
            Self::TokyoNight => Self::Catppuccin,
            Self::Catppuccin => Self::Monochrome,
            Self::Monochrome => Self::Nord,
        }
    }
}

impl PinmapConfig {
    /// State directory: `PINMAP_FOLDER` if set, otherwise `~/.pinmap`.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn state_dir() -> Result<PathBuf> {
        if let Ok(folder) = env::var(ENV_PINMAP_FOLDER) {
            return Ok(PathBuf::from(folder));
        }
        dirs::home_dir()
            .map(|home| home.join(".pinmap"))
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))
    }

    /// Default config file location inside the state directory.
    ///
    /// # Errors
    /// Returns an error if the state directory cannot be determined
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::state_dir()?.join("config.toml"))
    }

    /// Load config from `path`, creating it with default values if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed, or created
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let config = Self::default();
            config.save_to_file(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        tracing::debug!(
            "Loaded config from {:?}: server={}, zoom={}",
            path,
            config.server.base_url,
            config.map.zoom
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|error| Error::Config(format!("Failed to serialize config: {error}")))?;

        let header = "# Pinmap Configuration File\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to customize your settings\n\n";

        fs::write(path, format!("{header}{contents}"))?;
        Ok(())
    }

    /// Checks that the values can be used to start the map.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.server.base_url).map_err(|error| {
            Error::Config(format!("Invalid server URL {}: {error}", self.server.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Server URL must use http or https, got {}",
                url.scheme()
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.map.zoom) {
            return Err(Error::Config(format!(
                "Zoom {} outside {MIN_ZOOM}..={MAX_ZOOM}",
                self.map.zoom
            )));
        }
        if !self.map.center().is_valid() {
            return Err(Error::Config(format!(
                "Invalid map center ({}, {})",
                self.map.center_lat, self.map.center_lng
            )));
        }
        Ok(())
    }
}
