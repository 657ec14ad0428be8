//! Configuration management for the pinmap CLI
//!
//! Holds the effective configuration and writes UI preferences back to the
//! config file they were loaded from.

use pinmap_core::{PinmapConfig, Result, Theme};
use std::path::{Path, PathBuf};

/// Effective configuration plus the file backing it.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: Option<PathBuf>,
    config: PinmapConfig,
}

impl ConfigManager {
    /// Wraps `config` loaded from `path`.
    pub fn new(config: PinmapConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config,
        }
    }

    /// Wraps `config` without a backing file; changes are kept in memory only.
    pub fn in_memory(config: PinmapConfig) -> Self {
        Self { path: None, config }
    }

    /// Current configuration.
    pub fn get(&self) -> &PinmapConfig {
        &self.config
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stores a new theme and persists it.
    ///
    /// The file is re-read first so only the theme changes on disk; a command-line
    /// server override, for example, is not written back.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or written
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.config.ui.theme = theme;
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut on_disk = if path.exists() {
            PinmapConfig::load_from_file(path)?
        } else {
            PinmapConfig::default()
        };
        on_disk.ui.theme = theme;
        on_disk.save_to_file(path)?;
        tracing::debug!("Saved theme {theme:?} to {}", path.display());
        Ok(())
    }
}
