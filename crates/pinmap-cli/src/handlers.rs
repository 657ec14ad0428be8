//! Command handlers for CLI operations

use anyhow::{Context as _, Result};
use pinmap_cli::ConfigManager;
use pinmap_client::HttpPinService;
use pinmap_core::PinmapConfig;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tokio::fs as async_fs;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::cli::Cli;
use crate::interactive::run_tui_interactive;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "pinmap_cli=info,pinmap_client=info,pinmap_core=info";

/// Handle a parsed command line
///
/// # Errors
/// Returns an error if the configuration is invalid, logging cannot be set up, or the
/// TUI session fails
pub async fn handle_cli(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => PinmapConfig::default_path()?,
    };

    if cli.print_config {
        let config = load_config(&config_path, cli.server.as_deref())?;
        return print_config(&config);
    }

    let log_path = match cli.log_file {
        Some(path) => path,
        None => PinmapConfig::state_dir()?.join("debug.log"),
    };
    init_tui_logging(&log_path).await?;

    let config = load_config(&config_path, cli.server.as_deref())?;
    let service = HttpPinService::new(&config.server)
        .with_context(|| format!("Failed to create client for {}", config.server.base_url))?;

    run_tui_interactive(
        Arc::new(service),
        ConfigManager::new(config, config_path),
        &log_path,
    )
    .await
}

/// Initialize tracing - TUI mode logs to file because stdout belongs to the terminal UI
///
/// # Errors
/// Returns an error if the log file cannot be created
async fn init_tui_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        async_fs::create_dir_all(parent).await?;
    }
    if async_fs::try_exists(log_path).await.unwrap_or(false) {
        async_fs::remove_file(log_path).await?;
    }

    // Open log file synchronously for tracing writer (needs sync File)
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();

    Ok(())
}

/// Load or create the config file, apply the server override, and validate
///
/// An unreadable file falls back to defaults; an invalid value is an error.
///
/// # Errors
/// Returns an error if the resulting configuration fails validation
fn load_config(path: &Path, server: Option<&str>) -> Result<PinmapConfig> {
    let mut config = PinmapConfig::load_or_create(path).unwrap_or_else(|error| {
        tracing::warn!("Failed to load config from {}: {error}", path.display());
        tracing::warn!("Using default configuration");
        PinmapConfig::default()
    });

    if let Some(server) = server {
        config.server.base_url = server.to_owned();
    }
    config.validate()?;
    Ok(config)
}

fn print_config(config: &PinmapConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to serialize config")?;
    // Printed to stdout by convention so it can be redirected into a config file
    #[allow(clippy::print_stdout, reason = "Config output")]
    {
        print!("{rendered}");
    }
    Ok(())
}
