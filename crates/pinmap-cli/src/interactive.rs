//! Interactive mode functionality - TUI mode

use anyhow::Result;
use pinmap_cli::{ConfigManager, TuiApp};
use pinmap_core::PinService;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

/// Append the session header to the log
///
/// # Errors
/// Returns error if file operations fail
fn init_session_log(log_path: &Path, config: &ConfigManager) -> Result<File> {
    // Open existing log (already created by the logging setup)
    let mut log_file = OpenOptions::new().append(true).open(log_path)?;

    writeln!(
        log_file,
        "=== Session started at {:?} ===",
        SystemTime::now()
    )?;
    writeln!(log_file, "Server: {}", config.get().server.base_url)?;
    if let Some(path) = config.path() {
        writeln!(log_file, "Config: {}", path.display())?;
    }

    Ok(log_file)
}

/// Run fully self-contained TUI interactive session
///
/// # Errors
/// Returns an error if the terminal or the event loop fails.
pub async fn run_tui_interactive(
    service: Arc<dyn PinService>,
    config: ConfigManager,
    log_path: &Path,
) -> Result<()> {
    let mut log_file = init_session_log(log_path, &config)?;

    let mut tui_app = TuiApp::new_crossterm(service, config)?;
    tui_app.enable_raw_mode()?;

    // Render the empty map immediately, then request the pins
    tui_app.render()?;
    tui_app.reload_pins();

    let loop_result = tui_app.run_event_loop().await;

    tui_app.disable_raw_mode()?;
    writeln!(log_file, "=== Session ended ===")?;

    loop_result?;
    Ok(())
}
