//! Fixture test runner.
//!
//! Executes a [`TestFixture`] against the real `TuiApp` on a `TestBackend`, with a
//! `MockPinService` playing the pin server.

use crossterm::event::Event;
use pinmap_cli::{ConfigManager, ScriptedEventSource, TuiApp};
use pinmap_client::MockPinService;
use pinmap_core::PinmapConfig;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::fixture::{ClickTarget, TestEvent, TestFixture};
use crate::tui_helpers::{char_event, click_event, key_event, scroll_event};
use crate::verification_result::VerificationResult;

/// Default terminal size when the fixture doesn't set one
const DEFAULT_TERMINAL_SIZE: (u16, u16) = (100, 30);
/// How long to wait for one background response
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);
/// How long to listen before concluding no response is coming
const QUIET_PERIOD: Duration = Duration::from_millis(150);

/// Runs one fixture
pub struct PinmapTestRunner {
    /// Test fixture
    fixture: TestFixture,
    /// Workspace directory (owned `TempDir` for automatic cleanup)
    workspace: TempDir,
    /// Server stand-in
    mock: MockPinService,
    /// The actual TUI application under test
    tui_app: TuiApp<TestBackend>,
}

impl PinmapTestRunner {
    /// Load a fixture from a JSON file
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed
    pub fn load_fixture(path: &Path) -> Result<TestFixture, String> {
        let contents = fs::read_to_string(path)
            .map_err(|error| format!("Failed to read {}: {error}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|error| format!("Failed to parse {}: {error}", path.display()))
    }

    /// Every `*.json` fixture under `dir`, sorted by path
    ///
    /// # Errors
    /// Returns error if the directory can't be read
    pub fn discover_fixtures(dir: &Path) -> Result<Vec<PathBuf>, String> {
        let mut fixtures = Vec::new();
        let entries = fs::read_dir(dir)
            .map_err(|error| format!("Failed to read {}: {error}", dir.display()))?;
        for entry in entries {
            let path = entry
                .map_err(|error| format!("Failed to read entry: {error}"))?
                .path();
            if path.is_dir() {
                fixtures.extend(Self::discover_fixtures(&path)?);
            } else if path.extension().is_some_and(|ext| ext == "json") {
                fixtures.push(path);
            }
        }
        fixtures.sort();
        Ok(fixtures)
    }

    /// Create the runner: workspace files, mock server, and app
    ///
    /// # Errors
    /// Returns error if workspace setup or app creation fails
    pub fn new(fixture: TestFixture) -> Result<Self, String> {
        let workspace =
            TempDir::new().map_err(|error| format!("Failed to create workspace: {error}"))?;
        for (relative, contents) in &fixture.setup.files {
            let path = workspace.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|error| format!("Failed to create {}: {error}", parent.display()))?;
            }
            fs::write(&path, contents)
                .map_err(|error| format!("Failed to write {}: {error}", path.display()))?;
        }

        let mut mock = MockPinService::new().with_pins(fixture.setup.pins.clone());
        if let Some(status) = fixture.setup.reject_status {
            mock = mock.with_reject_status(status);
        }
        if fixture.setup.list_failure {
            mock = mock.with_list_failure();
        }

        let (width, height) = fixture.setup.terminal_size.unwrap_or(DEFAULT_TERMINAL_SIZE);
        let tui_app = TuiApp::new(
            TestBackend::new(width, height),
            Box::new(ScriptedEventSource::empty()),
            Arc::new(mock.clone()),
            ConfigManager::in_memory(PinmapConfig::default()),
        )
        .map_err(|error| format!("Failed to create app: {error}"))?;

        Ok(Self {
            fixture,
            workspace,
            mock,
            tui_app,
        })
    }

    /// Start the app the way the binary does, then replay every event
    ///
    /// # Errors
    /// Returns error if an event can't be executed (as opposed to a failed verification)
    pub async fn run(mut self) -> Result<VerificationResult, String> {
        let mut result = VerificationResult::new();

        self.tui_app.render().map_err(|error| error.to_string())?;
        self.tui_app.reload_pins();
        self.wait_for_responses(1).await?;

        let events = self.fixture.events.clone();
        for (index, event) in events.iter().enumerate() {
            if let TestEvent::Verify(step) = event {
                let mut step_result = step.expect.verify(&self.tui_app, &self.mock);
                let label = step
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("step {index}"));
                step_result.failures = step_result
                    .failures
                    .into_iter()
                    .map(|failure| format!("[{}] {label}: {failure}", self.fixture.name))
                    .collect();
                result.merge(step_result);
            } else {
                self.execute(event)
                    .await
                    .map_err(|error| format!("Event {index} failed: {error}"))?;
            }
        }

        Ok(result)
    }

    async fn execute(&mut self, event: &TestEvent) -> Result<(), String> {
        match event {
            TestEvent::KeyPress { key } => {
                let event = key_event(key)?;
                self.send(&event)?;
            }
            TestEvent::TypeText { text } => {
                let text = text.replace("{workspace}", &self.workspace.path().to_string_lossy());
                for character in text.chars() {
                    self.send(&char_event(character))?;
                }
            }
            TestEvent::Click(target) => {
                let (column, row) = self.resolve_click(target)?;
                self.send(&click_event(column, row))?;
            }
            TestEvent::Scroll { direction } => {
                let area = self.map_area()?;
                let event = scroll_event(
                    direction,
                    area.x + area.width / 2,
                    area.y + area.height / 2,
                )?;
                self.send(&event)?;
            }
            TestEvent::WaitForResponses { count } => self.wait_for_responses(*count).await?,
            TestEvent::ExpectNoResponse => {
                let arrived = self
                    .tui_app
                    .wait_for_app_event(QUIET_PERIOD)
                    .await
                    .map_err(|error| error.to_string())?;
                if arrived {
                    return Err("Unexpected background response".to_owned());
                }
            }
            TestEvent::Verify(_) => {}
        }
        Ok(())
    }

    fn send(&mut self, event: &Event) -> Result<(), String> {
        self.tui_app
            .handle_test_event(event)
            .map(|_quit| ())
            .map_err(|error| error.to_string())
    }

    async fn wait_for_responses(&mut self, count: usize) -> Result<(), String> {
        for received in 0..count {
            let arrived = self
                .tui_app
                .wait_for_app_event(RESPONSE_TIMEOUT)
                .await
                .map_err(|error| error.to_string())?;
            if !arrived {
                return Err(format!(
                    "Timed out waiting for response {} of {count}",
                    received + 1
                ));
            }
        }
        Ok(())
    }

    fn map_area(&self) -> Result<Rect, String> {
        self.tui_app
            .map_area()
            .ok_or_else(|| "Map has not been rendered".to_owned())
    }

    fn resolve_click(&self, target: &ClickTarget) -> Result<(u16, u16), String> {
        let area = self.map_area()?;
        match (target.marker, target.offset) {
            (Some(index), None) => {
                let map = self.tui_app.map();
                let marker = map
                    .markers
                    .get(index)
                    .ok_or_else(|| format!("No marker at index {index}"))?;
                map.viewport
                    .latlng_to_cell(area, marker.pin.location())
                    .ok_or_else(|| format!("Marker {index} is off screen"))
            }
            (None, Some((column, row))) => Ok((area.x + column, area.y + row)),
            _ => Err("Click needs exactly one of `marker` or `offset`".to_owned()),
        }
    }
}
