//! Test helpers and accessors for `TuiApp`
//!
//! These methods provide controlled access to internal state for testing purposes.
//! They are available when compiling tests or when the `test-util` feature is enabled.
//!
//! # Testing Pattern
//!
//! When writing UI tests:
//! 1. Create a `TuiApp` with [`TuiApp::new_for_test`] and a `MockPinService`
//! 2. Feed input with `handle_test_event()` or inject an `InputEventSource`
//! 3. Drain background results with `wait_for_app_event()`
//! 4. Use accessor methods and `buffer_text()` to verify state
//!
//! Never manipulate internal state directly - use the provided methods.

#[cfg(any(test, feature = "test-util"))]
use crossterm::event::Event;
#[cfg(any(test, feature = "test-util"))]
use pinmap_core::{PinService, Result, Theme};
#[cfg(any(test, feature = "test-util"))]
use ratatui::backend::{Backend, TestBackend};
#[cfg(any(test, feature = "test-util"))]
use ratatui::layout::Rect;
#[cfg(any(test, feature = "test-util"))]
use std::sync::Arc;
#[cfg(any(test, feature = "test-util"))]
use std::time::Duration;

#[cfg(any(test, feature = "test-util"))]
use super::tui_app::TuiApp;
#[cfg(any(test, feature = "test-util"))]
use crate::config::ConfigManager;
#[cfg(any(test, feature = "test-util"))]
use crate::ui::event_source::{InputEventSource, ScriptedEventSource};
#[cfg(any(test, feature = "test-util"))]
use crate::ui::flow::SubmissionFlow;
#[cfg(any(test, feature = "test-util"))]
use crate::ui::map_state::MapState;
#[cfg(any(test, feature = "test-util"))]
use crate::ui::state::UiState;

/// Terminal width used by [`TuiApp::new_for_test`]
#[cfg(any(test, feature = "test-util"))]
pub const TEST_WIDTH: u16 = 100;
/// Terminal height used by [`TuiApp::new_for_test`]
#[cfg(any(test, feature = "test-util"))]
pub const TEST_HEIGHT: u16 = 30;

#[cfg(any(test, feature = "test-util"))]
impl TuiApp<TestBackend> {
    /// Creates an app on a [`TestBackend`] with no scripted input
    ///
    /// # Errors
    /// Returns an error if the test terminal cannot be created.
    pub fn new_for_test(service: Arc<dyn PinService>, config: ConfigManager) -> Result<Self> {
        Self::new(
            TestBackend::new(TEST_WIDTH, TEST_HEIGHT),
            Box::new(ScriptedEventSource::empty()),
            service,
            config,
        )
    }

    /// Renders the test buffer as one string per row joined with newlines
    ///
    /// # Testing Only
    /// Use this to assert on what the user would see.
    pub fn buffer_text(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|row| {
                (area.left()..area.right())
                    .map(|column| buffer[(column, row)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(any(test, feature = "test-util"))]
#[allow(dead_code, reason = "Test utilities")]
impl<B: Backend> TuiApp<B> {
    /// Gets a reference to the terminal backend
    ///
    /// # Testing Only
    /// This method is intended for test assertions only.
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Gets immutable access to UI state
    ///
    /// # Testing Only
    /// Use this to verify alerts and the status line.
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Gets immutable access to the map controller
    ///
    /// # Testing Only
    /// Use this to verify markers, popups, and the viewport.
    pub fn map(&self) -> &MapState {
        &self.map
    }

    /// Gets the new-pin flow
    ///
    /// # Testing Only
    /// Use this to verify which dialog is open.
    pub fn flow(&self) -> &SubmissionFlow {
        &self.flow
    }

    /// Gets the current theme
    ///
    /// # Testing Only
    /// Use this to verify theme cycling.
    pub fn theme(&self) -> Theme {
        self.renderer.theme()
    }

    /// Gets the effective configuration manager
    ///
    /// # Testing Only
    /// Use this to verify persisted preferences.
    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// Inner map area from the last render
    ///
    /// # Testing Only
    /// Use this to aim mouse clicks at map cells.
    pub fn map_area(&self) -> Option<Rect> {
        self.layout_cache.map_area
    }

    /// Replaces the input event source
    ///
    /// # Testing Only
    /// Use this to inject a custom event source that provides synthetic events.
    pub fn set_event_source(&mut self, source: Box<dyn InputEventSource>) {
        self.event_source = source;
    }

    /// Processes one input event and re-renders; returns true if it requested quit
    ///
    /// # Errors
    /// Returns an error if rendering fails.
    pub fn handle_test_event(&mut self, event: &Event) -> Result<bool> {
        let quit = self.handle_input(event);
        self.render()?;
        Ok(quit)
    }

    /// Waits for one background result, applies it, and re-renders
    ///
    /// Returns false if nothing arrived within `timeout`.
    ///
    /// # Errors
    /// Returns an error if rendering fails.
    pub async fn wait_for_app_event(&mut self, timeout: Duration) -> Result<bool> {
        match tokio::time::timeout(timeout, self.event_receiver.recv()).await {
            Ok(Some(event)) => {
                self.handle_app_event(event);
                self.render()?;
                Ok(true)
            }
            Ok(None) | Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::renderer::MARKER_SYMBOL;
    use crate::ui::state::{AlertKind, LOAD_FAILED, PIN_ADD_FAILED, PIN_ADDED};
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use pinmap_client::MockPinService;
    use pinmap_core::config::MIN_ZOOM;
    use pinmap_core::{Pin, PinmapConfig};

    const WAIT: Duration = Duration::from_secs(5);

    fn pin(name: &str, lat: f64, lng: f64, image_url: Option<&str>) -> Pin {
        Pin {
            name: name.to_owned(),
            lat,
            lng,
            author: "asha".to_owned(),
            image_url: image_url.map(str::to_owned),
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    async fn loaded_app(mock: &MockPinService) -> TuiApp<TestBackend> {
        let mut app = TuiApp::new_for_test(
            Arc::new(mock.clone()),
            ConfigManager::in_memory(PinmapConfig::default()),
        )
        .unwrap();
        app.render().unwrap();
        app.reload_pins();
        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        app
    }

    fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
        for character in text.chars() {
            app.handle_test_event(&key(KeyCode::Char(character))).unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_load_renders_no_markers() {
        let mock = MockPinService::new();
        let app = loaded_app(&mock).await;
        assert!(app.map().markers.is_empty());
        assert!(!app.buffer_text().contains(MARKER_SYMBOL));
        assert_eq!(mock.list_call_count(), 1);
    }

    #[tokio::test]
    async fn test_load_renders_each_marker() {
        let mock = MockPinService::new().with_pins(vec![
            pin("Vishnupad", 24.7954, 85.0039, None),
            pin("Ghat", 24.7960, 85.0050, Some("/static/uploads/ghat.jpg")),
        ]);
        let app = loaded_app(&mock).await;

        assert_eq!(app.map().markers.len(), 2);
        let text = app.buffer_text();
        assert_eq!(text.matches(MARKER_SYMBOL).count(), 2);
        assert!(text.contains("Loaded 2 pins"));
    }

    #[tokio::test]
    async fn test_tab_opens_popup_with_details() {
        let mock = MockPinService::new().with_pins(vec![
            pin("Vishnupad", 24.7954, 85.0039, None),
            pin("Ghat", 24.7960, 85.0050, Some("/static/uploads/ghat.jpg")),
        ]);
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&key(KeyCode::Tab)).unwrap();
        let text = app.buffer_text();
        assert!(text.contains("Vishnupad"));
        assert!(text.contains("Added by: asha"));
        assert!(!text.contains("Image:"));

        app.handle_test_event(&key(KeyCode::Tab)).unwrap();
        let text = app.buffer_text();
        assert!(text.contains("Ghat"));
        assert!(text.contains("Image: /static/uploads/ghat.jpg"));

        app.handle_test_event(&key(KeyCode::Esc)).unwrap();
        assert!(app.map().open_popup.is_none());
    }

    #[tokio::test]
    async fn test_reload_does_not_duplicate_markers() {
        let mock = MockPinService::new().with_pins(vec![pin("Ghat", 24.7960, 85.0050, None)]);
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&key(KeyCode::Char('r'))).unwrap();
        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        assert_eq!(app.map().markers.len(), 1);
        assert_eq!(mock.list_call_count(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_sets_status_only() {
        let mock = MockPinService::new().with_list_failure();
        let app = loaded_app(&mock).await;

        assert!(app.map().markers.is_empty());
        assert!(app.state().alert.is_none());
        assert_eq!(app.state().status.as_deref(), Some(LOAD_FAILED));
        assert!(app.buffer_text().contains(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_click_on_marker_opens_its_popup() {
        let mock = MockPinService::new().with_pins(vec![pin("Ghat", 24.7954, 85.0039, None)]);
        let mut app = loaded_app(&mock).await;
        let area = app.map_area().unwrap();
        let (column, row) = app
            .map()
            .viewport
            .latlng_to_cell(area, app.map().markers.get(0).unwrap().pin.location())
            .unwrap();

        app.handle_test_event(&click(column, row)).unwrap();
        assert_eq!(app.map().open_popup, Some(0));
        assert!(app.flow().is_idle());
    }

    #[tokio::test]
    async fn test_cancelled_prompt_makes_no_request() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&click(10, 5)).unwrap();
        assert!(matches!(app.flow(), SubmissionFlow::NamePrompt(_)));
        assert!(app.buffer_text().contains("Enter a name"));
        app.handle_test_event(&key(KeyCode::Esc)).unwrap();

        app.handle_test_event(&click(10, 5)).unwrap();
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();

        assert!(app.flow().is_idle());
        assert!(!app.buffer_text().contains("Add pin"));
        assert!(!app.wait_for_app_event(Duration::from_millis(100)).await.unwrap());
        assert_eq!(mock.add_call_count(), 0);
        assert_eq!(mock.list_call_count(), 1);
    }

    #[tokio::test]
    async fn test_successful_submission_reloads_once() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&click(20, 8)).unwrap();
        type_text(&mut app, "Ghat");
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        assert!(app.buffer_text().contains("Add pin"));
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        assert!(app.buffer_text().contains("Submitting..."));

        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        assert!(app.flow().is_idle());
        assert_eq!(app.state().alerts_shown, 1);
        assert_eq!(
            app.state().alert.as_ref().map(|alert| alert.message.as_str()),
            Some(PIN_ADDED)
        );

        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        assert_eq!(mock.list_call_count(), 2);
        assert_eq!(app.map().markers.len(), 1);
        assert!(!app.wait_for_app_event(Duration::from_millis(100)).await.unwrap());
        assert_eq!(app.state().alerts_shown, 1);
    }

    #[tokio::test]
    async fn test_world_view_click_adds_a_visible_pin() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;
        for _ in 0..20 {
            app.handle_test_event(&key(KeyCode::Char('-'))).unwrap();
        }
        assert_eq!(app.map().viewport.zoom(), MIN_ZOOM);

        let area = app.map_area().unwrap();
        let right = area.x + area.width - 1;

        // Above the pole: nothing to pin
        app.handle_test_event(&click(right, area.y)).unwrap();
        assert!(app.flow().is_idle());

        app.handle_test_event(&click(right, area.y + area.height / 2))
            .unwrap();
        type_text(&mut app, "Edge");
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        assert!(app.wait_for_app_event(WAIT).await.unwrap());

        let submitted = mock.submissions()[0].location;
        assert!(submitted.is_valid(), "Submitted {submitted:?}");
        assert_eq!(app.map().markers.len(), 1);
        assert_eq!(mock.stored_pins().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_form_and_markers() {
        let mock = MockPinService::new()
            .with_pins(vec![pin("Ghat", 24.7960, 85.0050, None)])
            .with_reject_status(500);
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Temple");
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();

        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        let alert = app.state().alert.clone().unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.message, PIN_ADD_FAILED);
        assert_eq!(app.state().alerts_shown, 1);
        assert_eq!(app.map().markers.len(), 1);
        assert_eq!(mock.list_call_count(), 1);

        let SubmissionFlow::Form(form) = app.flow() else {
            panic!("Form should stay open after a failure");
        };
        assert_eq!(form.name.value(), "Temple");

        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        assert!(app.state().alert.is_none());
        assert!(matches!(app.flow(), SubmissionFlow::Form(_)));
    }

    #[tokio::test]
    async fn test_non_image_attachment_fails_without_request() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Notes");
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        app.handle_test_event(&key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "/tmp/notes.txt");
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();

        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        assert_eq!(
            app.state().alert.as_ref().map(|alert| alert.message.as_str()),
            Some(PIN_ADD_FAILED)
        );
        assert_eq!(mock.add_call_count(), 0);
    }

    #[tokio::test]
    async fn test_clicks_ignored_while_alert_open() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "X");
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        app.handle_test_event(&key(KeyCode::Enter)).unwrap();
        assert!(app.wait_for_app_event(WAIT).await.unwrap());
        assert!(app.state().alert.is_some());

        app.handle_test_event(&click(10, 5)).unwrap();
        assert!(app.flow().is_idle());
        assert!(!app.handle_test_event(&key(KeyCode::Char('q'))).unwrap());

        app.handle_test_event(&key(KeyCode::Char(' '))).unwrap();
        assert!(app.state().alert.is_none());
    }

    #[tokio::test]
    async fn test_typing_q_in_prompt_does_not_quit() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;

        app.handle_test_event(&key(KeyCode::Char('a'))).unwrap();
        assert!(!app.handle_test_event(&key(KeyCode::Char('q'))).unwrap());
        let SubmissionFlow::NamePrompt(prompt) = app.flow() else {
            panic!("Prompt should stay open");
        };
        assert_eq!(prompt.input.value(), "q");
    }

    #[tokio::test]
    async fn test_keyboard_navigation() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;
        let start = app.map().viewport;

        app.handle_test_event(&key(KeyCode::Right)).unwrap();
        app.handle_test_event(&key(KeyCode::Char('+'))).unwrap();
        assert!(app.map().viewport.center().lng > start.center().lng);
        assert_eq!(app.map().viewport.zoom(), start.zoom() + 1);

        app.handle_test_event(&key(KeyCode::Char('c'))).unwrap();
        assert_eq!(app.map().viewport, start);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;
        assert!(app.handle_test_event(&key(KeyCode::Char('q'))).unwrap());
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.handle_test_event(&ctrl_c).unwrap());
    }

    #[tokio::test]
    async fn test_theme_cycles() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;
        let ctrl_p = Event::Key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        app.handle_test_event(&ctrl_p).unwrap();
        assert_eq!(app.theme(), Theme::TokyoNight.next());
        assert_eq!(app.config().get().ui.theme, Theme::TokyoNight.next());
    }

    #[tokio::test]
    async fn test_event_loop_ends_when_input_is_exhausted() {
        let mock = MockPinService::new();
        let mut app = loaded_app(&mock).await;
        app.set_event_source(Box::new(ScriptedEventSource::new([
            key(KeyCode::Char('+')),
            key(KeyCode::Char('q')),
            key(KeyCode::Char('+')),
        ])));
        app.run_event_loop().await.unwrap();
        assert_eq!(app.map().viewport.zoom(), 15);
    }
}
