//! Expectations checked against the running app and the mock server.

use pinmap_cli::{SubmissionFlow, TuiApp};
use pinmap_client::MockPinService;
use ratatui::backend::TestBackend;
use serde::{Deserialize, Serialize};

use crate::verification_result::VerificationResult;

/// Expected state; unset fields are not checked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    /// Number of markers on the map
    pub marker_count: Option<usize>,
    /// Number of pin list requests the server received
    pub list_calls: Option<usize>,
    /// Number of submissions the server received
    pub add_calls: Option<usize>,
    /// Message of the visible alert, or `""` for no alert
    pub alert: Option<String>,
    /// Total alerts raised so far
    pub alerts_shown: Option<usize>,
    /// Status line text
    pub status: Option<String>,
    /// Flow step: `idle`, `name_prompt`, `form`, or `submitting`
    pub flow: Option<String>,
    /// Index of the marker whose popup is open
    pub open_popup: Option<usize>,
    /// Whether any popup is open
    pub popup_open: Option<bool>,
    /// Current zoom level
    pub zoom: Option<u8>,
    /// Texts the rendered screen must contain
    #[serde(default)]
    pub screen_contains: Vec<String>,
    /// Texts the rendered screen must not contain
    #[serde(default)]
    pub screen_not_contains: Vec<String>,
}

fn flow_name(flow: &SubmissionFlow) -> &'static str {
    match flow {
        SubmissionFlow::Idle => "idle",
        SubmissionFlow::NamePrompt(_) => "name_prompt",
        SubmissionFlow::Form(_) => "form",
        SubmissionFlow::Submitting(_) => "submitting",
    }
}

impl VerifyConfig {
    /// Checks every set expectation
    pub fn verify(&self, app: &TuiApp<TestBackend>, mock: &MockPinService) -> VerificationResult {
        let mut result = VerificationResult::new();
        let map = app.map();
        let state = app.state();

        if let Some(expected) = self.marker_count {
            result.check("marker count", &expected, &map.markers.len());
        }
        if let Some(expected) = self.list_calls {
            result.check("list calls", &expected, &mock.list_call_count());
        }
        if let Some(expected) = self.add_calls {
            result.check("add calls", &expected, &mock.add_call_count());
        }
        if let Some(expected) = &self.alert {
            let actual = state
                .alert
                .as_ref()
                .map_or_else(String::new, |alert| alert.message.clone());
            result.check("alert", expected, &actual);
        }
        if let Some(expected) = self.alerts_shown {
            result.check("alerts shown", &expected, &state.alerts_shown);
        }
        if let Some(expected) = &self.status {
            result.check("status", &Some(expected.clone()), &state.status);
        }
        if let Some(expected) = &self.flow {
            result.check("flow", &expected.as_str(), &flow_name(app.flow()));
        }
        if let Some(expected) = self.open_popup {
            result.check("open popup", &Some(expected), &map.open_popup);
        }
        if let Some(expected) = self.popup_open {
            result.check("popup open", &expected, &map.open_popup.is_some());
        }
        if let Some(expected) = self.zoom {
            result.check("zoom", &expected, &map.viewport.zoom());
        }

        let screen = app.buffer_text();
        for text in &self.screen_contains {
            if screen.contains(text.as_str()) {
                result.add_success(format!("screen contains {text:?}"));
            } else {
                result.add_failure(format!("screen missing {text:?}:\n{screen}"));
            }
        }
        for text in &self.screen_not_contains {
            if screen.contains(text.as_str()) {
                result.add_failure(format!("screen unexpectedly contains {text:?}:\n{screen}"));
            } else {
                result.add_success(format!("screen lacks {text:?}"));
            }
        }

        result
    }
}
