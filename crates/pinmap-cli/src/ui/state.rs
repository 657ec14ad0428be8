/// Message shown after a successful submission.
pub const PIN_ADDED: &str = "Pin added!";
/// Message shown after any failed submission.
pub const PIN_ADD_FAILED: &str = "Error adding pin.";
/// Status line text after a failed load.
pub const LOAD_FAILED: &str = "Failed to load pins";

/// Kind of modal alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Confirmation
    Info,
    /// Failure
    Error,
}

/// Modal message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Visual kind
    pub kind: AlertKind,
    /// Text shown in the box
    pub message: String,
}

/// Main UI state
#[derive(Debug, Default)]
pub struct UiState {
    /// Alert currently blocking input
    pub alert: Option<Alert>,
    /// Number of alerts raised since start
    pub alerts_shown: usize,
    /// Status line text
    pub status: Option<String>,
    /// Whether a pin load is in flight
    pub loading: bool,
}

impl UiState {
    /// Raises a modal alert, replacing any visible one.
    pub fn show_alert(&mut self, kind: AlertKind, message: &str) {
        tracing::info!("Alert ({kind:?}): {message}");
        self.alert = Some(Alert {
            kind,
            message: message.to_owned(),
        });
        self.alerts_shown += 1;
    }

    /// Closes the visible alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Replaces the status line text.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }
}
