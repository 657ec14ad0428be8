//! Mock pin service for testing map workflows.
//!
//! Serves a fixed pin list, accepts or rejects submissions with a chosen status,
//! and records every call so tests can assert on request counts.

use async_trait::async_trait;
use pinmap_core::{CreatedPin, Error, IgnoreLock as _, NewPin, Pin, PinService, Result};
use std::sync::{Arc, Mutex};

/// Author recorded for pins accepted by the mock.
const MOCK_AUTHOR: &str = "mock-user";

/// Shared mock state.
#[derive(Default)]
struct MockState {
    /// Pins returned by `list_pins`
    pins: Vec<Pin>,
    /// Status used to reject submissions (`None` accepts)
    reject_status: Option<u16>,
    /// Whether `list_pins` fails with an invalid body
    fail_list: bool,
    /// Number of `list_pins` calls
    list_calls: usize,
    /// Every submission received, accepted or not
    submissions: Vec<NewPin>,
}

/// In-memory pin service that records its calls.
#[derive(Clone, Default)]
pub struct MockPinService {
    /// State shared between clones
    state: Arc<Mutex<MockState>>,
}

impl MockPinService {
    /// Create an empty mock that accepts every submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pins returned by `list_pins`.
    #[must_use]
    pub fn with_pins(self, pins: Vec<Pin>) -> Self {
        self.state.lock_ignore_poison().pins = pins;
        self
    }

    /// Reject every submission with the given HTTP status.
    #[must_use]
    pub fn with_reject_status(self, status: u16) -> Self {
        self.state.lock_ignore_poison().reject_status = Some(status);
        self
    }

    /// Make `list_pins` fail as if the body were not JSON.
    #[must_use]
    pub fn with_list_failure(self) -> Self {
        self.state.lock_ignore_poison().fail_list = true;
        self
    }

    /// Number of `list_pins` calls made so far.
    #[must_use]
    pub fn list_call_count(&self) -> usize {
        self.state.lock_ignore_poison().list_calls
    }

    /// Number of `add_pin` calls made so far.
    #[must_use]
    pub fn add_call_count(&self) -> usize {
        self.state.lock_ignore_poison().submissions.len()
    }

    /// Every submission received so far.
    #[must_use]
    pub fn submissions(&self) -> Vec<NewPin> {
        self.state.lock_ignore_poison().submissions.clone()
    }

    /// Pins currently stored.
    #[must_use]
    pub fn stored_pins(&self) -> Vec<Pin> {
        self.state.lock_ignore_poison().pins.clone()
    }
}

#[async_trait]
impl PinService for MockPinService {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_pins(&self) -> Result<Vec<Pin>> {
        let mut state = self.state.lock_ignore_poison();
        state.list_calls += 1;
        if state.fail_list {
            drop(state);
            let parse_error = serde_json::from_str::<Vec<Pin>>("<html>")
                .err()
                .map_or_else(|| Error::Other("mock list failure".to_owned()), Error::Json);
            return Err(parse_error);
        }
        Ok(state.pins.clone())
    }

    async fn add_pin(&self, pin: NewPin) -> Result<Option<CreatedPin>> {
        let mut state = self.state.lock_ignore_poison();
        state.submissions.push(pin.clone());

        if let Some(status) = state.reject_status {
            return Err(Error::Rejected { status });
        }

        let stored = Pin {
            name: pin.name,
            lat: pin.location.lat,
            lng: pin.location.lng,
            author: MOCK_AUTHOR.to_owned(),
            image_url: pin
                .image
                .map(|image| format!("/static/uploads/{}", image.file_name)),
        };
        state.pins.push(stored.clone());
        drop(state);

        Ok(Some(CreatedPin {
            message: Some("Pin added!".to_owned()),
            pin: stored,
        }))
    }
}
