use pinmap_core::{CreatedPin, Pin, Result};

/// Results reported back to the UI loop by background requests.
#[derive(Debug)]
pub enum AppEvent {
    /// A pin list request finished
    PinsLoaded {
        /// Generation issued when the request started
        generation: u64,
        /// Pins, or the reason the load failed
        result: Result<Vec<Pin>>,
    },
    /// A new-pin submission finished
    PinSubmitted {
        /// Server answer, or the reason the submission failed
        result: Result<Option<CreatedPin>>,
    },
}
