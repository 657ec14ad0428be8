use async_trait::async_trait;

use crate::{CreatedPin, NewPin, Pin, Result};

/// Access to the server that stores pins.
#[async_trait]
pub trait PinService: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &'static str;

    /// Fetches every stored pin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON array of pins.
    async fn list_pins(&self) -> Result<Vec<Pin>>;

    /// Submits a new pin.
    ///
    /// Any success status counts as accepted. The created pin is returned when the
    /// server's answer contains one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Rejected`] for a non-success status, or a request error
    /// if no response was received.
    async fn add_pin(&self, pin: NewPin) -> Result<Option<CreatedPin>>;
}
