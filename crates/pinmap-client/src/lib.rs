//! Pin service clients.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// HTTP client for the pin server.
pub mod http;
/// In-memory service for tests.
pub mod mock;

pub use http::HttpPinService;
pub use mock::MockPinService;
