//! Integration test framework for pinmap
//!
//! Drives the real TUI application with:
//! - Scripted input (keys, text, mouse clicks) from JSON fixtures
//! - A `MockPinService` standing in for the pin server
//! - A `TestBackend` whose rendered buffer is verified alongside app state

#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

pub mod fixture;
pub mod runner;
pub mod tui_helpers;
pub mod verification_result;
pub mod verify;

pub use fixture::{TestEvent, TestFixture};
pub use runner::PinmapTestRunner;
pub use verification_result::VerificationResult;
pub use verify::VerifyConfig;
