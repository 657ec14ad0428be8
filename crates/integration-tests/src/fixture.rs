//! Fixture format for map integration tests.
//!
//! A fixture seeds the mock pin server, optionally writes files into a temporary
//! workspace (for image attachments), then replays a list of input events with
//! verification steps in between.

use pinmap_core::Pin;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::verify::VerifyConfig;

/// Complete test fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestFixture {
    /// Test name
    pub name: String,
    /// Test description
    pub description: String,
    /// Test tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
    /// Setup configuration
    #[serde(default)]
    pub setup: SetupConfig,
    /// Event sequence
    pub events: Vec<TestEvent>,
}

/// Setup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupConfig {
    /// Pins the mock server returns
    #[serde(default)]
    pub pins: Vec<Pin>,
    /// Status the mock rejects submissions with (accepts when absent)
    pub reject_status: Option<u16>,
    /// Whether the mock answers pin lists with an invalid body
    #[serde(default)]
    pub list_failure: bool,
    /// Files to create in the workspace, keyed by relative path
    #[serde(default)]
    pub files: HashMap<String, String>,
    /// Terminal size (width, height)
    pub terminal_size: Option<(u16, u16)>,
}

/// Test event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestEvent {
    /// Key press such as `"Enter"`, `"a"` or `"Ctrl+P"`
    KeyPress {
        /// Key to press
        key: String,
    },
    /// Types each character of `text`; `{workspace}` expands to the workspace path
    TypeText {
        /// Text to type
        text: String,
    },
    /// Left click inside the map
    Click(ClickTarget),
    /// Mouse wheel over the map
    Scroll {
        /// `"up"` or `"down"`
        direction: String,
    },
    /// Waits for background responses to arrive and be applied
    WaitForResponses {
        /// Number of responses to wait for
        count: usize,
    },
    /// Asserts that no background response arrives
    ExpectNoResponse,
    /// Mid-run verification
    Verify(VerifyStep),
}

/// Where a click lands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClickTarget {
    /// Click the cell of the marker at this index
    pub marker: Option<usize>,
    /// Click this (column, row) offset from the map's top-left cell
    pub offset: Option<(u16, u16)>,
}

/// Verification step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyStep {
    /// Description shown in failure messages
    #[serde(default)]
    pub description: Option<String>,
    /// Expectations
    pub expect: VerifyConfig,
}
