use async_trait::async_trait;
use crossterm::event::{Event, EventStream};
use futures::StreamExt as _;
use std::io;

/// Abstraction over the input event source used by the TUI.
///
/// `next_event` resolves with the next terminal event, or `None` once the source is
/// exhausted (which ends the event loop).
#[async_trait]
pub trait InputEventSource: Send {
    /// Wait for the next input event.
    ///
    /// # Errors
    /// Returns an error if reading from the terminal fails.
    async fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Default event source backed by crossterm's async `EventStream`.
pub struct CrosstermEventSource {
    stream: EventStream,
}

impl CrosstermEventSource {
    /// Creates an event source reading from the terminal.
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputEventSource for CrosstermEventSource {
    async fn next_event(&mut self) -> io::Result<Option<Event>> {
        self.stream.next().await.transpose()
    }
}

/// Event source replaying a fixed list of events, then reporting exhaustion.
#[cfg(any(test, feature = "test-util"))]
pub struct ScriptedEventSource {
    events: std::collections::VecDeque<Event>,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedEventSource {
    /// Creates a source that yields `events` in order.
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Creates a source with no events.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl InputEventSource for ScriptedEventSource {
    async fn next_event(&mut self) -> io::Result<Option<Event>> {
        Ok(self.events.pop_front())
    }
}
