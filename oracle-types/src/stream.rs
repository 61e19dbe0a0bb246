//! Streaming event types for incremental Oracle responses.

use std::pin::Pin;

use futures::Stream;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::StreamError;

/// An event emitted while decoding a response stream.
///
/// A well-formed stream yields zero or more `Text` events followed by
/// exactly one terminal event (`Done` or `Error`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental answer text, in arrival order.
    Text(String),
    /// The `[DONE]` sentinel was observed.
    Done,
    /// The stream failed; nothing follows.
    Error(StreamError),
}

impl StreamEvent {
    /// Whether this event ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error(_))
    }

    /// The text increment, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

/// Serializes as `{"kind":"text","value":..}`, `{"kind":"done"}` or
/// `{"kind":"error","detail":..}` for UI bridges.
impl Serialize for StreamEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => {
                let mut s = serializer.serialize_struct("StreamEvent", 2)?;
                s.serialize_field("kind", "text")?;
                s.serialize_field("value", value)?;
                s.end()
            }
            Self::Done => {
                let mut s = serializer.serialize_struct("StreamEvent", 1)?;
                s.serialize_field("kind", "done")?;
                s.end()
            }
            Self::Error(err) => {
                let mut s = serializer.serialize_struct("StreamEvent", 2)?;
                s.serialize_field("kind", "error")?;
                s.serialize_field("detail", &err.to_string())?;
                s.end()
            }
        }
    }
}

/// Handle to a streaming Oracle response.
pub struct StreamHandle {
    /// The stream of events. Consume with `StreamExt::next()`.
    pub receiver: Pin<Box<dyn Stream<Item = StreamEvent> + Send>>,
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}
