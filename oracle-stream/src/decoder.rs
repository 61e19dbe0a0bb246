//! The streaming frame decoder.
//!
//! Turns an unbounded sequence of raw byte chunks into ordered text
//! increments. Chunk boundaries need not align with lines, JSON values or
//! UTF-8 characters.

use oracle_types::{ProtocolError, StreamError, StreamEvent};

use crate::config::{DecoderConfig, MalformedPolicy};
use crate::frame::{classify, parse_payload, LineKind, Payload, DONE_SENTINEL};
use crate::utf8::Utf8Decoder;

/// Lifecycle of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Accepting chunks.
    Streaming,
    /// `[DONE]` observed; further input is ignored.
    Complete,
    /// A terminal error was reported; further input is ignored.
    Failed,
}

/// Incremental decoder for one chat response stream.
///
/// One instance per request. `feed` takes `&mut self`, so a decoder is
/// driven by exactly one consumer; independent decoders share nothing.
#[derive(Debug)]
pub struct StreamingFrameDecoder {
    config: DecoderConfig,
    utf8: Utf8Decoder,
    /// Decoded text not yet resolved into a line. Never contains `\n`
    /// between calls.
    buffer: String,
    /// A truncated `data:` line waiting for the rest of its JSON. Empty
    /// when nothing is pending.
    pending: String,
    state: DecoderState,
}

impl Default for StreamingFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingFrameDecoder {
    /// Create a decoder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a decoder with an explicit configuration.
    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            utf8: Utf8Decoder::default(),
            buffer: String::new(),
            pending: String::new(),
            state: DecoderState::Streaming,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// True once the `[DONE]` sentinel has been observed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == DecoderState::Complete
    }

    /// True once a terminal error has been reported.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.state == DecoderState::Failed
    }

    /// Feed the next transport chunk and collect the events it completes.
    ///
    /// Events come out in arrival order. After a terminal event every
    /// further call returns nothing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.state != DecoderState::Streaming {
            return events;
        }

        let decoded = self.utf8.decode(chunk, &mut self.buffer);
        // Lines completed before a bad byte are still delivered.
        self.drain_lines(&mut events);
        if let Err(e) = decoded {
            if self.state == DecoderState::Streaming {
                self.fail(e.into(), &mut events);
            }
            return events;
        }

        let unresolved = self.pending.len() + self.buffer.len();
        if self.state == DecoderState::Streaming && unresolved > self.config.max_line_bytes {
            tracing::warn!(
                buffered = unresolved,
                limit = self.config.max_line_bytes,
                pending = !self.pending.is_empty(),
                "unresolved input exceeds line cap"
            );
            let limit = self.config.max_line_bytes;
            self.fail(ProtocolError::LineTooLong { limit }.into(), &mut events);
        }

        events
    }

    /// Signal transport EOF.
    ///
    /// A final unterminated line is processed like any other. If `[DONE]`
    /// was never seen the stream is reported as incomplete.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.state != DecoderState::Streaming {
            return events;
        }

        if self.utf8.has_partial() {
            let offset = self.buffer.len();
            self.fail(ProtocolError::InvalidUtf8 { offset }.into(), &mut events);
            return events;
        }

        if !self.buffer.is_empty() {
            let mut line = std::mem::take(&mut self.pending);
            line.push_str(&self.buffer);
            self.buffer.clear();
            if line.ends_with('\r') {
                line.pop();
            }
            self.process_line(line, &mut events);
        }

        if self.state == DecoderState::Streaming {
            tracing::debug!(
                pending = !self.pending.is_empty(),
                "stream closed before [DONE]"
            );
            self.fail(StreamError::Incomplete, &mut events);
        }
        events
    }

    /// Record a failed transport read. Reported once; later calls are no-ops.
    pub fn fail_transport(&mut self, detail: impl Into<String>) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.state == DecoderState::Streaming {
            self.fail(StreamError::Transport(detail.into()), &mut events);
        }
        events
    }

    /// Split complete lines off the buffer and process them in order.
    ///
    /// Lines are read through a cursor and the consumed prefix is dropped
    /// once at the end, so a chunk of many lines is scanned a single time.
    fn drain_lines(&mut self, events: &mut Vec<StreamEvent>) {
        let mut cursor = 0;
        while self.state == DecoderState::Streaming {
            let Some(offset) = self.buffer[cursor..].find('\n') else {
                break;
            };
            let end = cursor + offset;
            let raw = &self.buffer[cursor..end];
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let line = if self.pending.is_empty() {
                raw.to_owned()
            } else {
                tracing::trace!(len = raw.len(), "re-attempting buffered data line");
                let mut joined = std::mem::take(&mut self.pending);
                joined.push_str(raw);
                joined
            };
            cursor = end + 1;
            self.process_line(line, events);
        }
        // A terminal line has already cleared the buffer.
        if self.state == DecoderState::Streaming {
            self.buffer.drain(..cursor);
        }
    }

    fn process_line(&mut self, line: String, events: &mut Vec<StreamEvent>) {
        let payload = match classify(&line) {
            LineKind::Blank | LineKind::Comment => return,
            LineKind::Unrecognized => {
                tracing::trace!(line = %line, "ignoring unrecognized line");
                return;
            }
            LineKind::Data("") => return,
            LineKind::Data(payload) => payload,
        };

        if payload == DONE_SENTINEL {
            tracing::debug!("stream complete");
            self.state = DecoderState::Complete;
            self.buffer.clear();
            self.pending.clear();
            events.push(StreamEvent::Done);
            return;
        }

        match parse_payload(payload) {
            Ok(Payload::Delta(text)) => {
                tracing::trace!(len = text.len(), "delta");
                events.push(StreamEvent::Text(text));
            }
            Ok(Payload::Empty) => {}
            Ok(Payload::Error(message)) => {
                tracing::warn!(message = %message, "gateway reported an in-band error");
                self.fail(StreamError::Upstream(message), events);
            }
            // A value cut short by a line break: hold the raw line so the
            // next line completes it.
            Err(e) if e.is_eof() => self.pending = line,
            Err(e) => self.malformed(line, e, events),
        }
    }

    fn malformed(&mut self, line: String, err: serde_json::Error, events: &mut Vec<StreamEvent>) {
        match self.config.malformed {
            MalformedPolicy::Skip => {
                tracing::warn!(line = %line, error = %err, "skipping malformed data line");
            }
            MalformedPolicy::Fail => {
                let error = ProtocolError::MalformedPayload {
                    detail: err.to_string(),
                    line,
                };
                self.fail(error.into(), events);
            }
        }
    }

    fn fail(&mut self, error: StreamError, events: &mut Vec<StreamEvent>) {
        tracing::debug!(error = %error, "stream failed");
        self.state = DecoderState::Failed;
        self.buffer.clear();
        self.pending.clear();
        events.push(StreamEvent::Error(error));
    }
}
