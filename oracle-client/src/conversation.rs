//! Conversation history and reply assembly.
//!
//! The decoder only emits increments; the assembled answer lives here.

use futures::StreamExt;
use oracle_types::{ChatMessage, ConsultRequest, Mode, StreamError, StreamEvent, StreamHandle};

/// Opening line shown before the seeker asks anything. Never sent upstream.
pub const GREETING: &str = "Namaste, seeker. I am the Oracle, your guide through the labyrinth of \
ancient wisdom. Ask me about Yoga, Tantra, Ayurveda, or the science of consciousness. I can \
illuminate the path between the timeless and the modern.\n\nWhat mysteries shall we explore together?";

/// What happens to streamed text when the reply fails part way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialPolicy {
    /// Drop the partial reply.
    #[default]
    Discard,
    /// Keep whatever text arrived before the failure.
    Keep,
}

/// Progress of one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    /// Still receiving text.
    Streaming,
    /// `[DONE]` arrived.
    Complete,
    /// The stream failed.
    Failed,
}

/// Assembles one streamed reply from [`StreamEvent`]s.
#[derive(Debug, Clone)]
pub struct Transcript {
    text: String,
    status: ReplyStatus,
    error: Option<StreamError>,
    policy: PartialPolicy,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(PartialPolicy::default())
    }
}

impl Transcript {
    /// An empty reply.
    #[must_use]
    pub fn new(policy: PartialPolicy) -> Self {
        Self {
            text: String::new(),
            status: ReplyStatus::Streaming,
            error: None,
            policy,
        }
    }

    /// Apply the next event. Events after a terminal one are ignored.
    pub fn apply(&mut self, event: StreamEvent) -> ReplyStatus {
        if self.status != ReplyStatus::Streaming {
            return self.status;
        }
        match event {
            StreamEvent::Text(delta) => self.text.push_str(&delta),
            StreamEvent::Done => self.status = ReplyStatus::Complete,
            StreamEvent::Error(error) => {
                let keep = self.policy == PartialPolicy::Keep;
                tracing::debug!(error = %error, keep, "reply failed");
                if !keep {
                    self.text.clear();
                }
                self.error = Some(error);
                self.status = ReplyStatus::Failed;
            }
        }
        self.status
    }

    /// Text assembled so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ReplyStatus {
        self.status
    }

    /// The failure, if the reply failed.
    #[must_use]
    pub fn error(&self) -> Option<&StreamError> {
        self.error.as_ref()
    }

    /// The assistant turn worth keeping in history, if any.
    ///
    /// A complete reply is always kept; a failed one only under
    /// [`PartialPolicy::Keep`] and only if some text arrived.
    #[must_use]
    pub fn into_reply(self) -> Option<ChatMessage> {
        match self.status {
            ReplyStatus::Complete => Some(ChatMessage::assistant(self.text)),
            ReplyStatus::Failed if !self.text.is_empty() => Some(ChatMessage::assistant(self.text)),
            _ => None,
        }
    }
}

/// Drain a handle into the finished reply text.
///
/// A stream that ends without a terminal event counts as incomplete.
pub async fn collect_reply(mut handle: StreamHandle) -> Result<String, StreamError> {
    let mut transcript = Transcript::new(PartialPolicy::Discard);
    while let Some(event) = handle.receiver.next().await {
        if transcript.apply(event) != ReplyStatus::Streaming {
            break;
        }
    }
    match transcript.status {
        ReplyStatus::Complete => Ok(transcript.text),
        ReplyStatus::Failed => Err(transcript.error.unwrap_or(StreamError::Incomplete)),
        ReplyStatus::Streaming => Err(StreamError::Incomplete),
    }
}

/// A chat session: the greeting plus every recorded exchange.
#[derive(Debug, Clone)]
pub struct Conversation {
    greeting: ChatMessage,
    history: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A fresh conversation opening with [`GREETING`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            greeting: ChatMessage::assistant(GREETING),
            history: Vec::new(),
        }
    }

    /// The greeting shown first.
    #[must_use]
    pub fn greeting(&self) -> &ChatMessage {
        &self.greeting
    }

    /// Recorded turns, oldest first, greeting excluded.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Build the request for a new question. `None` if the question is blank.
    #[must_use]
    pub fn request_for(&self, question: &str, mode: Mode) -> Option<ConsultRequest> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        let mut messages = self.history.clone();
        messages.push(ChatMessage::user(question));
        Some(ConsultRequest { messages, mode })
    }

    /// Record a finished exchange. The question is always kept; the reply
    /// only when [`Transcript::into_reply`] yields one.
    pub fn record(&mut self, question: &str, transcript: Transcript) {
        self.history.push(ChatMessage::user(question.trim()));
        if let Some(reply) = transcript.into_reply() {
            self.history.push(reply);
        }
    }
}
