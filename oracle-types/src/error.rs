//! Error types for all oracle crates.

use std::time::Duration;

/// A violation of the event-stream wire format.
///
/// Protocol errors cannot be explained by chunk boundaries: waiting for more
/// bytes would not make the offending input valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A `data:` payload that is neither `[DONE]` nor a (possibly truncated) JSON value.
    #[error("malformed data payload: {detail}")]
    MalformedPayload {
        /// Parser diagnostic.
        detail: String,
        /// The offending line, prefix included.
        line: String,
    },
    /// Buffered input grew past the configured cap without yielding a complete line.
    #[error("line exceeds {limit} bytes without resolving")]
    LineTooLong {
        /// The configured cap in bytes.
        limit: usize,
    },
    /// The body contained a byte sequence that is not UTF-8.
    #[error("invalid UTF-8 in stream body at byte {offset}")]
    InvalidUtf8 {
        /// Offset of the bad sequence within the chunk that carried it.
        offset: usize,
    },
}

/// Terminal failure of a response stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// Reading the body failed mid-stream.
    #[error("stream read error: {0}")]
    Transport(String),
    /// The body ended before the `[DONE]` sentinel.
    #[error("stream ended before completion")]
    Incomplete,
    /// The gateway sent an error object in place of a chunk.
    #[error("upstream error: {0}")]
    Upstream(String),
    /// The body broke the wire format.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl StreamError {
    /// Whether resubmitting the whole request could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Incomplete)
    }
}

/// Errors from consulting the Oracle over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    // Retryable errors
    /// Network-level error (connection reset, DNS failure, etc.).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Upstream asked us to slow down.
    #[error("rate limited: {message}")]
    RateLimited {
        /// User-facing message from the service.
        message: String,
        /// Suggested retry delay, if the service sent one.
        retry_after: Option<Duration>,
    },
    /// Upstream is temporarily unavailable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    // Terminal errors
    /// Account credits are exhausted.
    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),
    /// Authentication/authorization failure.
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// Malformed or rejected request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response stream failed after it started.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl OracleError {
    /// Whether this error is likely transient and the request can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_)
            | Self::Timeout(_)
            | Self::RateLimited { .. }
            | Self::ServiceUnavailable(_) => true,
            Self::Stream(e) => e.is_retryable(),
            _ => false,
        }
    }
}
