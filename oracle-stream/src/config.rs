//! Decoder tuning knobs.

/// Default cap on buffered, unresolved input (1 MiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 1 << 20;

/// What to do with a `data:` payload that can never become valid JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Report a protocol error once and stop decoding.
    #[default]
    Fail,
    /// Log the line at `warn` and keep decoding.
    Skip,
}

/// Configuration for a [`StreamingFrameDecoder`](crate::StreamingFrameDecoder).
///
/// # Example
///
/// ```
/// use oracle_stream::{DecoderConfig, MalformedPolicy};
///
/// let config = DecoderConfig::default()
///     .max_line_bytes(64 * 1024)
///     .malformed(MalformedPolicy::Skip);
/// assert_eq!(config.max_line_bytes, 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Upper bound on input held without resolving into a line. A truncated
    /// `data:` line waiting for its continuation counts against it.
    pub max_line_bytes: usize,
    /// Handling of terminally malformed payloads.
    pub malformed: MalformedPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            malformed: MalformedPolicy::default(),
        }
    }
}

impl DecoderConfig {
    /// Override the buffered-input cap.
    #[must_use]
    pub fn max_line_bytes(mut self, limit: usize) -> Self {
        self.max_line_bytes = limit;
        self
    }

    /// Override the malformed-payload policy.
    #[must_use]
    pub fn malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
        assert_eq!(config.malformed, MalformedPolicy::Fail);
    }

    #[test]
    fn builder_overrides() {
        let config = DecoderConfig::default()
            .max_line_bytes(16)
            .malformed(MalformedPolicy::Skip);
        assert_eq!(config.max_line_bytes, 16);
        assert_eq!(config.malformed, MalformedPolicy::Skip);
    }
}
