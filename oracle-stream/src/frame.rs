//! Line classification and `data:` payload extraction.
//!
//! Gateway frames look like:
//! ```text
//! data: {"id":"...","choices":[{"delta":{"content":"text"}}]}
//!
//! data: [DONE]
//! ```

/// Literal prefix of a data line (colon, one space).
pub(crate) const DATA_PREFIX: &str = "data: ";

/// Trimmed payload marking normal stream termination.
pub(crate) const DONE_SENTINEL: &str = "[DONE]";

/// A single logical line, already stripped of its line terminator.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Empty line (event separator).
    Blank,
    /// `:` prefixed keep-alive or comment.
    Comment,
    /// `data: ` line; holds the trimmed payload.
    Data(&'a str),
    /// Anything else (`event:`, `id:`, `retry:`, ...). Ignored.
    Unrecognized,
}

pub(crate) fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with(':') {
        LineKind::Comment
    } else if let Some(payload) = line.strip_prefix(DATA_PREFIX) {
        LineKind::Data(payload.trim())
    } else {
        LineKind::Unrecognized
    }
}

/// What a parsed JSON payload carries.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Payload {
    /// Non-empty `choices[0].delta.content`.
    Delta(String),
    /// In-band error object from the gateway.
    Error(String),
    /// Valid chunk with nothing to emit (role header, finish marker, usage, ...).
    Empty,
}

/// Parse a non-sentinel payload.
///
/// Only `choices[0].delta.content` is consumed; every other field is ignored.
pub(crate) fn parse_payload(payload: &str) -> Result<Payload, serde_json::Error> {
    let json: serde_json::Value = serde_json::from_str(payload)?;

    // Check for error object
    if let Some(error) = json.get("error") {
        let message = error["message"]
            .as_str()
            .or_else(|| error.as_str())
            .unwrap_or("unknown streaming error");
        return Ok(Payload::Error(message.to_string()));
    }

    match json["choices"][0]["delta"]["content"].as_str() {
        Some(content) if !content.is_empty() => Ok(Payload::Delta(content.to_string())),
        _ => Ok(Payload::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify(":keep-alive"), LineKind::Comment);
        assert_eq!(classify(": OPENROUTER PROCESSING"), LineKind::Comment);
        assert_eq!(classify("data: [DONE]  "), LineKind::Data("[DONE]"));
        assert_eq!(classify("event: message"), LineKind::Unrecognized);
        // The prefix needs its space.
        assert_eq!(classify("data:{}"), LineKind::Unrecognized);
    }

    #[test]
    fn extracts_first_choice_content() {
        let payload = r#"{"id":"c1","choices":[{"index":0,"delta":{"content":"Om "}},{"delta":{"content":"x"}}]}"#;
        assert_eq!(parse_payload(payload).unwrap(), Payload::Delta("Om ".into()));
    }

    #[test]
    fn missing_or_empty_content_is_empty() {
        for payload in [
            r#"{"choices":[{"delta":{}}]}"#,
            r#"{"choices":[{"delta":{"content":""}}]}"#,
            r#"{"choices":[{"delta":{"content":null}}]}"#,
            r#"{"choices":[]}"#,
            r#"{"usage":{"prompt_tokens":3}}"#,
        ] {
            assert_eq!(parse_payload(payload).unwrap(), Payload::Empty, "{payload}");
        }
    }

    #[test]
    fn error_object_is_reported() {
        let payload = r#"{"error":{"message":"Rate limit exceeded","type":"rate_limit_error"}}"#;
        assert_eq!(
            parse_payload(payload).unwrap(),
            Payload::Error("Rate limit exceeded".into())
        );
        assert_eq!(
            parse_payload(r#"{"error":"gateway timeout"}"#).unwrap(),
            Payload::Error("gateway timeout".into())
        );
    }

    #[test]
    fn truncated_json_is_eof() {
        let err = parse_payload(r#"{"choices":[{"delta":{"content":"hel"#).unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn garbage_is_syntax() {
        let err = parse_payload("not json at all").unwrap_err();
        assert!(err.is_syntax());
    }
}
