//! Internal error helpers for mapping HTTP/reqwest errors to [`OracleError`].

use std::time::Duration;

use oracle_types::OracleError;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Message shown when the service rate limits without saying why.
const RATE_LIMITED_MESSAGE: &str = "The Oracle needs a moment of rest. Please try again shortly.";

/// Message shown when credits run out without a body.
const QUOTA_MESSAGE: &str = "The Oracle's energy reserves need replenishment. Please check your account.";

/// Map a non-success HTTP status to an [`OracleError`].
///
/// The relay answers failures with `{"error": "..."}`; gateways use
/// `{"error": {"message": "..."}}`. Either message wins over the raw body.
pub(crate) fn map_http_status(
    status: reqwest::StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> OracleError {
    let message = error_message(body);
    match status.as_u16() {
        429 => OracleError::RateLimited {
            message: message.unwrap_or_else(|| RATE_LIMITED_MESSAGE.to_string()),
            retry_after,
        },
        402 => OracleError::QuotaExhausted(message.unwrap_or_else(|| QUOTA_MESSAGE.to_string())),
        401 | 403 => OracleError::Authentication(message.unwrap_or_else(|| body.to_string())),
        500 | 502 | 503 | 504 => {
            OracleError::ServiceUnavailable(message.unwrap_or_else(|| body.to_string()))
        }
        _ => OracleError::InvalidRequest(format!(
            "HTTP {status}: {}",
            message.as_deref().unwrap_or(body)
        )),
    }
}

/// Extract the human-readable message from an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = json.get("error")?;
    error
        .as_str()
        .or_else(|| error["message"].as_str())
        .map(str::to_string)
}

/// Read a `Retry-After` header given in whole seconds.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Map a [`reqwest::Error`] to an [`OracleError`].
///
/// Only a connect timeout has a known duration. Any other timeout comes
/// from a caller-supplied client and is reported as a network error that
/// keeps reqwest's own description.
pub(crate) fn map_reqwest_error(err: reqwest::Error, connect_timeout: Duration) -> OracleError {
    if err.is_timeout() && err.is_connect() {
        OracleError::Timeout(connect_timeout)
    } else {
        OracleError::Network(Box::new(err))
    }
}
