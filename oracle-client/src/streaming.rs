//! Hands an HTTP response body to the frame decoder.

use oracle_stream::{decode_stream, DecoderConfig};
use oracle_types::StreamHandle;
use reqwest::Response;

/// Wrap an HTTP response body into a [`StreamHandle`] that emits decoded
/// [`StreamEvent`](oracle_types::StreamEvent)s.
pub(crate) fn stream_completion(response: Response, config: DecoderConfig) -> StreamHandle {
    let byte_stream = response.bytes_stream();
    StreamHandle {
        receiver: Box::pin(decode_stream(byte_stream, config)),
    }
}
