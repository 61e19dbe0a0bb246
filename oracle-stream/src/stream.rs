//! Async adapter from a response body to decoded events.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use oracle_types::StreamEvent;

use crate::config::DecoderConfig;
use crate::decoder::StreamingFrameDecoder;

/// Decode a raw byte stream into a stream of [`StreamEvent`]s.
///
/// A fresh [`StreamingFrameDecoder`] is fed each chunk as it arrives. Read
/// errors surface as [`StreamError::Transport`](oracle_types::StreamError::Transport)
/// and an EOF before `[DONE]` as
/// [`StreamError::Incomplete`](oracle_types::StreamError::Incomplete). The
/// stream ends right after its first terminal event; dropping it cancels
/// decoding.
pub fn decode_stream<E>(
    byte_stream: impl Stream<Item = Result<Bytes, E>> + Send + 'static,
    config: DecoderConfig,
) -> impl Stream<Item = StreamEvent> + Send + 'static
where
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let mut decoder = StreamingFrameDecoder::with_config(config);
        let mut bytes_stream = std::pin::pin!(byte_stream);

        while let Some(chunk_result) = bytes_stream.next().await {
            let events = match chunk_result {
                Ok(chunk) => decoder.feed(&chunk),
                Err(e) => decoder.fail_transport(e.to_string()),
            };
            for event in events {
                let terminal = event.is_terminal();
                yield event;
                if terminal {
                    return;
                }
            }
        }

        for event in decoder.finish() {
            yield event;
        }
    }
}
