//! Tests for the async byte-stream adapter.

use bytes::Bytes;
use futures::StreamExt;
use oracle_stream::{decode_stream, DecoderConfig, ProtocolError, StreamError, StreamEvent};

fn chunks(parts: &[&'static str]) -> Vec<Result<Bytes, String>> {
    parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect()
}

async fn collect(items: Vec<Result<Bytes, String>>) -> Vec<StreamEvent> {
    decode_stream(futures::stream::iter(items), DecoderConfig::default())
        .collect()
        .await
}

#[tokio::test]
async fn yields_text_then_done() {
    let events = collect(chunks(&[
        ":keep-alive\n\ndata: {\"choices\":[{\"delta\":{\"content\":\"Om \"}}]}\n\nda",
        "ta: {\"choices\":[{\"delta\":{\"content\":\"Shanti\"}}]}\n\ndata: [DONE]\n",
    ]))
    .await;
    assert_eq!(
        events,
        vec![
            StreamEvent::Text("Om ".into()),
            StreamEvent::Text("Shanti".into()),
            StreamEvent::Done,
        ]
    );
}

#[tokio::test]
async fn stops_reading_after_done() {
    let mut items = chunks(&["data: [DONE]\n"]);
    items.push(Err("never observed".into()));
    let events = collect(items).await;
    assert_eq!(events, vec![StreamEvent::Done]);
}

#[tokio::test]
async fn eof_without_done_is_incomplete() {
    let events = collect(chunks(&["data: {\"choices\":[{\"delta\":{\"content\":\"half\"}}]}\n"])).await;
    assert_eq!(
        events,
        vec![
            StreamEvent::Text("half".into()),
            StreamEvent::Error(StreamError::Incomplete),
        ]
    );
}

#[tokio::test]
async fn read_error_is_a_transport_failure() {
    let mut items = chunks(&["data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n"]);
    items.push(Err("connection reset by peer".into()));
    items.extend(chunks(&["data: [DONE]\n"]));
    let events = collect(items).await;
    assert_eq!(
        events,
        vec![
            StreamEvent::Text("a".into()),
            StreamEvent::Error(StreamError::Transport("connection reset by peer".into())),
        ]
    );
}

#[tokio::test]
async fn protocol_error_ends_the_stream() {
    let events = collect(chunks(&[
        "data: definitely not json\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"lost\"}}]}\n",
    ]))
    .await;
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        StreamEvent::Error(StreamError::Protocol(ProtocolError::MalformedPayload { .. }))
    ));
}

#[tokio::test]
async fn empty_body_is_incomplete() {
    let events = collect(Vec::new()).await;
    assert_eq!(events, vec![StreamEvent::Error(StreamError::Incomplete)]);
}
