#![doc = include_str!("../README.md")]

pub mod config;
pub mod decoder;
pub(crate) mod frame;
pub mod stream;
pub(crate) mod utf8;

pub use config::{DecoderConfig, MalformedPolicy, DEFAULT_MAX_LINE_BYTES};
pub use decoder::{DecoderState, StreamingFrameDecoder};
pub use stream::decode_stream;

// Re-export oracle-types for convenience
pub use oracle_types::{ProtocolError, StreamError, StreamEvent};
