#![doc = include_str!("../README.md")]

pub mod client;
pub mod config;
pub mod conversation;
pub(crate) mod error;
pub(crate) mod mapping;
pub mod persona;
pub(crate) mod streaming;

pub use client::{OracleClient, Route};
pub use config::{ConfigError, OracleConfig};
pub use conversation::{collect_reply, Conversation, PartialPolicy, ReplyStatus, Transcript};

// Re-export oracle-types for convenience
pub use oracle_types::{ConsultRequest, Mode, OracleError, StreamEvent, StreamHandle};
