//! Ask the Oracle one question and stream the answer to stdout.
//!
//! Reads ORACLE_BASE_URL, ORACLE_API_KEY and ORACLE_ROUTE from the environment.
//! Set RUST_LOG=debug to see request and decoder events.
//!
//! Run with: cargo run --example consult -p oracle-client -- "How does sound affect consciousness?"

use std::io::Write;

use futures::StreamExt;
use oracle_client::{Conversation, Mode, OracleConfig, PartialPolicy, ReplyStatus, Transcript};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What is the relationship between breath and emotions?".into());
    let mode = if std::env::var("ORACLE_DEEP_WISDOM").is_ok() {
        Mode::DeepWisdom
    } else {
        Mode::Standard
    };

    let client = OracleConfig::from_env()?.into_client();
    let mut conversation = Conversation::new();
    println!("{}\n", conversation.greeting().content);

    let request = conversation
        .request_for(&question, mode)
        .ok_or("question is empty")?;
    let mut handle = client.consult(&request).await?;

    let mut transcript = Transcript::new(PartialPolicy::Keep);
    let mut stdout = std::io::stdout();
    while let Some(event) = handle.receiver.next().await {
        if let Some(text) = event.as_text() {
            write!(stdout, "{text}")?;
            stdout.flush()?;
        }
        transcript.apply(event);
    }
    println!();

    if transcript.status() == ReplyStatus::Failed {
        if let Some(err) = transcript.error() {
            eprintln!("Failed to consult the Oracle: {err}");
        }
    }
    conversation.record(&question, transcript);
    Ok(())
}
