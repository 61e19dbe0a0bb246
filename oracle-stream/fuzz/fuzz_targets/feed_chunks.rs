#![no_main]
use libfuzzer_sys::fuzz_target;
use oracle_stream::{DecoderConfig, StreamingFrameDecoder};

// First byte picks the chunk size; the rest is the body.
fuzz_target!(|data: &[u8]| {
    let Some((&size, body)) = data.split_first() else {
        return;
    };
    let size = usize::from(size).max(1);
    let mut decoder = StreamingFrameDecoder::with_config(DecoderConfig::default().max_line_bytes(4096));
    let mut terminal = 0;
    for chunk in body.chunks(size) {
        terminal += decoder.feed(chunk).iter().filter(|e| e.is_terminal()).count();
    }
    terminal += decoder.finish().iter().filter(|e| e.is_terminal()).count();
    // Exactly one terminal event, whatever the input.
    assert_eq!(terminal, 1);
});
