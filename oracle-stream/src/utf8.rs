//! Incremental UTF-8 decoding across chunk boundaries.

use oracle_types::ProtocolError;

/// Holds back an incomplete trailing multi-byte sequence until the bytes
/// completing it arrive.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    /// At most three bytes of a sequence split by a chunk boundary.
    tail: Vec<u8>,
}

impl Utf8Decoder {
    /// Decode `chunk` and append the valid text to `out`.
    pub(crate) fn decode(&mut self, chunk: &[u8], out: &mut String) -> Result<(), ProtocolError> {
        let carried = self.tail.len();
        let joined;
        let bytes: &[u8] = if carried == 0 {
            chunk
        } else {
            self.tail.extend_from_slice(chunk);
            joined = std::mem::take(&mut self.tail);
            &joined
        };

        match std::str::from_utf8(bytes) {
            Ok(text) => {
                out.push_str(text);
                Ok(())
            }
            Err(e) => {
                let valid = e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&bytes[..valid]));
                match e.error_len() {
                    // Input ended mid-sequence: wait for the rest.
                    None => {
                        self.tail = bytes[valid..].to_vec();
                        Ok(())
                    }
                    Some(_) => Err(ProtocolError::InvalidUtf8 {
                        offset: valid.saturating_sub(carried),
                    }),
                }
            }
        }
    }

    /// Whether a partial sequence is still held back.
    pub(crate) fn has_partial(&self) -> bool {
        !self.tail.is_empty()
    }
}
