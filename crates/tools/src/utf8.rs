//! Incremental UTF-8 decoding for chunked byte sources.
//!
//! Reader-backed character sources pull bytes in fixed-size chunks, so a
//! multi-byte scalar can be split across two reads. `Utf8Decoder` keeps the
//! incomplete suffix of one chunk and completes it with the head of the next.
//! Invalid sequences are replaced with U+FFFD so decoding always advances.

/// Stateful chunk decoder.
///
/// Invariant: `pending` holds a lead byte followed only by continuation
/// bytes, so it is at most 3 bytes long.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of an incomplete sequence carried over from earlier chunks.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Decode `bytes` and append the result to `out`.
    ///
    /// A trailing incomplete sequence is held back until the next call.
    pub fn push(&mut self, bytes: &[u8], out: &mut String) {
        let mut rest = bytes;
        while !self.pending.is_empty() && !rest.is_empty() {
            let want = sequence_len(self.pending[0]);
            if want == 0 {
                out.push(char::REPLACEMENT_CHARACTER);
                self.pending.clear();
                break;
            }
            let take = want.saturating_sub(self.pending.len()).min(rest.len());
            let mut joined = [0u8; 4];
            let held = self.pending.len();
            joined[..held].copy_from_slice(&self.pending);
            joined[held..held + take].copy_from_slice(&rest[..take]);
            rest = &rest[take..];
            self.pending.clear();
            let joined_continues = joined[held..held + take]
                .iter()
                .all(|byte| byte & 0xC0 == 0x80);
            if held + take < want && joined_continues {
                self.pending.extend_from_slice(&joined[..held + take]);
                return;
            }
            // The joined bytes may still be malformed; any unconsumed tail
            // re-enters the regular path below.
            let leftover = decode_into(&joined[..held + take], out);
            self.pending.extend_from_slice(leftover);
        }
        if !rest.is_empty() {
            let leftover = decode_into(rest, out);
            self.pending.extend_from_slice(leftover);
        }
    }

    /// Flush a held-back incomplete sequence as U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if self.pending.is_empty() {
            return;
        }
        out.push_str(&String::from_utf8_lossy(&self.pending));
        self.pending.clear();
    }
}

fn sequence_len(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decode as much of `bytes` as possible and return the incomplete tail.
fn decode_into<'b>(mut bytes: &'b [u8], out: &mut String) -> &'b [u8] {
    loop {
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                out.push_str(text);
                return &[];
            }
            Err(err) => {
                let (valid, after) = bytes.split_at(err.valid_up_to());
                out.push_str(&String::from_utf8_lossy(valid));
                match err.error_len() {
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        bytes = &after[bad..];
                    }
                    None => return after,
                }
            }
        }
    }
}
