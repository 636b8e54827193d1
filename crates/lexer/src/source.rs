//! Character sources feeding the tokenizer.
//!
//! The tokenizer only ever needs two operations: read the next Unicode scalar
//! and push back the one it just read. Byte decoding is the source's job.

use crate::error::ReadError;
use std::collections::VecDeque;
use std::io::{self, Read};
use tools::utf8::Utf8Decoder;

/// Pull source of decoded characters with single-level push-back.
pub trait CharSource {
    /// Read the next character; `Ok(None)` marks end of input.
    fn read_char(&mut self) -> Result<Option<char>, ReadError>;

    /// Push back the character returned by the last `read_char`.
    ///
    /// Only one character can be pushed back; calling this twice in a row, or
    /// after a read that returned end of input, does nothing.
    fn unread_char(&mut self);
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> Result<Option<char>, ReadError> {
        (**self).read_char()
    }

    fn unread_char(&mut self) {
        (**self).unread_char()
    }
}

/// Source over an in-memory string.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
    text: &'a str,
    cursor: usize,
    last_len: usize,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            last_len: 0,
        }
    }

    /// The part of the input that has not been read yet.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.cursor..]
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> Result<Option<char>, ReadError> {
        debug_assert!(self.text.is_char_boundary(self.cursor));
        match self.text[self.cursor..].chars().next() {
            Some(ch) => {
                self.last_len = ch.len_utf8();
                self.cursor += self.last_len;
                Ok(Some(ch))
            }
            None => {
                self.last_len = 0;
                Ok(None)
            }
        }
    }

    fn unread_char(&mut self) {
        self.cursor -= self.last_len;
        self.last_len = 0;
    }
}

pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Source over any `io::Read`, decoding UTF-8 chunk by chunk.
///
/// Invalid byte sequences decode to U+FFFD. I/O errors other than
/// `Interrupted` are reported as `ReadError` to the tokenizer.
pub struct ReaderSource<R> {
    reader: R,
    chunk: Vec<u8>,
    decoder: Utf8Decoder,
    scratch: String,
    decoded: VecDeque<char>,
    last: Option<char>,
    exhausted: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Read at most `chunk_size` bytes per underlying `read` call.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "ReaderSource chunk size must be non-zero");
        Self {
            reader,
            chunk: vec![0; chunk_size],
            decoder: Utf8Decoder::new(),
            scratch: String::new(),
            decoded: VecDeque::new(),
            last: None,
            exhausted: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> Result<(), ReadError> {
        match self.reader.read(&mut self.chunk) {
            Ok(0) => {
                self.decoder.finish(&mut self.scratch);
                self.exhausted = true;
            }
            Ok(n) => self.decoder.push(&self.chunk[..n], &mut self.scratch),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
        self.decoded.extend(self.scratch.chars());
        self.scratch.clear();
        Ok(())
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> Result<Option<char>, ReadError> {
        loop {
            if let Some(ch) = self.decoded.pop_front() {
                self.last = Some(ch);
                return Ok(Some(ch));
            }
            if self.exhausted {
                self.last = None;
                return Ok(None);
            }
            if let Err(err) = self.fill() {
                self.last = None;
                return Err(err);
            }
        }
    }

    fn unread_char(&mut self) {
        if let Some(ch) = self.last.take() {
            self.decoded.push_front(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut impl CharSource) -> String {
        let mut out = String::new();
        while let Some(ch) = source.read_char().expect("in-memory reads cannot fail") {
            out.push(ch);
        }
        out
    }

    #[test]
    fn str_source_unread_rewinds_one_char() {
        let mut source = StrSource::new("é<");
        assert_eq!(source.read_char(), Ok(Some('é')));
        source.unread_char();
        source.unread_char();
        assert_eq!(source.remaining(), "é<");
        assert_eq!(drain(&mut source), "é<");
        source.unread_char();
        assert_eq!(source.read_char(), Ok(None));
    }

    #[test]
    fn reader_source_decodes_across_tiny_chunks() {
        let text = "<p>naïve 😀</p>";
        let mut source = ReaderSource::with_chunk_size(text.as_bytes(), 1);
        assert_eq!(drain(&mut source), text);
    }

    #[test]
    fn reader_source_unread_after_chunk_refill() {
        let mut source = ReaderSource::with_chunk_size("ab".as_bytes(), 1);
        assert_eq!(source.read_char(), Ok(Some('a')));
        assert_eq!(source.read_char(), Ok(Some('b')));
        source.unread_char();
        assert_eq!(source.read_char(), Ok(Some('b')));
        assert_eq!(source.read_char(), Ok(None));
    }

    #[test]
    fn reader_source_reports_io_errors() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }
        let mut source = ReaderSource::new(Failing);
        let err = source.read_char().expect_err("failing reader must surface an error");
        assert_eq!(err.io_kind(), Some(io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn reader_source_replaces_invalid_utf8() {
        let bytes: &[u8] = &[b'<', 0xFF, b'>'];
        let mut source = ReaderSource::new(bytes);
        assert_eq!(drain(&mut source), "<\u{FFFD}>");
    }
}
