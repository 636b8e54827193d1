//! Lexical errors.
//!
//! There is a single error category: any `LexError` ends the run and is
//! reported as the final `Token::Error`. The kind only refines the message.

use crate::tokenizer::LexState;
use std::fmt;
use std::io;

/// Failure reported by a character source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadError {
    message: String,
    io_kind: Option<io::ErrorKind>,
}

impl ReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            io_kind: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The I/O error kind when the failure came from a `std::io::Read`.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.io_kind
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        Self {
            message: err.to_string(),
            io_kind: Some(err.kind()),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read failed: {}", self.message)
    }
}

impl std::error::Error for ReadError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Input ended where a specific character was structurally required.
    UnexpectedEof,
    /// A character that cannot appear at this point of a tag.
    UnexpectedCharacter(char),
    ReadFailure(ReadError),
}

impl LexErrorKind {
    /// Stable short name used in snapshots.
    pub fn code(&self) -> &'static str {
        match self {
            LexErrorKind::UnexpectedEof => "unexpected-eof",
            LexErrorKind::UnexpectedCharacter(_) => "unexpected-character",
            LexErrorKind::ReadFailure(_) => "read-failure",
        }
    }
}

/// Terminal lexical error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// State that was active when the failure happened.
    pub state: LexState,
    /// Number of characters consumed before the failure.
    pub position: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, state: LexState, position: usize) -> Self {
        Self {
            kind,
            state,
            position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = self.state.description();
        match &self.kind {
            LexErrorKind::UnexpectedEof => write!(
                f,
                "unexpected end of input {context} (after {} chars)",
                self.position
            ),
            LexErrorKind::UnexpectedCharacter(ch) => write!(
                f,
                "unexpected character {ch:?} {context} (after {} chars)",
                self.position
            ),
            LexErrorKind::ReadFailure(err) => {
                write!(f, "{err} {context} (after {} chars)", self.position)
            }
        }
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LexErrorKind::ReadFailure(err) => Some(err),
            _ => None,
        }
    }
}
