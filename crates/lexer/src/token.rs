//! Token model.

use crate::error::LexError;
use std::fmt;

/// A lexical unit emitted by the tokenizer.
///
/// Determinism contract:
/// - Tokens are emitted in source order; the sequence is append-only.
/// - Nesting is not modeled; consumers pair `StartTag`/`EndTag` themselves.
/// - `EndOfInput` and `Error` are terminal: nothing follows them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Start tag name, ASCII-lowercased.
    StartTag(String),
    /// End tag name, verbatim (no case folding).
    EndTag(String),
    AttributeName(String),
    AttributeValue(String),
    /// Non-empty run of character data between tags.
    Text(String),
    EndOfInput,
    Error(LexError),
}

/// Payload-free discriminant of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartTag,
    EndTag,
    AttributeName,
    AttributeValue,
    Text,
    EndOfInput,
    Error,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartTag(_) => TokenKind::StartTag,
            Token::EndTag(_) => TokenKind::EndTag,
            Token::AttributeName(_) => TokenKind::AttributeName,
            Token::AttributeValue(_) => TokenKind::AttributeValue,
            Token::Text(_) => TokenKind::Text,
            Token::EndOfInput => TokenKind::EndOfInput,
            Token::Error(_) => TokenKind::Error,
        }
    }

    /// String payload of tag, attribute and text tokens.
    ///
    /// `EndOfInput` and `Error` carry no string payload. An error's diagnostic
    /// message is reached through `as_error()` and the `LexError` `Display` impl.
    pub fn value(&self) -> Option<&str> {
        match self {
            Token::StartTag(value)
            | Token::EndTag(value)
            | Token::AttributeName(value)
            | Token::AttributeValue(value)
            | Token::Text(value) => Some(value),
            Token::EndOfInput | Token::Error(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::EndOfInput | Token::Error(_))
    }

    pub fn as_error(&self) -> Option<&LexError> {
        match self {
            Token::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartTag(name) => write!(f, "start tag:\t{name}"),
            Token::EndTag(name) => write!(f, "end tag:\t{name}"),
            Token::AttributeName(name) => write!(f, "attr name:\t{name}"),
            Token::AttributeValue(value) => write!(f, "attr val:\t{value}"),
            Token::Text(text) => write!(f, "text:\t\t{text}"),
            Token::EndOfInput => f.write_str("EOF"),
            Token::Error(err) => write!(f, "error:\t\t{err}"),
        }
    }
}
