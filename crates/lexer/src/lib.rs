//! Character-level tokenizer for an HTML-like markup language.
//!
//! Input is a stream of decoded characters (`CharSource`); output is a flat,
//! ordered sequence of `Token`s: start tags, end tags, attribute names and
//! values, text runs, and a terminal `EndOfInput` or `Error`.
//!
//! Known limitations (intentional):
//! - No character references, comments, doctypes, CDATA or raw-text elements.
//! - Unquoted and valueless attributes are lexical errors.
//! - No nesting is tracked; consumers pair start and end tags themselves.

pub mod error;
pub mod perf_fixtures;
pub mod source;
pub mod token;
pub mod tokenizer;

pub use crate::error::{LexError, LexErrorKind, ReadError};
pub use crate::source::{CharSource, ReaderSource, StrSource};
pub use crate::token::{Token, TokenKind};
pub use crate::tokenizer::{
    LexState, SelfClosingPolicy, Tokenizer, TokenizerConfig, TokenizerStats, Tokens,
    UnterminatedValuePolicy, tokenize, tokenize_with_config,
};
