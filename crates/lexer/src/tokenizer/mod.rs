//! Tokenizer public API.
//!
//! The tokenizer is an explicit state machine driven one step at a time.
//! Each step runs the handler of the active state until that handler emits a
//! token or hands control to another state, so at most one token is ever in
//! flight between the machine and its consumer.
//!
//! Invariants:
//! - Source order: tokens are produced in the order their characters were read.
//! - Single run: a tokenizer is bound to one source and runs to `Done` once.
//! - Terminal tokens: after `EndOfInput` or `Error` no character is read and
//!   no token is produced.
//! - Realization-equivalence: `run()` and `tokens()` yield identical sequences.

use crate::error::LexErrorKind;
use crate::source::{CharSource, StrSource};
use crate::token::Token;
use std::iter::FusedIterator;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

mod emit;
mod input;
mod states;
mod token_fmt;

pub use states::LexState;
pub use token_fmt::{TokenTestFormatExt, escape_text, format_tokens};

/// What a `/` inside a start tag does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelfClosingPolicy {
    /// Emit the start tag and end the run without `EndOfInput`.
    #[default]
    Halt,
    /// Emit the start tag, require `>`, then continue with character data.
    /// A `/` before an attribute name is accepted the same way.
    ResumeData,
}

/// What end of input inside a quoted attribute value does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnterminatedValuePolicy {
    /// Close the value as if the quote had been seen.
    #[default]
    Accept,
    /// Terminate the run with an error; the partial value is dropped.
    Reject,
}

/// Configuration for the tokenizer.
///
/// The default reproduces the reference lexing behavior, including its two
/// leniencies and the dropped trailing text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizerConfig {
    pub self_closing: SelfClosingPolicy,
    pub unterminated_value: UnterminatedValuePolicy,
    /// Emit text still pending at end of input as a final `Text` token.
    pub flush_trailing_text: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            self_closing: SelfClosingPolicy::Halt,
            unterminated_value: UnterminatedValuePolicy::Accept,
            flush_trailing_text: false,
        }
    }
}

/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    /// Characters consumed from the source (push-backs not counted twice).
    pub chars_read: usize,
    pub state_transitions: u64,
    pub tokens_emitted: u64,
}

/// Finite-state tokenizer over a character source.
pub struct Tokenizer<S> {
    config: TokenizerConfig,
    source: S,
    state: LexState,
    /// Pending lexeme; emptied whenever a token is emitted.
    buffer: String,
    stats: TokenizerStats,
}

impl<S: CharSource> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, TokenizerConfig::default())
    }

    pub fn with_config(source: S, config: TokenizerConfig) -> Self {
        Self {
            config,
            source,
            state: LexState::Data,
            buffer: String::new(),
            stats: TokenizerStats::default(),
        }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// Return a copy of current instrumentation counters.
    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    /// Release the source, e.g. to inspect what was left unread.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Advance until the next token is produced.
    ///
    /// Returns `None` once the machine is `Done`.
    pub fn next_token(&mut self) -> Option<Token> {
        while !self.state.is_terminal() {
            if let Some(token) = self.step() {
                return Some(token);
            }
        }
        None
    }

    /// Run to completion and return every token.
    pub fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        log::debug!(
            target: "lexer.tokenizer",
            "run finished: chars={} tokens={} transitions={}",
            self.stats.chars_read,
            self.stats.tokens_emitted,
            self.stats.state_transitions
        );
        tokens
    }

    /// Consume the tokenizer as a lazy, single-pass token sequence.
    pub fn tokens(self) -> Tokens<S> {
        Tokens { tokenizer: self }
    }

    fn transition_to(&mut self, next: LexState) {
        if self.state == next {
            return;
        }
        #[cfg(any(test, feature = "debug-stats"))]
        {
            log::trace!(
                target: "lexer.tokenizer",
                "state {:?} -> {:?} @{}",
                self.state,
                next,
                self.stats.chars_read
            );
        }
        self.state = next;
        self.stats.state_transitions = self.stats.state_transitions.saturating_add(1);
    }

    fn step(&mut self) -> Option<Token> {
        match self.state {
            LexState::Data => self.step_data(),
            LexState::TagOpen => self.step_tag_open(),
            LexState::TagName => self.step_tag_name(),
            LexState::SelfClosingStartTag => self.step_self_closing_start_tag(),
            LexState::EndTag => self.step_end_tag(),
            LexState::BeforeAttributeName => self.step_before_attribute_name(),
            LexState::AttributeName => self.step_attribute_name(),
            LexState::AttributeValue => self.step_attribute_value(),
            LexState::Done => None,
        }
    }

    fn step_data(&mut self) -> Option<Token> {
        match self.skip_whitespace() {
            Ok(true) => {}
            Ok(false) => return self.finish_data(),
            Err(err) => return self.emit_error(LexErrorKind::ReadFailure(err)),
        }
        loop {
            match self.read_next() {
                Ok(Some('<')) => {
                    self.transition_to(LexState::TagOpen);
                    if self.buffer.is_empty() {
                        return None;
                    }
                    return self.emit_buffer(Token::Text);
                }
                Ok(Some(ch)) => self.buffer.push(ch),
                Ok(None) => return self.finish_data(),
                Err(err) => return self.emit_error(LexErrorKind::ReadFailure(err)),
            }
        }
    }

    fn finish_data(&mut self) -> Option<Token> {
        if !self.buffer.is_empty() {
            if self.config.flush_trailing_text {
                // Data is re-entered and sees end of input again, then emits EOF.
                return self.emit_buffer(Token::Text);
            }
            log::debug!(
                target: "lexer.tokenizer",
                "dropping {} bytes of trailing text at end of input",
                self.buffer.len()
            );
            self.buffer.clear();
        }
        self.emit_end_of_input()
    }

    fn step_tag_open(&mut self) -> Option<Token> {
        match self.read_next() {
            Ok(Some('/')) => {
                self.buffer.clear();
                self.transition_to(LexState::EndTag);
                None
            }
            Ok(Some(ch)) => {
                self.buffer.clear();
                self.buffer.push(ch.to_ascii_lowercase());
                self.transition_to(LexState::TagName);
                None
            }
            Ok(None) => self.emit_error(LexErrorKind::UnexpectedEof),
            Err(err) => self.emit_error(LexErrorKind::ReadFailure(err)),
        }
    }

    fn step_tag_name(&mut self) -> Option<Token> {
        loop {
            match self.read_next() {
                Ok(Some(ch)) if ch.is_whitespace() || ch == '>' || ch == '/' => {
                    let next = match ch {
                        '>' => LexState::Data,
                        '/' => match self.config.self_closing {
                            SelfClosingPolicy::Halt => {
                                log::debug!(
                                    target: "lexer.tokenizer",
                                    "self-closing start tag '{}' ends the run",
                                    self.buffer
                                );
                                LexState::Done
                            }
                            SelfClosingPolicy::ResumeData => LexState::SelfClosingStartTag,
                        },
                        _ => LexState::BeforeAttributeName,
                    };
                    self.transition_to(next);
                    return self.emit_buffer(Token::StartTag);
                }
                Ok(Some(ch)) => self.buffer.push(ch.to_ascii_lowercase()),
                Ok(None) => return self.emit_error(LexErrorKind::UnexpectedEof),
                Err(err) => return self.emit_error(LexErrorKind::ReadFailure(err)),
            }
        }
    }

    fn step_self_closing_start_tag(&mut self) -> Option<Token> {
        match self.read_next() {
            Ok(Some('>')) => {
                self.transition_to(LexState::Data);
                None
            }
            Ok(Some(ch)) => self.emit_error(LexErrorKind::UnexpectedCharacter(ch)),
            Ok(None) => self.emit_error(LexErrorKind::UnexpectedEof),
            Err(err) => self.emit_error(LexErrorKind::ReadFailure(err)),
        }
    }

    fn step_end_tag(&mut self) -> Option<Token> {
        loop {
            match self.read_next() {
                Ok(Some('>')) => {
                    self.transition_to(LexState::Data);
                    return self.emit_buffer(Token::EndTag);
                }
                Ok(Some(ch)) => self.buffer.push(ch),
                Ok(None) => return self.emit_error(LexErrorKind::UnexpectedEof),
                Err(err) => return self.emit_error(LexErrorKind::ReadFailure(err)),
            }
        }
    }

    fn step_before_attribute_name(&mut self) -> Option<Token> {
        if let Err(err) = self.skip_whitespace() {
            return self.emit_error(LexErrorKind::ReadFailure(err));
        }
        match self.read_next() {
            Ok(Some('>')) => {
                self.transition_to(LexState::Data);
                None
            }
            Ok(Some('/')) if self.config.self_closing == SelfClosingPolicy::ResumeData => {
                self.transition_to(LexState::SelfClosingStartTag);
                None
            }
            Ok(Some(ch)) if is_letter(ch) => {
                self.buffer.push(ch);
                self.transition_to(LexState::AttributeName);
                None
            }
            Ok(Some(ch)) => self.emit_error(LexErrorKind::UnexpectedCharacter(ch)),
            Ok(None) => self.emit_error(LexErrorKind::UnexpectedEof),
            Err(err) => self.emit_error(LexErrorKind::ReadFailure(err)),
        }
    }

    fn step_attribute_name(&mut self) -> Option<Token> {
        loop {
            match self.read_next() {
                Ok(Some(ch)) if ch.is_whitespace() || ch == '=' => {
                    self.transition_to(LexState::AttributeValue);
                    return self.emit_buffer(Token::AttributeName);
                }
                Ok(Some(ch)) => self.buffer.push(ch),
                Ok(None) => return self.emit_error(LexErrorKind::UnexpectedEof),
                Err(err) => return self.emit_error(LexErrorKind::ReadFailure(err)),
            }
        }
    }

    fn step_attribute_value(&mut self) -> Option<Token> {
        let quote = match self.read_next() {
            Ok(Some(quote @ ('"' | '\''))) => quote,
            Ok(Some(ch)) => return self.emit_error(LexErrorKind::UnexpectedCharacter(ch)),
            Ok(None) => return self.emit_error(LexErrorKind::UnexpectedEof),
            Err(err) => return self.emit_error(LexErrorKind::ReadFailure(err)),
        };
        loop {
            let unterminated = match self.read_next() {
                Ok(Some(ch)) if ch == quote => break,
                Ok(Some(ch)) => {
                    self.buffer.push(ch);
                    continue;
                }
                Ok(None) => LexErrorKind::UnexpectedEof,
                Err(err) => LexErrorKind::ReadFailure(err),
            };
            match self.config.unterminated_value {
                UnterminatedValuePolicy::Accept => {
                    log::debug!(
                        target: "lexer.tokenizer",
                        "closing unterminated attribute value ({unterminated:?})"
                    );
                    break;
                }
                UnterminatedValuePolicy::Reject => return self.emit_error(unterminated),
            }
        }
        self.transition_to(LexState::BeforeAttributeName);
        self.emit_buffer(Token::AttributeValue)
    }
}

/// Attribute names start with a character of general category L*.
///
/// Narrower than `char::is_alphabetic`, which also admits letter numbers
/// and combining marks.
fn is_letter(ch: char) -> bool {
    ch.general_category_group() == GeneralCategoryGroup::Letter
}

/// Lazy, forward-only token sequence produced on demand.
///
/// Dropping it early leaves the rest of the input unread.
pub struct Tokens<S> {
    tokenizer: Tokenizer<S>,
}

impl<S: CharSource> Tokens<S> {
    pub fn stats(&self) -> TokenizerStats {
        self.tokenizer.stats()
    }

    pub fn state(&self) -> LexState {
        self.tokenizer.state()
    }
}

impl<S: CharSource> Iterator for Tokens<S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokenizer.next_token()
    }
}

impl<S: CharSource> FusedIterator for Tokens<S> {}

/// Tokenize a string with the default configuration.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(StrSource::new(input)).run()
}

pub fn tokenize_with_config(input: &str, config: TokenizerConfig) -> Vec<Token> {
    Tokenizer::with_config(StrSource::new(input), config).run()
}

#[cfg(test)]
mod tests;
