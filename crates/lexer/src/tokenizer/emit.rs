//! Token emission helpers.

use crate::error::{LexError, LexErrorKind};
use crate::source::CharSource;
use crate::token::Token;
use crate::tokenizer::{LexState, Tokenizer};

impl<S: CharSource> Tokenizer<S> {
    pub(super) fn emit(&mut self, token: Token) -> Option<Token> {
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "lexer.tokenizer", "emit token: {token:?}");
        self.stats.tokens_emitted = self.stats.tokens_emitted.saturating_add(1);
        Some(token)
    }

    /// Emit the pending buffer as a token built by `make`, leaving it empty.
    pub(super) fn emit_buffer(&mut self, make: fn(String) -> Token) -> Option<Token> {
        let value = std::mem::take(&mut self.buffer);
        self.emit(make(value))
    }

    pub(super) fn emit_end_of_input(&mut self) -> Option<Token> {
        self.transition_to(LexState::Done);
        self.emit(Token::EndOfInput)
    }

    /// Terminate the run with an error raised in the current state.
    pub(super) fn emit_error(&mut self, kind: LexErrorKind) -> Option<Token> {
        let err = LexError::new(kind, self.state, self.stats.chars_read);
        log::debug!(target: "lexer.tokenizer", "lex error: {err}");
        self.buffer.clear();
        self.transition_to(LexState::Done);
        self.emit(Token::Error(err))
    }
}
