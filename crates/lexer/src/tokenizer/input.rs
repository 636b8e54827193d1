//! Tokenizer input helpers.

use crate::error::ReadError;
use crate::source::CharSource;
use crate::tokenizer::Tokenizer;

impl<S: CharSource> Tokenizer<S> {
    pub(super) fn read_next(&mut self) -> Result<Option<char>, ReadError> {
        let next = self.source.read_char()?;
        if next.is_some() {
            self.stats.chars_read = self.stats.chars_read.saturating_add(1);
        }
        Ok(next)
    }

    /// Consume a run of whitespace, leaving the first non-whitespace
    /// character unread.
    ///
    /// Returns `Ok(false)` when input ended inside (or before) the run.
    pub(super) fn skip_whitespace(&mut self) -> Result<bool, ReadError> {
        loop {
            match self.read_next()? {
                Some(ch) if ch.is_whitespace() => {}
                Some(_) => {
                    self.source.unread_char();
                    self.stats.chars_read -= 1;
                    return Ok(true);
                }
                None => return Ok(false),
            }
        }
    }
}
