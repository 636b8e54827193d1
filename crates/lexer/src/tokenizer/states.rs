//! Tokenizer state machine definitions.

/// Scanning mode of the tokenizer. Exactly one state is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexState {
    /// Character data between tags. Initial state.
    Data,
    /// Just consumed `<`.
    TagOpen,
    TagName,
    /// Just consumed `/` inside a start tag. Only reachable with
    /// `SelfClosingPolicy::ResumeData`.
    SelfClosingStartTag,
    /// Just consumed `</`.
    EndTag,
    BeforeAttributeName,
    AttributeName,
    AttributeValue,
    /// Terminal: no further characters are read.
    Done,
}

impl LexState {
    pub fn is_terminal(self) -> bool {
        self == LexState::Done
    }

    /// Human-readable location used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            LexState::Data => "in character data",
            LexState::TagOpen => "after '<'",
            LexState::TagName => "in tag name",
            LexState::SelfClosingStartTag => "after '/' in start tag",
            LexState::EndTag => "in end tag",
            LexState::BeforeAttributeName => "before attribute name",
            LexState::AttributeName => "in attribute name",
            LexState::AttributeValue => "in attribute value",
            LexState::Done => "after end of run",
        }
    }
}
