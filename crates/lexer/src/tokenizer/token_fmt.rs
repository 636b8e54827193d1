//! Deterministic token formatting for golden tests.
//!
//! One stable line per token. Payloads that may contain arbitrary characters
//! are quoted and escaped; names are printed bare.

use crate::token::Token;

/// Extension trait for deterministic token snapshot formatting.
pub trait TokenTestFormatExt {
    fn to_test_string(&self) -> String;
}

impl TokenTestFormatExt for Token {
    fn to_test_string(&self) -> String {
        match self {
            Token::StartTag(name) => format!("START name={name}"),
            Token::EndTag(name) => format!("END name={name}"),
            Token::AttributeName(name) => format!("ATTR_NAME name={name}"),
            Token::AttributeValue(value) => format!("ATTR_VALUE value=\"{}\"", escape_text(value)),
            Token::Text(text) => format!("TEXT text=\"{}\"", escape_text(text)),
            Token::EndOfInput => "EOF".to_string(),
            Token::Error(err) => format!(
                "ERROR kind={} state={:?} position={}",
                err.kind.code(),
                err.state,
                err.position
            ),
        }
    }
}

pub fn format_tokens(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(TokenTestFormatExt::to_test_string).collect()
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' || ch == '\u{7f}' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
