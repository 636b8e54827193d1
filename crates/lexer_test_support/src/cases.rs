//! TOML case tables: inline inputs run under explicit tokenizer policies.

use crate::TOKEN_FORMAT_V1;
use lexer::{SelfClosingPolicy, TokenizerConfig, UnterminatedValuePolicy};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
struct CaseTable {
    format: String,
    cases: Vec<Case>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub self_closing: SelfClosingSetting,
    #[serde(default)]
    pub unterminated_value: UnterminatedValueSetting,
    #[serde(default)]
    pub flush_trailing_text: bool,
    pub tokens: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelfClosingSetting {
    #[default]
    Halt,
    Resume,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnterminatedValueSetting {
    #[default]
    Accept,
    Reject,
}

impl Case {
    pub fn config(&self) -> TokenizerConfig {
        TokenizerConfig {
            self_closing: match self.self_closing {
                SelfClosingSetting::Halt => SelfClosingPolicy::Halt,
                SelfClosingSetting::Resume => SelfClosingPolicy::ResumeData,
            },
            unterminated_value: match self.unterminated_value {
                UnterminatedValueSetting::Accept => UnterminatedValuePolicy::Accept,
                UnterminatedValueSetting::Reject => UnterminatedValuePolicy::Reject,
            },
            flush_trailing_text: self.flush_trailing_text,
        }
    }
}

pub fn load_cases(path: &Path) -> Vec<Case> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read case table {path:?}: {err}"));
    parse_cases(&content, path)
}

pub fn parse_cases(content: &str, origin: &Path) -> Vec<Case> {
    let table: CaseTable = toml::from_str(content)
        .unwrap_or_else(|err| panic!("invalid case table {origin:?}: {err}"));
    assert_eq!(
        table.format, TOKEN_FORMAT_V1,
        "unsupported format in {origin:?}"
    );
    let mut seen = std::collections::BTreeSet::new();
    for case in &table.cases {
        assert!(
            seen.insert(case.name.as_str()),
            "duplicate case '{}' in {origin:?}",
            case.name
        );
        assert!(
            !case.tokens.is_empty(),
            "case '{}' in {origin:?} has no tokens",
            case.name
        );
    }
    table.cases
}
