//! Golden fixture directories: `<root>/<case>/input.html` + `tokens.txt`.
//!
//! `tokens.txt` holds `# key: value` headers followed by one snapshot line per
//! token. Supported headers: `format` (required), `status`
//! (`active`/`xfail`/`skip`), `reason` (required unless active) and `halts`
//! (`true` when the run legitimately ends without a terminal token).

use crate::{TOKEN_FORMAT_V1, diff_lines};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FixtureStatus {
    Active,
    Xfail,
    Skip,
}

#[derive(Debug)]
pub struct ExpectedTokens {
    pub status: FixtureStatus,
    pub reason: Option<String>,
    pub lines: Vec<String>,
}

#[derive(Debug)]
pub struct GoldenFixture {
    pub name: String,
    pub dir: PathBuf,
    pub input: String,
    pub expected: ExpectedTokens,
}

/// Load every fixture directory under `root`, sorted by name.
pub fn load_fixtures(root: &Path) -> Vec<GoldenFixture> {
    let mut entries: Vec<_> = fs::read_dir(root)
        .unwrap_or_else(|err| panic!("failed to read fixture root {root:?}: {err}"))
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut fixtures = Vec::new();
    for entry in entries {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let input_path = dir.join("input.html");
        let input = fs::read_to_string(&input_path)
            .unwrap_or_else(|err| panic!("failed to read input {input_path:?}: {err}"));
        let expected = parse_tokens_file(&dir.join("tokens.txt"));
        fixtures.push(GoldenFixture {
            name,
            dir,
            input,
            expected,
        });
    }
    fixtures
}

pub fn parse_tokens_file(path: &Path) -> ExpectedTokens {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read tokens file {path:?}: {err}"));
    let mut lines = Vec::new();
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(stripped) = line.strip_prefix('#') {
            let header = stripped.trim();
            if header.is_empty() {
                continue;
            }
            let (key, value) = header
                .split_once(':')
                .unwrap_or_else(|| panic!("invalid header in {path:?}: '{line}'"));
            let key = key.trim().to_ascii_lowercase();
            if headers.insert(key.clone(), value.trim().to_string()).is_some() {
                panic!("duplicate header '{key}' in {path:?}");
            }
        } else {
            lines.push(line.to_string());
        }
    }

    let format = headers
        .get("format")
        .unwrap_or_else(|| panic!("missing format header in {path:?}"));
    assert_eq!(format, TOKEN_FORMAT_V1, "unsupported format in {path:?}");

    let status = match headers.get("status").map(String::as_str) {
        Some("active") | None => FixtureStatus::Active,
        Some("xfail") => FixtureStatus::Xfail,
        Some("skip") => FixtureStatus::Skip,
        Some(other) => panic!("unsupported status '{other}' in {path:?}"),
    };
    let reason = headers.get("reason").cloned();
    if status != FixtureStatus::Active && reason.as_deref().unwrap_or("").is_empty() {
        panic!("non-active fixture missing reason in {path:?}");
    }
    let halts = match headers.get("halts").map(String::as_str) {
        Some("true") => true,
        Some("false") | None => false,
        Some(other) => panic!("unsupported halts value '{other}' in {path:?}"),
    };
    let Some(last) = lines.last() else {
        panic!("tokens file {path:?} has no token lines");
    };
    let terminal = last == "EOF" || last.starts_with("ERROR ");
    if terminal == halts {
        panic!(
            "tokens file {path:?} must end with EOF/ERROR unless `halts: true` (last line: '{last}')"
        );
    }

    ExpectedTokens {
        status,
        reason,
        lines,
    }
}

/// Compare `actual` against the fixture according to its status.
pub fn enforce_expected(fixture: &GoldenFixture, actual: &[String], label: &str) {
    let mismatch = actual != fixture.expected.lines;
    match fixture.expected.status {
        FixtureStatus::Active => {
            if mismatch {
                panic!(
                    "token mismatch in fixture '{}' [{label}]\npath: {}\n{}",
                    fixture.name,
                    fixture.dir.display(),
                    diff_lines(&fixture.expected.lines, actual)
                );
            }
        }
        FixtureStatus::Xfail => {
            if !mismatch {
                panic!(
                    "fixture '{}' [{label}] matched but is marked xfail; reason: {}\npath: {}",
                    fixture.name,
                    fixture.expected.reason.as_deref().unwrap_or("<missing reason>"),
                    fixture.dir.display()
                );
            }
        }
        FixtureStatus::Skip => {}
    }
}
