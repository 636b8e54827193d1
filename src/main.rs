//! taglex demo driver
//!
//! Tokenizes a markup document and prints one token per line.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lexer::{
    CharSource, ReaderSource, SelfClosingPolicy, StrSource, Token, Tokenizer, TokenizerConfig,
    UnterminatedValuePolicy,
};
use mimalloc::MiMalloc;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEMO_INPUT: &str = r#"<div id="main">Hello</div>"#;

/// Print the lexical tokens of an HTML-like document
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markup file to tokenize (`-` reads stdin); a built-in sample is used when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// What a `/` inside a start tag does
    #[arg(long, value_enum, default_value_t = SelfClosingArg::Halt)]
    self_closing: SelfClosingArg,

    /// Reject attribute values that are still open at end of input
    #[arg(long)]
    strict_values: bool,

    /// Emit text left over at end of input instead of dropping it
    #[arg(long)]
    flush_trailing_text: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SelfClosingArg {
    /// Stop tokenizing after the start tag
    Halt,
    /// Expect `>` and keep tokenizing
    Resume,
}

impl Args {
    fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            self_closing: match self.self_closing {
                SelfClosingArg::Halt => SelfClosingPolicy::Halt,
                SelfClosingArg::Resume => SelfClosingPolicy::ResumeData,
            },
            unterminated_value: if self.strict_values {
                UnterminatedValuePolicy::Reject
            } else {
                UnterminatedValuePolicy::Accept
            },
            flush_trailing_text: self.flush_trailing_text,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = args.tokenizer_config();
    log::debug!("tokenizer config: {config:?}");

    let ended_in_error = match args.input.as_deref() {
        None => print_tokens(Tokenizer::with_config(StrSource::new(DEMO_INPUT), config))?,
        Some(path) if path.as_os_str() == "-" => {
            let source = ReaderSource::new(io::stdin().lock());
            print_tokens(Tokenizer::with_config(source, config))?
        }
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            log::info!("tokenizing {}", path.display());
            print_tokens(Tokenizer::with_config(ReaderSource::new(file), config))?
        }
    };

    Ok(if ended_in_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Stream tokens to stdout; returns whether the run ended in a lexical error.
fn print_tokens<S: CharSource>(tokenizer: Tokenizer<S>) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut tokens = tokenizer.tokens();
    let mut ended_in_error = false;
    for token in tokens.by_ref() {
        if let Token::Error(err) = &token {
            log::warn!("lexing stopped: {err}");
            ended_in_error = true;
        }
        writeln!(out, "{token}").context("failed to write token")?;
    }
    let stats = tokens.stats();
    log::info!(
        "read {} chars, emitted {} tokens",
        stats.chars_read,
        stats.tokens_emitted
    );
    Ok(ended_in_error)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
