use super::{
    LexState, SelfClosingPolicy, Tokenizer, TokenizerConfig, UnterminatedValuePolicy, tokenize,
    tokenize_with_config,
};
use crate::error::{LexError, LexErrorKind, ReadError};
use crate::source::{CharSource, StrSource};
use crate::token::Token;

fn start(name: &str) -> Token {
    Token::StartTag(name.to_string())
}

fn end(name: &str) -> Token {
    Token::EndTag(name.to_string())
}

fn attr(name: &str) -> Token {
    Token::AttributeName(name.to_string())
}

fn value(value: &str) -> Token {
    Token::AttributeValue(value.to_string())
}

fn text(text: &str) -> Token {
    Token::Text(text.to_string())
}

fn error(kind: LexErrorKind, state: LexState, position: usize) -> Token {
    Token::Error(LexError::new(kind, state, position))
}

fn resume_config() -> TokenizerConfig {
    TokenizerConfig {
        self_closing: SelfClosingPolicy::ResumeData,
        ..TokenizerConfig::default()
    }
}

/// Yields the characters of `text`, then fails every read.
struct FailingSource<'a> {
    inner: StrSource<'a>,
}

impl CharSource for FailingSource<'_> {
    fn read_char(&mut self) -> Result<Option<char>, ReadError> {
        match self.inner.read_char()? {
            Some(ch) => Ok(Some(ch)),
            None => Err(ReadError::new("device unplugged")),
        }
    }

    fn unread_char(&mut self) {
        self.inner.unread_char();
    }
}

#[test]
fn element_with_attribute_and_text() {
    assert_eq!(
        tokenize(r#"<div id="main">Hello</div>"#),
        vec![
            start("div"),
            attr("id"),
            value("main"),
            text("Hello"),
            end("div"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn start_tag_name_is_folded_but_end_tag_is_not() {
    assert_eq!(
        tokenize("<DIV>x</DIV>"),
        vec![start("div"), text("x"), end("DIV"), Token::EndOfInput]
    );
}

#[test]
fn empty_and_whitespace_only_inputs_yield_only_eof() {
    for input in ["", " ", "\n\t  \r\n", "\u{3000}\u{a0}"] {
        assert_eq!(tokenize(input), vec![Token::EndOfInput], "input {input:?}");
    }
}

#[test]
fn empty_element_pair() {
    assert_eq!(
        tokenize("<div></div>"),
        vec![start("div"), end("div"), Token::EndOfInput]
    );
}

#[test]
fn nested_elements_keep_document_order() {
    assert_eq!(
        tokenize(r#"<div><a><div><a class="hi"></a><b></b></div></a></div>"#),
        vec![
            start("div"),
            start("a"),
            start("div"),
            start("a"),
            attr("class"),
            value("hi"),
            end("a"),
            start("b"),
            end("b"),
            end("div"),
            end("a"),
            end("div"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn text_keeps_inner_and_trailing_spaces_but_not_leading() {
    assert_eq!(
        tokenize("<p>  hello   world  </p>"),
        vec![
            start("p"),
            text("hello   world  "),
            end("p"),
            Token::EndOfInput
        ]
    );
}

#[test]
fn whitespace_between_tags_is_not_text() {
    assert_eq!(
        tokenize("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n"),
        vec![
            start("ul"),
            start("li"),
            text("a"),
            end("li"),
            start("li"),
            text("b"),
            end("li"),
            end("ul"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn multiple_attributes_with_both_quote_styles() {
    assert_eq!(
        tokenize(r#"<a href='/x "y"'   title="it's">t</a>"#),
        vec![
            start("a"),
            attr("href"),
            value(r#"/x "y""#),
            attr("title"),
            value("it's"),
            text("t"),
            end("a"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn attribute_names_and_values_are_not_folded() {
    assert_eq!(
        tokenize(r#"<A HREF="X"></a>"#),
        vec![
            start("a"),
            attr("HREF"),
            value("X"),
            end("a"),
            Token::EndOfInput
        ]
    );
}

#[test]
fn only_ascii_letters_fold_in_tag_names() {
    assert_eq!(
        tokenize("<ÄB></ÄB>"),
        vec![start("Äb"), end("ÄB"), Token::EndOfInput]
    );
}

#[test]
fn empty_attribute_value_is_emitted() {
    assert_eq!(
        tokenize(r#"<input value="">"#),
        vec![start("input"), attr("value"), value(""), Token::EndOfInput]
    );
}

#[test]
fn lone_lt_is_an_error() {
    assert_eq!(
        tokenize("<"),
        vec![error(LexErrorKind::UnexpectedEof, LexState::TagOpen, 1)]
    );
}

#[test]
fn eof_inside_tag_name_and_end_tag() {
    assert_eq!(
        tokenize("<div"),
        vec![error(LexErrorKind::UnexpectedEof, LexState::TagName, 4)]
    );
    assert_eq!(
        tokenize("<p></div"),
        vec![
            start("p"),
            error(LexErrorKind::UnexpectedEof, LexState::EndTag, 8)
        ]
    );
}

#[test]
fn attribute_value_requires_opening_quote() {
    assert_eq!(
        tokenize("<a href=x>"),
        vec![
            start("a"),
            attr("href"),
            error(
                LexErrorKind::UnexpectedCharacter('x'),
                LexState::AttributeValue,
                9
            ),
        ]
    );
}

#[test]
fn whitespace_before_equals_ends_the_name_and_then_fails() {
    assert_eq!(
        tokenize(r#"<a b ="x">"#),
        vec![
            start("a"),
            attr("b"),
            error(
                LexErrorKind::UnexpectedCharacter('='),
                LexState::AttributeValue,
                6
            ),
        ]
    );
}

#[test]
fn attribute_must_start_with_a_letter() {
    assert_eq!(
        tokenize(r#"<a 1="x">"#),
        vec![
            start("a"),
            error(
                LexErrorKind::UnexpectedCharacter('1'),
                LexState::BeforeAttributeName,
                4
            ),
        ]
    );
}

#[test]
fn attribute_must_not_start_with_a_letter_number_or_mark() {
    for ch in ['\u{2160}', '\u{0345}'] {
        assert_eq!(
            tokenize(&format!("<p {ch}=\"x\">")),
            vec![
                start("p"),
                error(
                    LexErrorKind::UnexpectedCharacter(ch),
                    LexState::BeforeAttributeName,
                    4
                ),
            ],
            "attribute starting with U+{:04X}",
            ch as u32
        );
    }
}

#[test]
fn attribute_may_start_with_a_non_ascii_letter() {
    assert_eq!(
        tokenize("<p \u{00E9}t\u{00E9}='x'>"),
        vec![start("p"), attr("\u{00E9}t\u{00E9}"), value("x"), Token::EndOfInput]
    );
}

#[test]
fn unterminated_value_is_accepted_by_default() {
    assert_eq!(
        tokenize(r#"<a href="x"#),
        vec![
            start("a"),
            attr("href"),
            value("x"),
            error(LexErrorKind::UnexpectedEof, LexState::BeforeAttributeName, 10),
        ]
    );
}

#[test]
fn unterminated_value_can_be_rejected() {
    let config = TokenizerConfig {
        unterminated_value: UnterminatedValuePolicy::Reject,
        ..TokenizerConfig::default()
    };
    assert_eq!(
        tokenize_with_config(r#"<a href="x"#, config),
        vec![
            start("a"),
            attr("href"),
            error(LexErrorKind::UnexpectedEof, LexState::AttributeValue, 10),
        ]
    );
}

#[test]
fn self_closing_slash_halts_without_eof_by_default() {
    let mut source = StrSource::new("<br/>after");
    let tokens = Tokenizer::new(&mut source).run();
    assert_eq!(tokens, vec![start("br")]);
    assert_eq!(source.remaining(), ">after", "nothing is read after the halt");
}

#[test]
fn self_closing_slash_before_attribute_is_an_error_by_default() {
    assert_eq!(
        tokenize(r#"<img src="x" />"#),
        vec![
            start("img"),
            attr("src"),
            value("x"),
            error(
                LexErrorKind::UnexpectedCharacter('/'),
                LexState::BeforeAttributeName,
                14
            ),
        ]
    );
}

#[test]
fn resume_policy_continues_after_self_closing_tags() {
    assert_eq!(
        tokenize_with_config(r#"<br/>after<img src="x" /><p>"#, resume_config()),
        vec![
            start("br"),
            text("after"),
            start("img"),
            attr("src"),
            value("x"),
            start("p"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn resume_policy_requires_gt_after_slash() {
    assert_eq!(
        tokenize_with_config("<br/x", resume_config()),
        vec![
            start("br"),
            error(
                LexErrorKind::UnexpectedCharacter('x'),
                LexState::SelfClosingStartTag,
                5
            ),
        ]
    );
    assert_eq!(
        tokenize_with_config("<br/", resume_config()),
        vec![
            start("br"),
            error(LexErrorKind::UnexpectedEof, LexState::SelfClosingStartTag, 4),
        ]
    );
}

#[test]
fn trailing_text_is_dropped_by_default() {
    assert_eq!(tokenize("just text"), vec![Token::EndOfInput]);
    assert_eq!(
        tokenize("<p>hi</p>tail"),
        vec![start("p"), text("hi"), end("p"), Token::EndOfInput]
    );
}

#[test]
fn trailing_text_can_be_flushed() {
    let config = TokenizerConfig {
        flush_trailing_text: true,
        ..TokenizerConfig::default()
    };
    assert_eq!(
        tokenize_with_config("<p>hi</p>tail ", config),
        vec![
            start("p"),
            text("hi"),
            end("p"),
            text("tail "),
            Token::EndOfInput
        ]
    );
}

#[test]
fn read_failure_is_terminal() {
    let source = FailingSource {
        inner: StrSource::new("<di"),
    };
    let tokens = Tokenizer::new(source).run();
    assert_eq!(
        tokens,
        vec![error(
            LexErrorKind::ReadFailure(ReadError::new("device unplugged")),
            LexState::TagName,
            3
        )]
    );
}

#[test]
fn read_failure_closes_value_when_lenient() {
    let source = FailingSource {
        inner: StrSource::new("<a b='v"),
    };
    let tokens = Tokenizer::new(source).run();
    assert_eq!(
        tokens,
        vec![
            start("a"),
            attr("b"),
            value("v"),
            error(
                LexErrorKind::ReadFailure(ReadError::new("device unplugged")),
                LexState::BeforeAttributeName,
                7
            ),
        ]
    );
}

#[test]
fn lazy_tokens_are_produced_on_demand() {
    let mut source = StrSource::new("<a>b</a>");
    {
        let mut tokens = Tokenizer::new(&mut source).tokens();
        assert_eq!(tokens.next(), Some(start("a")));
        assert_eq!(tokens.stats().chars_read, 3);
        assert_eq!(tokens.stats().tokens_emitted, 1);
    }
    assert_eq!(source.remaining(), "b</a>", "no read-ahead past the first token");
}

#[test]
fn lazy_sequence_ends_after_terminal_token() {
    let mut tokens = Tokenizer::new(StrSource::new("<p>x</p>")).tokens();
    let collected: Vec<Token> = tokens.by_ref().collect();
    assert_eq!(collected.last(), Some(&Token::EndOfInput));
    assert_eq!(tokens.state(), LexState::Done);
    assert_eq!(tokens.next(), None);
    assert_eq!(tokens.next(), None);
}

#[test]
fn run_and_lazy_sequence_agree() {
    let inputs = [
        r#"<div id="main">Hello</div>"#,
        "<",
        "<br/>x",
        r#"<a href="x"#,
        "  text only ",
        "<ul> <li>a</li> </ul>",
    ];
    for input in inputs {
        let eager = Tokenizer::new(StrSource::new(input)).run();
        let lazy: Vec<Token> = Tokenizer::new(StrSource::new(input)).tokens().collect();
        assert_eq!(eager, lazy, "input {input:?}");
    }
}

#[test]
fn independent_runs_are_identical() {
    let input = r#"<html><body class='a'><p>one</p><P>two</P></body></html>"#;
    assert_eq!(tokenize(input), tokenize(input));
}

#[test]
fn stats_track_reads_transitions_and_tokens() {
    let mut tokenizer = Tokenizer::new(StrSource::new("  <a>"));
    while tokenizer.next_token().is_some() {}
    let stats = tokenizer.stats();
    assert_eq!(stats.chars_read, 5);
    assert_eq!(stats.tokens_emitted, 2);
    // Data -> TagOpen -> TagName -> Data -> Done
    assert_eq!(stats.state_transitions, 4);
}

#[test]
fn error_token_message_is_human_readable() {
    let tokens = tokenize("<a 1>");
    let err = tokens
        .last()
        .and_then(Token::as_error)
        .expect("run must end in an error");
    assert_eq!(
        err.to_string(),
        "unexpected character '1' before attribute name (after 4 chars)"
    );
}
