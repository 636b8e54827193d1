#![no_main]

use libfuzzer_sys::fuzz_target;
use lexer::{
    SelfClosingPolicy, StrSource, Token, Tokenizer, TokenizerConfig, UnterminatedValuePolicy,
};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let strict = TokenizerConfig {
        self_closing: SelfClosingPolicy::ResumeData,
        unterminated_value: UnterminatedValuePolicy::Reject,
        flush_trailing_text: true,
    };
    for config in [TokenizerConfig::default(), strict] {
        let eager = Tokenizer::with_config(StrSource::new(input), config.clone()).run();
        let lazy: Vec<Token> = Tokenizer::with_config(StrSource::new(input), config.clone())
            .tokens()
            .collect();
        assert_eq!(eager, lazy, "eager and lazy runs diverged");

        if let Some(pos) = eager.iter().position(Token::is_terminal) {
            assert_eq!(pos + 1, eager.len(), "tokens emitted after a terminal token");
        } else {
            assert_eq!(config.self_closing, SelfClosingPolicy::Halt);
            assert!(matches!(eager.last(), Some(Token::StartTag(_))));
        }
        assert!(
            eager.iter().all(|token| !matches!(token, Token::Text(text) if text.is_empty())),
            "empty text token emitted"
        );
    }
});
