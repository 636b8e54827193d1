#![no_main]

use libfuzzer_sys::fuzz_target;
use lexer::{ReaderSource, StrSource, Tokenizer};

// Arbitrary bytes through the decoding reader must match lossy decoding up
// front, whatever the chunk size.
fuzz_target!(|data: &[u8]| {
    let Some((&chunk, bytes)) = data.split_first() else {
        return;
    };
    let chunk_size = usize::from(chunk % 16) + 1;
    let decoded = String::from_utf8_lossy(bytes);
    let expected = Tokenizer::new(StrSource::new(&decoded)).run();
    let actual = Tokenizer::new(ReaderSource::with_chunk_size(bytes, chunk_size)).run();
    assert_eq!(expected, actual);
});
