#![no_main]
use libfuzzer_sys::fuzz_target;
use streamjson::{NullSink, ParserOptions, StreamingParser, validate};

fuzz_target!(|data: &[u8]| {
    let valid = validate(data);

    // Byte-at-a-time must reach the same verdict.
    let mut parser = StreamingParser::new(NullSink, ParserOptions::default());
    let bytewise = data
        .iter()
        .all(|b| parser.write(std::slice::from_ref(b)).is_ok())
        && parser.finish().is_ok();
    assert_eq!(valid, bytewise);
});
