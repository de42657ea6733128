#![no_main]
use libfuzzer_sys::fuzz_target;
use streamjson::{SerializeMode, parse_to_value, serialize};

fuzz_target!(|data: &[u8]| {
    let (width, data) = match data.split_first() {
        Some((&w, rest)) => (usize::from(w % 9), rest),
        None => return,
    };
    let Ok(value) = parse_to_value(data) else {
        return;
    };

    for mode in [SerializeMode::Compact, SerializeMode::Indented { width }] {
        let text = serialize(&value, mode).expect("parsed value must serialize");
        let reparsed = parse_to_value(text.as_bytes()).expect("serialized text must parse");
        assert_eq!(reparsed, value, "{mode:?}: {text}");
        assert_eq!(serialize(&reparsed, mode).as_ref(), Ok(&text));
    }
});
