#![allow(missing_docs)]
#![allow(dead_code)]

use streamjson::{Map, Value};

pub const ORIGINAL: &str = concat!(
    r#"{"station":{"id":"wx-17","name":"Zürich Süd","active":true},"#,
    r#""readings":[{"t":1700000000,"temp":-3.25,"hum":0.81},"#,
    r#"{"t":1700000060,"temp":-3.5e0,"hum":null}],"#,
    r#""counters":[0,18446744073709551615,-9223372036854775808],"#,
    r#""notes":"line1\nline2 \u00e9\ud83d\ude00","tags":[],"meta":{}}"#,
);

// The same document as a stream of writes. Every chunk but the last ends
// inside a token.
#[rustfmt::skip]
pub const STREAM: [&[u8]; 11] = [
    br#"{"station":{"id":"wx-"#,                         // inside a string
    b"17\",\"name\":\"Z\xC3",                            // inside a UTF-8 sequence
    b"\xBCrich S\xC3\xBCd\",\"act",                      // inside a key
    br#"ive":true},"readings":[{"t":17000"#,             // inside an integer
    br#"00000,"temp":-"#,                                // after a sign
    br#"3.25,"hum":0.81},{"t":1700000060,"temp":-3.5e"#, // inside an exponent
    br#"0,"hum":nu"#,                                    // inside a literal
    br#"ll}],"counters":[0,18446744073709551615,-9223372036854775808],"notes":"line1\"#, // after a backslash
    br#"nline2 \u00"#,                                   // inside a \u escape
    br#"e9\ud83d"#,                                      // between surrogate halves
    br#"\ude00","tags":[],"meta":{}}"#,
];

pub fn expected() -> Value {
    let station = Map::from([
        ("id", Value::from("wx-17")),
        ("name", Value::from("Zürich Süd")),
        ("active", Value::Bool(true)),
    ]);
    let first = Map::from([
        ("t", Value::Int64(1_700_000_000)),
        ("temp", Value::Double(-3.25)),
        ("hum", Value::Double(0.81)),
    ]);
    let second = Map::from([
        ("t", Value::Int64(1_700_000_060)),
        ("temp", Value::Double(-3.5)),
        ("hum", Value::Null),
    ]);
    Value::Object(Map::from([
        ("station", Value::Object(station)),
        (
            "readings",
            Value::Array(vec![Value::Object(first), Value::Object(second)]),
        ),
        (
            "counters",
            Value::Array(vec![
                Value::Int64(0),
                Value::UInt64(u64::MAX),
                Value::Int64(i64::MIN),
            ]),
        ),
        ("notes", Value::from("line1\nline2 é😀")),
        ("tags", Value::Array(Vec::new())),
        ("meta", Value::Object(Map::new())),
    ]))
}

#[test]
fn stream_concatenates_to_original() {
    assert_eq!(STREAM.concat(), ORIGINAL.as_bytes());
}
