#![allow(missing_docs)]

use insta::assert_snapshot;
use streamjson::{ValueParser, parse_to_value};

mod common;

fn parse_stream() -> streamjson::Value {
    let mut parser = ValueParser::new();
    for chunk in common::STREAM {
        assert_eq!(parser.write(chunk), Ok(chunk.len()));
    }
    parser.finish().unwrap();
    parser.release().unwrap()
}

#[test]
fn stream_matches_one_shot() {
    let streamed = parse_stream();
    assert_eq!(streamed, common::expected());
    assert_eq!(
        parse_to_value(common::ORIGINAL.as_bytes()).unwrap(),
        streamed
    );
}

#[test]
fn snapshot_indented() {
    let text = parse_stream().to_json_pretty(2).unwrap();
    assert!(text.ends_with("}\n"));
    assert_snapshot!(text.trim_end(), @r#"
    {
      "station": {
        "id": "wx-17",
        "name": "Zürich Süd",
        "active": true
      },
      "readings": [
        {
          "t": 1700000000,
          "temp": -3.25,
          "hum": 0.81
        },
        {
          "t": 1700000060,
          "temp": -3.5,
          "hum": null
        }
      ],
      "counters": [
        0,
        18446744073709551615,
        -9223372036854775808
      ],
      "notes": "line1\nline2 é😀",
      "tags": [],
      "meta": {}
    }
    "#);
}

#[test]
fn snapshot_compact() {
    let text = parse_stream().to_json_string().unwrap();
    assert_snapshot!(text, @r#"{"station":{"id":"wx-17","name":"Zürich Süd","active":true},"readings":[{"t":1700000000,"temp":-3.25,"hum":0.81},{"t":1700000060,"temp":-3.5,"hum":null}],"counters":[0,18446744073709551615,-9223372036854775808],"notes":"line1\nline2 é😀","tags":[],"meta":{}}"#);
}

#[test]
fn snapshot_indent_width_four() {
    let value = parse_to_value(br#"{"a":[1,{"b":[]}]}"#).unwrap();
    assert_snapshot!(value.to_json_pretty(4).unwrap().trim_end(), @r#"
    {
        "a": [
            1,
            {
                "b": []
            }
        ]
    }
    "#);
}
