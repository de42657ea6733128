#![allow(missing_docs)]

use core::fmt::Write;

use insta::assert_snapshot;
use streamjson::{EventSink, ParserOptions, SinkError, StreamingParser};

mod common;

/// Writes one line per event.
#[derive(Default)]
struct Transcript(String);

impl Transcript {
    fn line(&mut self, name: &str) -> Result<(), SinkError> {
        writeln!(self.0, "{name}").map_err(|_| SinkError::Rejected("write"))
    }

    fn text(&mut self, name: &str, fragment: &str) -> Result<(), SinkError> {
        writeln!(self.0, "{name} {fragment:?}").map_err(|_| SinkError::Rejected("write"))
    }
}

impl EventSink for Transcript {
    fn on_document_begin(&mut self) -> Result<(), SinkError> {
        self.line("document_begin")
    }
    fn on_document_end(&mut self) -> Result<(), SinkError> {
        self.line("document_end")
    }
    fn on_object_begin(&mut self) -> Result<(), SinkError> {
        self.line("object_begin")
    }
    fn on_object_end(&mut self) -> Result<(), SinkError> {
        self.line("object_end")
    }
    fn on_array_begin(&mut self) -> Result<(), SinkError> {
        self.line("array_begin")
    }
    fn on_array_end(&mut self) -> Result<(), SinkError> {
        self.line("array_end")
    }
    fn on_key_part(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.text("key_part", fragment)
    }
    fn on_key(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.text("key", fragment)
    }
    fn on_string_part(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.text("string_part", fragment)
    }
    fn on_string(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.text("string", fragment)
    }
    fn on_int64(&mut self, value: i64) -> Result<(), SinkError> {
        writeln!(self.0, "int64 {value}").map_err(|_| SinkError::Rejected("write"))
    }
    fn on_uint64(&mut self, value: u64) -> Result<(), SinkError> {
        writeln!(self.0, "uint64 {value}").map_err(|_| SinkError::Rejected("write"))
    }
    fn on_double(&mut self, value: f64) -> Result<(), SinkError> {
        writeln!(self.0, "double {value:?}").map_err(|_| SinkError::Rejected("write"))
    }
    fn on_bool(&mut self, value: bool) -> Result<(), SinkError> {
        writeln!(self.0, "bool {value}").map_err(|_| SinkError::Rejected("write"))
    }
    fn on_null(&mut self) -> Result<(), SinkError> {
        self.line("null")
    }
}

fn transcript(stream: &[&[u8]]) -> String {
    let mut parser = StreamingParser::new(Transcript::default(), ParserOptions::default());
    for chunk in stream {
        parser.write(chunk).unwrap();
    }
    parser.finish().unwrap();
    parser.into_sink().0
}

#[test]
fn snapshot_events_small_stream() {
    let stream: [&[u8]; 6] = [
        br#"{"k":[1"#,
        br#"2,"ab"#,
        br#"c\n",{"x""#,
        br#":nul"#,
        br#"l}],"s":"he"#,
        br#"llo"}"#,
    ];

    assert_snapshot!(transcript(&stream), @r#"
    document_begin
    object_begin
    key "k"
    array_begin
    int64 12
    string_part "ab"
    string "c\n"
    object_begin
    key "x"
    null
    object_end
    array_end
    key "s"
    string_part "he"
    string "llo"
    object_end
    document_end
    "#);
}

#[test]
fn snapshot_events_station_stream() {
    assert_snapshot!(transcript(&common::STREAM), @r#"
    document_begin
    object_begin
    key "station"
    object_begin
    key "id"
    string_part "wx-"
    string "17"
    key "name"
    string_part "Z"
    string "ürich Süd"
    key_part "act"
    key "ive"
    bool true
    object_end
    key "readings"
    array_begin
    object_begin
    key "t"
    int64 1700000000
    key "temp"
    double -3.25
    key "hum"
    double 0.81
    object_end
    object_begin
    key "t"
    int64 1700000060
    key "temp"
    double -3.5
    key "hum"
    null
    object_end
    array_end
    key "counters"
    array_begin
    int64 0
    uint64 18446744073709551615
    int64 -9223372036854775808
    array_end
    key "notes"
    string_part "line1"
    string_part "\nline2 "
    string_part "é"
    string "😀"
    key "tags"
    array_begin
    array_end
    key "meta"
    object_begin
    object_end
    object_end
    document_end
    "#);
}

#[test]
fn one_shot_has_no_fragments() {
    let text = transcript(&[common::ORIGINAL.as_bytes()]);
    assert!(!text.contains("_part"));
}
