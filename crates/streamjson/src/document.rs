//! Whole-document parsing into a [`Value`].
use crate::{
    builder::{BuilderOptions, ValueBuilder},
    parser::{ErrorKind, ParseError, ParserOptions, StreamingParser},
    sink::NullSink,
    value::Value,
};

/// A [`StreamingParser`] paired with a [`ValueBuilder`].
///
/// # Examples
///
/// ```rust
/// use streamjson::{Value, ValueParser};
///
/// let mut parser = ValueParser::new();
/// parser.write(b"[tr").unwrap();
/// parser.write(b"ue, 1.5]").unwrap();
/// parser.finish().unwrap();
/// let value = parser.release().unwrap();
/// assert_eq!(value, Value::Array(vec![Value::Bool(true), Value::Double(1.5)]));
/// ```
#[derive(Debug)]
pub struct ValueParser {
    parser: StreamingParser<ValueBuilder>,
}

impl Default for ValueParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueParser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default(), BuilderOptions::default())
    }

    #[must_use]
    pub fn with_options(options: ParserOptions, limits: BuilderOptions) -> Self {
        Self {
            parser: StreamingParser::new(ValueBuilder::with_options(limits), options),
        }
    }

    /// Starts over with a fresh document, discarding any partial or
    /// unreleased value.
    pub fn reset(&mut self) {
        self.parser.reset();
        self.parser.sink_mut().reset();
    }

    /// See [`StreamingParser::write`].
    pub fn write(&mut self, input: &[u8]) -> Result<usize, ParseError> {
        self.parser.write(input)
    }

    /// See [`StreamingParser::write_some`].
    pub fn write_some(&mut self, input: &[u8]) -> Result<usize, ParseError> {
        self.parser.write_some(input)
    }

    /// See [`StreamingParser::finish`].
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.parser.finish()
    }

    pub fn finish_with(&mut self, input: &[u8]) -> Result<(), ParseError> {
        self.parser.finish_with(input)
    }

    /// Moves the parsed value out.
    ///
    /// Only succeeds once per document, after [`finish`](Self::finish) has
    /// succeeded; otherwise fails with [`ErrorKind::NoDocument`].
    pub fn release(&mut self) -> Result<Value, ParseError> {
        if !self.parser.is_done() {
            return Err(self.parser.error_here(ErrorKind::NoDocument));
        }
        self.parser
            .sink_mut()
            .take_root()
            .ok_or_else(|| self.parser.error_here(ErrorKind::NoDocument))
    }

    pub fn depth(&self) -> usize {
        self.parser.depth()
    }

    pub fn is_done(&self) -> bool {
        self.parser.is_done()
    }
}

/// Parses a complete document with default options.
///
/// ```rust
/// use streamjson::{Value, parse_to_value};
///
/// assert_eq!(parse_to_value(b"42"), Ok(Value::Int64(42)));
/// assert!(parse_to_value(b"[1,]").is_err());
/// ```
pub fn parse_to_value(input: &[u8]) -> Result<Value, ParseError> {
    parse_to_value_with(input, ParserOptions::default(), BuilderOptions::default())
}

pub fn parse_to_value_with(
    input: &[u8],
    options: ParserOptions,
    limits: BuilderOptions,
) -> Result<Value, ParseError> {
    let mut parser = ValueParser::with_options(options, limits);
    parser.finish_with(input)?;
    parser.release()
}

/// Checks that `input` is one well-formed document, building nothing.
///
/// ```rust
/// assert!(streamjson::validate(br#"{"a": [null]}"#));
/// assert!(!streamjson::validate(b"{\"a\" 1}"));
/// ```
#[must_use]
pub fn validate(input: &[u8]) -> bool {
    validate_with(input, ParserOptions::default())
}

#[must_use]
pub fn validate_with(input: &[u8], options: ParserOptions) -> bool {
    StreamingParser::new(NullSink, options)
        .finish_with(input)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;
    use crate::{error::SinkError, value::Map};

    #[test]
    fn release_requires_finished_document() {
        let mut parser = ValueParser::new();
        assert_eq!(
            parser.release().unwrap_err().kind(),
            &ErrorKind::NoDocument
        );

        parser.write(b"{\"a\":").unwrap();
        assert_eq!(parser.depth(), 1);
        assert_eq!(
            parser.release().unwrap_err().kind(),
            &ErrorKind::NoDocument
        );

        parser.finish_with(b"[]}").unwrap();
        assert_eq!(
            parser.release(),
            Ok(Value::Object(Map::from([("a", Value::Array(vec![]))])))
        );
        let again = parser.release().unwrap_err();
        assert_eq!(again.kind(), &ErrorKind::NoDocument);
        assert_eq!(again.offset(), 8);
    }

    fn parse_split(doc: &[u8], at: usize, limits: BuilderOptions) -> Result<Value, ParseError> {
        let mut parser = ValueParser::with_options(ParserOptions::default(), limits);
        parser.write(&doc[..at])?;
        parser.finish_with(&doc[at..])?;
        parser.release()
    }

    #[rstest]
    #[case::string(
        br#"["abcdefgh"]"#,
        BuilderOptions { max_string_len: 4, ..BuilderOptions::default() },
        SinkError::StringTooLarge { limit: 4 },
    )]
    #[case::key(
        br#"{"abcdefgh":1}"#,
        BuilderOptions { max_key_len: 4, ..BuilderOptions::default() },
        SinkError::KeyTooLarge { limit: 4 },
    )]
    fn length_limits_fail_on_the_closing_quote_for_every_split(
        #[case] doc: &[u8],
        #[case] limits: BuilderOptions,
        #[case] rejection: SinkError,
    ) {
        let whole = parse_to_value_with(doc, ParserOptions::default(), limits).unwrap_err();
        assert_eq!(whole.kind(), &ErrorKind::SinkRejected(rejection));
        assert_eq!(whole.offset(), 10);

        for at in 0..=doc.len() {
            assert_eq!(parse_split(doc, at, limits), Err(whole.clone()), "split at {at}");
        }
    }

    #[test]
    fn strings_at_the_limit_are_kept_across_splits() {
        let limits = BuilderOptions {
            max_string_len: 4,
            max_key_len: 4,
            ..BuilderOptions::default()
        };
        let doc = br#"{"abcd":"wxyz"}"#;
        for at in 0..=doc.len() {
            assert_eq!(
                parse_split(doc, at, limits),
                Ok(Value::Object(Map::from([("abcd", Value::from("wxyz"))]))),
                "split at {at}"
            );
        }
    }

    #[test]
    fn reset_allows_reuse() {
        let mut parser = ValueParser::new();
        assert!(parser.finish_with(b"[1,").is_err());
        assert!(!parser.is_done());

        parser.reset();
        parser.finish_with(b"null").unwrap();
        assert!(parser.is_done());
        assert_eq!(parser.release(), Ok(Value::Null));
    }

    #[test]
    fn failed_parse_releases_nothing() {
        let mut parser = ValueParser::new();
        assert!(parser.finish_with(b"[1 2]").is_err());
        assert_eq!(
            parser.release().unwrap_err().kind(),
            &ErrorKind::NoDocument
        );
    }

    #[test]
    fn concatenated_documents_with_write_some() {
        let input = b"{\"n\":1}\n[2]\n3";
        let mut rest: &[u8] = input;
        let mut values = vec![];
        let mut parser = ValueParser::new();
        while !rest.is_empty() {
            parser.reset();
            let n = parser.write_some(rest).unwrap();
            rest = &rest[n..];
            parser.finish().unwrap();
            values.push(parser.release().unwrap());
            rest = rest.trim_ascii_start();
        }
        assert_eq!(
            values,
            vec![
                Value::Object(Map::from([("n", Value::Int64(1))])),
                Value::Array(vec![Value::Int64(2)]),
                Value::Int64(3),
            ]
        );
    }

    #[test]
    fn validate_agrees_with_parse() {
        for input in [
            &b"[]"[..],
            b"",
            b"   ",
            b"{\"a\":}",
            b"\"\\ud800\"",
            b"1e400",
            b"[\"\xff\"]",
        ] {
            assert_eq!(validate(input), parse_to_value(input).is_ok(), "{input:?}");
        }
    }
}
