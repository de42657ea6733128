//! Text output for [`Value`] trees.
use alloc::string::String;
use core::fmt::{self, Write};

use thiserror::Error;

use crate::{
    parser::DEFAULT_MAX_DEPTH,
    value::{Map, Value},
};

/// Layout of serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializeMode {
    /// No whitespace at all.
    #[default]
    Compact,
    /// One element or member per line, nested `width` spaces per level,
    /// with a single trailing newline.
    Indented { width: usize },
}

/// Configuration for [`serialize_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// # Default
    ///
    /// [`SerializeMode::Compact`]
    pub mode: SerializeMode,
    /// Maximum container nesting that will be written.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`], so anything the parser accepts with default
    /// options can be written back.
    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            mode: SerializeMode::Compact,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("value nested deeper than the depth limit")]
    DepthLimitExceeded,
    /// NaN and infinities have no JSON representation.
    #[error("non-finite number")]
    NonFiniteNumber,
    /// `width` times the depth limit does not fit in a `usize`.
    #[error("indentation width too large")]
    IndentTooWide,
    #[error("formatter error")]
    Format(#[from] fmt::Error),
}

/// Serializes `value` into a new string.
///
/// # Examples
///
/// ```rust
/// use streamjson::{SerializeMode, Value, parse_to_value, serialize};
///
/// let v = parse_to_value(br#"{"a": [1, 2.5]}"#).unwrap();
/// assert_eq!(serialize(&v, SerializeMode::Compact).unwrap(), r#"{"a":[1,2.5]}"#);
/// assert_eq!(
///     serialize(&v, SerializeMode::Indented { width: 2 }).unwrap(),
///     "{\n  \"a\": [\n    1,\n    2.5\n  ]\n}\n"
/// );
/// ```
pub fn serialize(value: &Value, mode: SerializeMode) -> Result<String, SerializeError> {
    let mut out = String::new();
    serialize_to(
        value,
        &mut out,
        &SerializeOptions {
            mode,
            ..SerializeOptions::default()
        },
    )?;
    Ok(out)
}

/// Serializes `value` into any [`fmt::Write`].
pub fn serialize_to<W: Write + ?Sized>(
    value: &Value,
    out: &mut W,
    options: &SerializeOptions,
) -> Result<(), SerializeError> {
    if let SerializeMode::Indented { width } = options.mode {
        width
            .checked_mul(options.max_depth)
            .ok_or(SerializeError::IndentTooWide)?;
    }
    let mut writer = Writer { out, options };
    writer.value(value, 0)?;
    if let SerializeMode::Indented { .. } = options.mode {
        writer.out.write_char('\n')?;
    }
    Ok(())
}

impl Value {
    /// Compact JSON text for this value.
    pub fn to_json_string(&self) -> Result<String, SerializeError> {
        serialize(self, SerializeMode::Compact)
    }

    /// Indented JSON text for this value.
    pub fn to_json_pretty(&self, width: usize) -> Result<String, SerializeError> {
        serialize(self, SerializeMode::Indented { width })
    }
}

struct Writer<'a, W: Write + ?Sized> {
    out: &'a mut W,
    options: &'a SerializeOptions,
}

impl<W: Write + ?Sized> Writer<'_, W> {
    /// `depth` counts the containers enclosing `value`.
    fn value(&mut self, value: &Value, depth: usize) -> Result<(), SerializeError> {
        match value {
            Value::Null => self.out.write_str("null")?,
            Value::Bool(b) => self.out.write_str(if *b { "true" } else { "false" })?,
            Value::Int64(n) => write!(self.out, "{n}")?,
            Value::UInt64(n) => write!(self.out, "{n}")?,
            Value::Double(d) => self.double(*d)?,
            Value::String(s) => self.string(s)?,
            Value::Array(items) => self.array(items, depth)?,
            Value::Object(map) => self.object(map, depth)?,
        }
        Ok(())
    }

    fn double(&mut self, d: f64) -> Result<(), SerializeError> {
        if !d.is_finite() {
            return Err(SerializeError::NonFiniteNumber);
        }
        // `Debug` is the shortest representation that reads back to the same
        // bits, and always has a `.` or an exponent.
        write!(self.out, "{d:?}")?;
        Ok(())
    }

    fn string(&mut self, s: &str) -> fmt::Result {
        self.out.write_char('"')?;
        write_escaped_string(s, self.out)?;
        self.out.write_char('"')
    }

    fn array(&mut self, items: &[Value], depth: usize) -> Result<(), SerializeError> {
        self.enter(depth)?;
        if items.is_empty() {
            self.out.write_str("[]")?;
            return Ok(());
        }
        self.out.write_char('[')?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.newline(depth + 1)?;
            self.value(item, depth + 1)?;
        }
        self.newline(depth)?;
        self.out.write_char(']')?;
        Ok(())
    }

    fn object(&mut self, map: &Map, depth: usize) -> Result<(), SerializeError> {
        self.enter(depth)?;
        if map.is_empty() {
            self.out.write_str("{}")?;
            return Ok(());
        }
        self.out.write_char('{')?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.newline(depth + 1)?;
            self.string(key)?;
            self.out.write_char(':')?;
            if let SerializeMode::Indented { .. } = self.options.mode {
                self.out.write_char(' ')?;
            }
            self.value(value, depth + 1)?;
        }
        self.newline(depth)?;
        self.out.write_char('}')?;
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<(), SerializeError> {
        if depth >= self.options.max_depth {
            Err(SerializeError::DepthLimitExceeded)
        } else {
            Ok(())
        }
    }

    fn newline(&mut self, depth: usize) -> Result<(), SerializeError> {
        if let SerializeMode::Indented { width } = self.options.mode {
            let indent = depth
                .checked_mul(width)
                .ok_or(SerializeError::IndentTooWide)?;
            write!(self.out, "\n{:indent$}", "")?;
        }
        Ok(())
    }
}

/// Writes `src` with the escapes a JSON string literal needs, without the
/// surrounding quotes.
pub(crate) fn write_escaped_string<W: Write + ?Sized>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            // Line separators break JavaScript string literals before ES2019.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", u32::from(c))?,
            // Every remaining control character is in the BMP, so four hex
            // digits always suffice.
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec, vec::Vec};

    use rstest::rstest;

    use super::*;

    fn nested_arrays(depth: usize) -> Value {
        let mut v = Value::Null;
        for _ in 0..depth {
            v = Value::Array(vec![v]);
        }
        v
    }

    #[rstest]
    #[case(Value::Double(1.0), "1.0")]
    #[case(Value::Double(-0.0), "-0.0")]
    #[case(Value::Double(0.1), "0.1")]
    #[case(Value::Double(1e300), "1e300")]
    #[case(Value::Double(5e-324), "5e-324")]
    #[case(Value::Int64(i64::MIN), "-9223372036854775808")]
    #[case(Value::UInt64(u64::MAX), "18446744073709551615")]
    fn numbers(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_json_string().unwrap(), expected);
    }

    #[test]
    fn escapes() {
        let s = Value::from("q\" b\\ \n\t\u{1}\u{7f}\u{2028}é😀");
        assert_eq!(
            s.to_json_string().unwrap(),
            r#""q\" b\\ \n\t\u0001\u007F\u2028é😀""#
        );
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let v = Value::Array(vec![Value::Array(Vec::new()), Value::Object(Map::new())]);
        assert_eq!(v.to_json_pretty(4).unwrap(), "[\n    [],\n    {}\n]\n");
        assert_eq!(v.to_json_string().unwrap(), "[[],{}]");
    }

    #[test]
    fn scalar_root_gets_one_newline_when_indented() {
        assert_eq!(Value::Bool(true).to_json_pretty(2).unwrap(), "true\n");
    }

    #[test]
    fn depth_limit_matches_parser_default() {
        assert!(nested_arrays(DEFAULT_MAX_DEPTH).to_json_string().is_ok());
        assert_eq!(
            nested_arrays(DEFAULT_MAX_DEPTH + 1).to_json_string(),
            Err(SerializeError::DepthLimitExceeded)
        );
    }

    #[test]
    fn custom_depth_limit() {
        let mut out = String::new();
        let options = SerializeOptions {
            max_depth: 1,
            ..SerializeOptions::default()
        };
        assert!(serialize_to(&nested_arrays(1), &mut out, &options).is_ok());
        assert_eq!(out, "[null]");
        assert_eq!(
            serialize_to(&nested_arrays(2), &mut String::new(), &options),
            Err(SerializeError::DepthLimitExceeded)
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn non_finite_numbers_are_rejected(#[case] d: f64) {
        let v = Value::Array(vec![Value::Double(d)]);
        assert_eq!(v.to_json_string(), Err(SerializeError::NonFiniteNumber));
    }

    #[rstest]
    #[case(usize::MAX)]
    #[case(usize::MAX / 2)]
    fn indent_width_overflow_is_an_error(#[case] width: usize) {
        let v = nested_arrays(3);
        assert_eq!(v.to_json_pretty(width), Err(SerializeError::IndentTooWide));
        assert_eq!(
            Value::Null.to_json_pretty(width),
            Err(SerializeError::IndentTooWide)
        );
    }

    #[test]
    fn indent_width_check_uses_the_configured_depth() {
        let options = SerializeOptions {
            mode: SerializeMode::Indented {
                width: usize::MAX / 2,
            },
            max_depth: 2,
        };
        let mut out = String::new();
        assert!(serialize_to(&Value::Null, &mut out, &options).is_ok());
        assert_eq!(out, "null\n");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SerializeError::NonFiniteNumber.to_string(),
            "non-finite number"
        );
    }
}
