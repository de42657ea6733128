//! Incremental JSON parsing with pluggable event sinks.
//!
//! [`StreamingParser`] accepts a document split into any number of byte
//! chunks and reports it to an [`EventSink`] as it goes. Two sinks ship with
//! the crate: [`NullSink`] for validation and [`ValueBuilder`] for building a
//! [`Value`] tree, which [`serialize`] turns back into text.
//!
//! ```rust
//! use streamjson::{SerializeMode, ValueParser, serialize};
//!
//! let mut parser = ValueParser::new();
//! for chunk in [&b"{\"greet"[..], b"ing\": \"h\xC3", b"\xA9llo\"}"] {
//!     parser.write(chunk)?;
//! }
//! parser.finish()?;
//! let value = parser.release()?;
//! assert_eq!(
//!     serialize(&value, SerializeMode::Compact)?,
//!     r#"{"greeting":"héllo"}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod document;
mod error;
mod parser;
mod serializer;
mod sink;
mod value;

#[cfg(any(test, feature = "fuzzing"))]
#[doc(hidden)]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use builder::{BuilderOptions, ValueBuilder};
pub use document::{ValueParser, parse_to_value, parse_to_value_with, validate, validate_with};
pub use error::SinkError;
pub use parser::{DEFAULT_MAX_DEPTH, ErrorKind, ParseError, ParserOptions, StreamingParser};
pub use serializer::{SerializeError, SerializeMode, SerializeOptions, serialize, serialize_to};
pub use sink::{EventSink, NullSink};
pub use value::{Array, Kind, Map, Value};
