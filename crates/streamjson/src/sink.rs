//! The event sink capability and the validation-only [`NullSink`].
//!
//! [`StreamingParser`](crate::StreamingParser) reports what it recognizes by
//! calling one [`EventSink`] method per grammar production, in document
//! order. A string or key arrives as zero or more `*_part` fragments followed
//! by exactly one final fragment; the full text is their concatenation. Every
//! fragment is valid UTF-8 and may borrow directly from the caller's input.
//!
//! The parser is generic over its sink, so a concrete sink is monomorphized
//! into the state machine. For the dynamic form, `&mut dyn EventSink` and
//! `Box<dyn EventSink>` are sinks as well:
//!
//! ```rust
//! use streamjson::{EventSink, NullSink, ParserOptions, StreamingParser};
//!
//! let mut null = NullSink;
//! let sink: &mut dyn EventSink = &mut null;
//! let mut parser = StreamingParser::new(sink, ParserOptions::default());
//! assert!(parser.finish_with(b"[1, 2, 3]").is_ok());
//! ```

use alloc::boxed::Box;

use crate::error::SinkError;

/// Consumer of structural parse events.
///
/// Any callback may fail; the parser then stops and reports
/// [`ErrorKind::SinkRejected`](crate::ErrorKind::SinkRejected) at the offset
/// of the byte that triggered the event.
pub trait EventSink {
    fn on_document_begin(&mut self) -> Result<(), SinkError>;
    fn on_document_end(&mut self) -> Result<(), SinkError>;
    fn on_object_begin(&mut self) -> Result<(), SinkError>;
    fn on_object_end(&mut self) -> Result<(), SinkError>;
    fn on_array_begin(&mut self) -> Result<(), SinkError>;
    fn on_array_end(&mut self) -> Result<(), SinkError>;
    /// A non-final fragment of an object key.
    fn on_key_part(&mut self, fragment: &str) -> Result<(), SinkError>;
    /// The final fragment of an object key.
    fn on_key(&mut self, fragment: &str) -> Result<(), SinkError>;
    /// A non-final fragment of a string value.
    fn on_string_part(&mut self, fragment: &str) -> Result<(), SinkError>;
    /// The final fragment of a string value.
    fn on_string(&mut self, fragment: &str) -> Result<(), SinkError>;
    fn on_int64(&mut self, value: i64) -> Result<(), SinkError>;
    fn on_uint64(&mut self, value: u64) -> Result<(), SinkError>;
    fn on_double(&mut self, value: f64) -> Result<(), SinkError>;
    fn on_bool(&mut self, value: bool) -> Result<(), SinkError>;
    fn on_null(&mut self) -> Result<(), SinkError>;
}

/// Discards every event. Parsing into a `NullSink` checks well-formedness
/// without materializing anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn on_document_begin(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_document_end(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_object_begin(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_object_end(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_array_begin(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_array_end(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_key_part(&mut self, _: &str) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_key(&mut self, _: &str) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_string_part(&mut self, _: &str) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_string(&mut self, _: &str) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_int64(&mut self, _: i64) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_uint64(&mut self, _: u64) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_double(&mut self, _: f64) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_bool(&mut self, _: bool) -> Result<(), SinkError> {
        Ok(())
    }
    #[inline]
    fn on_null(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

macro_rules! forward_event_sink {
    () => {
        fn on_document_begin(&mut self) -> Result<(), SinkError> {
            (**self).on_document_begin()
        }
        fn on_document_end(&mut self) -> Result<(), SinkError> {
            (**self).on_document_end()
        }
        fn on_object_begin(&mut self) -> Result<(), SinkError> {
            (**self).on_object_begin()
        }
        fn on_object_end(&mut self) -> Result<(), SinkError> {
            (**self).on_object_end()
        }
        fn on_array_begin(&mut self) -> Result<(), SinkError> {
            (**self).on_array_begin()
        }
        fn on_array_end(&mut self) -> Result<(), SinkError> {
            (**self).on_array_end()
        }
        fn on_key_part(&mut self, fragment: &str) -> Result<(), SinkError> {
            (**self).on_key_part(fragment)
        }
        fn on_key(&mut self, fragment: &str) -> Result<(), SinkError> {
            (**self).on_key(fragment)
        }
        fn on_string_part(&mut self, fragment: &str) -> Result<(), SinkError> {
            (**self).on_string_part(fragment)
        }
        fn on_string(&mut self, fragment: &str) -> Result<(), SinkError> {
            (**self).on_string(fragment)
        }
        fn on_int64(&mut self, value: i64) -> Result<(), SinkError> {
            (**self).on_int64(value)
        }
        fn on_uint64(&mut self, value: u64) -> Result<(), SinkError> {
            (**self).on_uint64(value)
        }
        fn on_double(&mut self, value: f64) -> Result<(), SinkError> {
            (**self).on_double(value)
        }
        fn on_bool(&mut self, value: bool) -> Result<(), SinkError> {
            (**self).on_bool(value)
        }
        fn on_null(&mut self) -> Result<(), SinkError> {
            (**self).on_null()
        }
    };
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    forward_event_sink!();
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    forward_event_sink!();
}
