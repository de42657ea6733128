//! Event sink that assembles a [`Value`] tree.
use alloc::{string::String, vec::Vec};

use crate::{
    error::SinkError,
    sink::EventSink,
    value::{Array, Map, Value},
};

/// Resource limits enforced by [`ValueBuilder`]. Exceeding one aborts the
/// parse with the matching [`SinkError`].
///
/// # Examples
///
/// ```rust
/// use streamjson::{BuilderOptions, ErrorKind, ParserOptions, SinkError, parse_to_value_with};
///
/// let limits = BuilderOptions {
///     max_string_len: 4,
///     ..BuilderOptions::default()
/// };
/// let err = parse_to_value_with(br#"["abcde"]"#, ParserOptions::default(), limits).unwrap_err();
/// assert_eq!(
///     err.kind(),
///     &ErrorKind::SinkRejected(SinkError::StringTooLarge { limit: 4 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Maximum length in bytes of a string value.
    ///
    /// # Default
    ///
    /// Unbounded
    pub max_string_len: usize,
    /// Maximum length in bytes of an object key.
    ///
    /// # Default
    ///
    /// Unbounded
    pub max_key_len: usize,
    /// Maximum number of elements in one array.
    ///
    /// # Default
    ///
    /// Unbounded
    pub max_array_len: usize,
    /// Maximum number of distinct keys in one object.
    ///
    /// # Default
    ///
    /// Unbounded
    pub max_object_len: usize,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            max_string_len: usize::MAX,
            max_key_len: usize::MAX,
            max_array_len: usize::MAX,
            max_object_len: usize::MAX,
        }
    }
}

#[derive(Debug)]
enum Frame {
    Array(Array),
    Object { map: Map, key: Option<String> },
}

/// Builds a [`Value`] from parse events.
///
/// Open containers are kept on a stack that mirrors the parser's; when a
/// container closes it is moved into its parent, and when the root value
/// completes it becomes available through [`take_root`](Self::take_root).
#[derive(Debug, Default)]
pub struct ValueBuilder {
    options: BuilderOptions,
    stack: Vec<Frame>,
    key: String,
    string: String,
    // Set once a fragment would pass the limit; reported on the closing
    // quote so the error offset does not depend on chunking.
    key_overflow: bool,
    string_overflow: bool,
    root: Option<Value>,
}

impl ValueBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// The completed root value, if any.
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Moves the completed root value out of the builder.
    pub fn take_root(&mut self) -> Option<Value> {
        self.root.take()
    }

    pub fn into_root(self) -> Option<Value> {
        self.root
    }

    /// Drops any partial tree and the completed root.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.key.clear();
        self.string.clear();
        self.key_overflow = false;
        self.string_overflow = false;
        self.root = None;
    }

    fn insert(&mut self, value: Value) -> Result<(), SinkError> {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Array(items)) => {
                if items.len() >= self.options.max_array_len {
                    return Err(SinkError::ArrayTooLarge {
                        limit: self.options.max_array_len,
                    });
                }
                items.push(value);
            }
            Some(Frame::Object { map, key }) => {
                let key = key.take().ok_or(SinkError::Rejected("member value without a key"))?;
                if !map.contains_key(&key) && map.len() >= self.options.max_object_len {
                    return Err(SinkError::ObjectTooLarge {
                        limit: self.options.max_object_len,
                    });
                }
                map.insert(key, value);
            }
        }
        Ok(())
    }

    fn push_key(&mut self, fragment: &str) {
        if self.key_overflow || self.key.len() + fragment.len() > self.options.max_key_len {
            self.key.clear();
            self.key_overflow = true;
        } else {
            self.key.push_str(fragment);
        }
    }

    fn push_string(&mut self, fragment: &str) {
        if self.string_overflow
            || self.string.len() + fragment.len() > self.options.max_string_len
        {
            self.string.clear();
            self.string_overflow = true;
        } else {
            self.string.push_str(fragment);
        }
    }
}

impl EventSink for ValueBuilder {
    fn on_document_begin(&mut self) -> Result<(), SinkError> {
        self.reset();
        Ok(())
    }

    fn on_document_end(&mut self) -> Result<(), SinkError> {
        if self.stack.is_empty() && self.root.is_some() {
            Ok(())
        } else {
            Err(SinkError::Rejected("document ended with an incomplete value"))
        }
    }

    fn on_object_begin(&mut self) -> Result<(), SinkError> {
        self.stack.push(Frame::Object {
            map: Map::new(),
            key: None,
        });
        Ok(())
    }

    fn on_object_end(&mut self) -> Result<(), SinkError> {
        match self.stack.pop() {
            Some(Frame::Object { map, .. }) => self.insert(Value::Object(map)),
            _ => Err(SinkError::Rejected("object end without an open object")),
        }
    }

    fn on_array_begin(&mut self) -> Result<(), SinkError> {
        self.stack.push(Frame::Array(Vec::new()));
        Ok(())
    }

    fn on_array_end(&mut self) -> Result<(), SinkError> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.insert(Value::Array(items)),
            _ => Err(SinkError::Rejected("array end without an open array")),
        }
    }

    fn on_key_part(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.push_key(fragment);
        Ok(())
    }

    fn on_key(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.push_key(fragment);
        if core::mem::take(&mut self.key_overflow) {
            return Err(SinkError::KeyTooLarge {
                limit: self.options.max_key_len,
            });
        }
        let key = core::mem::take(&mut self.key);
        match self.stack.last_mut() {
            Some(Frame::Object { key: slot, .. }) => {
                *slot = Some(key);
                Ok(())
            }
            _ => Err(SinkError::Rejected("key outside of an object")),
        }
    }

    fn on_string_part(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.push_string(fragment);
        Ok(())
    }

    fn on_string(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.push_string(fragment);
        if core::mem::take(&mut self.string_overflow) {
            return Err(SinkError::StringTooLarge {
                limit: self.options.max_string_len,
            });
        }
        let s = core::mem::take(&mut self.string);
        self.insert(Value::String(s))
    }

    fn on_int64(&mut self, value: i64) -> Result<(), SinkError> {
        self.insert(Value::Int64(value))
    }

    fn on_uint64(&mut self, value: u64) -> Result<(), SinkError> {
        self.insert(Value::UInt64(value))
    }

    fn on_double(&mut self, value: f64) -> Result<(), SinkError> {
        self.insert(Value::Double(value))
    }

    fn on_bool(&mut self, value: bool) -> Result<(), SinkError> {
        self.insert(Value::Bool(value))
    }

    fn on_null(&mut self) -> Result<(), SinkError> {
        self.insert(Value::Null)
    }
}
