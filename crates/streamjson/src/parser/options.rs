/// Default maximum container nesting, shared by the parser and the
/// serializer.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration options for the streaming parser.
///
/// # Examples
///
/// ```rust
/// use streamjson::{NullSink, ParserOptions, StreamingParser};
///
/// let mut parser = StreamingParser::new(NullSink, ParserOptions { max_depth: 2 });
/// assert!(parser.finish_with(b"[[1]]").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// A document nested exactly this deep is accepted; one more level fails
    /// with [`ErrorKind::DepthLimitExceeded`](crate::ErrorKind). The parser's
    /// container stack never grows beyond this, whatever the input.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`] (32)
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
