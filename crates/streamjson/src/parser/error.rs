use thiserror::Error;

use crate::error::SinkError;

/// A parse failure: what went wrong and where.
///
/// `offset` is the absolute byte offset (counted across every `write` of the
/// current document) of the byte at which the problem was detected. For
/// failures detected at end of input it is the total input length. `line`
/// and `column` are 1-based and count bytes.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {line}:{column} (offset {offset})")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl ParseError {
    /// The category of the failure.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Absolute byte offset at which the failure was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of the failure.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column (in bytes) of the failure.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Every way a document can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// An unexpected byte; the payload names what the grammar expected.
    #[error("syntax error: expected {0}")]
    Syntax(&'static str),
    /// Input ended with open containers, or before any value started.
    #[error("unterminated document")]
    UnterminatedDocument,
    /// Input ended inside a string or a literal.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// Containers nested deeper than the configured maximum.
    #[error("depth limit exceeded")]
    DepthLimitExceeded,
    /// Malformed number, or a number whose value is not finite.
    #[error("invalid number literal")]
    InvalidNumberLiteral,
    /// Unknown `\` escape, or a non-hex digit inside `\uXXXX`.
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,
    /// Malformed UTF-8 inside a string.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// A `\u` high surrogate without its low half, or a lone low surrogate.
    #[error("unpaired surrogate")]
    UnpairedSurrogate,
    /// The event sink refused an event.
    #[error("sink rejected event: {0}")]
    SinkRejected(#[from] SinkError),
    /// Non-whitespace content after the root value.
    #[error("trailing data after document")]
    TrailingData,
    /// `write` after the document was finished.
    #[error("document already finished")]
    AlreadyFinished,
    /// `release` without a successfully finished document.
    #[error("no document is ready")]
    NoDocument,
}
