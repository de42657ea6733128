use thiserror::Error;

/// Returned by an [`EventSink`](crate::EventSink) callback that declines an
/// event. The parser aborts and reports it as
/// [`ErrorKind::SinkRejected`](crate::ErrorKind::SinkRejected).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("string exceeds {limit} bytes")]
    StringTooLarge { limit: usize },
    #[error("key exceeds {limit} bytes")]
    KeyTooLarge { limit: usize },
    #[error("array exceeds {limit} elements")]
    ArrayTooLarge { limit: usize },
    #[error("object exceeds {limit} members")]
    ObjectTooLarge { limit: usize },
    /// Any other refusal by a custom sink.
    #[error("{0}")]
    Rejected(&'static str),
}
