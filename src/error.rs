//! Error types for qselect

use thiserror::Error;

/// Result type alias for qselect operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building, compiling or executing a query.
#[derive(Debug, Error)]
pub enum Error {
    /// A clause received a value it cannot turn into SQL
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The writer failed while producing the statement text
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Error surfaced by the execution collaborator
    #[error("Executor error: {0}")]
    Executor(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A result row could not be read back
    #[error("Decode error: {0}")]
    Decode(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap a transport error raised by an [`Executor`](crate::Executor).
    pub fn executor<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Executor(Box::new(error))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
