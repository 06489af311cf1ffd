//! Error types for streams and the stream host.
//!
//! A single enum, [`StreamError`], covers the whole public surface: identifier
//! validation, host lookup failures, lifecycle violations (sealed/deleted) and
//! the I/O failures that payload codecs at the storage boundary may raise.
//!
//! Errors are `Clone` so the deleted-stream error can be broadcast to every
//! live subscriber through its mailbox, and `PartialEq` so tests can assert on
//! them directly. The `as_label` helper yields short stable names for
//! logs/metrics.

use thiserror::Error;

use crate::events::StreamId;

/// # Errors produced by streams, the host, and boundary codecs.
///
/// Lifecycle and lookup errors are returned synchronously by the operation
/// that detected them; the engine never retries on the caller's behalf. The
/// deleted-stream error is additionally delivered, exactly once and
/// asynchronously, to every subscriber that was live at the moment of
/// deletion.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// A stream identifier was empty or consisted only of white-space.
    #[error("stream identifier must not be empty or white-space only")]
    InvalidId,

    /// A stream with the same identifier is already hosted.
    #[error("a stream with the identifier '{id}' already exists")]
    AlreadyExists {
        /// The offending identifier.
        id: StreamId,
    },

    /// No stream with the given identifier is hosted.
    #[error("a stream with the identifier '{id}' was not found")]
    NotFound {
        /// The identifier that was looked up.
        id: StreamId,
    },

    /// A subscription asked for a sequence the stream does not contain.
    #[error("sequence {sequence} was not found in the stream '{id}'")]
    SequenceNotFound {
        /// The identifier of the stream.
        id: StreamId,
        /// The sequence that was requested.
        sequence: u64,
    },

    /// A write (or re-seal) was attempted on a sealed stream.
    #[error("the stream '{id}' has been sealed")]
    Sealed {
        /// The identifier of the stream.
        id: StreamId,
    },

    /// An operation was attempted on a deleted stream.
    #[error("the stream '{id}' has been deleted")]
    Deleted {
        /// The identifier of the stream.
        id: StreamId,
    },

    /// An I/O failure at a stream boundary (payload codecs).
    ///
    /// The in-memory core never raises this itself; it exists so collaborator
    /// failures travel through the public contract unaltered.
    #[error("i/o failure at a stream boundary: {message}")]
    Io {
        /// The underlying failure message.
        message: String,
    },
}

impl StreamError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventcast::{StreamError, StreamId};
    ///
    /// let id = StreamId::new("orders").unwrap();
    /// assert_eq!(StreamError::Sealed { id }.as_label(), "stream_sealed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::InvalidId => "invalid_stream_id",
            StreamError::AlreadyExists { .. } => "stream_already_exists",
            StreamError::NotFound { .. } => "stream_not_found",
            StreamError::SequenceNotFound { .. } => "sequence_not_found",
            StreamError::Sealed { .. } => "stream_sealed",
            StreamError::Deleted { .. } => "stream_deleted",
            StreamError::Io { .. } => "stream_io",
        }
    }

    /// Returns the identifier of the stream the error refers to, if any.
    pub fn stream_id(&self) -> Option<&StreamId> {
        match self {
            StreamError::AlreadyExists { id }
            | StreamError::NotFound { id }
            | StreamError::SequenceNotFound { id, .. }
            | StreamError::Sealed { id }
            | StreamError::Deleted { id } => Some(id),
            StreamError::InvalidId | StreamError::Io { .. } => None,
        }
    }

    /// Wraps a boundary I/O failure, preserving its message.
    pub fn io(error: impl std::fmt::Display) -> Self {
        StreamError::Io {
            message: error.to_string(),
        }
    }
}
