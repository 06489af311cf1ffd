//! # Validated stream identifier.
//!
//! [`StreamId`] is an opaque, non-empty string token with value equality.
//! Validation happens once, at construction; every API that accepts a
//! `StreamId` can therefore rely on it being well-formed.

use std::fmt;
use std::sync::Arc;

use crate::error::StreamError;

/// Identifier of a stream.
///
/// - Non-empty and not white-space only (rejected with
///   [`StreamError::InvalidId`]).
/// - Equality and hashing are by value.
/// - Cheap to clone (shared backing string).
///
/// # Example
/// ```
/// use eventcast::StreamId;
///
/// let id = StreamId::new("orders").unwrap();
/// assert_eq!(id.as_str(), "orders");
/// assert!(StreamId::new("   ").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(Arc<str>);

impl StreamId {
    /// Creates an identifier, rejecting empty or white-space-only input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, StreamError> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(StreamError::InvalidId);
        }
        Ok(Self(Arc::from(id)))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for StreamId {
    type Error = StreamError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for StreamId {
    type Error = StreamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_identifier() {
        let id = StreamId::new("a").unwrap();
        assert_eq!(id.as_str(), "a");
        assert_eq!(id.to_string(), "a");
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(StreamId::new("").unwrap_err(), StreamError::InvalidId);
        assert_eq!(StreamId::new(" \t\n").unwrap_err(), StreamError::InvalidId);
    }

    #[test]
    fn test_equality_is_by_value() {
        let a = StreamId::new("same").unwrap();
        let b = StreamId::new("same").unwrap();
        let c = StreamId::new("other").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_try_from() {
        assert!(StreamId::try_from("ok").is_ok());
        assert!(StreamId::try_from(String::from("  ")).is_err());
    }
}
