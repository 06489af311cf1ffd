//! # Payload codec boundary.
//!
//! Streams hold typed payloads in memory; turning them into bytes is a
//! collaborator's concern at a storage or transport boundary outside the
//! core. These traits define that boundary, nothing more: implementations
//! surface their failures as [`StreamError::Io`], which the core carries
//! through unaltered.

use std::io::{Read, Write};

use crate::error::StreamError;

/// Encodes event payloads to a byte sink.
pub trait EventEncoder<T>: Send + Sync {
    /// Encodes one payload to `output`.
    ///
    /// # Errors
    /// [`StreamError::Io`] when the sink or the encoding fails.
    fn encode(&self, event: &T, output: &mut dyn Write) -> Result<(), StreamError>;
}

/// Decodes event payloads from a byte source.
pub trait EventDecoder<T>: Send + Sync {
    /// Decodes one payload from `input`.
    ///
    /// # Errors
    /// [`StreamError::Io`] when the source or the decoding fails.
    fn decode(&self, input: &mut dyn Read) -> Result<T, StreamError>;
}
