//! A single event as recorded in a stream.

use std::time::SystemTime;

/// An event read from a stream.
///
/// Records are created by the stream at append time and never mutated.
/// The timestamp is captured once per write call, so every record of one
/// batch carries the same instant.
#[derive(Clone, Debug)]
pub struct EventRecord<T> {
    /// Zero-based, per-stream sequence number in append order.
    pub sequence: u64,
    /// Wall-clock instant at which the batch was appended.
    pub timestamp: SystemTime,
    /// The event payload.
    pub data: T,
}
