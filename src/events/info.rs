//! On-demand summary of a stream's state.

use std::fmt;

use crate::events::StreamId;

/// A point-in-time summary of one stream.
///
/// Computed on demand by the stream, never stored. `sequence` is the latest
/// assigned sequence number, `None` while the stream is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamInfo {
    /// The stream identifier.
    pub id: StreamId,
    /// Latest assigned sequence number, if any events exist.
    pub sequence: Option<u64>,
    /// Number of recorded events.
    pub count: u64,
    /// True once the stream has been sealed.
    pub sealed: bool,
}

impl fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sequence = self
            .sequence
            .map(|sequence| sequence.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "StreamInfo(id='{}', sequence={}, count={}, sealed={})",
            self.id, sequence, self.count, self.sealed
        )
    }
}
