//! # Notifications delivered to subscribers.
//!
//! [`Signal`] is the closed set of messages a subscription can observe. A
//! feed is a sequence of zero or more [`Signal::Next`] batches followed by at
//! most one terminal signal:
//!
//! ```text
//! Next* (Completed | Error)?
//! ```
//!
//! - `Completed` means the stream was sealed: the history is final and no
//!   further events will ever be appended.
//! - `Error` means the stream was deleted, or the subscription could not
//!   attach (unknown sequence, already-deleted stream).
//!
//! After a terminal signal nothing further is delivered to that subscriber.

use crate::error::StreamError;
use crate::events::Segment;

/// A single notification on a subscription feed.
#[derive(Debug)]
pub enum Signal<T> {
    /// A batch of events: a replay snapshot at attach time, or the segment
    /// appended by one write.
    Next(Segment<T>),
    /// Terminal failure; no further signals follow.
    Error(StreamError),
    /// Terminal completion (the stream was sealed); no further signals follow.
    Completed,
}

impl<T> Signal<T> {
    /// True for [`Signal::Error`] and [`Signal::Completed`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Signal::Next(_))
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        match self {
            Signal::Next(segment) => Signal::Next(segment.clone()),
            Signal::Error(error) => Signal::Error(error.clone()),
            Signal::Completed => Signal::Completed,
        }
    }
}
