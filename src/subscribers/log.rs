//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints every signal to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [next] events=3 first=0 last=2
//! [error] the stream 'a' has been deleted
//! [completed]
//! ```

use async_trait::async_trait;

use crate::subscribers::{Signal, Subscribe};

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable signal
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl<T: Send + Sync + 'static> Subscribe<T> for LogWriter {
    async fn on_signal(&self, signal: &Signal<T>) {
        match signal {
            Signal::Next(segment) => match (segment.first(), segment.last()) {
                (Some(first), Some(last)) => {
                    println!(
                        "[next] events={} first={} last={}",
                        segment.len(),
                        first.sequence,
                        last.sequence
                    );
                }
                _ => println!("[next] events=0"),
            },
            Signal::Error(error) => println!("[error] {error}"),
            Signal::Completed => println!("[completed]"),
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
