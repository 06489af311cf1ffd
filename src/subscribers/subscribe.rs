//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for consuming a stream's feed. Each
//! subscriber is driven by a dedicated delivery worker fed by a private
//! mailbox, so implementations may be slow without stalling the writer or
//! other subscribers.
//!
//! ## Contract
//! - [`Subscribe::on_signal`] is invoked strictly in feed order, one signal at
//!   a time, never concurrently for the same subscriber.
//! - The invoking context is a delivery worker, never the thread that wrote
//!   the events.
//! - A panic escaping `on_signal` tears down this subscriber's delivery only;
//!   the stream and all other subscribers are unaffected.
//!
//! ## Example (skeleton)
//! ```rust
//! use async_trait::async_trait;
//! use eventcast::{Signal, Subscribe};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe<String> for Audit {
//!     async fn on_signal(&self, signal: &Signal<String>) {
//!         if let Signal::Next(segment) = signal {
//!             // write audit records...
//!             let _ = segment.len();
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "audit"
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::subscribers::Signal;

/// Contract for stream subscribers.
///
/// Called from a subscriber-dedicated delivery worker. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe<T: Send + Sync + 'static>: Send + Sync + 'static {
    /// Handles a single signal for this subscriber.
    ///
    /// Signals arrive in feed order; after a terminal signal
    /// ([`Signal::Error`] or [`Signal::Completed`]) this method is never
    /// called again.
    async fn on_signal(&self, signal: &Signal<T>);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Function-backed subscriber implementation.
///
/// Wraps a synchronous closure over owned [`Signal`]s; handy for tests,
/// demos and fire-and-forget consumers.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use eventcast::{Signal, Subscribe, SubscribeFn};
///
/// let printer: Arc<dyn Subscribe<i64>> =
///     SubscribeFn::arc("printer", |signal: Signal<i64>| {
///         if let Signal::Next(segment) = signal {
///             for record in &segment {
///                 println!("#{} = {}", record.sequence, record.data);
///             }
///         }
///     });
/// assert_eq!(printer.name(), "printer");
/// ```
pub struct SubscribeFn<F> {
    name: &'static str,
    f: F,
}

impl<F> SubscribeFn<F> {
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscribeFn::arc`] when you immediately need an
    /// `Arc<dyn Subscribe<T>>`.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(name: &'static str, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<T, F> Subscribe<T> for SubscribeFn<F>
where
    T: Send + Sync + 'static,
    F: Fn(Signal<T>) + Send + Sync + 'static,
{
    async fn on_signal(&self, signal: &Signal<T>) {
        (self.f)(signal.clone());
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
