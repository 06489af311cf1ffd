//! # Asynchronous observer wrapper.
//!
//! [`AsyncObserver`] presents the three stream signals (next/error/completed)
//! while physically routing every one of them through a private [`Mailbox`],
//! so the thread that appends events never executes subscriber code.
//!
//! ## Rules
//! - A terminal signal (error or completed) is posted at most once; every
//!   post after it is ignored.
//! - Disposal flushes the outstanding queue without delivering it. At most
//!   one message already handed to the delivery worker may still arrive.
//! - A panic escaping the subscriber tears down this wrapper only: delivery
//!   stops, queued signals are discarded, and the panic never reaches the
//!   poster.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;

use crate::error::StreamError;
use crate::events::Segment;
use crate::subscribers::{Mailbox, Signal, Subscribe};

/// Shared teardown state between the wrapper and its delivery worker.
struct Flags {
    /// No further posts are accepted.
    terminated: AtomicBool,
    /// No further deliveries happen (queue already flushed or being flushed).
    disposed: AtomicBool,
}

/// Wraps a subscriber behind a private mailbox for off-band delivery.
pub(crate) struct AsyncObserver<T: Send + Sync + 'static> {
    mailbox: Mailbox<Signal<T>>,
    flags: Arc<Flags>,
}

impl<T: Send + Sync + 'static> AsyncObserver<T> {
    pub fn new(subscriber: Arc<dyn Subscribe<T>>) -> Arc<Self> {
        let flags = Arc::new(Flags {
            terminated: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
        });
        let mailbox = {
            let flags = Arc::clone(&flags);
            Mailbox::new(move |signal: Signal<T>| {
                let subscriber = Arc::clone(&subscriber);
                let flags = Arc::clone(&flags);
                async move {
                    if flags.disposed.load(Ordering::Acquire) {
                        return false;
                    }
                    let terminal = signal.is_terminal();
                    let delivery =
                        AssertUnwindSafe(subscriber.on_signal(&signal)).catch_unwind().await;
                    if delivery.is_err() {
                        // The subscriber panicked: tear this wrapper down and
                        // keep the panic away from the posting side.
                        flags.terminated.store(true, Ordering::Release);
                        flags.disposed.store(true, Ordering::Release);
                        return false;
                    }
                    !terminal
                }
                .boxed()
            })
        };
        Arc::new(Self { mailbox, flags })
    }

    /// Posts a batch signal unless the wrapper has terminated.
    pub fn on_next(&self, segment: Segment<T>) {
        if !self.flags.terminated.load(Ordering::Acquire) {
            self.mailbox.post(Signal::Next(segment));
        }
    }

    /// Posts the terminal error signal (first terminal wins).
    pub fn on_error(&self, error: StreamError) {
        self.post_terminal(Signal::Error(error));
    }

    /// Posts the terminal completion signal (first terminal wins).
    pub fn on_completed(&self) {
        self.post_terminal(Signal::Completed);
    }

    /// Replay snapshot followed by completion, for subscriptions that observe
    /// an already-sealed stream at attach time.
    pub fn on_final(&self, segment: Segment<T>) {
        self.on_next(segment);
        self.on_completed();
    }

    fn post_terminal(&self, signal: Signal<T>) {
        if !self.flags.terminated.swap(true, Ordering::AcqRel) {
            self.mailbox.post(signal);
        }
    }

    /// Stops further delivery and discards queued, undelivered signals.
    ///
    /// Idempotent. A signal the delivery worker has already dequeued may
    /// still be delivered.
    pub fn dispose(&self) {
        self.flags.terminated.store(true, Ordering::Release);
        self.flags.disposed.store(true, Ordering::Release);
        self.mailbox.empty();
    }
}
