//! # Per-recipient ordered asynchronous delivery queue.
//!
//! A [`Mailbox`] decouples the context that posts a message from the context
//! that consumes it: `post` only enqueues, and a single drain worker hands
//! messages to the recipient one at a time, in post order, on a separate task.
//!
//! ## Architecture
//! ```text
//! post(msg) ──► [queue] ──► drain worker ──► recipient(msg).await
//!                 ▲             │
//!                 │             └─ queue empty → clear `delivering`, exit
//!                 └─ post while no worker runs → set `delivering`, spawn one
//! ```
//!
//! ## Rules
//! - **FIFO per mailbox**: messages are delivered exactly in the order they
//!   were posted. No ordering exists *between* mailboxes.
//! - **Single worker**: at most one drain worker runs per mailbox at any time.
//! - **Non-blocking post**: `post` never waits on the recipient; the queue is
//!   unbounded.
//! - **Race-free start/stop**: the queue and the `delivering` flag live under
//!   one lock. The worker clears the flag only while holding the lock with an
//!   empty queue, so a message posted as the worker winds down is either seen
//!   by that worker or triggers a fresh one — never lost, never double-run.
//!
//! The recipient returns a verdict: `true` to keep the loop draining, `false`
//! to stop and discard whatever is still queued (used after delivering a
//! terminal signal, and when the recipient's subscriber panics).
//!
//! The lock is never held across an await; delivery happens outside it.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;

/// Callback handed one message at a time; returns whether to keep delivering.
type Recipient<M> = Box<dyn Fn(M) -> BoxFuture<'static, bool> + Send + Sync>;

/// Strictly-ordered asynchronous delivery queue for a single recipient.
pub(crate) struct Mailbox<M> {
    inner: Arc<Inner<M>>,
}

struct Inner<M> {
    recipient: Recipient<M>,
    state: Mutex<State<M>>,
}

struct State<M> {
    queue: VecDeque<M>,
    delivering: bool,
}

impl<M: Send + 'static> Mailbox<M> {
    /// Creates a mailbox delivering to `recipient`.
    pub fn new(
        recipient: impl Fn(M) -> BoxFuture<'static, bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                recipient: Box::new(recipient),
                state: Mutex::new(State {
                    queue: VecDeque::new(),
                    delivering: false,
                }),
            }),
        }
    }

    /// Enqueues a message and starts a drain worker if none is running.
    ///
    /// Never blocks beyond the enqueue itself. Must be called from within a
    /// tokio runtime (the worker is spawned on it).
    pub fn post(&self, message: M) {
        let start_worker = {
            let mut state = self.inner.state.lock();
            state.queue.push_back(message);
            if state.delivering {
                false
            } else {
                state.delivering = true;
                true
            }
        };
        if start_worker {
            tokio::spawn(drain(Arc::clone(&self.inner)));
        }
    }

    /// Discards all queued, undelivered messages.
    ///
    /// A message already handed to the recipient is not retracted; a later
    /// `post` starts delivery afresh.
    pub fn empty(&self) {
        self.inner.state.lock().queue.clear();
    }
}

async fn drain<M: Send + 'static>(inner: Arc<Inner<M>>) {
    loop {
        let message = {
            let mut state = inner.state.lock();
            match state.queue.pop_front() {
                Some(message) => message,
                None => {
                    state.delivering = false;
                    return;
                }
            }
        };
        if !(inner.recipient)(message).await {
            let mut state = inner.state.lock();
            state.queue.clear();
            state.delivering = false;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use futures::FutureExt;
    use tokio::sync::{mpsc, Notify};
    use tokio::time::timeout;

    fn forwarding_mailbox() -> (Mailbox<u32>, mpsc::UnboundedReceiver<u32>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mailbox = Mailbox::new(move |message: u32| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(message);
                true
            }
            .boxed()
        });
        (mailbox, rx)
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<u32>) -> u32 {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for delivery")
            .expect("delivery channel closed")
    }

    async fn assert_idle(rx: &mut mpsc::UnboundedReceiver<u32>) {
        assert!(
            timeout(Duration::from_millis(50), rx.recv()).await.is_err(),
            "unexpected delivery"
        );
    }

    #[tokio::test]
    async fn test_delivers_in_post_order() {
        let (mailbox, mut rx) = forwarding_mailbox();
        for message in 0..100 {
            mailbox.post(message);
        }
        for expected in 0..100 {
            assert_eq!(recv(&mut rx).await, expected);
        }
    }

    #[tokio::test]
    async fn test_restarts_after_drain() {
        let (mailbox, mut rx) = forwarding_mailbox();
        mailbox.post(1);
        assert_eq!(recv(&mut rx).await, 1);
        // The worker has (or will shortly have) exited; a new post must
        // start a fresh one.
        mailbox.post(2);
        assert_eq!(recv(&mut rx).await, 2);
    }

    #[tokio::test]
    async fn test_empty_discards_queued_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());

        let mailbox = {
            let entered = Arc::clone(&entered);
            let gate = Arc::clone(&gate);
            Mailbox::new(move |message: u32| {
                let tx = tx.clone();
                let entered = Arc::clone(&entered);
                let gate = Arc::clone(&gate);
                async move {
                    entered.notify_one();
                    gate.notified().await;
                    let _ = tx.send(message);
                    true
                }
                .boxed()
            })
        };

        mailbox.post(1);
        // Wait until 1 is in flight, then queue more and discard them.
        entered.notified().await;
        mailbox.post(2);
        mailbox.post(3);
        mailbox.empty();
        gate.notify_one();

        assert_eq!(recv(&mut rx).await, 1);
        assert_idle(&mut rx).await;
    }

    #[tokio::test]
    async fn test_false_verdict_stops_and_discards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mailbox = Mailbox::new(move |message: u32| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(message);
                message != 1
            }
            .boxed()
        });

        mailbox.post(1);
        mailbox.post(2);
        mailbox.post(3);
        assert_eq!(recv(&mut rx).await, 1);
        assert_idle(&mut rx).await;

        // A later post starts delivery afresh.
        mailbox.post(4);
        assert_eq!(recv(&mut rx).await, 4);
    }
}
