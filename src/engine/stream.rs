//! # Stream engine: lifecycle, storage, and broadcast.
//!
//! [`EventStream`] owns one stream's state machine, its event buffer, and its
//! observer set. One short-held mutex serializes every mutating operation and
//! every subscription attach, so "current state + current data" is always
//! observed consistently.
//!
//! ## Lifecycle
//! ```text
//! Open ──seal()──► Sealed ──delete()──► Deleted
//!   │                                      ▲
//!   └────────────────delete()──────────────┘
//!
//! Open:    writes append + broadcast; subscriptions attach live.
//! Sealed:  writes rejected; reads served; subscriptions replay + complete.
//! Deleted: everything rejected; subscriptions observe the deleted error.
//! ```
//!
//! ## Subscription outcomes (atomically evaluated under the stream's lock)
//! ```text
//! state    open_at_start            open_at_end       open_at(seq)
//! -------  ------------------------ ----------------- --------------------------
//! Open     attach, replay snapshot  attach only       attach, replay suffix
//!          then live                                  then live (unknown seq →
//!                                                     error, no attach)
//! Sealed   replay + complete,       complete,         replay suffix + complete
//!          no attach                no attach         (unknown seq → error)
//! Deleted  deleted error            deleted error     deleted error
//! ```
//!
//! ## Rules
//! - Because attach-and-replay and append-and-broadcast share one lock, a
//!   concurrent subscription either observes an append through its replay
//!   snapshot or through the subsequent broadcast — never both, never
//!   neither.
//! - Broadcasting only *posts* to observer mailboxes (non-blocking); no
//!   subscriber code ever runs under the stream's lock.
//! - A write to a sealed or deleted stream fails before any mutation; the
//!   batch is appended whole or not at all.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::engine::buffer::EventBuffer;
use crate::engine::config::StreamConfig;
use crate::error::StreamError;
use crate::events::{Segment, StreamId, StreamInfo};
use crate::subscribers::{AsyncObserver, ObserverSet, Subscribe};

/// Hook invoked after a stream transitions to deleted, outside the stream's
/// lock, so the host can forget it.
pub(crate) type DeletedHook = Box<dyn Fn(&StreamId) + Send + Sync>;

enum Lifecycle {
    Open,
    Sealed,
    Deleted,
}

struct StreamState<T: Send + Sync + 'static> {
    lifecycle: Lifecycle,
    buffer: EventBuffer<T>,
    observers: ObserverSet<T>,
}

/// One named, sequenced, independently-lifecycled event log.
///
/// Created by [`StreamHost`](crate::StreamHost). All operations are
/// lock-and-go: they never wait on subscriber code; delivery to subscribers
/// happens on detached per-subscriber workers.
pub struct EventStream<T: Send + Sync + 'static> {
    id: StreamId,
    state: Arc<Mutex<StreamState<T>>>,
    deleted_hook: Option<DeletedHook>,
}

impl<T: Send + Sync + 'static> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream").field("id", &self.id).finish()
    }
}

impl<T: Clone + Send + Sync + 'static> EventStream<T> {
    pub(crate) fn new(
        id: StreamId,
        config: &StreamConfig,
        deleted_hook: Option<DeletedHook>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            state: Arc::new(Mutex::new(StreamState {
                lifecycle: Lifecycle::Open,
                buffer: EventBuffer::new(config.min_capacity_clamped()),
                observers: ObserverSet::new(),
            })),
            deleted_hook,
        })
    }

    /// The stream identifier.
    pub fn id(&self) -> &StreamId {
        &self.id
    }

    /// Appends a batch of events and broadcasts it to current subscribers.
    ///
    /// Returns a view of exactly the appended range. An empty batch is a
    /// no-op returning the empty segment.
    ///
    /// # Errors
    /// [`StreamError::Sealed`] / [`StreamError::Deleted`] when the stream no
    /// longer accepts writes; in both cases nothing was appended.
    pub fn write(&self, batch: Vec<T>) -> Result<Segment<T>, StreamError> {
        let mut state = self.state.lock();
        self.verify_not_deleted(&state)?;
        self.verify_not_sealed(&state)?;

        if batch.is_empty() {
            return Ok(Segment::empty());
        }
        let segment = state.buffer.append(batch);
        for observer in state.observers.snapshot().iter() {
            observer.on_next(segment.clone());
        }
        Ok(segment)
    }

    /// Appends a single event; shorthand for `write(vec![event])`.
    pub fn write_one(&self, event: T) -> Result<Segment<T>, StreamError> {
        self.write(vec![event])
    }

    /// Seals the stream: no further writes, reads still served.
    ///
    /// Compacts the buffer, detaches every subscriber and sends each the
    /// completion signal.
    ///
    /// # Errors
    /// [`StreamError::Sealed`] when already sealed, [`StreamError::Deleted`]
    /// when deleted.
    pub fn seal(&self) -> Result<(), StreamError> {
        let mut state = self.state.lock();
        self.verify_not_deleted(&state)?;
        self.verify_not_sealed(&state)?;

        state.lifecycle = Lifecycle::Sealed;
        state.buffer.compact();
        let observers = state.observers.snapshot();
        state.observers.clear();
        for observer in observers.iter() {
            observer.on_completed();
        }
        Ok(())
    }

    /// Deletes the stream: all further access is rejected.
    ///
    /// Clears the buffer, detaches every subscriber and sends each the
    /// deleted error, then notifies the host so it forgets this stream.
    ///
    /// # Errors
    /// [`StreamError::Deleted`] when already deleted.
    pub fn delete(&self) -> Result<(), StreamError> {
        {
            let mut state = self.state.lock();
            self.verify_not_deleted(&state)?;

            state.lifecycle = Lifecycle::Deleted;
            state.buffer.clear();
            let observers = state.observers.snapshot();
            state.observers.clear();
            for observer in observers.iter() {
                observer.on_error(self.deleted_error());
            }
        }
        // Outside the state lock: the hook takes the host's map lock.
        if let Some(hook) = &self.deleted_hook {
            hook(&self.id);
        }
        Ok(())
    }

    /// Returns a point-in-time summary of the stream.
    ///
    /// # Errors
    /// [`StreamError::Deleted`] when the stream has been deleted.
    pub fn get_info(&self) -> Result<StreamInfo, StreamError> {
        let state = self.state.lock();
        self.verify_not_deleted(&state)?;

        Ok(StreamInfo {
            id: self.id.clone(),
            sequence: state.buffer.last_sequence(),
            count: state.buffer.len(),
            sealed: matches!(state.lifecycle, Lifecycle::Sealed),
        })
    }

    /// Subscribes from the start of the stream.
    ///
    /// The subscriber first receives the history-so-far as one snapshot
    /// batch, then every subsequently written segment, until it unsubscribes
    /// or the stream is sealed or deleted (per the outcome table above).
    pub fn open_at_start(&self, subscriber: Arc<dyn Subscribe<T>>) -> Subscription<T> {
        let observer = AsyncObserver::new(subscriber);
        let mut state = self.state.lock();
        match state.lifecycle {
            Lifecycle::Open => {
                state.observers.add(Arc::clone(&observer));
                observer.on_next(state.buffer.snapshot());
                Subscription::attached(Arc::downgrade(&self.state), observer)
            }
            Lifecycle::Sealed => {
                observer.on_final(state.buffer.snapshot());
                Subscription::inert()
            }
            Lifecycle::Deleted => {
                observer.on_error(self.deleted_error());
                Subscription::inert()
            }
        }
    }

    /// Subscribes from now: only events written after the subscription.
    pub fn open_at_end(&self, subscriber: Arc<dyn Subscribe<T>>) -> Subscription<T> {
        let observer = AsyncObserver::new(subscriber);
        let mut state = self.state.lock();
        match state.lifecycle {
            Lifecycle::Open => {
                state.observers.add(Arc::clone(&observer));
                Subscription::attached(Arc::downgrade(&self.state), observer)
            }
            Lifecycle::Sealed => {
                observer.on_completed();
                Subscription::inert()
            }
            Lifecycle::Deleted => {
                observer.on_error(self.deleted_error());
                Subscription::inert()
            }
        }
    }

    /// Subscribes from the given sequence (inclusive).
    ///
    /// A sequence not present in the current buffer (including any sequence
    /// on an empty stream) yields a [`StreamError::SequenceNotFound`] signal
    /// and attaches nothing.
    pub fn open_at(
        &self,
        sequence: u64,
        subscriber: Arc<dyn Subscribe<T>>,
    ) -> Subscription<T> {
        let observer = AsyncObserver::new(subscriber);
        let mut state = self.state.lock();
        if matches!(state.lifecycle, Lifecycle::Deleted) {
            observer.on_error(self.deleted_error());
            return Subscription::inert();
        }
        let snapshot = state.buffer.snapshot_from(sequence);
        if snapshot.is_empty() {
            observer.on_error(StreamError::SequenceNotFound {
                id: self.id.clone(),
                sequence,
            });
            return Subscription::inert();
        }
        match state.lifecycle {
            Lifecycle::Sealed => {
                observer.on_final(snapshot);
                Subscription::inert()
            }
            // Deleted was handled above.
            _ => {
                state.observers.add(Arc::clone(&observer));
                observer.on_next(snapshot);
                Subscription::attached(Arc::downgrade(&self.state), observer)
            }
        }
    }

    fn verify_not_sealed(&self, state: &StreamState<T>) -> Result<(), StreamError> {
        if matches!(state.lifecycle, Lifecycle::Sealed) {
            return Err(StreamError::Sealed {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    fn verify_not_deleted(&self, state: &StreamState<T>) -> Result<(), StreamError> {
        if matches!(state.lifecycle, Lifecycle::Deleted) {
            return Err(self.deleted_error());
        }
        Ok(())
    }

    fn deleted_error(&self) -> StreamError {
        StreamError::Deleted {
            id: self.id.clone(),
        }
    }

    #[cfg(test)]
    fn observer_count(&self) -> usize {
        self.state.lock().observers.snapshot().len()
    }
}

/// Handle to an active subscription.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) detaches
/// the subscriber from the stream and discards signals queued but not yet
/// delivered; at most one in-flight signal may still arrive. Subscriptions
/// returned by replay-only paths (sealed or deleted streams) hold nothing and
/// do not interfere with the pending replay delivery.
pub struct Subscription<T: Send + Sync + 'static> {
    inner: Option<(Weak<Mutex<StreamState<T>>>, Arc<AsyncObserver<T>>)>,
}

impl<T: Send + Sync + 'static> Subscription<T> {
    fn attached(state: Weak<Mutex<StreamState<T>>>, observer: Arc<AsyncObserver<T>>) -> Self {
        Self {
            inner: Some((state, observer)),
        }
    }

    fn inert() -> Self {
        Self { inner: None }
    }

    /// True when the subscription attached an observer to a live stream.
    pub fn is_attached(&self) -> bool {
        self.inner.is_some()
    }

    /// Detaches the subscriber; equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some((state, observer)) = self.inner.take() {
            observer.dispose();
            if let Some(state) = state.upgrade() {
                state.lock().observers.remove(&observer);
            }
        }
    }
}

impl<T: Send + Sync + 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use crate::subscribers::Signal;

    #[derive(Debug, PartialEq)]
    enum Delivered {
        Batch(Vec<(u64, i64)>),
        Error(&'static str),
        Completed,
    }

    struct Recorder {
        tx: mpsc::UnboundedSender<Delivered>,
    }

    #[async_trait]
    impl Subscribe<i64> for Recorder {
        async fn on_signal(&self, signal: &Signal<i64>) {
            let delivered = match signal {
                Signal::Next(segment) => Delivered::Batch(
                    segment
                        .iter()
                        .map(|record| (record.sequence, record.data))
                        .collect(),
                ),
                Signal::Error(error) => Delivered::Error(error.as_label()),
                Signal::Completed => Delivered::Completed,
            };
            let _ = self.tx.send(delivered);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    fn recorder() -> (Arc<Recorder>, mpsc::UnboundedReceiver<Delivered>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Recorder { tx }), rx)
    }

    fn make_stream(id: &str) -> Arc<EventStream<i64>> {
        EventStream::new(
            StreamId::new(id).unwrap(),
            &StreamConfig::default(),
            None,
        )
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<Delivered>) -> Delivered {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for delivery")
            .expect("delivery channel closed")
    }

    async fn assert_idle(rx: &mut mpsc::UnboundedReceiver<Delivered>) {
        // Idle means no further signal is delivered: either the 50ms window
        // elapses (Err) or the channel has closed because the subscriber was
        // dropped (Ok(None)). A closed channel cannot deliver anything, so it
        // counts as idle; only an actual signal (Ok(Some(_))) is unexpected.
        assert!(
            !matches!(
                timeout(Duration::from_millis(50), rx.recv()).await,
                Ok(Some(_))
            ),
            "unexpected delivery"
        );
    }

    /// Receives until `count` records have been observed, flattening batch
    /// boundaries (they differ legitimately between replay and live feeds).
    async fn recv_records(
        rx: &mut mpsc::UnboundedReceiver<Delivered>,
        count: usize,
    ) -> Vec<(u64, i64)> {
        let mut records = Vec::new();
        while records.len() < count {
            match recv(rx).await {
                Delivered::Batch(batch) => records.extend(batch),
                other => panic!("expected a batch, got {other:?}"),
            }
        }
        records
    }

    #[test]
    fn test_write_assigns_contiguous_sequences() {
        let stream = make_stream("s");
        let first = stream.write(vec![10, 11]).unwrap();
        let second = stream.write(vec![12]).unwrap();

        let sequences: Vec<u64> = first.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
        assert_eq!(second[0].sequence, 2);
    }

    #[test]
    fn test_write_empty_batch_is_noop() {
        let stream = make_stream("s");
        let segment = stream.write(Vec::new()).unwrap();
        assert!(segment.is_empty());

        let info = stream.get_info().unwrap();
        assert_eq!(info.count, 0);
        assert_eq!(info.sequence, None);
    }

    #[test]
    fn test_get_info_snapshot() {
        let stream = make_stream("s");
        let info = stream.get_info().unwrap();
        assert_eq!(info.sequence, None);
        assert_eq!(info.count, 0);
        assert!(!info.sealed);

        stream.write(vec![10, 11]).unwrap();
        let info = stream.get_info().unwrap();
        assert_eq!(info.sequence, Some(1));
        assert_eq!(info.count, 2);
        assert!(!info.sealed);
    }

    #[test]
    fn test_deleted_hook_notifies_host_side() {
        let forgotten = Arc::new(AtomicBool::new(false));
        let hook = {
            let forgotten = Arc::clone(&forgotten);
            Box::new(move |id: &StreamId| {
                assert_eq!(id.as_str(), "s");
                forgotten.store(true, Ordering::SeqCst);
            })
        };
        let stream = EventStream::<i64>::new(
            StreamId::new("s").unwrap(),
            &StreamConfig::default(),
            Some(hook),
        );

        stream.delete().unwrap();
        assert!(forgotten.load(Ordering::SeqCst));
    }

    // Concrete scenario from the contract: stream "a".
    #[tokio::test]
    async fn test_scenario_write_seal_replay() {
        let stream = make_stream("a");

        let segment = stream.write(vec![10, 11]).unwrap();
        assert_eq!(segment.len(), 2);
        assert_eq!(segment[0].sequence, 0);
        assert_eq!(segment[1].sequence, 1);

        let info = stream.get_info().unwrap();
        assert_eq!(info.sequence, Some(1));
        assert_eq!(info.count, 2);
        assert!(!info.sealed);

        stream.seal().unwrap();
        assert_eq!(
            stream.write(vec![12]).unwrap_err(),
            StreamError::Sealed {
                id: stream.id().clone()
            }
        );
        // The rejected write did not partially apply.
        assert_eq!(stream.get_info().unwrap().count, 2);
        assert!(stream.get_info().unwrap().sealed);

        let (subscriber, mut rx) = recorder();
        let subscription = stream.open_at_start(subscriber);
        assert!(!subscription.is_attached());
        assert_eq!(
            recv(&mut rx).await,
            Delivered::Batch(vec![(0, 10), (1, 11)])
        );
        assert_eq!(recv(&mut rx).await, Delivered::Completed);
        assert_idle(&mut rx).await;
    }

    // Concrete scenario from the contract: stream "b".
    #[tokio::test]
    async fn test_scenario_delete_then_subscribe() {
        let stream = make_stream("b");
        stream.delete().unwrap();

        let (subscriber, mut rx) = recorder();
        let subscription = stream.open_at_end(subscriber);
        assert!(!subscription.is_attached());
        assert_eq!(recv(&mut rx).await, Delivered::Error("stream_deleted"));
        assert_idle(&mut rx).await;
    }

    #[tokio::test]
    async fn test_replay_equivalence_of_early_and_late_subscribers() {
        let stream = make_stream("s");
        let (early, mut early_rx) = recorder();
        let _early_subscription = stream.open_at_start(early);

        stream.write(vec![10, 11]).unwrap();
        stream.write(vec![12]).unwrap();
        stream.write(vec![13, 14]).unwrap();

        let (late, mut late_rx) = recorder();
        let _late_subscription = stream.open_at_start(late);

        // The early subscriber saw an empty snapshot plus three live batches;
        // the late one a single replay batch. The flattened records match.
        let early_records = recv_records(&mut early_rx, 5).await;
        let late_records = recv_records(&mut late_rx, 5).await;
        assert_eq!(early_records, late_records);
        assert_eq!(
            early_records,
            vec![(0, 10), (1, 11), (2, 12), (3, 13), (4, 14)]
        );
    }

    #[tokio::test]
    async fn test_open_at_end_sees_only_the_live_tail() {
        let stream = make_stream("s");
        stream.write(vec![10, 11]).unwrap();

        let (subscriber, mut rx) = recorder();
        let _subscription = stream.open_at_end(subscriber);
        assert_idle(&mut rx).await;

        stream.write(vec![30]).unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(2, 30)]));
    }

    #[tokio::test]
    async fn test_open_at_delivers_exact_suffix_then_live() {
        let stream = make_stream("s");
        stream.write(vec![10, 11, 12, 13, 14]).unwrap();

        let (subscriber, mut rx) = recorder();
        let _subscription = stream.open_at(2, subscriber);
        assert_eq!(
            recv(&mut rx).await,
            Delivered::Batch(vec![(2, 12), (3, 13), (4, 14)])
        );

        stream.write(vec![15]).unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(5, 15)]));
    }

    #[tokio::test]
    async fn test_open_at_unknown_sequence_is_not_found() {
        let stream = make_stream("s");
        stream.write(vec![10]).unwrap();

        let (subscriber, mut rx) = recorder();
        let subscription = stream.open_at(7, subscriber);
        assert!(!subscription.is_attached());
        assert_eq!(recv(&mut rx).await, Delivered::Error("sequence_not_found"));
        assert_idle(&mut rx).await;

        // An empty stream has no sequences at all.
        let empty = make_stream("empty");
        let (subscriber, mut rx) = recorder();
        empty.open_at(0, subscriber);
        assert_eq!(recv(&mut rx).await, Delivered::Error("sequence_not_found"));
    }

    #[tokio::test]
    async fn test_seal_completes_live_subscribers() {
        let stream = make_stream("s");
        let (subscriber, mut rx) = recorder();
        let _subscription = stream.open_at_end(subscriber);

        stream.write(vec![1]).unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(0, 1)]));

        stream.seal().unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Completed);
        assert_idle(&mut rx).await;
        assert_eq!(stream.observer_count(), 0);

        assert_eq!(
            stream.seal().unwrap_err().as_label(),
            "stream_sealed"
        );
    }

    #[tokio::test]
    async fn test_sealed_open_at_replays_suffix_and_completes() {
        let stream = make_stream("s");
        stream.write(vec![10, 11, 12]).unwrap();
        stream.seal().unwrap();

        let (subscriber, mut rx) = recorder();
        let subscription = stream.open_at(1, subscriber);
        assert!(!subscription.is_attached());
        assert_eq!(
            recv(&mut rx).await,
            Delivered::Batch(vec![(1, 11), (2, 12)])
        );
        assert_eq!(recv(&mut rx).await, Delivered::Completed);

        let (subscriber, mut rx) = recorder();
        stream.open_at_end(subscriber);
        assert_eq!(recv(&mut rx).await, Delivered::Completed);
    }

    #[tokio::test]
    async fn test_delete_notifies_live_subscribers_exactly_once() {
        let stream = make_stream("s");
        let (subscriber, mut rx) = recorder();
        let _subscription = stream.open_at_end(subscriber);

        stream.write(vec![1]).unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(0, 1)]));

        stream.delete().unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Error("stream_deleted"));
        assert_idle(&mut rx).await;

        // Every further operation is rejected.
        assert_eq!(stream.write(vec![2]).unwrap_err().as_label(), "stream_deleted");
        assert_eq!(stream.seal().unwrap_err().as_label(), "stream_deleted");
        assert_eq!(stream.get_info().unwrap_err().as_label(), "stream_deleted");
        assert_eq!(stream.delete().unwrap_err().as_label(), "stream_deleted");

        let (subscriber, mut rx) = recorder();
        stream.open_at_start(subscriber);
        assert_eq!(recv(&mut rx).await, Delivered::Error("stream_deleted"));
    }

    #[tokio::test]
    async fn test_delivery_order_matches_append_order() {
        let stream = make_stream("s");
        let (subscriber, mut rx) = recorder();
        let _subscription = stream.open_at_end(subscriber);

        for value in 0..20 {
            stream.write(vec![value]).unwrap();
        }
        for expected in 0..20 {
            assert_eq!(
                recv(&mut rx).await,
                Delivered::Batch(vec![(expected as u64, expected)])
            );
        }
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let stream = make_stream("s");
        let (subscriber, mut rx) = recorder();
        let subscription = stream.open_at_end(subscriber);
        assert!(subscription.is_attached());
        assert_eq!(stream.observer_count(), 1);

        stream.write(vec![1]).unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(0, 1)]));

        subscription.unsubscribe();
        assert_eq!(stream.observer_count(), 0);

        stream.write(vec![2]).unwrap();
        assert_idle(&mut rx).await;
    }

    #[tokio::test]
    async fn test_dropping_the_handle_unsubscribes() {
        let stream = make_stream("s");
        let (subscriber, mut rx) = recorder();
        {
            let _subscription = stream.open_at_start(subscriber);
            assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![]));
        }
        assert_eq!(stream.observer_count(), 0);

        stream.write(vec![1]).unwrap();
        assert_idle(&mut rx).await;
    }

    #[tokio::test]
    async fn test_panicking_subscriber_does_not_affect_others() {
        struct Panicker;

        #[async_trait]
        impl Subscribe<i64> for Panicker {
            async fn on_signal(&self, signal: &Signal<i64>) {
                if matches!(signal, Signal::Next(segment) if !segment.is_empty()) {
                    panic!("panicker always panics on events");
                }
            }
        }

        let stream = make_stream("s");
        let _panicker = stream.open_at_end(Arc::new(Panicker));
        let (subscriber, mut rx) = recorder();
        let _subscription = stream.open_at_end(subscriber);

        stream.write(vec![1]).unwrap();
        stream.write(vec![2]).unwrap();
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(0, 1)]));
        assert_eq!(recv(&mut rx).await, Delivered::Batch(vec![(1, 2)]));
    }
}
