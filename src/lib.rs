//! # eventcast
//!
//! **Eventcast** is an in-process, in-memory append-only event log with live
//! subscription.
//!
//! Producers append typed events to named streams; any number of independent
//! subscribers attach at different points in a stream's history and receive a
//! gap-free, ordered, asynchronous feed of subsequent events until the stream
//! is sealed (no more writes) or deleted (log invalidated). Slow or blocking
//! subscribers never stall the writer, new subscriptions, or each other.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                       ┌─────────────────────────────────┐
//!                       │  StreamHost (id → stream map)   │
//!                       │  add / get / list               │
//!                       └──────┬──────────────────────────┘
//!                              ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventStream (one per id)                                         │
//! │  - Lifecycle: Open → Sealed → Deleted                             │
//! │  - EventBuffer (sequence-ordered records, zero-copy segments)     │
//! │  - ObserverSet (copy-on-write broadcast roster)                   │
//! │  one mutex serializes writes, lifecycle changes and attaches      │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        │ post(Segment)    │ post(Segment)    │ post(Segment)
//!        ▼                  ▼                  ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │AsyncObserver │   │AsyncObserver │   │AsyncObserver │  (one per
//! │ [Mailbox]    │   │ [Mailbox]    │   │ [Mailbox]    │   subscription)
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        ▼ worker           ▼ worker           ▼ worker
//!  sub1.on_signal()   sub2.on_signal()   sub3.on_signal()
//! ```
//!
//! ### Data flow
//! ```text
//! write(batch)
//!   ├─► state check (Open? else Sealed/Deleted error, nothing applied)
//!   ├─► EventBuffer::append  → sequences + one timestamp per batch
//!   ├─► broadcast Segment to ObserverSet snapshot  (post only, non-blocking)
//!   └─► return the appended Segment to the writer
//!
//! open_at_start / open_at_end / open_at(seq)
//!   └─► under the same mutex as write: attach + replay snapshot, so the
//!       subscriber sees every event exactly once — via replay or via the
//!       following broadcasts, never both, never neither
//! ```
//!
//! ## Guarantees
//! | Property          | Description                                                      |
//! |-------------------|------------------------------------------------------------------|
//! | **Ordering**      | Per subscriber, delivery order equals append order.              |
//! | **Gap-free**      | From its start point on, a subscriber misses nothing and sees nothing twice. |
//! | **Isolation**     | A slow or panicking subscriber affects only itself.              |
//! | **Non-blocking**  | Writers never wait on subscriber code.                           |
//! | **Atomic writes** | A batch is appended and broadcast whole, or not at all.          |
//!
//! ## Features
//! | Area             | Description                                             | Key types                              |
//! |------------------|---------------------------------------------------------|----------------------------------------|
//! | **Streams**      | Append, seal, delete, inspect named event logs.         | [`StreamHost`], [`EventStream`]        |
//! | **Subscriptions**| Attach at start, end, or an exact sequence.             | [`Subscribe`], [`Signal`], [`Subscription`] |
//! | **Data model**   | Immutable records and zero-copy batch views.            | [`EventRecord`], [`Segment`], [`StreamInfo`] |
//! | **Errors**       | Typed lifecycle/lookup/validation errors.               | [`StreamError`]                        |
//! | **Codec seam**   | Byte-level payload boundary for collaborators.          | [`EventEncoder`], [`EventDecoder`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use eventcast::{Signal, StreamHost, StreamId, SubscribeFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let host: StreamHost<i64> = StreamHost::new();
//!     let stream = host.add(StreamId::new("ticks")?)?;
//!
//!     let printer = SubscribeFn::arc("printer", |signal: Signal<i64>| match signal {
//!         Signal::Next(segment) => {
//!             for record in &segment {
//!                 println!("#{} = {}", record.sequence, record.data);
//!             }
//!         }
//!         Signal::Error(error) => println!("stream failed: {error}"),
//!         Signal::Completed => println!("stream sealed"),
//!     });
//!     let _subscription = stream.open_at_start(printer);
//!
//!     stream.write(vec![1, 2, 3])?;
//!     stream.seal()?;
//!
//!     // Give the detached delivery worker a moment before exiting.
//!     tokio::time::sleep(std::time::Duration::from_millis(20)).await;
//!     Ok(())
//! }
//! ```

mod codec;
mod engine;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use codec::{EventDecoder, EventEncoder};
pub use engine::{EventStream, StreamConfig, StreamHost, Subscription};
pub use error::StreamError;
pub use events::{EventRecord, Segment, StreamId, StreamInfo};
pub use subscribers::{Signal, Subscribe, SubscribeFn};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
