//! Subscriber delivery: the subscriber contract and the machinery that keeps
//! consumers decoupled from the writer.
//!
//! ## Architecture
//! ```text
//! Signal flow (one subscriber):
//!   stream (under its lock) ── post(Signal) ──► AsyncObserver
//!                                                    │
//!                                              [Mailbox queue]
//!                                                    │
//!                                              drain worker (tokio task)
//!                                                    │
//!                                              Subscribe::on_signal(&Signal)
//! ```
//!
//! - [`Subscribe`] is the user-facing contract; [`SubscribeFn`] adapts a
//!   closure.
//! - [`Signal`] is the closed set of notifications a feed can carry.
//! - [`Mailbox`] guarantees per-subscriber FIFO delivery off the writer's
//!   thread; [`AsyncObserver`] adds terminal-once and teardown semantics;
//!   [`ObserverSet`] is the stream's copy-on-write broadcast roster.
//!
//! One slow or panicking subscriber never delays the writer, new
//! subscriptions, or any other subscriber.

mod mailbox;
mod observer;
mod set;
mod signal;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use signal::Signal;
pub use subscribe::{Subscribe, SubscribeFn};

#[cfg(feature = "logging")]
pub use log::LogWriter;

pub(crate) use mailbox::Mailbox;
pub(crate) use observer::AsyncObserver;
pub(crate) use set::ObserverSet;
