//! Stream core: storage, lifecycle, and the host registry.
//!
//! This module contains the engine side of the crate. The public API from
//! here is [`StreamHost`] (create/look up streams), [`EventStream`] (one
//! stream's operations), [`Subscription`] (detach handle) and
//! [`StreamConfig`].
//!
//! Internal modules:
//! - [`buffer`]: sequence-ordered storage with zero-copy segment views;
//! - [`stream`]: the per-stream state machine and broadcast path;
//! - [`host`]: the identifier → stream registry;
//! - [`config`]: per-host stream settings.

mod buffer;
mod config;
mod host;
mod stream;

pub use config::StreamConfig;
pub use host::StreamHost;
pub use stream::{EventStream, Subscription};
