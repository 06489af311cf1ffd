//! # Stream host: identifier → stream registry.
//!
//! [`StreamHost`] maps identifiers to [`EventStream`] instances. The map is a
//! reader/writer-locked hash map, independent of any single stream's internal
//! lock: `get` and `list` contend only with `add`/removal, never with writes
//! or subscriptions on individual streams.
//!
//! A stream unregisters itself on deletion through a hook the host wires at
//! creation time; the hook runs after the stream has released its own lock,
//! so the two locks never nest in conflicting order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::engine::config::StreamConfig;
use crate::engine::stream::EventStream;
use crate::error::StreamError;
use crate::events::{StreamId, StreamInfo};

type StreamMap<T> = RwLock<HashMap<StreamId, Arc<EventStream<T>>>>;

/// An in-memory host of named event streams.
///
/// # Example
/// ```
/// use eventcast::{StreamHost, StreamId};
///
/// let host: StreamHost<String> = StreamHost::new();
/// let id = StreamId::new("orders").unwrap();
/// let stream = host.add(id.clone()).unwrap();
/// assert!(host.add(id.clone()).is_err());
/// assert!(host.get(&id).is_ok());
/// stream.delete().unwrap();
/// assert!(host.get(&id).is_err());
/// ```
pub struct StreamHost<T: Send + Sync + 'static> {
    streams: Arc<StreamMap<T>>,
    config: StreamConfig,
}

impl<T: Clone + Send + Sync + 'static> StreamHost<T> {
    /// Creates a host with the default [`StreamConfig`].
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Creates a host applying `config` to every stream it creates.
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            streams: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Creates and registers a new stream.
    ///
    /// # Errors
    /// [`StreamError::AlreadyExists`] when a stream with the same identifier
    /// is already hosted.
    pub fn add(&self, id: StreamId) -> Result<Arc<EventStream<T>>, StreamError> {
        let hook = {
            let streams = Arc::downgrade(&self.streams);
            Box::new(move |id: &StreamId| {
                if let Some(streams) = streams.upgrade() {
                    streams.write().remove(id);
                }
            })
        };
        let stream = EventStream::new(id.clone(), &self.config, Some(hook));

        let mut streams = self.streams.write();
        match streams.entry(id) {
            Entry::Occupied(entry) => Err(StreamError::AlreadyExists {
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(Arc::clone(entry.insert(stream))),
        }
    }

    /// Looks up a hosted stream.
    ///
    /// # Errors
    /// [`StreamError::NotFound`] when no stream has the identifier.
    pub fn get(&self, id: &StreamId) -> Result<Arc<EventStream<T>>, StreamError> {
        self.streams
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StreamError::NotFound { id: id.clone() })
    }

    /// Returns a summary of every hosted stream.
    ///
    /// A stream observed mid-deletion (deleted but not yet unregistered) is
    /// silently skipped.
    pub fn list(&self) -> Vec<StreamInfo> {
        let streams = self.streams.read();
        streams
            .values()
            .filter_map(|stream| stream.get_info().ok())
            .collect()
    }

    /// Number of hosted streams.
    pub fn len(&self) -> usize {
        self.streams.read().len()
    }

    /// True when no streams are hosted.
    pub fn is_empty(&self) -> bool {
        self.streams.read().is_empty()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for StreamHost<T> {
    fn default() -> Self {
        Self::new()
    }
}
