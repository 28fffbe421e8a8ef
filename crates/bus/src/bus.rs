// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus routing events to per-topic listeners

use crate::error::EmitError;
use crate::event::Event;
use crate::listener::{subscription, Delivery, Listener, ListenerId, Subscriber};
use crate::options::Options;
use relay_core::resolve_buffer_size;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Listeners of one topic, in subscription order
///
/// Shared so `emit` can snapshot a topic without copying senders.
type Subscribers<A> = Arc<Vec<Subscriber<A>>>;

/// `None` once the bus has been closed
type Registry<A> = Option<HashMap<String, Subscribers<A>>>;

/// Delivery counters since the bus was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Events that passed validation
    pub emitted: u64,
    /// Successful sends into listener channels
    pub delivered: u64,
    /// Sends skipped because a listener channel was full
    pub dropped: u64,
}

/// The event bus routes events to the listeners of their topic
///
/// Cloning is cheap and clones share the same registry.
pub struct EventBus<A = serde_json::Value> {
    shared: Arc<Shared<A>>,
}

struct Shared<A> {
    options: Options<A>,
    /// Resolved on the first `add_listener` and fixed from then on
    buffer_size: OnceLock<usize>,
    next_id: AtomicU64,
    registry: RwLock<Registry<A>>,
    emitted: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl<A: Send + Sync + 'static> EventBus<A> {
    pub fn new(options: Options<A>) -> Self {
        Self {
            shared: Arc::new(Shared {
                options,
                buffer_size: OnceLock::new(),
                next_id: AtomicU64::new(1),
                registry: RwLock::new(Some(HashMap::new())),
                emitted: AtomicU64::new(0),
                delivered: AtomicU64::new(0),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Emit an event to every listener of `topic`
    ///
    /// Validation failures are returned before any event is built. A listener
    /// whose channel is full misses this event; other listeners still get it
    /// and the call still succeeds.
    pub fn emit(&self, topic: &str, args: Vec<A>) -> Result<(), EmitError> {
        let shared = &self.shared;
        shared.options.validate(topic, &args)?;

        let event = Event::new(topic, args, shared.options.now());
        shared.emitted.fetch_add(1, Ordering::Relaxed);

        // Snapshot under the read lock; sends happen after it is released
        let subscribers = {
            let registry = self.read();
            match registry.as_ref().and_then(|topics| topics.get(topic)) {
                Some(subscribers) => Arc::clone(subscribers),
                None => return Ok(()),
            }
        };

        for subscriber in subscribers.iter() {
            match subscriber.try_deliver(event.clone()) {
                Delivery::Sent => {
                    shared.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Delivery::Full => {
                    shared.dropped.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(topic, listener = %subscriber.id, "listener full, event dropped");
                }
                Delivery::Gone => {
                    tracing::trace!(topic, listener = %subscriber.id, "listener gone, skipping");
                }
            }
        }

        Ok(())
    }

    /// Subscribe to `topic`
    ///
    /// Every listener gets its own bounded channel. On a closed bus the
    /// returned listener is already closed.
    pub fn add_listener(&self, topic: &str) -> Listener<A> {
        let shared = &self.shared;
        let capacity = *shared
            .buffer_size
            .get_or_init(|| resolve_buffer_size(shared.options.buffer_size()));
        let id = ListenerId(shared.next_id.fetch_add(1, Ordering::Relaxed));
        let (subscriber, listener) = subscription(id, topic, capacity);

        let mut registry = self.write();
        match registry.as_mut() {
            Some(topics) => {
                Arc::make_mut(topics.entry(topic.to_string()).or_default()).push(subscriber);
                tracing::debug!(topic, listener = %id, capacity, "listener added");
            }
            None => {
                subscriber.close();
                tracing::warn!(topic, "add_listener on closed bus");
            }
        }

        listener
    }

    /// Unsubscribe listeners from `topic`
    ///
    /// With no ids every listener of the topic is closed and the topic is
    /// forgotten. Otherwise only the named listeners are closed; the topic is
    /// forgotten once none remain. Unknown ids and topics are ignored.
    pub fn remove_listener(&self, topic: &str, ids: &[ListenerId]) {
        let mut registry = self.write();
        let Some(topics) = registry.as_mut() else {
            return;
        };

        if ids.is_empty() {
            if let Some(subscribers) = topics.remove(topic) {
                close_all(&subscribers);
                tracing::debug!(topic, removed = subscribers.len(), "all listeners removed");
            }
            return;
        }

        let Some(subscribers) = topics.get_mut(topic) else {
            return;
        };
        if !subscribers.iter().any(|s| ids.contains(&s.id)) {
            return;
        }

        let remaining = Arc::make_mut(subscribers);
        remaining.retain(|s| {
            if ids.contains(&s.id) {
                s.close();
                tracing::debug!(topic, listener = %s.id, "listener removed");
                false
            } else {
                true
            }
        });

        if remaining.is_empty() {
            topics.remove(topic);
        }
    }

    /// Close every listener and make the bus inert
    ///
    /// Safe to call more than once.
    pub fn close(&self) {
        let mut registry = self.write();
        if let Some(topics) = registry.take() {
            let listeners: usize = topics.values().map(|s| s.len()).sum();
            for subscribers in topics.values() {
                close_all(subscribers);
            }
            tracing::debug!(topics = topics.len(), listeners, "bus closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.read().is_none()
    }

    /// Number of listeners currently subscribed to `topic`
    pub fn listener_count(&self, topic: &str) -> usize {
        self.read()
            .as_ref()
            .and_then(|topics| topics.get(topic))
            .map_or(0, |s| s.len())
    }

    /// Topics with at least one listener, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .read()
            .as_ref()
            .map(|topics| topics.keys().cloned().collect())
            .unwrap_or_default();
        topics.sort();
        topics
    }

    /// Channel capacity given to listeners, once the first one was added
    pub fn buffer_size(&self) -> Option<usize> {
        self.shared.buffer_size.get().copied()
    }

    pub fn stats(&self) -> BusStats {
        let shared = &self.shared;
        BusStats {
            emitted: shared.emitted.load(Ordering::Relaxed),
            delivered: shared.delivered.load(Ordering::Relaxed),
            dropped: shared.dropped.load(Ordering::Relaxed),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry<A>> {
        self.shared
            .registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry<A>> {
        self.shared
            .registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
    }
}

fn close_all<A>(subscribers: &[Subscriber<A>]) {
    for subscriber in subscribers {
        subscriber.close();
    }
}

impl<A: Send + Sync + 'static> Default for EventBus<A> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<A> Clone for EventBus<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
