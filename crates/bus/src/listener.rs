// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener handles and the bus-side end of each subscription
//!
//! A subscription is a bounded channel. The bus keeps the sending half in its
//! registry; the caller gets a [`Listener`] wrapping the receiving half. Only
//! the bus can close a subscription. Closing marks the shared flag first, so
//! events still buffered (or racing in from an in-flight emit) are discarded
//! instead of being handed to the listener.

use crate::event::Event;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Identity of a listener, used to remove it from the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Receiving end of a subscription
///
/// Yields events for one topic in emission order. Events that arrived while
/// the channel was full are missing, never reordered. Once the bus closes the
/// subscription every receive reports end-of-stream.
pub struct Listener<A = serde_json::Value> {
    id: ListenerId,
    topic: Arc<str>,
    capacity: usize,
    rx: mpsc::Receiver<Event<A>>,
    closed: Arc<AtomicBool>,
}

impl<A> Listener<A> {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Number of events the channel buffers before new ones are dropped
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the bus has closed this subscription
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Wait for the next event; `None` once the subscription is closed
    pub async fn recv(&mut self) -> Option<Event<A>> {
        if self.is_closed() {
            return None;
        }
        let event = self.rx.recv().await?;
        self.accept(event)
    }

    /// Blocking variant of [`recv`](Self::recv) for plain threads
    ///
    /// Panics if called from within an async runtime, like
    /// [`tokio::sync::mpsc::Receiver::blocking_recv`].
    pub fn blocking_recv(&mut self) -> Option<Event<A>> {
        if self.is_closed() {
            return None;
        }
        let event = self.rx.blocking_recv()?;
        self.accept(event)
    }

    /// Take the next buffered event without waiting
    pub fn try_recv(&mut self) -> Result<Event<A>, TryRecvError> {
        if self.is_closed() {
            return Err(TryRecvError::Disconnected);
        }
        let event = self.rx.try_recv()?;
        self.accept(event).ok_or(TryRecvError::Disconnected)
    }

    fn accept(&mut self, event: Event<A>) -> Option<Event<A>> {
        if self.is_closed() {
            // Release whatever is still buffered
            self.rx.close();
            while self.rx.try_recv().is_ok() {}
            return None;
        }
        Some(event)
    }
}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Outcome of a single non-blocking delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    Sent,
    /// Channel full, event dropped for this listener
    Full,
    /// Closed by the bus, or the listener was dropped by its owner
    Gone,
}

/// Bus-side end of a subscription
pub(crate) struct Subscriber<A> {
    pub(crate) id: ListenerId,
    tx: mpsc::Sender<Event<A>>,
    closed: Arc<AtomicBool>,
}

impl<A> Subscriber<A> {
    pub(crate) fn try_deliver(&self, event: Event<A>) -> Delivery {
        if self.closed.load(Ordering::Acquire) {
            return Delivery::Gone;
        }
        match self.tx.try_send(event) {
            Ok(()) => Delivery::Sent,
            Err(TrySendError::Full(_)) => Delivery::Full,
            Err(TrySendError::Closed(_)) => Delivery::Gone,
        }
    }

    /// Mark the subscription closed; the channel itself closes once the last
    /// sender clone is dropped
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl<A> Clone for Subscriber<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tx: self.tx.clone(),
            closed: Arc::clone(&self.closed),
        }
    }
}

/// Create both ends of a new subscription
pub(crate) fn subscription<A>(
    id: ListenerId,
    topic: &str,
    capacity: usize,
) -> (Subscriber<A>, Listener<A>) {
    let (tx, rx) = mpsc::channel(capacity);
    let closed = Arc::new(AtomicBool::new(false));
    let subscriber = Subscriber {
        id,
        tx,
        closed: Arc::clone(&closed),
    };
    let listener = Listener {
        id,
        topic: Arc::from(topic),
        capacity,
        rx,
        closed,
    };
    (subscriber, listener)
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
