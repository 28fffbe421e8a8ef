// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emitter trait for loose coupling between publishers and the bus

use crate::bus::EventBus;
use crate::error::EmitError;
use crate::listener::{Listener, ListenerId};

/// Fires events at topics and hands out listeners for them
///
/// Emitting is fire-and-forget: it never waits for listeners to consume.
pub trait Emitter<A = serde_json::Value>: Send + Sync {
    /// Send an event to every listener of `topic`; fails only on validation
    fn emit(&self, topic: &str, args: Vec<A>) -> Result<(), EmitError>;

    /// Register a listener for `topic`
    fn add_listener(&self, topic: &str) -> Listener<A>;

    /// Unregister the given listeners, or every listener when `listeners` is empty
    fn remove_listener(&self, topic: &str, listeners: &[ListenerId]);

    /// Close all listeners; further emits reach nobody
    fn close(&self);
}

impl<A: Send + Sync + 'static> Emitter<A> for EventBus<A> {
    fn emit(&self, topic: &str, args: Vec<A>) -> Result<(), EmitError> {
        EventBus::emit(self, topic, args)
    }

    fn add_listener(&self, topic: &str) -> Listener<A> {
        EventBus::add_listener(self, topic)
    }

    fn remove_listener(&self, topic: &str, listeners: &[ListenerId]) {
        EventBus::remove_listener(self, topic, listeners)
    }

    fn close(&self) {
        EventBus::close(self)
    }
}
