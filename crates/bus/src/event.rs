// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events delivered to listeners

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A topic-based event with its arguments and emission time
///
/// Events are built by the bus and never change afterwards. Every listener on
/// a topic receives a clone that shares the same topic and argument storage.
#[derive(Debug, PartialEq)]
pub struct Event<A = serde_json::Value> {
    topic: Arc<str>,
    args: Arc<[A]>,
    timestamp: DateTime<Utc>,
}

impl<A> Event<A> {
    pub(crate) fn new(topic: &str, args: Vec<A>, timestamp: DateTime<Utc>) -> Self {
        Self {
            topic: Arc::from(topic),
            args: Arc::from(args),
            timestamp,
        }
    }

    /// The topic the event was emitted on
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The arguments in emission order, empty if none were given
    pub fn args(&self) -> &[A] {
        &self.args
    }

    /// When the bus emitted the event, according to its time source
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<A> Clone for Event<A> {
    fn clone(&self) -> Self {
        Self {
            topic: Arc::clone(&self.topic),
            args: Arc::clone(&self.args),
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
