// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced emitter wrapper for consistent observability

use crate::emitter::Emitter;
use crate::error::EmitError;
use crate::listener::{Listener, ListenerId};
use std::time::Instant;

/// Wrapper that adds tracing to any Emitter
#[derive(Clone)]
pub struct TracedEmitter<E> {
    inner: E,
}

impl<E> TracedEmitter<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<A, E: Emitter<A>> Emitter<A> for TracedEmitter<E> {
    fn emit(&self, topic: &str, args: Vec<A>) -> Result<(), EmitError> {
        let span = tracing::info_span!("emitter.emit", topic);
        let _guard = span.enter();

        let arg_count = args.len();
        let start = Instant::now();
        let result = self.inner.emit(topic, args);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::debug!(
                arg_count,
                elapsed_us = elapsed.as_micros() as u64,
                "emitted"
            ),
            Err(e) => tracing::warn!(error = %e, "emit rejected"),
        }

        result
    }

    fn add_listener(&self, topic: &str) -> Listener<A> {
        let span = tracing::info_span!("emitter.add_listener", topic);
        let _guard = span.enter();

        let listener = self.inner.add_listener(topic);
        tracing::info!(
            listener = %listener.id(),
            capacity = listener.capacity(),
            closed = listener.is_closed(),
            "listening"
        );
        listener
    }

    fn remove_listener(&self, topic: &str, listeners: &[ListenerId]) {
        let span = tracing::info_span!("emitter.remove_listener", topic);
        let _guard = span.enter();

        if listeners.is_empty() {
            tracing::info!("removing all listeners");
        } else {
            tracing::info!(count = listeners.len(), "removing listeners");
        }
        self.inner.remove_listener(topic, listeners);
    }

    fn close(&self) {
        let span = tracing::info_span!("emitter.close");
        let _guard = span.enter();

        self.inner.close();
        tracing::info!("closed");
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
