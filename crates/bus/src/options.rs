// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus construction options
//!
//! Every option has a default:
//! - topic validation accepts every topic
//! - arguments validation accepts every argument list
//! - the time source is the system clock
//! - the buffer size is [`DEFAULT_BUFFER_SIZE`](relay_core::DEFAULT_BUFFER_SIZE)
//!   when unset or non-positive

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use relay_core::{BusConfig, Clock, SystemClock};
use std::fmt;
use std::sync::Arc;

/// Hook that accepts or rejects a topic before an event is built
pub type TopicValidator = Arc<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Hook that accepts or rejects an argument list before an event is built
pub type ArgumentsValidator<A> = Arc<dyn Fn(&[A]) -> Result<(), ValidationError> + Send + Sync>;

/// Source of event timestamps
pub type TimeSource = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Configuration for an [`EventBus`](crate::EventBus)
pub struct Options<A = serde_json::Value> {
    pub(crate) topic_validation: TopicValidator,
    pub(crate) arguments_validation: ArgumentsValidator<A>,
    pub(crate) time_source: TimeSource,
    pub(crate) buffer_size: i64,
}

impl<A: 'static> Options<A> {
    pub fn new() -> Self {
        Self {
            topic_validation: Arc::new(accept_topic),
            arguments_validation: Arc::new(accept_arguments::<A>),
            time_source: clock_source(SystemClock),
            buffer_size: 0,
        }
    }

    /// Start from file configuration; hooks and clock keep their defaults
    pub fn from_config(config: &BusConfig) -> Self {
        Self::new().with_buffer_size(config.buffer_size)
    }

    /// Reject topics before any event is built
    pub fn with_topic_validation<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.topic_validation = Arc::new(validate);
        self
    }

    /// Reject argument lists before any event is built
    pub fn with_arguments_validation<F>(mut self, validate: F) -> Self
    where
        F: Fn(&[A]) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.arguments_validation = Arc::new(validate);
        self
    }

    /// Stamp events with the given function instead of the system clock
    pub fn with_time_source<F>(mut self, now: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.time_source = Arc::new(now);
        self
    }

    /// Stamp events from a [`Clock`]
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.time_source = clock_source(clock);
        self
    }

    /// Capacity of each listener channel; zero or negative selects the default
    pub fn with_buffer_size(mut self, buffer_size: i64) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// The configured buffer size, before defaults are applied
    pub fn buffer_size(&self) -> i64 {
        self.buffer_size
    }

    pub(crate) fn validate(&self, topic: &str, args: &[A]) -> Result<(), crate::EmitError> {
        (self.topic_validation)(topic).map_err(|source| crate::EmitError::InvalidTopic {
            topic: topic.to_string(),
            source,
        })?;
        (self.arguments_validation)(args).map_err(|source| crate::EmitError::InvalidArguments {
            topic: topic.to_string(),
            source,
        })
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.time_source)()
    }
}

fn accept_topic(_: &str) -> Result<(), ValidationError> {
    Ok(())
}

fn accept_arguments<A>(_: &[A]) -> Result<(), ValidationError> {
    Ok(())
}

fn clock_source<C: Clock + 'static>(clock: C) -> TimeSource {
    Arc::new(move || clock.now())
}

impl<A: 'static> Default for Options<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Options<A> {
    fn clone(&self) -> Self {
        Self {
            topic_validation: Arc::clone(&self.topic_validation),
            arguments_validation: Arc::clone(&self.arguments_validation),
            time_source: Arc::clone(&self.time_source),
            buffer_size: self.buffer_size,
        }
    }
}

impl<A> fmt::Debug for Options<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("buffer_size", &self.buffer_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
