// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus

use thiserror::Error;

/// Rejection returned by a topic or arguments validation hook
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Errors returned from `emit`
///
/// Only validation failures surface here. Events dropped because a listener
/// is full are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("invalid topic {topic:?}: {source}")]
    InvalidTopic {
        topic: String,
        source: ValidationError,
    },
    #[error("invalid arguments for topic {topic:?}: {source}")]
    InvalidArguments {
        topic: String,
        source: ValidationError,
    },
}

impl EmitError {
    /// The hook error that caused the rejection
    pub fn validation(&self) -> &ValidationError {
        match self {
            EmitError::InvalidTopic { source, .. } | EmitError::InvalidArguments { source, .. } => {
                source
            }
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            EmitError::InvalidTopic { topic, .. } | EmitError::InvalidArguments { topic, .. } => {
                topic
            }
        }
    }
}
