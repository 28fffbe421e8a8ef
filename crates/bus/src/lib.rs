// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay-bus: topic-based, in-process event emitter
//!
//! This crate provides:
//! - `EventBus` - thread-safe publish/subscribe over bounded per-listener channels
//! - `Event` - the immutable value delivered to listeners
//! - `Options` - validation hooks, time source and buffer size
//! - `Emitter` - the trait seam collaborators depend on
//! - `TracedEmitter` - structured logging around any emitter
//!
//! Delivery is best-effort: a listener whose channel is full misses the event,
//! and the publisher never waits.

mod bus;
mod emitter;
mod error;
mod event;
mod listener;
mod options;
mod traced;

pub use bus::{BusStats, EventBus};
pub use emitter::Emitter;
pub use error::{EmitError, ValidationError};
pub use event::Event;
pub use listener::{Listener, ListenerId};
pub use options::{ArgumentsValidator, Options, TimeSource, TopicValidator};
pub use tokio::sync::mpsc::error::TryRecvError;
pub use traced::TracedEmitter;
