// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay-core: shared building blocks for the relay event emitter
//!
//! This crate provides:
//! - A `Clock` abstraction so event timestamps are deterministic under test
//! - File-loadable bus configuration

pub mod clock;
pub mod config;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{
    resolve_buffer_size, BusConfig, ConfigError, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE,
};
