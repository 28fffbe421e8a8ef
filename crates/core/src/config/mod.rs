// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod bus;

pub use bus::{resolve_buffer_size, BusConfig, ConfigError, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};
