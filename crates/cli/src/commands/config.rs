// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `relay config` - Show the effective bus configuration

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use relay_core::BusConfig;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ConfigArgs {
    /// Bus configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub source: Option<String>,
    pub buffer_size: i64,
    pub resolved_buffer_size: usize,
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "source:        {}",
            self.source.as_deref().unwrap_or("(defaults)")
        )?;
        writeln!(f, "buffer_size:   {}", self.buffer_size)?;
        writeln!(f, "resolved:      {}", self.resolved_buffer_size)
    }
}

/// Load the bus configuration, falling back to defaults without a path
pub fn load(path: Option<&Path>) -> Result<BusConfig> {
    match path {
        Some(path) => Ok(BusConfig::load(path)?),
        None => Ok(BusConfig::default()),
    }
}

pub fn config(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = load(args.config.as_deref())?;
    let report = ConfigReport {
        source: args.config.map(|p| p.display().to_string()),
        buffer_size: config.buffer_size,
        resolved_buffer_size: config.resolved_buffer_size(),
    };
    output::print(&report, format);
    Ok(())
}
