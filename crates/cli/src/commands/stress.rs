// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `relay stress` - Drive a bus with concurrent publishers and listeners
//!
//! Publishers emit sequence-numbered ticks on plain threads while every
//! listener drains its channel on its own thread. Once all publishers are
//! done the bus is closed and the counters are reported.

use crate::output::{self, OutputFormat};
use anyhow::{anyhow, Result};
use clap::Args;
use relay_bus::{Emitter, EventBus, Listener, Options, TracedEmitter};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

#[derive(Args)]
pub struct StressArgs {
    /// Number of publisher threads
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub publishers: u32,

    /// Number of listeners, spread round-robin over the topics
    #[arg(long, default_value_t = 4)]
    pub subscribers: u32,

    /// Events emitted by each publisher
    #[arg(long, default_value_t = 1000)]
    pub events: u64,

    /// Number of distinct topics
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub topics: u32,

    /// Per-listener channel capacity (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    pub buffer_size: Option<i64>,

    /// Bus configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Payload carried by every stress event
#[derive(Debug, Clone, Copy)]
struct Tick {
    publisher: u32,
    seq: u64,
}

/// What one listener thread observed
#[derive(Debug, Default)]
struct Tally {
    received: u64,
    out_of_order: u64,
}

#[derive(Debug, Serialize)]
pub struct StressReport {
    pub publishers: u32,
    pub subscribers: u32,
    pub topics: u32,
    pub buffer_size: usize,
    pub emitted: u64,
    /// Sends that would happen if no listener ever fell behind
    pub expected: u64,
    pub delivered: u64,
    pub dropped: u64,
    /// Delivered events still buffered when the bus closed
    pub discarded: u64,
    pub received: u64,
    pub out_of_order: u64,
    pub elapsed_ms: u64,
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} publishers, {} listeners, {} topics, buffer {}",
            self.publishers, self.subscribers, self.topics, self.buffer_size
        )?;
        writeln!(f, "emitted:       {}", self.emitted)?;
        writeln!(f, "expected:      {}", self.expected)?;
        writeln!(f, "delivered:     {}", self.delivered)?;
        writeln!(f, "dropped:       {}", self.dropped)?;
        writeln!(f, "discarded:     {}", self.discarded)?;
        writeln!(f, "received:      {}", self.received)?;
        writeln!(f, "out of order:  {}", self.out_of_order)?;
        writeln!(f, "elapsed:       {}ms", self.elapsed_ms)
    }
}

fn topic_name(index: u32) -> String {
    format!("topic-{}", index)
}

pub fn stress(args: StressArgs, format: OutputFormat) -> Result<()> {
    let report = run(&args)?;
    output::print(&report, format);
    Ok(())
}

fn run(args: &StressArgs) -> Result<StressReport> {
    let config = super::config::load(args.config.as_deref())?;
    let buffer_size = args.buffer_size.unwrap_or(config.buffer_size);

    let bus: EventBus<Tick> = EventBus::new(Options::new().with_buffer_size(buffer_size));
    let emitter = TracedEmitter::new(bus.clone());

    tracing::info!(
        publishers = args.publishers,
        subscribers = args.subscribers,
        topics = args.topics,
        events = args.events,
        buffer_size,
        "starting stress run"
    );

    let mut listeners_per_topic: HashMap<u32, u64> = HashMap::new();
    let consumers: Vec<_> = (0..args.subscribers)
        .map(|i| {
            let topic = i % args.topics;
            *listeners_per_topic.entry(topic).or_default() += 1;
            let listener = emitter.add_listener(&topic_name(topic));
            thread::spawn(move || drain(listener))
        })
        .collect();

    let start = Instant::now();
    let producers: Vec<_> = (0..args.publishers)
        .map(|publisher| {
            let emitter = emitter.clone();
            let topic = topic_name(publisher % args.topics);
            let events = args.events;
            thread::spawn(move || {
                for seq in 0..events {
                    emitter.emit(&topic, vec![Tick { publisher, seq }])?;
                }
                Ok::<_, relay_bus::EmitError>(())
            })
        })
        .collect();

    for producer in producers {
        producer
            .join()
            .map_err(|_| anyhow!("publisher thread panicked"))??;
    }
    let elapsed = start.elapsed();
    emitter.close();

    let mut received = 0;
    let mut out_of_order = 0;
    for consumer in consumers {
        let tally = consumer
            .join()
            .map_err(|_| anyhow!("listener thread panicked"))?;
        received += tally.received;
        out_of_order += tally.out_of_order;
    }

    let expected = (0..args.publishers)
        .map(|p| listeners_per_topic.get(&(p % args.topics)).copied().unwrap_or(0))
        .sum::<u64>()
        * args.events;

    let stats = bus.stats();
    Ok(StressReport {
        publishers: args.publishers,
        subscribers: args.subscribers,
        topics: args.topics,
        buffer_size: bus
            .buffer_size()
            .unwrap_or_else(|| relay_core::resolve_buffer_size(buffer_size)),
        emitted: stats.emitted,
        expected,
        delivered: stats.delivered,
        dropped: stats.dropped,
        discarded: stats.delivered.saturating_sub(received),
        received,
        out_of_order,
        elapsed_ms: elapsed.as_millis() as u64,
    })
}

/// Consume a listener until the bus closes it
fn drain(mut listener: Listener<Tick>) -> Tally {
    let mut tally = Tally::default();
    let mut last_seq: HashMap<u32, u64> = HashMap::new();

    while let Some(event) = listener.blocking_recv() {
        for tick in event.args() {
            tally.received += 1;
            if let Some(prev) = last_seq.insert(tick.publisher, tick.seq) {
                if tick.seq <= prev {
                    tally.out_of_order += 1;
                }
            }
        }
    }

    tracing::debug!(
        listener = %listener.id(),
        received = tally.received,
        "listener drained"
    );
    tally
}

#[cfg(test)]
#[path = "stress_tests.rs"]
mod tests;
