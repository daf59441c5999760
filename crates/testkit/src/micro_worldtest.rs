//! Micro-worldtest harness for tick-based golden tests.
//!
//! Steps a tiny simulation for a fixed number of ticks, recording the events
//! emitted by each step alongside a state snapshot, and compares the whole
//! report against a golden JSON file.

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tilecraft_core::SimTick;

/// Configuration for a micro-worldtest.
#[derive(Debug, Clone)]
pub struct MicroWorldtestConfig {
    /// Human-readable name (written into the report).
    pub name: String,
    /// Number of ticks to step (the report also holds the tick-0 frame).
    pub ticks: u64,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// State and events captured after a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestFrame<S, E> {
    /// Tick number.
    pub tick: u64,
    /// Events emitted while stepping into this tick.
    pub events: Vec<E>,
    /// Snapshot payload.
    pub snapshot: S,
}

#[derive(Debug, Clone, Serialize)]
struct MicroWorldtestReport<S, E> {
    name: String,
    frames: Vec<MicroWorldtestFrame<S, E>>,
}

/// Run a micro-worldtest and assert (or update) its golden file.
///
/// `step` advances the state by one tick and returns that tick's events;
/// `snapshot` extracts the state to record.
pub fn run_micro_worldtest<State, Snapshot, Event, StepFn, SnapFn>(
    config: MicroWorldtestConfig,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Result<()>
where
    Snapshot: Serialize,
    Event: Serialize,
    StepFn: FnMut(SimTick, &mut State) -> Vec<Event>,
    SnapFn: FnMut(&State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(config.ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(MicroWorldtestFrame {
        tick: tick.0,
        events: Vec::new(),
        snapshot: snapshot(&state),
    });

    for _ in 0..config.ticks {
        let events = step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(MicroWorldtestFrame {
            tick: tick.0,
            events,
            snapshot: snapshot(&state),
        });
    }

    assert_json_snapshot(
        config.snapshot_path,
        &MicroWorldtestReport {
            name: config.name,
            frames,
        },
    )
}
