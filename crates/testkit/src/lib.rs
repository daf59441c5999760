#![warn(missing_docs)]
//! Deterministic testing surfaces (event stream + golden snapshot plumbing).

mod micro_worldtest;
mod snapshot;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tilecraft_core::SimTick;

pub use micro_worldtest::*;
pub use snapshot::*;

/// One simulation event stamped with the tick that produced it.
///
/// The event's own fields are flattened next to `tick`.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, E: Serialize> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Event payload.
    #[serde(flatten)]
    pub event: &'a E,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append one record as a JSON line.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
