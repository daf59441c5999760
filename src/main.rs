//! tilecraft - A deterministic 2D tile sandbox
//!
//! Headless runner: generates a world, replays scripted input, and dumps the
//! event stream and final render snapshot.

mod config;
mod runner;
mod scripted_input;

use anyhow::{Context, Result};
use scripted_input::ScriptedInputPlayer;
use std::{env, fs, path::PathBuf};
use tilecraft_testkit::JsonlSink;
use tilecraft_world::Simulation;
use tracing::info;

/// Ticks simulated when neither `--max-ticks` nor a script says otherwise.
const DEFAULT_MAX_TICKS: u64 = 600;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting tilecraft v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SETTINGS_PATH));
    let settings = config::load_settings(&config_path);

    let mut script = match &cli.scripted_input {
        Some(path) => Some(
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load scripted input {}", path.display()))?,
        ),
        None => None,
    };
    let max_ticks = cli
        .max_ticks
        .or_else(|| script.as_ref().map(ScriptedInputPlayer::total_ticks))
        .unwrap_or(DEFAULT_MAX_TICKS);

    let mut sink = cli.event_log.as_ref().map(JsonlSink::create).transpose()?;

    let mut sim = Simulation::from_settings(settings);
    info!(
        blocks = sim.world().len(),
        width = sim.world().width(),
        height = sim.world().height(),
        max_ticks,
        "world generated"
    );

    runner::run(&mut sim, script.as_mut(), max_ticks, sink.as_mut())?;

    if let Some(script) = &script {
        if !script.is_finished() {
            tracing::warn!("--max-ticks reached before the scripted input finished");
        }
    }

    if let Some(path) = &cli.snapshot_out {
        let json = serde_json::to_string_pretty(&sim.snapshot())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), "final snapshot written");
    }

    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    scripted_input: Option<PathBuf>,
    max_ticks: Option<u64>,
    event_log: Option<PathBuf>,
    snapshot_out: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--scripted-input" => {
                    if let Some(path) = args.next() {
                        opts.scripted_input = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scripted-input requires a file path");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--snapshot-out" => {
                    if let Some(path) = args.next() {
                        opts.snapshot_out = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--snapshot-out requires a file path");
                    }
                }
                other => {
                    tracing::warn!(arg = other, "ignoring unknown argument");
                }
            }
        }

        opts
    }
}
