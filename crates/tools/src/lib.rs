//! Shared plumbing for the `simulate` and `fuzz` binaries.

pub mod report;

use std::fs;
use std::io::stderr;
use std::path::Path;

use anyhow::{Context, Result};
use pit_core::ActorConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use report::{CycleReport, RunOutcome, RunReport, run_cycles};

/// Installs the stderr subscriber. Reads `RUST_LOG`, defaulting to `warn`.
///
/// ```bash
/// RUST_LOG=pit_core=debug cargo run --bin simulate -- --seed 7
/// ```
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr).compact())
        .init();
}

/// Reads an actor config from TOML, or returns the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ActorConfig> {
    let Some(path) = path else {
        return Ok(ActorConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    ActorConfig::from_toml_str(&source)
        .with_context(|| format!("Invalid actor config in {}", path.display()))
}
