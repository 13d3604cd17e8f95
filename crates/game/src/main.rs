//! Sandfall - headless host
//!
//! Usage: sandfall [CONFIG.json]
//! Set RUST_LOG=info for progress, RUST_LOG=trace for per-tick move counts.

use anyhow::{Context, Result};
use sim::SimConfig;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SimConfig::load_json(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    let (_, summary) = game::run(&config)?;
    println!("{summary}");
    Ok(())
}
