//! Error types for configuration loading and grid invariant checks.

use glam::IVec2;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk size {0} is too small (must be at least 2)")]
    ChunkSizeTooSmall(u32),
    #[error("grid must have at least one chunk on each axis (got {x} x {y})")]
    NoChunks { x: u32, y: u32 },
    #[error("grid of {x} x {y} chunks of size {chunk_size} exceeds addressable bounds")]
    TooLarge { chunk_size: u32, x: u32, y: u32 },
    #[error("brush radius {0} must not be negative")]
    NegativeRadius(i32),
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON")]
    Json(#[from] serde_json::Error),
}

/// First violation found by [`CellGrid::check_invariants`](crate::grid::CellGrid::check_invariants).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("slot {index} holds a cell claiming position {found}, expected {expected}")]
    PositionMismatch {
        index: usize,
        expected: IVec2,
        found: IVec2,
    },
    #[error("cell at {position} last moved at tick {last_moved}, after current tick {tick}")]
    FutureTick {
        position: IVec2,
        last_moved: u32,
        tick: u32,
    },
    #[error("cell at {position} has repeat count {count} above the oscillation ceiling")]
    RepeatOverflow { position: IVec2, count: u8 },
}
