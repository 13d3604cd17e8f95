//! Sandfall - Simulation Library
//!
//! Falling-sand cellular automaton on a fixed, chunked grid:
//! - Chunk-major cell storage with position/index bijection
//! - Per-material movement rules with oscillation damping
//! - Four-group parity scheduler running chunks in parallel with rayon
//!
//! This crate is framework-agnostic - it handles simulation only.
//! Use the `game` crate for the headless host.

pub mod addressing;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod material;
pub mod painter;
pub mod render;
pub mod scheduler;
pub mod seed;
pub mod update;
pub mod world;

pub use cell::Cell;
pub use config::{GridConfig, PaintStroke, SimConfig};
pub use error::{ConfigError, InvariantError};
pub use grid::{CellGrid, Histogram};
pub use material::{Behavior, Material};
pub use painter::{Brush, MAX_BRUSH_RADIUS, MIN_BRUSH_RADIUS};
pub use scheduler::{CellVisit, Parallelism, TickReport, UpdateGroup};
pub use seed::SeedParams;
pub use world::Simulation;
