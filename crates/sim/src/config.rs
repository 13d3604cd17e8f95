//! Grid dimensions and session configuration.

use crate::cell::Cell;
use crate::error::ConfigError;
use crate::material::Material;
use crate::scheduler::Parallelism;
use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default chunk edge length in cells.
pub const DEFAULT_CHUNK_SIZE: u32 = 16;
/// Default grid size in chunks (1024 x 576 cells).
pub const DEFAULT_CHUNKS: UVec2 = UVec2::new(64, 36);

/// Fixed grid geometry. Cell dimensions are always whole chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Edge length of one square chunk, in cells.
    pub chunk_size: u32,
    /// Number of chunks along x and y.
    pub chunks: UVec2,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunks: DEFAULT_CHUNKS,
        }
    }
}

impl GridConfig {
    /// Build a validated configuration.
    pub fn new(chunk_size: u32, chunks_x: u32, chunks_y: u32) -> Result<Self, ConfigError> {
        let config = Self {
            chunk_size,
            chunks: UVec2::new(chunks_x, chunks_y),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject geometries the scheduler cannot run safely or the addressing
    /// functions cannot represent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Chunk tasks touch a one-cell ring outside their chunk; two rings of
        // same-parity chunks only stay disjoint when the chunk between them
        // is at least two cells wide.
        if self.chunk_size < 2 {
            return Err(ConfigError::ChunkSizeTooSmall(self.chunk_size));
        }
        if self.chunks.x == 0 || self.chunks.y == 0 {
            return Err(ConfigError::NoChunks {
                x: self.chunks.x,
                y: self.chunks.y,
            });
        }

        let too_large = ConfigError::TooLarge {
            chunk_size: self.chunk_size,
            x: self.chunks.x,
            y: self.chunks.y,
        };
        let width = self.chunk_size.checked_mul(self.chunks.x);
        let height = self.chunk_size.checked_mul(self.chunks.y);
        match (width, height) {
            (Some(w), Some(h)) if w <= i32::MAX as u32 && h <= i32::MAX as u32 => {}
            _ => return Err(too_large),
        }

        // Storage sizes are computed in usize; every product must fit.
        let size = self.chunk_size as usize;
        let cells = size
            .checked_mul(size)
            .zip((self.chunks.x as usize).checked_mul(self.chunks.y as usize))
            .and_then(|(area, count)| area.checked_mul(count))
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<Cell>()));
        match cells {
            Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
            _ => Err(too_large),
        }
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.chunk_size * self.chunks.x
    }

    /// Grid height in cells.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.chunk_size * self.chunks.y
    }

    #[inline]
    pub const fn chunk_area(&self) -> usize {
        self.chunk_size as usize * self.chunk_size as usize
    }

    #[inline]
    pub const fn chunk_count(&self) -> usize {
        self.chunks.x as usize * self.chunks.y as usize
    }

    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.chunk_count() * self.chunk_area()
    }

    /// Grid size in cells as a signed vector, for bounds checks on positions.
    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width() as i32, self.height() as i32)
    }
}

/// One scripted brush stroke applied by the host before a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintStroke {
    /// The stroke is applied right before this tick runs.
    pub tick: u32,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub material: Material,
}

fn default_ticks() -> u32 {
    600
}

fn default_seed() -> Option<u64> {
    Some(42)
}

/// Everything a host needs to run one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub grid: GridConfig,
    /// Noise seed for the initial terrain. `null` starts from an empty grid.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    #[serde(default)]
    pub parallelism: Parallelism,
    /// Where to write the final frame as a PPM image.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub paint: Vec<PaintStroke>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            seed: default_seed(),
            ticks: default_ticks(),
            parallelism: Parallelism::default(),
            output: None,
            paint: Vec::new(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if let Some(stroke) = self.paint.iter().find(|s| s.radius < 0) {
            return Err(ConfigError::NegativeRadius(stroke.radius));
        }
        Ok(())
    }

    /// Strokes scheduled for `tick`, in file order.
    pub fn strokes_for(&self, tick: u32) -> impl Iterator<Item = &PaintStroke> {
        self.paint.iter().filter(move |s| s.tick == tick)
    }

    /// Save configuration to JSON file
    pub fn save_json(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Load and validate configuration from JSON file
    pub fn load_json(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_world() {
        let config = GridConfig::default();
        assert_eq!(config.width(), 1024);
        assert_eq!(config.height(), 576);
        assert_eq!(config.chunk_area(), 256);
        assert_eq!(config.cell_count(), 1024 * 576);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(matches!(
            GridConfig::new(1, 4, 4),
            Err(ConfigError::ChunkSizeTooSmall(1))
        ));
        assert!(matches!(
            GridConfig::new(8, 0, 4),
            Err(ConfigError::NoChunks { x: 0, y: 4 })
        ));
        assert!(matches!(
            GridConfig::new(u32::MAX, 2, 2),
            Err(ConfigError::TooLarge { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn size_helpers_do_not_overflow() {
        // Chunk area and chunk count exceed u32 here
        let results = [
            (GridConfig::new(65536, 1, 1), 1usize << 32, 1usize),
            (GridConfig::new(2, 65536, 65536), 1usize << 34, 1usize << 32),
        ];
        for (result, cells, chunks) in results {
            match result {
                Ok(config) => {
                    assert_eq!(config.cell_count(), cells);
                    assert_eq!(config.chunk_count(), chunks);
                    assert_eq!(config.chunk_area() * config.chunk_count(), cells);
                }
                // Rejected up front on targets where the storage cannot exist
                Err(err) => assert!(matches!(err, ConfigError::TooLarge { .. })),
            }
        }
    }

    #[test]
    fn rejects_unaddressable_storage() {
        // 2^31 - 1 cells wide and tall: the coordinates fit, the store never can
        assert!(matches!(
            GridConfig::new(i32::MAX as u32, 1, 1),
            Err(ConfigError::TooLarge { .. })
        ));
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut config = SimConfig::default();
        config.grid = GridConfig::new(8, 3, 2).unwrap();
        config.paint.push(PaintStroke {
            tick: 5,
            x: 10,
            y: 12,
            radius: 3,
            material: Material::Water,
        });
        config.save_json(&path).unwrap();

        let loaded = SimConfig::load_json(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{ "ticks": 3 }"#).unwrap();
        assert_eq!(config.ticks, 3);
        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.seed, Some(42));
        assert!(config.paint.is_empty());
    }

    #[test]
    fn null_seed_means_empty_start() {
        let config: SimConfig = serde_json::from_str(r#"{ "seed": null }"#).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn load_rejects_invalid_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "grid": { "chunk_size": 1, "chunks": [4, 4] } }"#).unwrap();

        assert!(matches!(
            SimConfig::load_json(&path),
            Err(ConfigError::ChunkSizeTooSmall(1))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimConfig::load_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn strokes_filtered_by_tick() {
        let mut config = SimConfig::default();
        for tick in [1, 2, 2] {
            config.paint.push(PaintStroke {
                tick,
                x: 0,
                y: 0,
                radius: 1,
                material: Material::Sand,
            });
        }
        assert_eq!(config.strokes_for(2).count(), 2);
        assert_eq!(config.strokes_for(7).count(), 0);
    }
}
