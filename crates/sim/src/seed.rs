//! Initial terrain from Perlin noise.

use crate::config::GridConfig;
use crate::grid::CellGrid;
use crate::material::Material;
use glam::IVec2;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Noise field parameters. Equal parameters always produce equal grids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedParams {
    pub noise_seed: u32,
    /// World cells to noise units.
    pub scale: f64,
    pub offset: [f64; 2],
}

impl SeedParams {
    /// Draw a random scale and offset from a seeded ChaCha stream.
    pub fn from_rng_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            noise_seed: rng.gen(),
            scale: rng.gen_range(0.002..0.08),
            offset: [
                rng.gen_range(-100_000.0..100_000.0),
                rng.gen_range(-100_000.0..100_000.0),
            ],
        }
    }

    /// Noise value in `[0, 1]` at a world position.
    pub fn sample(&self, perlin: &Perlin, pos: IVec2) -> f64 {
        let point = [
            pos.x as f64 * self.scale + self.offset[0],
            pos.y as f64 * self.scale + self.offset[1],
        ];
        ((perlin.get(point) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Material for a noise value. Band edges themselves map to `Empty`.
pub fn classify(v: f64) -> Material {
    if v > 0.6 && v < 1.0 {
        Material::Stone
    } else if v > 0.4 && v < 0.6 {
        Material::Sand
    } else if v > 0.3 && v < 0.35 {
        Material::Water
    } else {
        Material::Empty
    }
}

/// Build a grid with every slot chosen from the noise field.
pub fn seed_grid(config: GridConfig, params: &SeedParams) -> CellGrid {
    let perlin = Perlin::new(params.noise_seed);
    let grid = CellGrid::from_fn(config, |pos| classify(params.sample(&perlin, pos)));
    log::debug!(
        "seeded {}x{} grid (scale {:.4}): {:?}",
        config.width(),
        config.height(),
        params.scale,
        grid.histogram()
    );
    grid
}
