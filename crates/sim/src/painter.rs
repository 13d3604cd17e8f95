//! Circular brush painting.
//!
//! Painting is a direct overwrite between ticks: every written cell gets a
//! fresh history (see [`CellGrid::overwrite`]).

use crate::grid::CellGrid;
use crate::material::Material;
use glam::IVec2;

pub const MIN_BRUSH_RADIUS: i32 = 1;
pub const MAX_BRUSH_RADIUS: i32 = 30;
pub const DEFAULT_BRUSH_RADIUS: i32 = 2;

/// Brush state held by an input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    /// Radius in cells, always within `MIN_BRUSH_RADIUS..=MAX_BRUSH_RADIUS`.
    pub radius: i32,
    pub material: Material,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            material: Material::Sand,
        }
    }
}

impl Brush {
    pub fn new(radius: i32, material: Material) -> Self {
        Self {
            radius: radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS),
            material,
        }
    }

    pub fn with_material(self, material: Material) -> Self {
        Self { material, ..self }
    }

    /// Grow or shrink the brush, staying within the allowed radius range.
    pub fn adjust_radius(&mut self, delta: i32) {
        self.radius = self
            .radius
            .saturating_add(delta)
            .clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
    }

    /// Same brush with `Empty` as its material.
    pub fn eraser(self) -> Self {
        self.with_material(Material::Empty)
    }
}

/// Stamp a filled circle of `brush.material` centred on `center`.
///
/// The centre is clamped into the grid first; brush cells falling outside the
/// grid are skipped. Returns the number of cells written.
pub fn paint_circle(grid: &mut CellGrid, center: IVec2, brush: &Brush) -> usize {
    let max = grid.config().size() - IVec2::ONE;
    let clamped = center.clamp(IVec2::ZERO, max);
    if clamped != center {
        log::warn!("brush centre {center} outside grid, clamped to {clamped}");
    }

    let r = brush.radius.max(0);
    let rr = r * r;
    let mut written = 0;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > rr {
                continue;
            }
            if grid.overwrite(clamped + IVec2::new(dx, dy), brush.material) {
                written += 1;
            }
        }
    }
    written
}

/// Overwrite a single cell. Returns `false` when `pos` is outside the grid.
pub fn paint_cell(grid: &mut CellGrid, pos: IVec2, material: Material) -> bool {
    grid.overwrite(pos, material)
}
