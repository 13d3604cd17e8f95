//! Cell store - the flat, chunk-major array of cells.
//!
//! The store itself does no synchronisation. Mutation during a tick goes
//! through the scheduler, which partitions work so concurrent writers never
//! touch the same slot; everything else goes through `&mut self`.

use crate::addressing::{self, to_index, to_position};
use crate::cell::{Cell, OSCILLATION_CEILING};
use crate::config::GridConfig;
use crate::error::InvariantError;
use crate::material::Material;
use glam::IVec2;

/// Count of cells per material, indexed by [`Material::id`].
pub type Histogram = [usize; Material::COUNT];

/// Owner of all simulation cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    config: GridConfig,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Create a grid of empty cells.
    pub fn new(config: GridConfig) -> Self {
        Self::from_fn(config, |_| Material::Empty)
    }

    /// Create a grid, choosing each cell's material from its world position.
    /// `material_at` is called exactly once per slot.
    pub fn from_fn(config: GridConfig, mut material_at: impl FnMut(IVec2) -> Material) -> Self {
        let cells = (0..config.cell_count())
            .map(|index| {
                let pos = to_position(index, &config);
                Cell::new(material_at(pos), pos)
            })
            .collect();
        Self { config, cells }
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.config.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.config.height()
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        addressing::in_bounds(pos, &self.config)
    }

    /// Cell at a world position.
    ///
    /// # Panics
    /// Panics if `pos` is outside the grid.
    #[inline]
    pub fn get(&self, pos: IVec2) -> &Cell {
        &self.cells[to_index(pos, &self.config)]
    }

    #[inline]
    pub fn material_at(&self, pos: IVec2) -> Material {
        self.get(pos).material
    }

    /// Cell stored in slot `index`.
    #[inline]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// All cells in storage (chunk-major) order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Raw mutable storage for the scheduler. Callers must keep every cell's
    /// `position` equal to its slot.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Direct overwrite used by painting and erasing.
    ///
    /// The new cell has no movement history, so it may move on the very next
    /// tick. Returns `false` (and writes nothing) when `pos` is outside the grid.
    pub fn overwrite(&mut self, pos: IVec2, material: Material) -> bool {
        match addressing::try_index(pos, &self.config) {
            Some(index) => {
                self.cells[index] = Cell::new(material, pos);
                true
            }
            None => false,
        }
    }

    /// Erase every cell.
    pub fn clear(&mut self) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = Cell::empty(to_position(index, &self.config));
        }
    }

    pub fn histogram(&self) -> Histogram {
        let mut counts = [0; Material::COUNT];
        for cell in &self.cells {
            counts[cell.material.id() as usize] += 1;
        }
        counts
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.material.is_occupied()).count()
    }

    /// Verify the store-wide invariants as of `tick`: every slot's cell
    /// knows its own position, no cell is stamped in the future, and no
    /// repeat counter exceeds the oscillation ceiling.
    pub fn check_invariants(&self, tick: u32) -> Result<(), InvariantError> {
        for (index, cell) in self.cells.iter().enumerate() {
            let expected = to_position(index, &self.config);
            if cell.position != expected {
                return Err(InvariantError::PositionMismatch {
                    index,
                    expected,
                    found: cell.position,
                });
            }
            if cell.last_moved_tick > tick {
                return Err(InvariantError::FutureTick {
                    position: cell.position,
                    last_moved: cell.last_moved_tick,
                    tick,
                });
            }
            if cell.repeat_count > OSCILLATION_CEILING {
                return Err(InvariantError::RepeatOverflow {
                    position: cell.position,
                    count: cell.repeat_count,
                });
            }
        }
        Ok(())
    }
}
