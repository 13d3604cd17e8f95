//! Cell data structure - one grid slot plus its movement bookkeeping.

use crate::material::Material;
use glam::IVec2;

/// Consecutive back-and-forth moves allowed before a cell stops initiating moves.
pub const OSCILLATION_CEILING: u8 = 100;

/// `last_moved_tick` of a cell that has not moved since it was written.
/// Ticks are numbered from 1, so this never matches a running tick.
pub const NOT_MOVED: u32 = 0;

/// A single cell in the simulation grid.
///
/// `position` always equals the slot the cell is stored in; every write
/// path (swap, overwrite, initialisation) re-establishes that.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub material: Material,
    pub position: IVec2,
    /// Where the cell was before its most recent move.
    pub previous_position: IVec2,
    /// Number of consecutive moves straight back to `previous_position`.
    pub repeat_count: u8,
    pub last_moved_tick: u32,
}

impl Cell {
    /// A freshly written cell with no movement history.
    #[inline]
    pub const fn new(material: Material, position: IVec2) -> Self {
        Self {
            material,
            position,
            previous_position: position,
            repeat_count: 0,
            last_moved_tick: NOT_MOVED,
        }
    }

    #[inline]
    pub const fn empty(position: IVec2) -> Self {
        Self::new(Material::Empty, position)
    }

    /// True once the cell has bounced back and forth often enough to be frozen.
    #[inline]
    pub const fn is_oscillation_capped(&self) -> bool {
        self.repeat_count >= OSCILLATION_CEILING
    }

    #[inline]
    pub const fn moved_at(&self, tick: u32) -> bool {
        self.last_moved_tick == tick
    }
}

/// Exchange a mover with its target.
///
/// Returns `(new_mover, new_target)`: the mover now sits at the target's old
/// position and the target at the mover's old position. Only the mover
/// accrues oscillation bookkeeping and the tick stamp.
#[inline]
pub fn swap_cells(mover: Cell, target: Cell, tick: u32) -> (Cell, Cell) {
    let from = mover.position;
    let to = target.position;

    let repeat_count = if mover.previous_position == to {
        mover.repeat_count.saturating_add(1)
    } else {
        0
    };

    let moved = Cell {
        material: mover.material,
        position: to,
        previous_position: from,
        repeat_count,
        last_moved_tick: tick,
    };
    let displaced = Cell {
        previous_position: to,
        position: from,
        ..target
    };
    (moved, displaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_has_no_history() {
        let cell = Cell::new(Material::Sand, IVec2::new(3, 4));
        assert_eq!(cell.previous_position, cell.position);
        assert_eq!(cell.repeat_count, 0);
        assert_eq!(cell.last_moved_tick, NOT_MOVED);
    }

    #[test]
    fn swap_moves_positions_and_stamps_mover_only() {
        let mut target = Cell::empty(IVec2::new(5, 4));
        target.repeat_count = 7;
        target.last_moved_tick = 2;
        let mover = Cell::new(Material::Sand, IVec2::new(5, 5));

        let (moved, displaced) = swap_cells(mover, target, 9);

        assert_eq!(moved.material, Material::Sand);
        assert_eq!(moved.position, IVec2::new(5, 4));
        assert_eq!(moved.previous_position, IVec2::new(5, 5));
        assert_eq!(moved.last_moved_tick, 9);
        assert_eq!(moved.repeat_count, 0);

        assert_eq!(displaced.material, Material::Empty);
        assert_eq!(displaced.position, IVec2::new(5, 5));
        assert_eq!(displaced.previous_position, IVec2::new(5, 4));
        // Passive side keeps its own bookkeeping
        assert_eq!(displaced.repeat_count, 7);
        assert_eq!(displaced.last_moved_tick, 2);
    }

    #[test]
    fn moving_back_counts_as_repeat() {
        let a = IVec2::new(1, 0);
        let b = IVec2::new(2, 0);
        let mover = Cell::new(Material::Water, a);

        let (mover, _) = swap_cells(mover, Cell::empty(b), 1);
        assert_eq!(mover.repeat_count, 0);

        let (mover, _) = swap_cells(mover, Cell::empty(a), 2);
        assert_eq!(mover.repeat_count, 1);

        let (mover, _) = swap_cells(mover, Cell::empty(b), 3);
        assert_eq!(mover.repeat_count, 2);

        // Any move elsewhere resets the streak
        let (mover, _) = swap_cells(mover, Cell::empty(IVec2::new(2, 1)), 4);
        assert_eq!(mover.repeat_count, 0);
    }
}
