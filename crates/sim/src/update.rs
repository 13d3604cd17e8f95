//! Movement rules - per-material cellular automata step.
//!
//! Every occupied cell tries, in a fixed priority order, to swap with one
//! neighbour whose material it can displace. The first accepted candidate
//! wins; at most one move happens per call.

use crate::addressing::{in_bounds, to_index};
use crate::cell::{swap_cells, Cell};
use crate::config::GridConfig;
use crate::material::Behavior;
use glam::IVec2;

const DOWN: IVec2 = IVec2::new(0, -1);
const UP: IVec2 = IVec2::new(0, 1);
const LEFT: IVec2 = IVec2::new(-1, 0);
const RIGHT: IVec2 = IVec2::new(1, 0);
const DOWN_LEFT: IVec2 = IVec2::new(-1, -1);
const DOWN_RIGHT: IVec2 = IVec2::new(1, -1);
const UP_LEFT: IVec2 = IVec2::new(-1, 1);
const UP_RIGHT: IVec2 = IVec2::new(1, 1);

/// Per-tick snapshot handed by value to every unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepContext {
    pub config: GridConfig,
    pub tick: u32,
}

/// Slot-level read/write access to cell storage.
///
/// Implemented for plain slices and for the scheduler's shared view, so the
/// same rules run single-threaded in tests and inside parallel passes.
pub trait CellSlots {
    fn load(&self, index: usize) -> Cell;
    fn store(&mut self, index: usize, cell: Cell);
}

impl CellSlots for [Cell] {
    #[inline]
    fn load(&self, index: usize) -> Cell {
        self[index]
    }

    #[inline]
    fn store(&mut self, index: usize, cell: Cell) {
        self[index] = cell;
    }
}

/// Left/right tie-break. Mixes position and repeat count so neighbouring
/// cells, and the same cell on successive bounces, lean different ways.
#[inline]
pub fn leans_left(pos: IVec2, repeat_count: u8) -> bool {
    let h = pos.x.wrapping_mul(73856093)
        ^ pos.y.wrapping_mul(19349663)
        ^ (repeat_count as i32).wrapping_mul(83492791);
    h & 1 == 0
}

/// Attempt one move for the cell in slot `index`. Returns true if it moved.
pub fn step_cell<S: CellSlots + ?Sized>(slots: &mut S, index: usize, ctx: StepContext) -> bool {
    let cell = slots.load(index);
    debug_assert_eq!(to_index(cell.position, &ctx.config), index);

    let left_first = leans_left(cell.position, cell.repeat_count);
    let ordered = |left: IVec2, right: IVec2| {
        if left_first {
            [left, right]
        } else {
            [right, left]
        }
    };

    match cell.material.behavior() {
        Behavior::Inert => false,
        Behavior::Heavy => first_move(slots, index, cell, ctx, &[DOWN]),
        Behavior::Powder => {
            let [a, b] = ordered(DOWN_LEFT, DOWN_RIGHT);
            first_move(slots, index, cell, ctx, &[DOWN, a, b])
        }
        Behavior::Liquid => {
            let [a, b] = ordered(DOWN_LEFT, DOWN_RIGHT);
            let [c, d] = ordered(LEFT, RIGHT);
            first_move(slots, index, cell, ctx, &[DOWN, a, b, c, d])
        }
        Behavior::Gas => {
            let [a, b] = ordered(UP_LEFT, UP_RIGHT);
            let [c, d] = ordered(LEFT, RIGHT);
            first_move(slots, index, cell, ctx, &[UP, a, b, c, d])
        }
    }
}

fn first_move<S: CellSlots + ?Sized>(
    slots: &mut S,
    index: usize,
    cell: Cell,
    ctx: StepContext,
    offsets: &[IVec2],
) -> bool {
    offsets
        .iter()
        .any(|&offset| try_move(slots, index, cell, cell.position + offset, ctx))
}

/// Swap `cell` (stored at `from`) into `to_pos` if the move is allowed.
fn try_move<S: CellSlots + ?Sized>(
    slots: &mut S,
    from: usize,
    cell: Cell,
    to_pos: IVec2,
    ctx: StepContext,
) -> bool {
    if cell.is_oscillation_capped() || !in_bounds(to_pos, &ctx.config) {
        return false;
    }

    let to = to_index(to_pos, &ctx.config);
    let target = slots.load(to);
    if !cell.material.can_displace(target.material) {
        return false;
    }

    let (moved, displaced) = swap_cells(cell, target, ctx.tick);
    slots.store(to, moved);
    slots.store(from, displaced);
    true
}
