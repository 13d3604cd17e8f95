//! Four-group parallel update scheduler.
//!
//! A tick runs four passes, one per chunk parity class, in the fixed order
//! (even, even) → (even, odd) → (odd, even) → (odd, odd). Each pass updates
//! every chunk of its class concurrently, one task per chunk; a pass starts
//! only after the previous one has fully completed.
//!
//! # Data-race contract
//!
//! A chunk task reads and writes only the cells of its own chunk and the
//! one-cell ring around it (every move targets a direct neighbour). Two
//! chunks of the same class are at least two chunks apart on some axis, so
//! the chunk between them separates their rings as long as it is at least
//! two cells wide. Under that condition no two tasks of one pass ever touch
//! the same slot, which is what makes the lock-free shared view below sound.
//! Any change to the rule set (longer moves) or to the grouping must keep
//! this property.

use crate::addressing::{chunk_coords, chunk_slots};
use crate::cell::Cell;
use crate::material::Material;
use crate::update::{step_cell, CellSlots, StepContext};
use glam::IVec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// One of the four chunk parity classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateGroup {
    EvenEven,
    EvenOdd,
    OddEven,
    OddOdd,
}

impl UpdateGroup {
    /// Pass order within every tick.
    pub const ORDER: [UpdateGroup; 4] = [
        UpdateGroup::EvenEven,
        UpdateGroup::EvenOdd,
        UpdateGroup::OddEven,
        UpdateGroup::OddOdd,
    ];

    /// `(x parity, y parity)`, each 0 for even and 1 for odd.
    #[inline]
    pub const fn parity(self) -> (i32, i32) {
        match self {
            UpdateGroup::EvenEven => (0, 0),
            UpdateGroup::EvenOdd => (0, 1),
            UpdateGroup::OddEven => (1, 0),
            UpdateGroup::OddOdd => (1, 1),
        }
    }

    /// True if the chunk at `chunk` (chunk coordinates) runs in this group's pass.
    #[inline]
    pub fn contains(self, chunk: IVec2) -> bool {
        self.parity() == (chunk.x & 1, chunk.y & 1)
    }
}

/// How units of work within a pass are executed. Results are identical
/// either way; only wall-clock time differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parallelism {
    /// Chunk tasks on the rayon thread pool.
    #[default]
    Rayon,
    /// Chunk tasks one after another on the calling thread.
    Sequential,
}

/// A cell evaluated by the rule engine during a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellVisit {
    pub group: UpdateGroup,
    /// Slot the cell was read from.
    pub index: usize,
    pub material: Material,
    pub moved: bool,
}

/// Outcome of one full tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u32,
    /// Moves made in each pass, in [`UpdateGroup::ORDER`].
    pub moves: [usize; 4],
}

impl TickReport {
    pub fn total_moves(&self) -> usize {
        self.moves.iter().sum()
    }
}

/// Shared, unsynchronised view of the cell slice for chunk tasks.
///
/// Created from an exclusive borrow, so nothing outside the pass can observe
/// the slice while tasks run. Soundness of concurrent use rests on the
/// data-race contract in the module docs.
#[derive(Clone, Copy)]
struct SharedCells<'a> {
    ptr: *mut Cell,
    len: usize,
    _borrow: PhantomData<&'a mut [Cell]>,
}

// SAFETY: tasks of one pass access pairwise disjoint slots (module docs), and
// the exclusive borrow held by `SharedCells` outlives every task.
unsafe impl Send for SharedCells<'_> {}
unsafe impl Sync for SharedCells<'_> {}

impl<'a> SharedCells<'a> {
    fn new(cells: &'a mut [Cell]) -> Self {
        Self {
            ptr: cells.as_mut_ptr(),
            len: cells.len(),
            _borrow: PhantomData,
        }
    }
}

impl CellSlots for SharedCells<'_> {
    #[inline]
    fn load(&self, index: usize) -> Cell {
        assert!(index < self.len);
        // SAFETY: in bounds; no other task writes this slot during the pass.
        unsafe { self.ptr.add(index).read() }
    }

    #[inline]
    fn store(&mut self, index: usize, cell: Cell) {
        assert!(index < self.len);
        // SAFETY: in bounds; no other task reads or writes this slot during the pass.
        unsafe { self.ptr.add(index).write(cell) }
    }
}

/// Run the rule engine over every occupied, not-yet-moved cell of one chunk,
/// in storage order. Returns the number of moves.
fn update_chunk<S: CellSlots + ?Sized>(
    slots: &mut S,
    chunk: usize,
    group: UpdateGroup,
    ctx: StepContext,
    observer: &(dyn Fn(CellVisit) + Sync),
) -> usize {
    let mut moves = 0;
    for index in chunk_slots(chunk, &ctx.config) {
        let cell = slots.load(index);
        if !cell.material.is_occupied() || cell.moved_at(ctx.tick) {
            continue;
        }
        let moved = step_cell(slots, index, ctx);
        observer(CellVisit {
            group,
            index,
            material: cell.material,
            moved,
        });
        moves += moved as usize;
    }
    moves
}

/// One pass: update every chunk of `group`. Returns the number of moves.
pub fn run_group(
    cells: &mut [Cell],
    group: UpdateGroup,
    ctx: StepContext,
    parallelism: Parallelism,
    observer: &(dyn Fn(CellVisit) + Sync),
) -> usize {
    let config = ctx.config;
    assert_eq!(
        cells.len(),
        config.cell_count(),
        "cell storage does not match grid configuration"
    );

    // Chunks narrower than two cells break the disjointness argument.
    let parallelism = if config.chunk_size < 2 {
        Parallelism::Sequential
    } else {
        parallelism
    };

    let chunks = (0..config.chunk_count()).filter(|&c| group.contains(chunk_coords(c, &config)));

    match parallelism {
        Parallelism::Sequential => chunks
            .map(|chunk| update_chunk(&mut *cells, chunk, group, ctx, observer))
            .sum(),
        Parallelism::Rayon => {
            let active: Vec<usize> = chunks.collect();
            let shared = SharedCells::new(cells);
            active
                .into_par_iter()
                .map(|chunk| {
                    let mut slots = shared;
                    update_chunk(&mut slots, chunk, group, ctx, observer)
                })
                .sum()
        }
    }
}

/// Run all four passes for `ctx.tick`.
pub fn run_tick(
    cells: &mut [Cell],
    ctx: StepContext,
    parallelism: Parallelism,
    observer: &(dyn Fn(CellVisit) + Sync),
) -> TickReport {
    let mut report = TickReport {
        tick: ctx.tick,
        ..TickReport::default()
    };
    for (slot, group) in UpdateGroup::ORDER.into_iter().enumerate() {
        report.moves[slot] = run_group(cells, group, ctx, parallelism, observer);
    }
    report
}
