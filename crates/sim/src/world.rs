//! Simulation - owns the cell store and the tick counter.

use crate::config::GridConfig;
use crate::grid::CellGrid;
use crate::material::Material;
use crate::painter::{self, Brush};
use crate::render;
use crate::scheduler::{self, CellVisit, Parallelism, TickReport};
use crate::seed::{self, SeedParams};
use crate::update::StepContext;
use glam::IVec2;

/// A running falling-sand world.
///
/// All mutation goes through `&mut self`, so painting, ticking and
/// rendering can never overlap.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: CellGrid,
    /// Last completed tick; 0 before the first.
    tick: u32,
    parallelism: Parallelism,
}

impl Simulation {
    /// An empty world.
    pub fn new(config: GridConfig) -> Self {
        Self::from_grid(CellGrid::new(config))
    }

    /// A world filled from the noise field.
    pub fn seeded(config: GridConfig, params: &SeedParams) -> Self {
        Self::from_grid(seed::seed_grid(config, params))
    }

    pub fn from_grid(grid: CellGrid) -> Self {
        log::debug!(
            "simulation: {}x{} cells in {} chunks of {}",
            grid.width(),
            grid.height(),
            grid.config().chunk_count(),
            grid.config().chunk_size
        );
        Self {
            grid,
            tick: 0,
            parallelism: Parallelism::default(),
        }
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    #[inline]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        self.grid.config()
    }

    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    #[inline]
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Run one tick: bump the counter, then the four group passes.
    pub fn advance_one_tick(&mut self) -> TickReport {
        self.advance_one_tick_observed(&|_| {})
    }

    /// [`advance_one_tick`](Self::advance_one_tick), reporting every cell the
    /// rule engine evaluates. The observer is called from worker threads.
    pub fn advance_one_tick_observed(
        &mut self,
        observer: &(dyn Fn(CellVisit) + Sync),
    ) -> TickReport {
        self.tick += 1;
        let ctx = StepContext {
            config: *self.grid.config(),
            tick: self.tick,
        };
        let report = scheduler::run_tick(self.grid.cells_mut(), ctx, self.parallelism, observer);
        log::trace!("tick {}: {} moves {:?}", self.tick, report.total_moves(), report.moves);
        report
    }

    /// Stamp a brush circle. Returns the number of cells written.
    pub fn paint(&mut self, center: IVec2, brush: &Brush) -> usize {
        painter::paint_circle(&mut self.grid, center, brush)
    }

    /// Overwrite one cell. Returns `false` when `pos` is outside the grid.
    pub fn paint_cell(&mut self, pos: IVec2, material: Material) -> bool {
        painter::paint_cell(&mut self.grid, pos, material)
    }

    /// Clear a circle to `Empty`.
    pub fn erase(&mut self, center: IVec2, radius: i32) -> usize {
        self.paint(center, &Brush::new(radius, Material::Empty))
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn material_ids(&self) -> Vec<u8> {
        render::material_ids(&self.grid)
    }

    pub fn rgba(&self) -> Vec<u8> {
        render::rgba(&self.grid)
    }
}
