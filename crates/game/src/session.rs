//! Headless session: seed, replay scripted strokes, tick, write the last frame.

use anyhow::{Context, Result};
use glam::IVec2;
use sim::render::write_ppm;
use sim::{Brush, Histogram, Material, PaintStroke, SeedParams, SimConfig, Simulation};
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

/// Ticks between progress log lines.
const PROGRESS_INTERVAL: u32 = 100;

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u32,
    pub total_moves: u64,
    pub histogram: Histogram,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Results ===")?;
        writeln!(
            f,
            "{} ticks in {:.2?} ({:.1} ticks/s), {} moves",
            self.ticks,
            self.elapsed,
            self.ticks_per_second(),
            self.total_moves
        )?;
        for material in Material::ALL {
            writeln!(f, "  {:<6} {}", material.name(), self.histogram[material.id() as usize])?;
        }
        Ok(())
    }
}

/// Fresh simulation for a config: noise terrain when seeded, otherwise empty.
pub fn build_simulation(config: &SimConfig) -> Simulation {
    let sim = match config.seed {
        Some(seed) => Simulation::seeded(config.grid, &SeedParams::from_rng_seed(seed)),
        None => Simulation::new(config.grid),
    };
    sim.with_parallelism(config.parallelism)
}

fn apply_stroke(sim: &mut Simulation, stroke: &PaintStroke) -> usize {
    let center = IVec2::new(stroke.x, stroke.y);
    if stroke.radius == 0 {
        sim.paint_cell(center, stroke.material) as usize
    } else {
        sim.paint(center, &Brush::new(stroke.radius, stroke.material))
    }
}

/// Run a whole session. Strokes tagged with tick 0 are applied to the
/// initial scene; a stroke tagged `n` is applied right before tick `n`.
pub fn run(config: &SimConfig) -> Result<(Simulation, RunSummary)> {
    config.validate().context("invalid session config")?;

    let mut sim = build_simulation(config);
    log::info!(
        "{}x{} grid, {} ticks, {:?} scheduling",
        sim.grid().width(),
        sim.grid().height(),
        config.ticks,
        sim.parallelism()
    );

    for stroke in config.strokes_for(0) {
        apply_stroke(&mut sim, stroke);
    }

    let start = Instant::now();
    let mut total_moves = 0u64;
    for _ in 0..config.ticks {
        let next = sim.tick() + 1;
        for stroke in config.strokes_for(next) {
            let written = apply_stroke(&mut sim, stroke);
            log::debug!("tick {next}: painted {written} cells of {}", stroke.material.name());
        }

        let report = sim.advance_one_tick();
        total_moves += report.total_moves() as u64;

        if report.tick % PROGRESS_INTERVAL == 0 {
            log::info!(
                "tick {}: {} moves, {} occupied",
                report.tick,
                report.total_moves(),
                sim.grid().occupied_count()
            );
        }
    }
    let elapsed = start.elapsed();

    if let Some(path) = &config.output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_ppm(sim.grid(), BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote frame to {}", path.display());
    }

    let summary = RunSummary {
        ticks: sim.tick(),
        total_moves,
        histogram: sim.grid().histogram(),
        elapsed,
    };
    Ok((sim, summary))
}
