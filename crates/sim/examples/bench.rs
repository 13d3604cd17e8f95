//! Quick benchmark for profiling the tick scheduler
//!
//! Run with: cargo run --release --example bench -p sandfall-sim
//! Profile with: cargo flamegraph --example bench -p sandfall-sim

use glam::IVec2;
use sim::{Brush, GridConfig, Material, Parallelism, SeedParams, Simulation};
use std::time::Instant;

fn main() {
    const TICKS: u32 = 300;

    let config = GridConfig::default();
    println!(
        "Setting up simulation {}x{} ({} chunks of {})",
        config.width(),
        config.height(),
        config.chunk_count(),
        config.chunk_size
    );

    for parallelism in [Parallelism::Sequential, Parallelism::Rayon] {
        let mut sim =
            Simulation::seeded(config, &SeedParams::from_rng_seed(42)).with_parallelism(parallelism);
        println!("\n--- {:?} ---", parallelism);
        println!("Initial occupied cells: {}", sim.grid().occupied_count());

        let start = Instant::now();
        let mut moves = 0;
        for tick in 0..TICKS {
            // Keep material flowing like an interactive session would
            if tick % 10 == 0 {
                let x = 100 + (tick as i32 * 7) % 800;
                sim.paint(IVec2::new(x, 550), &Brush::new(6, Material::Water));
                sim.paint(IVec2::new(x + 40, 560), &Brush::new(4, Material::Sand));
            }
            moves += sim.advance_one_tick().total_moves();

            if tick % 60 == 0 {
                println!("  Tick {}: {} moves so far", tick, moves);
            }
        }

        let elapsed = start.elapsed();
        let avg_tick = elapsed.as_secs_f64() / TICKS as f64;
        println!("=== Results ===");
        println!("Total time: {:.2?}", elapsed);
        println!("Avg tick: {:.3} ms ({:.1} ticks/s)", avg_tick * 1000.0, 1.0 / avg_tick);
        println!("Moves per tick: {:.0}", moves as f64 / TICKS as f64);
    }
}
