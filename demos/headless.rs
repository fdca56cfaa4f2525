//! # Headless smoke run
//!
//! Drives the simulation without a window: fixed 60 Hz steps, a scripted
//! cursor sweep, one explosion, and a draw-call count through a counting
//! surface. Handy for profiling and for checking the core works before
//! wiring up a real renderer.
//!
//! Run with: `cargo run --example headless`

use swirl::prelude::*;

/// Counts draw calls instead of rasterizing.
struct CountingSurface {
    size: Vec2,
    draws: usize,
    clears: usize,
}

impl Surface for CountingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_shape(
        &mut self,
        _shape: ParticleShape,
        _pos: Vec2,
        _rotation: f32,
        _size: f32,
        _color: Vec3,
    ) {
        self.draws += 1;
    }
}

fn main() {
    let (width, height) = (1280.0, 720.0);
    let mut sim = Simulation::new(width, height)
        .with_seed(2024)
        .with_config(SimConfig {
            particle_count: 300,
            mode: PhysicsMode::Vortex,
            shape: ParticleShape::Triangle,
            speed_multiplier: 1.0,
            ..Default::default()
        });

    let mut surface = CountingSurface {
        size: Vec2::new(width, height),
        draws: 0,
        clears: 0,
    };

    let frames = 600;
    for frame in 0..frames {
        // Sweep the cursor in a circle around the center.
        let t = frame as f32 / frames as f32 * std::f32::consts::TAU;
        sim.set_cursor(
            width * 0.5 + t.cos() * 200.0,
            height * 0.5 + t.sin() * 200.0,
        );

        if frame == 300 {
            sim.explode_at_cursor();
        }

        sim.step(1000.0 / 60.0);
        sim.render(&mut surface);
    }

    let speeds: Vec<f32> = sim.particles().map(|p| p.speed()).collect();
    let avg = speeds.iter().sum::<f32>() / speeds.len() as f32;
    let max = speeds.iter().cloned().fold(0.0f32, f32::max);

    println!("=== Swirl headless run ===");
    println!("Frames:      {}", sim.frame());
    println!("Sim time:    {:.2}s", sim.elapsed());
    println!("Particles:   {} active, {} pooled", sim.len(), sim.pooled());
    println!("Draw calls:  {} ({} clears)", surface.draws, surface.clears);
    println!("Speed:       avg {:.2}, max {:.2} px/step", avg, max);
}
