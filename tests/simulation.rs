//! Cross-module scenario tests for the simulation core.
//!
//! These exercise full steps through the public API: forces, collisions,
//! walls, the arena and the grid working together. Everything is seeded so
//! the randomized parts stay reproducible.

use swirl::prelude::*;

const DT_MS: f32 = 16.0;

fn quiet_config() -> SimConfig {
    // No global forces, no friction loss: what you set is what moves.
    SimConfig {
        gravity: 0.0,
        wind: 0.0,
        friction: 1.0,
        bounce: 1.0,
        ..Default::default()
    }
}

// ============================================================================
// Speed-clamp invariant
// ============================================================================

#[test]
fn test_speed_clamped_in_every_mode() {
    for (seed, mode) in [
        (1, PhysicsMode::Normal),
        (2, PhysicsMode::Vortex),
        (3, PhysicsMode::Attract),
        (4, PhysicsMode::Repel),
        (5, PhysicsMode::Turbulence),
    ] {
        let mut sim = Simulation::new(800.0, 600.0)
            .with_seed(seed)
            .with_config(SimConfig {
                particle_count: 80,
                mode,
                speed_multiplier: 1.0,
                turbulence_strength: 3.0,
                gravity: 2.0,
                wind: 1.5,
                ..Default::default()
            });
        sim.set_cursor(400.0, 300.0);
        sim.explode(Vec2::new(400.0, 300.0));

        for _ in 0..30 {
            sim.step(DT_MS);
            for p in sim.particles() {
                assert!(
                    p.speed() <= p.max_speed + 1e-3,
                    "{:?} exceeded max speed: {} > {}",
                    mode,
                    p.speed(),
                    p.max_speed
                );
            }
        }
    }
}

// ============================================================================
// Collision scenarios
// ============================================================================

#[test]
fn test_equal_mass_head_on_collision_swaps_velocities() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(7)
        .with_config(SimConfig {
            particle_count: 2,
            size_range: (10.0, 10.0),
            ..quiet_config()
        });

    {
        let mut particles: Vec<&mut Particle> = sim.particles_mut().collect();
        particles[0].pos = Vec2::new(100.0, 300.0);
        particles[0].vel = Vec2::new(5.0, 0.0);
        particles[1].pos = Vec2::new(115.0, 300.0);
        particles[1].vel = Vec2::new(-5.0, 0.0);
    }

    sim.step(DT_MS);

    // Equal masses: the elastic exchange swaps the approach velocities,
    // scaled by bounce (1.0) and the fixed 0.97 collision damping.
    let particles: Vec<&Particle> = sim.particles().collect();
    let (left, right) = if particles[0].pos.x < particles[1].pos.x {
        (particles[0], particles[1])
    } else {
        (particles[1], particles[0])
    };
    assert!((left.vel.x - (-5.0 * 0.97)).abs() < 1e-3);
    assert!((right.vel.x - (5.0 * 0.97)).abs() < 1e-3);
    assert!(left.vel.y.abs() < 1e-3 && right.vel.y.abs() < 1e-3);

    // Fully separated: at least touching distance apart.
    assert!((right.pos - left.pos).length() >= 20.0 - 1e-3);
}

#[test]
fn test_distant_pair_never_interacts() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(8)
        .with_config(SimConfig {
            particle_count: 2,
            size_range: (10.0, 10.0),
            ..quiet_config()
        });

    {
        let mut particles: Vec<&mut Particle> = sim.particles_mut().collect();
        particles[0].pos = Vec2::new(100.0, 300.0);
        particles[0].vel = Vec2::new(0.5, 0.0);
        particles[1].pos = Vec2::new(700.0, 300.0);
        particles[1].vel = Vec2::new(-0.5, 0.0);
    }

    sim.step(DT_MS);

    // Far apart, no forces, friction 1.0: velocities pass through
    // untouched and positions just integrate.
    let particles: Vec<&Particle> = sim.particles().collect();
    assert!((particles[0].vel.x - 0.5).abs() < 1e-6);
    assert!((particles[1].vel.x - (-0.5)).abs() < 1e-6);
    assert!((particles[0].pos.x - 100.5).abs() < 1e-4);
    assert!((particles[1].pos.x - 699.5).abs() < 1e-4);
}

// ============================================================================
// Boundary containment
// ============================================================================

#[test]
fn test_particles_stay_contained() {
    let mut sim = Simulation::new(400.0, 300.0)
        .with_seed(9)
        .with_config(SimConfig {
            particle_count: 60,
            mode: PhysicsMode::Normal,
            size_range: (2.0, 2.0),
            gravity: 3.0,
            wind: 2.0,
            speed_multiplier: 1.0,
            ..Default::default()
        });

    for _ in 0..60 {
        sim.step(DT_MS);
    }
    // Walls clamp to one collision radius; a same-step collision push can
    // add at most half an overlap, so positions never leave the surface by
    // more than a particle size.
    for p in sim.particles() {
        assert!(p.pos.x >= -p.size && p.pos.x <= 400.0 + p.size);
        assert!(p.pos.y >= -p.size && p.pos.y <= 300.0 + p.size);
    }
}

// ============================================================================
// Cursor force scenarios
// ============================================================================

#[test]
fn test_attract_in_and_out_of_radius() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(10)
        .with_config(SimConfig {
            particle_count: 1,
            mode: PhysicsMode::Attract,
            ..quiet_config()
        });
    // Cursor at the surface center so the pointer gravity bias is zero.
    sim.set_cursor(400.0, 300.0);

    // 100 px from the cursor: pulled toward it.
    {
        let p = sim.particles_mut().next().unwrap();
        p.pos = Vec2::new(300.0, 300.0);
        p.vel = Vec2::ZERO;
    }
    sim.step(DT_MS);
    let p = sim.particles().next().unwrap();
    assert!(p.vel.x > 0.0, "expected pull toward cursor");
    assert!(p.vel.y.abs() < 1e-6);

    // 250 px from the cursor: outside the 200 px radius, no added force.
    {
        let p = sim.particles_mut().next().unwrap();
        p.pos = Vec2::new(150.0, 300.0);
        p.vel = Vec2::ZERO;
    }
    sim.step(DT_MS);
    let p = sim.particles().next().unwrap();
    assert_eq!(p.vel, Vec2::ZERO);
}

#[test]
fn test_vortex_orbits_rather_than_falls_in() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(11)
        .with_config(SimConfig {
            particle_count: 1,
            mode: PhysicsMode::Vortex,
            ..quiet_config()
        });
    sim.set_cursor(400.0, 300.0);

    {
        let p = sim.particles_mut().next().unwrap();
        p.pos = Vec2::new(500.0, 300.0);
        p.vel = Vec2::ZERO;
    }
    sim.step(DT_MS);
    let p = sim.particles().next().unwrap();
    // Tangential kick: motion perpendicular to the cursor direction.
    assert!(p.vel.length() > 0.0);
    assert!(p.vel.x.abs() < 1e-4);
    assert!(p.vel.y.abs() > 0.0);
}

// ============================================================================
// Explosion scenario
// ============================================================================

#[test]
fn test_explosion_impulse_magnitude_and_direction() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(12)
        .with_config(SimConfig {
            particle_count: 1,
            ..quiet_config()
        });

    {
        let p = sim.particles_mut().next().unwrap();
        p.pos = Vec2::new(500.0, 300.0);
        p.vel = Vec2::ZERO;
    }
    // Particle sits 100 px from the center of a radius-200, force-5 burst:
    // impulse magnitude (1 - 100/200) * 5 * 20 = 50, plus ±1 jitter per axis.
    sim.explode_with(Vec2::new(400.0, 300.0), 200.0, 5.0);

    let p = sim.particles().next().unwrap();
    assert!((p.vel.x - 50.0).abs() <= 1.0 + 1e-4, "vel.x = {}", p.vel.x);
    assert!(p.vel.y.abs() <= 1.0 + 1e-4);
    assert!(p.vel.x > 0.0, "impulse must point away from the center");
}

// ============================================================================
// Pool round trip
// ============================================================================

#[test]
fn test_reset_round_trip_keeps_count_and_pool_disjoint() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(13)
        .with_config(SimConfig {
            particle_count: 40,
            ..Default::default()
        });

    sim.step(DT_MS);
    sim.reset();

    assert_eq!(sim.len(), 40);
    assert_eq!(sim.pooled(), 0);

    // Shrinking then resetting drains and refills through the pool.
    sim.set_particle_count(15);
    assert_eq!(sim.len(), 15);
    assert_eq!(sim.pooled(), 25);
    sim.reset();
    assert_eq!(sim.len(), 15);
    assert_eq!(sim.pooled(), 25);

    sim.step(DT_MS);
    assert_eq!(sim.len(), 15);
}

// ============================================================================
// Rendering contract
// ============================================================================

struct RecordingSurface {
    size: Vec2,
    cleared: bool,
    draws: Vec<(ParticleShape, f32)>,
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.cleared = true;
        self.draws.clear();
    }

    fn draw_shape(
        &mut self,
        shape: ParticleShape,
        _pos: Vec2,
        _rotation: f32,
        size: f32,
        _color: Vec3,
    ) {
        self.draws.push((shape, size));
    }
}

#[test]
fn test_render_draws_every_particle_with_shape_sizing() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(20)
        .with_config(SimConfig {
            particle_count: 12,
            shape: ParticleShape::Triangle,
            size_range: (10.0, 10.0),
            ..Default::default()
        });
    sim.step(DT_MS);

    let mut surface = RecordingSurface {
        size: Vec2::new(800.0, 600.0),
        cleared: false,
        draws: Vec::new(),
    };
    sim.render(&mut surface);

    assert!(surface.cleared);
    assert_eq!(surface.draws.len(), 12);
    for (shape, size) in &surface.draws {
        assert_eq!(*shape, ParticleShape::Triangle);
        // Triangles draw at double the stored size.
        assert_eq!(*size, 20.0);
    }
}

// ============================================================================
// Config wiring
// ============================================================================

#[test]
fn test_unknown_variant_names_fall_back_to_defaults() {
    assert_eq!(PhysicsMode::from_name("fluid"), PhysicsMode::Normal);
    assert_eq!(PhysicsMode::from_name("springs"), PhysicsMode::Normal);
    assert_eq!(ParticleShape::from_name("hexagon"), ParticleShape::Circle);
    assert_eq!(ColorMode::from_name("plasma"), ColorMode::Rainbow);
    assert_eq!(SizeMode::from_name("bimodal"), SizeMode::Uniform);
}

#[test]
fn test_hostile_config_is_clamped_not_rejected() {
    let mut sim = Simulation::new(800.0, 600.0)
        .with_seed(14)
        .with_config(SimConfig {
            particle_count: 20,
            size_range: (-5.0, -1.0),
            speed_multiplier: -3.0,
            friction: 7.0,
            bounce: 42.0,
            ..Default::default()
        });

    // Degenerate but alive: sizes floored, multipliers zeroed, and the
    // step loop keeps running.
    for _ in 0..10 {
        sim.step(DT_MS);
    }
    for p in sim.particles() {
        assert!(p.size > 0.0);
        assert!(p.speed() <= p.max_speed + 1e-4);
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let build = || {
        Simulation::new(800.0, 600.0)
            .with_seed(99)
            .with_config(SimConfig {
                particle_count: 25,
                mode: PhysicsMode::Turbulence,
                ..Default::default()
            })
    };
    let mut a = build();
    let mut b = build();
    for _ in 0..20 {
        a.step(DT_MS);
        b.step(DT_MS);
    }
    for (pa, pb) in a.particles().zip(b.particles()) {
        assert_eq!(pa.pos, pb.pos);
        assert_eq!(pa.vel, pb.vel);
    }
}
