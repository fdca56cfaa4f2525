//! Simulation owner and step loop.
//!
//! [`Simulation`] owns the particle arena, the spatial grid, the noise
//! field, the RNG, the input state and the clock. Construction is builder
//! style; afterwards the frame scheduler drives `step(elapsed_ms)` and the
//! host renders with `render(&mut surface)`.
//!
//! The step loop is a single integrated pass: reconcile the particle count,
//! rebuild the grid, then per particle query neighbors once and run
//! force → friction → speed clamp → integrate → rotate → color →
//! collisions → walls. Only collisions consume the neighbor set; every
//! other force reads the cursor or global fields.

use crate::arena::ParticleArena;
use crate::collision;
use crate::config::SimConfig;
use crate::input::Input;
use crate::modes::{ForceContext, PhysicsMode};
use crate::noise::NoiseField;
use crate::particle::{self, Particle};
use crate::spatial::{SpatialGrid, DEFAULT_CELL_SIZE};
use crate::surface::Surface;
use crate::time::Clock;
use crate::visuals::{ColorMode, ParticleShape};
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Default radius for `explode`.
pub const EXPLOSION_RADIUS: f32 = 200.0;
/// Explosion impulse gain on top of the configured force.
const EXPLOSION_GAIN: f32 = 20.0;
/// Per-axis jitter added to explosion impulses, independent of force.
const EXPLOSION_JITTER: f32 = 1.0;

/// An interactive 2D particle simulation.
///
/// # Example
///
/// ```ignore
/// use swirl::prelude::*;
///
/// let mut sim = Simulation::new(1280.0, 720.0)
///     .with_seed(42)
///     .with_config(SimConfig {
///         particle_count: 400,
///         mode: PhysicsMode::Vortex,
///         ..Default::default()
///     });
///
/// // per frame:
/// sim.set_cursor(mouse_x, mouse_y);
/// sim.step(frame_ms);
/// sim.render(&mut surface);
/// ```
pub struct Simulation {
    config: SimConfig,
    arena: ParticleArena,
    grid: SpatialGrid,
    noise: NoiseField,
    rng: SmallRng,
    input: Input,
    clock: Clock,
    width: f32,
    height: f32,
    running: bool,
    /// Scratch buffer for neighbor queries, reused across particles.
    scratch: Vec<usize>,
}

impl Simulation {
    /// Create a simulation over a `width` x `height` surface with the
    /// default configuration and entropy seeding. Particles appear on the
    /// first step (or an explicit `create_particles`).
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let mut rng = SmallRng::from_entropy();
        let noise_seed: u32 = rng.gen();
        Self {
            config: SimConfig::default(),
            arena: ParticleArena::new(),
            grid: SpatialGrid::new(DEFAULT_CELL_SIZE, width, height),
            noise: NoiseField::new(noise_seed),
            rng,
            input: Input::new(),
            clock: Clock::new(),
            width,
            height,
            running: true,
            scratch: Vec::new(),
        }
    }

    /// Seed the RNG and the noise field for reproducible runs (tests,
    /// recordings). Chain before `with_config` so spawn randomness is
    /// covered too.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self.noise = NoiseField::new(seed as u32);
        self
    }

    /// Apply a configuration and reconcile the particle set to it.
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.set_config(&config);
        self
    }

    /// Override the spatial grid cell size. Must be at least as large as
    /// the biggest interaction radius for exact neighbor queries.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.grid = SpatialGrid::new(cell_size, self.width, self.height);
        self
    }

    // ========== Frame driving ==========

    /// Advance the simulation by `elapsed_ms` milliseconds.
    ///
    /// No-op while paused. The caller owns pacing; this never sleeps.
    pub fn step(&mut self, elapsed_ms: f32) {
        if !self.running {
            return;
        }
        let (time, dt) = self.clock.advance(elapsed_ms);

        if self.arena.active_count() != self.config.particle_count as usize {
            self.create_particles();
        }

        self.rebuild_grid();

        let ctx = ForceContext {
            gravity: self.input.gravity_bias() + Vec2::new(self.config.wind, self.config.gravity),
            cursor: self.input.cursor(),
            dt,
            time,
            turbulence_strength: self.config.turbulence_strength,
            turbulence_scale: self.config.turbulence_scale,
            noise: &self.noise,
        };

        let mut scratch = std::mem::take(&mut self.scratch);
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];

            let pos = self.arena.slot(i).pos;
            self.grid.neighbors(pos, &mut scratch);

            self.arena.slot_mut(i).update(&ctx);

            for &j in &scratch {
                if j == i {
                    continue;
                }
                let (a, b) = self.arena.pair_mut(i, j);
                collision::resolve_pair(a, b);
            }

            collision::resolve_walls(self.arena.slot_mut(i), self.width, self.height);
        }
        self.scratch = scratch;
    }

    /// Draw the active set: clear, then one shape per particle. Triangle
    /// sizes are doubled here so all shapes read as comparable areas.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for (_, p) in self.arena.iter_active() {
            surface.draw_shape(
                p.shape,
                p.pos,
                p.rotation,
                p.shape.render_size(p.size),
                p.color,
            );
        }
    }

    // ========== Commands ==========

    /// Reconcile the active particle count to the configured target,
    /// recycling pooled slots before allocating fresh ones. Recycled slots
    /// are reconfigured to the current config and re-randomized. Always
    /// leaves the grid rebuilt.
    pub fn create_particles(&mut self) {
        let target = self.config.particle_count as usize;

        while self.arena.active_count() < target {
            if let Some(i) = self.arena.recycle() {
                let p = self.arena.slot_mut(i);
                p.reconfigure(&self.config, &mut self.rng);
                p.reset(self.width, self.height, &mut self.rng);
            } else {
                let p = Particle::spawn(&self.config, self.width, self.height, &mut self.rng);
                self.arena.insert(p);
            }
        }
        while self.arena.active_count() > target {
            self.arena.retire_last();
        }

        self.rebuild_grid();
        log::debug!(
            "particle count reconciled to {} ({} pooled)",
            target,
            self.arena.free_count()
        );
    }

    /// Return every particle to the pool and build a fresh active set from
    /// the current config. Positions and velocities re-randomize through
    /// each particle's reset.
    pub fn reset(&mut self) {
        self.arena.retire_all();
        self.create_particles();
        log::debug!("simulation reset");
    }

    /// Outward impulse burst at `center` with the configured force and the
    /// default 200 px radius.
    pub fn explode(&mut self, center: Vec2) {
        self.explode_with(center, EXPLOSION_RADIUS, self.config.explosion_force);
    }

    /// Burst at the latest cursor position.
    pub fn explode_at_cursor(&mut self) {
        self.explode(self.input.cursor());
    }

    /// Outward impulse burst with explicit radius and force. Each particle
    /// within the radius gains `(1 - dist/radius) * force * 20` along the
    /// outward direction, plus a small random jitter so bursts are not
    /// perfectly radial. Particles exactly at the center are skipped.
    pub fn explode_with(&mut self, center: Vec2, radius: f32, force: f32) {
        if radius <= 0.0 {
            return;
        }
        let radius_sq = radius * radius;
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            let p = self.arena.slot_mut(i);
            let dir = p.pos - center;
            let dist_sq = dir.length_squared();
            if dist_sq >= radius_sq || dist_sq == 0.0 {
                continue;
            }
            let dist = dist_sq.sqrt();
            let impulse = (1.0 - dist / radius) * force * EXPLOSION_GAIN;
            let jitter = Vec2::new(
                self.rng.gen_range(-EXPLOSION_JITTER..=EXPLOSION_JITTER),
                self.rng.gen_range(-EXPLOSION_JITTER..=EXPLOSION_JITTER),
            );
            p.vel += dir / dist * impulse + jitter;
        }
    }

    /// Pause or resume stepping. Safe to toggle at any time; a step is the
    /// unit of atomicity.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Adapt to a new surface size. The grid is re-dimensioned and rebuilt;
    /// particles outside the new bounds come back through the walls on the
    /// next step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.grid.resize(self.width, self.height);
        self.rebuild_grid();
        log::debug!("surface resized to {}x{}", self.width, self.height);
    }

    // ========== Configuration ==========

    /// Replace the whole configuration (sanitized) and reconcile the
    /// particle set. Per-field setters below additionally update live
    /// particles in place, the way an interactive slider expects.
    pub fn set_config(&mut self, config: &SimConfig) {
        self.config = config.sanitized();
        self.create_particles();
    }

    /// Current configuration snapshot.
    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn set_particle_count(&mut self, count: u32) {
        self.config.particle_count = count;
        self.create_particles();
    }

    pub fn set_mode(&mut self, mode: PhysicsMode) {
        self.config.mode = mode;
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            self.arena.slot_mut(i).mode = mode;
        }
    }

    pub fn set_shape(&mut self, shape: ParticleShape) {
        self.config.shape = shape;
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            self.arena.slot_mut(i).shape = shape;
        }
    }

    /// Update the speed multiplier; live particles get the new multiplier
    /// and the max-speed cap derived from it.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.config.speed_multiplier = multiplier.max(0.0);
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            self.arena
                .slot_mut(i)
                .set_speed_multiplier(self.config.speed_multiplier);
        }
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.config.gravity = gravity;
    }

    pub fn set_wind(&mut self, wind: f32) {
        self.config.wind = wind;
    }

    pub fn set_explosion_force(&mut self, force: f32) {
        self.config.explosion_force = force.max(0.0);
    }

    pub fn set_turbulence(&mut self, strength: f32, scale: f32) {
        self.config.turbulence_strength = strength.max(0.0);
        self.config.turbulence_scale = scale.max(0.0);
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.config.friction = friction.clamp(0.01, 1.0);
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            self.arena.slot_mut(i).friction = self.config.friction;
        }
    }

    pub fn set_bounce(&mut self, bounce: f32) {
        self.config.bounce = bounce.clamp(0.0, 1.0);
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            self.arena.slot_mut(i).bounce = self.config.bounce;
        }
    }

    /// Change the size policy and re-draw live particle sizes from it.
    pub fn set_size_mode(&mut self, mode: crate::config::SizeMode) {
        self.config.size_mode = mode;
        self.resample_sizes();
    }

    /// Change the size range and re-draw live particle sizes from it.
    pub fn set_size_range(&mut self, min: f32, max: f32) {
        self.config.size_range = (min, max);
        self.config = self.config.sanitized();
        self.resample_sizes();
    }

    /// Change the color mode; live particles are recolored immediately.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.config.color_mode = mode;
        let single = Vec3::from(self.config.single_color);
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            let color = mode.sample(single, &mut self.rng);
            let p = self.arena.slot_mut(i);
            p.color_mode = mode;
            p.color = color;
        }
    }

    /// Change the single-color value; applied live when the single color
    /// mode is active.
    pub fn set_single_color(&mut self, color: [f32; 3]) {
        self.config.single_color = color.map(|c| c.clamp(0.0, 1.0));
        if self.config.color_mode == ColorMode::Single {
            let single = Vec3::from(self.config.single_color);
            for k in 0..self.arena.active_count() {
                let i = self.arena.active()[k];
                self.arena.slot_mut(i).color = single;
            }
        }
    }

    fn resample_sizes(&mut self) {
        for k in 0..self.arena.active_count() {
            let i = self.arena.active()[k];
            let size = particle::sample_size(&self.config, &mut self.rng);
            self.arena.slot_mut(i).size = size;
        }
    }

    // ========== Input ==========

    /// Record the latest cursor position in surface pixels.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.input
            .set_cursor(Vec2::new(x, y), Vec2::new(self.width, self.height));
    }

    /// Record the latest sensor tilt sample.
    pub fn set_tilt(&mut self, tilt: Vec2) {
        self.input.set_tilt(tilt);
    }

    /// Enable or disable the sensor contribution.
    pub fn set_sensor_enabled(&mut self, enabled: bool) {
        self.input.set_sensor_enabled(enabled);
    }

    #[inline]
    pub fn input(&self) -> &Input {
        &self.input
    }

    #[inline]
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    // ========== Inspection ==========

    /// Number of active particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.active_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.active_count() == 0
    }

    /// Number of pooled (inactive) particle slots.
    #[inline]
    pub fn pooled(&self) -> usize {
        self.arena.free_count()
    }

    /// Surface dimensions the simulation currently assumes.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Elapsed simulated seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Steps taken so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    /// Iterate over the active particles.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.arena.iter_active().map(|(_, p)| p)
    }

    /// Mutable iteration over the active particles in slot order, for
    /// inspectors and scenario setup. The next step picks the edits up
    /// as-is.
    pub fn particles_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        let active: std::collections::HashSet<usize> = self.arena.active().iter().copied().collect();
        self.arena
            .slots_mut()
            .iter_mut()
            .enumerate()
            .filter_map(move |(i, p)| active.contains(&i).then_some(p))
    }

    fn rebuild_grid(&mut self) {
        let Self { grid, arena, .. } = self;
        grid.rebuild(arena.iter_active().map(|(i, p)| (i, p.pos)));
    }
}
