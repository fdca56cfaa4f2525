//! Particle state and per-step kinematics.
//!
//! A particle owns its kinematic state plus the per-particle copy of the
//! configuration knobs that affect it (shape, mode, friction, bounce,
//! speed multiplier). The per-particle copy is what lets the arena recycle
//! slots: `reconfigure` overwrites exactly the fields the current config
//! governs, and everything else persists until explicitly rewritten.

use crate::config::{SimConfig, SizeMode, MIN_PARTICLE_SIZE};
use crate::modes::{ForceContext, PhysicsMode};
use crate::visuals::{self, ColorMode, ParticleShape};
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Max speed is this base times the speed multiplier.
const MAX_SPEED_BASE: f32 = 15.0;
/// Mass is derived from size by this factor.
const MASS_FACTOR: f32 = 0.1;
/// Initial velocity components are drawn from ±this, times the multiplier.
const INITIAL_SPEED: f32 = 2.0;
/// Spin is drawn from ±this, times the multiplier.
const SPIN_RANGE: f32 = 0.02;
/// Kinetic color is recomputed every this many update calls.
const COLOR_INTERVAL: u8 = 5;

/// One simulated particle.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Position in surface pixels.
    pub pos: Vec2,
    /// Velocity in pixels per step.
    pub vel: Vec2,
    /// Current rotation in radians.
    pub rotation: f32,
    /// Rotation rate in radians per step.
    pub spin: f32,
    /// Radius-equivalent size in pixels (> 0).
    pub size: f32,
    /// Rendered and collision shape.
    pub shape: ParticleShape,
    /// Force-field mode.
    pub mode: PhysicsMode,
    /// Per-step velocity retention, (0, 1].
    pub friction: f32,
    /// Speed retained after a bounce, [0, 1].
    pub bounce: f32,
    /// Scales forces, initial velocity and the speed cap.
    pub speed_multiplier: f32,
    /// Speed cap, derived: `15 * speed_multiplier`.
    pub max_speed: f32,
    /// Current color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// How `color` was assigned / is maintained.
    pub color_mode: ColorMode,
    /// Throttle counter for kinetic color updates.
    color_tick: u8,
}

/// Draw a size from the config's size policy.
pub(crate) fn sample_size(config: &SimConfig, rng: &mut SmallRng) -> f32 {
    let (lo, hi) = config.size_range;
    let size = match config.size_mode {
        SizeMode::Uniform => hi,
        SizeMode::Random => {
            if hi > lo {
                rng.gen_range(lo..hi)
            } else {
                hi
            }
        }
    };
    size.max(MIN_PARTICLE_SIZE)
}

impl Particle {
    /// Build a fresh particle from the config and randomize its kinematics.
    pub fn spawn(config: &SimConfig, width: f32, height: f32, rng: &mut SmallRng) -> Self {
        let speed_multiplier = config.speed_multiplier;
        let mut p = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            spin: rng.gen_range(-SPIN_RANGE..=SPIN_RANGE) * speed_multiplier,
            size: sample_size(config, rng),
            shape: config.shape,
            mode: config.mode,
            friction: config.friction,
            bounce: config.bounce,
            speed_multiplier,
            max_speed: MAX_SPEED_BASE * speed_multiplier,
            color: config.color_mode.sample(Vec3::from(config.single_color), rng),
            color_mode: config.color_mode,
            color_tick: 0,
        };
        p.reset(width, height, rng);
        p
    }

    /// Overwrite the config-governed fields of a recycled slot.
    ///
    /// Called when a slot comes back from the free list so it matches the
    /// config active *now*, not the one it was retired under.
    pub fn reconfigure(&mut self, config: &SimConfig, rng: &mut SmallRng) {
        self.size = sample_size(config, rng);
        self.shape = config.shape;
        self.mode = config.mode;
        self.friction = config.friction;
        self.bounce = config.bounce;
        self.set_speed_multiplier(config.speed_multiplier);
        self.spin = rng.gen_range(-SPIN_RANGE..=SPIN_RANGE) * self.speed_multiplier;
        if self.color_mode != config.color_mode || config.color_mode == ColorMode::Single {
            self.color = config
                .color_mode
                .sample(Vec3::from(config.single_color), rng);
            self.color_mode = config.color_mode;
        }
    }

    /// Randomize position, velocity and rotation for (re)activation.
    pub fn reset(&mut self, width: f32, height: f32, rng: &mut SmallRng) {
        self.pos = Vec2::new(
            rng.gen_range(0.0..=width.max(1.0)),
            rng.gen_range(0.0..=height.max(1.0)),
        );
        self.vel = Vec2::new(
            rng.gen_range(-INITIAL_SPEED..=INITIAL_SPEED),
            rng.gen_range(-INITIAL_SPEED..=INITIAL_SPEED),
        ) * self.speed_multiplier;
        self.rotation = rng.gen_range(0.0..TAU);
    }

    /// Mass derived from size.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.size * MASS_FACTOR
    }

    /// Effective collision radius: size scaled by the shape factor.
    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.size * self.shape.collision_factor()
    }

    /// Current speed magnitude.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Update the speed multiplier and the derived max-speed cap together.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.max(0.0);
        self.max_speed = MAX_SPEED_BASE * self.speed_multiplier;
    }

    /// One kinematic step: mode force, friction, speed clamp, integration,
    /// rotation, color. Collisions and walls are resolved by the caller
    /// against the neighbor set.
    pub fn update(&mut self, ctx: &ForceContext) {
        let dv = self.mode.force(self, ctx);
        self.vel += dv;
        self.vel *= self.mode.post_damping();

        self.vel *= self.friction;

        // Clamp speed, preserving direction.
        let speed_sq = self.vel.length_squared();
        if speed_sq > self.max_speed * self.max_speed {
            self.vel *= self.max_speed / speed_sq.sqrt();
        }

        self.pos += self.vel;

        // Circles have no visible rotation; skip the work.
        if self.shape != ParticleShape::Circle {
            self.rotation += self.spin;
        }

        self.update_color();
    }

    /// Kinetic color refresh, throttled to every fifth call.
    fn update_color(&mut self) {
        if self.color_mode != ColorMode::Kinetic {
            return;
        }
        self.color_tick += 1;
        if self.color_tick < COLOR_INTERVAL {
            return;
        }
        self.color_tick = 0;
        self.color = visuals::kinetic_color(self.speed(), self.max_speed);
    }
}
