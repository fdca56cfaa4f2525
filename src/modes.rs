//! Physics modes: the force field applied to every particle.
//!
//! A mode is a pure function from `(particle, context)` to a velocity
//! delta, dispatched over a closed enum so the compiler checks
//! exhaustiveness. Modes never touch neighbors; pairwise behavior lives in
//! the collision resolver.
//!
//! # Mode Categories
//!
//! - **Global field**: [`PhysicsMode::Normal`] (gravity bias + wind + tilt)
//! - **Cursor field**: [`PhysicsMode::Vortex`], [`PhysicsMode::Attract`],
//!   [`PhysicsMode::Repel`]
//! - **Noise field**: [`PhysicsMode::Turbulence`]

use crate::noise::NoiseField;
use crate::particle::Particle;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gain applied to the gravity bias in normal mode.
const GRAVITY_GAIN: f32 = 30.0;
/// Cursor effect radius for vortex and repel.
const SWIRL_RADIUS: f32 = 150.0;
/// Cursor effect radius for attract.
const ATTRACT_RADIUS: f32 = 200.0;
/// Force gain for vortex and repel.
const SWIRL_GAIN: f32 = 0.05;
/// Force gain for attract (gentler: it acts over a larger radius).
const ATTRACT_GAIN: f32 = 0.02;
/// Extra velocity damping applied by turbulence. Noise forcing has no
/// restoring term, so without this the speed clamp is hit constantly.
const TURBULENCE_DAMPING: f32 = 0.95;

/// Per-step context shared by every force evaluation.
///
/// Built once at the top of `Simulation::step` from the input state, the
/// config snapshot and the clock, then passed to each particle.
pub struct ForceContext<'a> {
    /// Combined gravity bias: pointer displacement + sensor tilt + the
    /// configured (wind, gravity) scalars.
    pub gravity: Vec2,
    /// Latest cursor position in surface pixels.
    pub cursor: Vec2,
    /// Seconds since the previous step.
    pub dt: f32,
    /// Elapsed seconds, the time axis of the noise field.
    pub time: f32,
    /// Turbulence force magnitude.
    pub turbulence_strength: f32,
    /// Turbulence spatial frequency.
    pub turbulence_scale: f32,
    /// Gradient noise sampled by turbulence.
    pub noise: &'a NoiseField,
}

/// The force-field variant governing how global and cursor forces affect a
/// particle.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhysicsMode {
    /// Gravity-bias driven drift (default).
    ///
    /// `dv = gravity_bias * 30 * dt * speed_multiplier`. The only mode
    /// whose force scales with real elapsed time; the cursor modes are
    /// per-step impulses like the integration itself.
    #[default]
    Normal,

    /// Swirl around the cursor.
    ///
    /// Within 150 px of the cursor, applies a force tangential to the
    /// cursor-to-particle vector: particles orbit the cursor instead of
    /// falling into it. Strength ramps linearly from full at the cursor to
    /// zero at the radius edge, scaled by `0.05 * speed_multiplier`.
    Vortex,

    /// Pull toward the cursor.
    ///
    /// Within 200 px, force along the cursor direction with linear
    /// falloff, scaled by `0.02 * speed_multiplier`.
    Attract,

    /// Push away from the cursor.
    ///
    /// Within 150 px, force away from the cursor with linear falloff,
    /// scaled by `0.05 * speed_multiplier`.
    Repel,

    /// Noise-driven chaotic force field.
    ///
    /// Samples 3D gradient noise at `(x * scale, y * scale, time)`; the Y
    /// component uses an offset copy of the field so the axes decorrelate.
    /// The result is scaled by `strength * speed_multiplier` and the whole
    /// velocity is then damped by 0.95 (see [`PhysicsMode::post_damping`]).
    Turbulence,
}

impl PhysicsMode {
    /// Compute this mode's velocity delta for one particle.
    ///
    /// Total over all inputs: degenerate geometry (cursor exactly on the
    /// particle) yields a zero delta, never an error.
    pub fn force(&self, particle: &Particle, ctx: &ForceContext) -> Vec2 {
        match self {
            PhysicsMode::Normal => {
                ctx.gravity * GRAVITY_GAIN * ctx.dt * particle.speed_multiplier
            }

            PhysicsMode::Vortex => {
                let to_cursor = ctx.cursor - particle.pos;
                let dist_sq = to_cursor.length_squared();
                if dist_sq >= SWIRL_RADIUS * SWIRL_RADIUS {
                    return Vec2::ZERO;
                }
                let acc = (SWIRL_RADIUS - dist_sq.sqrt()) / SWIRL_RADIUS
                    * SWIRL_GAIN
                    * particle.speed_multiplier;
                // Perpendicular to the cursor direction: rotate, don't pull.
                Vec2::new(to_cursor.y, -to_cursor.x) * acc
            }

            PhysicsMode::Attract => {
                let to_cursor = ctx.cursor - particle.pos;
                let dist_sq = to_cursor.length_squared();
                if dist_sq >= ATTRACT_RADIUS * ATTRACT_RADIUS {
                    return Vec2::ZERO;
                }
                let acc = (ATTRACT_RADIUS - dist_sq.sqrt()) / ATTRACT_RADIUS
                    * ATTRACT_GAIN
                    * particle.speed_multiplier;
                to_cursor * acc
            }

            PhysicsMode::Repel => {
                let away = particle.pos - ctx.cursor;
                let dist_sq = away.length_squared();
                if dist_sq >= SWIRL_RADIUS * SWIRL_RADIUS {
                    return Vec2::ZERO;
                }
                let acc = (SWIRL_RADIUS - dist_sq.sqrt()) / SWIRL_RADIUS
                    * SWIRL_GAIN
                    * particle.speed_multiplier;
                away * acc
            }

            PhysicsMode::Turbulence => {
                let n = ctx
                    .noise
                    .sample(particle.pos, ctx.time, ctx.turbulence_scale);
                n * ctx.turbulence_strength * particle.speed_multiplier
            }
        }
    }

    /// Velocity retention applied right after this mode's force, before
    /// global friction. 1.0 for every mode except turbulence.
    pub fn post_damping(&self) -> f32 {
        match self {
            PhysicsMode::Turbulence => TURBULENCE_DAMPING,
            _ => 1.0,
        }
    }

    /// Returns `true` if this mode reads the cursor position.
    pub fn uses_cursor(&self) -> bool {
        matches!(
            self,
            PhysicsMode::Vortex | PhysicsMode::Attract | PhysicsMode::Repel
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhysicsMode::Normal => "normal",
            PhysicsMode::Vortex => "vortex",
            PhysicsMode::Attract => "attract",
            PhysicsMode::Repel => "repel",
            PhysicsMode::Turbulence => "turbulence",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["normal", "vortex", "attract", "repel", "turbulence"]
    }

    /// Parse a mode name. Unknown names fall back to [`PhysicsMode::Normal`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "vortex" => PhysicsMode::Vortex,
            "attract" => PhysicsMode::Attract,
            "repel" => PhysicsMode::Repel,
            "turbulence" => PhysicsMode::Turbulence,
            _ => PhysicsMode::Normal,
        }
    }
}
