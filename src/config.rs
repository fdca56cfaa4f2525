//! Configuration types for swirl simulations.
//!
//! [`SimConfig`] is the mutable parameter surface a UI layer edits. The
//! simulation never reads it ambiently: a sanitized snapshot is taken at
//! each entry point (`set_config`, setters, `create_particles`), so a
//! half-edited config can never be observed mid-step.
//!
//! Configs serialize to JSON for presets.

use crate::error::ConfigError;
use crate::modes::PhysicsMode;
use crate::visuals::{ColorMode, ParticleShape};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smallest usable particle size; zero or negative sizes clamp to this.
pub const MIN_PARTICLE_SIZE: f32 = 0.5;

fn default_explosion_force() -> f32 {
    5.0
}

fn default_turbulence_strength() -> f32 {
    0.5
}

fn default_turbulence_scale() -> f32 {
    0.005
}

/// How particle sizes are drawn from `size_range`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SizeMode {
    /// Every particle gets the range maximum (default).
    #[default]
    Uniform,

    /// Each particle samples uniformly from the range.
    Random,
}

impl SizeMode {
    pub fn name(&self) -> &'static str {
        match self {
            SizeMode::Uniform => "uniform",
            SizeMode::Random => "random",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["uniform", "random"]
    }

    /// Parse a size mode name. Unknown names fall back to [`SizeMode::Uniform`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "random" => SizeMode::Random,
            _ => SizeMode::Uniform,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    /// Target number of active particles. 0 means no particles.
    pub particle_count: u32,
    /// Shape used for new and reconfigured particles.
    pub shape: ParticleShape,
    /// Force-field mode applied to every particle.
    pub mode: PhysicsMode,
    /// Size policy for new and reconfigured particles.
    pub size_mode: SizeMode,
    /// (min, max) particle size in surface pixels.
    pub size_range: (f32, f32),
    /// Scales initial velocity, force gains and the max-speed cap.
    pub speed_multiplier: f32,
    /// Constant downward pull added to the gravity bias.
    pub gravity: f32,
    /// Constant rightward push added to the gravity bias.
    pub wind: f32,
    /// Impulse scale used by `Simulation::explode`.
    #[serde(default = "default_explosion_force")]
    pub explosion_force: f32,
    /// Turbulence force magnitude.
    #[serde(default = "default_turbulence_strength")]
    pub turbulence_strength: f32,
    /// Turbulence spatial frequency (pixels are multiplied by this before
    /// sampling the noise field; smaller = larger swirls).
    #[serde(default = "default_turbulence_scale")]
    pub turbulence_scale: f32,
    /// Per-step velocity retention, (0, 1].
    pub friction: f32,
    /// Speed retained after a collision or wall bounce, [0, 1].
    pub bounce: f32,
    /// How particle colors are assigned.
    pub color_mode: ColorMode,
    /// Color used by [`ColorMode::Single`] (RGB, 0.0-1.0).
    pub single_color: [f32; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            shape: ParticleShape::Circle,
            mode: PhysicsMode::Normal,
            size_mode: SizeMode::Uniform,
            size_range: (4.0, 32.0),
            speed_multiplier: 0.5,
            gravity: 0.0,
            wind: 0.0,
            explosion_force: 5.0,
            turbulence_strength: 0.5,
            turbulence_scale: 0.005,
            friction: 0.97,
            bounce: 0.85,
            color_mode: ColorMode::Kinetic,
            single_color: [0.0, 1.0, 0.533],
        }
    }
}

impl SimConfig {
    /// Return a copy with every out-of-range value clamped to something
    /// safe. The core calls this at each entry point instead of rejecting
    /// bad values: an interactive system keeps running on odd input.
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();
        let (lo, hi) = cfg.size_range;
        let lo = lo.max(MIN_PARTICLE_SIZE);
        let hi = hi.max(lo);
        cfg.size_range = (lo, hi);
        cfg.speed_multiplier = cfg.speed_multiplier.max(0.0);
        cfg.explosion_force = cfg.explosion_force.max(0.0);
        cfg.turbulence_strength = cfg.turbulence_strength.max(0.0);
        cfg.turbulence_scale = cfg.turbulence_scale.max(0.0);
        cfg.friction = cfg.friction.clamp(0.01, 1.0);
        cfg.bounce = cfg.bounce.clamp(0.0, 1.0);
        for c in &mut cfg.single_color {
            *c = c.clamp(0.0, 1.0);
        }
        cfg
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}
