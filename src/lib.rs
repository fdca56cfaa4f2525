//! # Swirl
//!
//! Interactive 2D particle playground - pointer-driven CPU particle
//! simulations made easy.
//!
//! Swirl owns the simulation core: force fields, elastic collisions with
//! spatial partitioning, wall bounces and a recycling particle arena. The
//! host application keeps what it already has - its window, its input
//! events, its renderer - and wires them to three calls per frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use swirl::prelude::*;
//!
//! let mut sim = Simulation::new(1280.0, 720.0)
//!     .with_config(SimConfig {
//!         particle_count: 400,
//!         mode: PhysicsMode::Vortex,
//!         shape: ParticleShape::Circle,
//!         ..Default::default()
//!     });
//!
//! // each frame:
//! sim.set_cursor(mouse_x, mouse_y);
//! sim.step(frame_ms);
//! sim.render(&mut surface);
//! ```
//!
//! ## Core Concepts
//!
//! ### Physics modes
//!
//! Every particle follows one [`PhysicsMode`]: gravity-bias drift
//! (`Normal`), cursor fields (`Vortex`, `Attract`, `Repel`) or a gradient
//! noise field (`Turbulence`). Modes are a closed enum dispatched per
//! variant - no stringly-typed behavior.
//!
//! ### Collisions
//!
//! Pairs within their combined collision radii exchange momentum with the
//! 1-D elastic formula in the collision-normal frame, scaled by each
//! particle's bounce coefficient. A uniform [`SpatialGrid`] keeps the pair
//! search near O(n); cell size must cover the largest interaction radius.
//!
//! ### The arena
//!
//! Shrinking the particle count retires slots into a free list instead of
//! dropping them; growing recycles from the free list before allocating.
//! See [`ParticleArena`].
//!
//! ### Drawing
//!
//! Rendering goes through the [`Surface`] trait. Implement it over your
//! painter, or enable the `egui` feature for [`PainterSurface`].
//!
//! ### Input
//!
//! The pointer and motion sensors reduce to a cursor position plus a 2D
//! gravity bias ([`Input`]); feed the latest samples, last value wins.
//!
//! ## Determinism
//!
//! Production runs seed from entropy. For tests and recordings,
//! `Simulation::with_seed` pins both the RNG and the noise field.

pub mod arena;
pub mod collision;
pub mod config;
pub mod error;
pub mod input;
pub mod modes;
pub mod noise;
#[cfg(feature = "egui")]
pub mod paint;
pub mod particle;
pub mod simulation;
pub mod spatial;
pub mod surface;
pub mod time;
pub mod visuals;

pub use arena::ParticleArena;
pub use config::{SimConfig, SizeMode};
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use input::Input;
pub use modes::{ForceContext, PhysicsMode};
pub use noise::NoiseField;
#[cfg(feature = "egui")]
pub use paint::PainterSurface;
pub use particle::Particle;
pub use simulation::Simulation;
pub use spatial::SpatialGrid;
pub use surface::{NullSurface, Surface};
pub use time::Clock;
pub use visuals::{ColorMode, ParticleShape};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use swirl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SimConfig, SizeMode};
    pub use crate::input::Input;
    pub use crate::modes::PhysicsMode;
    #[cfg(feature = "egui")]
    pub use crate::paint::PainterSurface;
    pub use crate::particle::Particle;
    pub use crate::simulation::Simulation;
    pub use crate::surface::{NullSurface, Surface};
    pub use crate::visuals::{ColorMode, ParticleShape};
    pub use crate::{Vec2, Vec3};
}
