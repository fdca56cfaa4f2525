//! The drawing-surface contract.
//!
//! Rendering backends are external collaborators: the simulation hands a
//! [`Surface`] one draw call per particle and never learns how pixels get
//! made. Implement this trait over whatever painter the host application
//! uses; with the `egui` feature enabled, `PainterSurface` is a ready-made
//! adapter.

use crate::visuals::ParticleShape;
use glam::{Vec2, Vec3};

/// A drawing target for the simulation.
pub trait Surface {
    /// Current surface dimensions in pixels.
    fn size(&self) -> Vec2;

    /// Clear the whole surface to its background.
    fn clear(&mut self);

    /// Draw one filled shape.
    ///
    /// `size` is already adjusted per shape (triangles arrive doubled), and
    /// `rotation` is in radians; circles receive it but may ignore it.
    fn draw_shape(&mut self, shape: ParticleShape, pos: Vec2, rotation: f32, size: f32, color: Vec3);
}

/// A surface that draws nothing.
///
/// For headless runs and benchmarks where only the physics matters.
#[derive(Debug, Clone, Copy)]
pub struct NullSurface {
    size: Vec2,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

impl Surface for NullSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {}

    fn draw_shape(
        &mut self,
        _shape: ParticleShape,
        _pos: Vec2,
        _rotation: f32,
        _size: f32,
        _color: Vec3,
    ) {
    }
}
