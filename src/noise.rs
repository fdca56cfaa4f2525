//! Gradient noise for the turbulence force field.
//!
//! Wraps a Perlin generator into a 2D vector field sampled in position and
//! time. The X and Y components come from the same generator at offset
//! coordinates, so the two axes decorrelate without a second permutation
//! table.

use glam::Vec2;
use noise::{NoiseFn, Perlin};

/// Offset applied to the Y-component sample.
const Y_OFFSET: f64 = 100.0;

/// A seedable 3D gradient noise field producing 2D force vectors.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Create a noise field from a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample the field at `pos` (scaled by `scale`) and time `t` seconds.
    ///
    /// Components are in [-1, 1].
    pub fn sample(&self, pos: Vec2, t: f32, scale: f32) -> Vec2 {
        let sx = (pos.x * scale) as f64;
        let sy = (pos.y * scale) as f64;
        let t = t as f64;
        let dx = self.perlin.get([sx, sy, t]);
        let dy = self.perlin.get([sx + Y_OFFSET, sy + Y_OFFSET, t]);
        Vec2::new(dx as f32, dy as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_in_range() {
        let field = NoiseField::new(7);
        for i in 0..50 {
            let p = Vec2::new(i as f32 * 13.7, i as f32 * 5.3);
            let n = field.sample(p, 0.25, 0.01);
            assert!(n.x.abs() <= 1.0 + 1e-3 && n.y.abs() <= 1.0 + 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        let p = Vec2::new(123.0, 456.0);
        assert_eq!(a.sample(p, 1.5, 0.01), b.sample(p, 1.5, 0.01));
    }

    #[test]
    fn test_axes_decorrelated() {
        // The offset Y sample should not simply mirror the X sample.
        let field = NoiseField::new(3);
        let mut differs = false;
        for i in 0..20 {
            let n = field.sample(Vec2::new(i as f32 * 31.0, i as f32 * 17.0), 0.0, 0.02);
            if (n.x - n.y).abs() > 1e-3 {
                differs = true;
                break;
            }
        }
        assert!(differs);
    }

    #[test]
    fn test_field_evolves_over_time() {
        let field = NoiseField::new(9);
        let p = Vec2::new(50.0, 50.0);
        let a = field.sample(p, 0.0, 0.02);
        let b = field.sample(p, 10.0, 0.02);
        assert!((a - b).length() > 1e-4);
    }
}
