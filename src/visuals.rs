//! Visual configuration: particle shapes and color assignment.
//!
//! Shapes affect both rendering and physics: non-circular shapes get a
//! larger effective collision radius and carry visible rotation. Color
//! modes assign a color at spawn time, except [`ColorMode::Kinetic`] which
//! is recomputed from speed while the simulation runs.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Particle shape for rendering and collision.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParticleShape {
    /// Filled circle (default). No visually meaningful rotation.
    #[default]
    Circle,

    /// Axis-aligned square, rotated per particle.
    Square,

    /// Isoceles triangle, rotated per particle. Drawn at double the stored
    /// size so its visual area stays comparable to the other shapes.
    Triangle,
}

impl ParticleShape {
    /// Effective collision radius multiplier for this shape.
    ///
    /// A square's corners reach `size * sqrt(2)` from its center; the
    /// triangle uses 1.5 as a coarse bound over its doubled draw size.
    pub fn collision_factor(&self) -> f32 {
        match self {
            ParticleShape::Circle => 1.0,
            ParticleShape::Square => std::f32::consts::SQRT_2,
            ParticleShape::Triangle => 1.5,
        }
    }

    /// Size to hand to the drawing surface for a stored particle size.
    pub fn render_size(&self, size: f32) -> f32 {
        match self {
            ParticleShape::Triangle => size * 2.0,
            _ => size,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParticleShape::Circle => "circle",
            ParticleShape::Square => "square",
            ParticleShape::Triangle => "triangle",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["circle", "square", "triangle"]
    }

    /// Parse a shape name. Unknown names fall back to [`ParticleShape::Circle`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "square" => ParticleShape::Square,
            "triangle" => ParticleShape::Triangle,
            _ => ParticleShape::Circle,
        }
    }
}

/// How particle colors are assigned.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ColorMode {
    /// Random hue across the full wheel (default).
    #[default]
    Rainbow,

    /// One of six saturated neon colors.
    Neon,

    /// Random hue in the blue/violet range.
    Cool,

    /// Random hue in the red/yellow range.
    Warm,

    /// Random hue, desaturated and light.
    Pastel,

    /// The configured single color for every particle.
    Single,

    /// Color follows speed: slow = red, fast = blue. Recomputed while the
    /// simulation runs (throttled, see `Particle::update_color`).
    Kinetic,
}

/// The neon palette: #ff0088, #00ff99, #00ffff, #ff9900, #ff00ff, #ffff00.
const NEON_COLORS: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.533),
    Vec3::new(0.0, 1.0, 0.6),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 0.6, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
];

impl ColorMode {
    /// Pick a spawn color for this mode.
    ///
    /// `single` is the configured color used by [`ColorMode::Single`].
    /// Kinetic starts from its zero-speed red; the running simulation takes
    /// over from there.
    pub fn sample(&self, single: Vec3, rng: &mut impl Rng) -> Vec3 {
        match self {
            ColorMode::Rainbow => hsl(rng.gen_range(0.0..360.0), 0.8, 0.6),
            ColorMode::Neon => NEON_COLORS[rng.gen_range(0..NEON_COLORS.len())],
            ColorMode::Cool => hsl(rng.gen_range(180.0..300.0), 0.7, 0.6),
            ColorMode::Warm => hsl(rng.gen_range(0.0..60.0), 0.8, 0.6),
            ColorMode::Pastel => hsl(rng.gen_range(0.0..360.0), 0.7, 0.8),
            ColorMode::Single => single,
            ColorMode::Kinetic => hsl(0.0, 0.8, 0.6),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Rainbow => "rainbow",
            ColorMode::Neon => "neon",
            ColorMode::Cool => "cool",
            ColorMode::Warm => "warm",
            ColorMode::Pastel => "pastel",
            ColorMode::Single => "single",
            ColorMode::Kinetic => "kinetic",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["rainbow", "neon", "cool", "warm", "pastel", "single", "kinetic"]
    }

    /// Parse a color mode name. Unknown names fall back to [`ColorMode::Rainbow`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "neon" => ColorMode::Neon,
            "cool" => ColorMode::Cool,
            "warm" => ColorMode::Warm,
            "pastel" => ColorMode::Pastel,
            "single" => ColorMode::Single,
            "kinetic" => ColorMode::Kinetic,
            _ => ColorMode::Rainbow,
        }
    }
}

/// Color for the kinetic mode: hue sweeps 0° (red) to 240° (blue) with speed.
pub fn kinetic_color(speed: f32, max_speed: f32) -> Vec3 {
    let hue = if max_speed > 0.0 {
        speed / max_speed * 240.0
    } else {
        0.0
    };
    hsl(hue, 0.8, 0.6)
}

/// Convert HSL to RGB.
///
/// * `h` - hue in degrees (wraps outside 0..360)
/// * `s` - saturation, 0.0 (gray) to 1.0 (vivid)
/// * `l` - lightness, 0.0 (black) to 1.0 (white)
pub fn hsl(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c * 0.5;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_hsl_primaries() {
        let red = hsl(0.0, 1.0, 0.5);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y < 0.001);
        assert!(red.z < 0.001);

        let green = hsl(120.0, 1.0, 0.5);
        assert!(green.x < 0.001);
        assert!((green.y - 1.0).abs() < 0.001);

        let blue = hsl(240.0, 1.0, 0.5);
        assert!((blue.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_hsl_wraps_hue() {
        let a = hsl(30.0, 0.8, 0.6);
        let b = hsl(390.0, 0.8, 0.6);
        assert!((a - b).length() < 0.001);
    }

    #[test]
    fn test_kinetic_color_sweeps_red_to_blue() {
        let slow = kinetic_color(0.0, 10.0);
        let fast = kinetic_color(10.0, 10.0);
        assert!(slow.x > slow.z); // red end
        assert!(fast.z > fast.x); // blue end
    }

    #[test]
    fn test_kinetic_color_zero_max_speed() {
        // Guard against division by zero when speed multiplier is 0.
        let c = kinetic_color(1.0, 0.0);
        assert!(c.x > 0.0);
    }

    #[test]
    fn test_collision_factors() {
        assert_eq!(ParticleShape::Circle.collision_factor(), 1.0);
        assert_eq!(
            ParticleShape::Square.collision_factor(),
            std::f32::consts::SQRT_2
        );
        assert_eq!(ParticleShape::Triangle.collision_factor(), 1.5);
    }

    #[test]
    fn test_triangle_renders_doubled() {
        assert_eq!(ParticleShape::Triangle.render_size(8.0), 16.0);
        assert_eq!(ParticleShape::Circle.render_size(8.0), 8.0);
        assert_eq!(ParticleShape::Square.render_size(8.0), 8.0);
    }

    #[test]
    fn test_from_name_total() {
        assert_eq!(ParticleShape::from_name("square"), ParticleShape::Square);
        assert_eq!(ParticleShape::from_name("???"), ParticleShape::Circle);
        assert_eq!(ColorMode::from_name("kinetic"), ColorMode::Kinetic);
        assert_eq!(ColorMode::from_name(""), ColorMode::Rainbow);
    }

    #[test]
    fn test_single_mode_uses_configured_color() {
        let mut rng = SmallRng::seed_from_u64(1);
        let single = Vec3::new(0.0, 1.0, 0.533);
        assert_eq!(ColorMode::Single.sample(single, &mut rng), single);
    }
}
