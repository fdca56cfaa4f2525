//! Input state for swirl simulations.
//!
//! The `Input` struct reduces pointer and motion-sensor events to the two
//! values the simulation reads each step: a cursor position and a 2D
//! gravity-bias vector. Event sources (window toolkit, touch layer, device
//! motion API) stay outside the crate; they push the latest sample in and
//! the step consumes it, last value wins.
//!
//! ```ignore
//! sim.input_mut().set_cursor(Vec2::new(x, y), Vec2::new(width, height));
//! sim.input_mut().set_tilt(Vec2::new(-accel_x * 0.2, accel_y * 0.2));
//! ```

use glam::Vec2;

/// Pointer distance from the surface center is scaled by this factor to
/// produce the gravity bias.
const POINTER_BIAS_GAIN: f32 = 0.005;

/// Latest pointer and sensor state consumed by the simulation.
#[derive(Debug, Default)]
pub struct Input {
    cursor: Vec2,
    pointer_bias: Vec2,
    tilt: Vec2,
    sensor_enabled: bool,
}

impl Input {
    /// Create input state with the cursor at the origin and sensors enabled.
    pub fn new() -> Self {
        Self {
            sensor_enabled: true,
            ..Default::default()
        }
    }

    /// Record a pointer position in surface pixels.
    ///
    /// Also derives the pointer half of the gravity bias: displacement from
    /// the surface center scaled down so a pointer at a corner produces a
    /// gentle, not overwhelming, pull.
    pub fn set_cursor(&mut self, pos: Vec2, surface_size: Vec2) {
        self.cursor = pos;
        self.pointer_bias = (pos - surface_size * 0.5) * POINTER_BIAS_GAIN;
    }

    /// Record a device-tilt vector (pre-scaled by the sensor layer).
    ///
    /// Ignored while sensors are disabled.
    pub fn set_tilt(&mut self, tilt: Vec2) {
        if self.sensor_enabled {
            self.tilt = tilt;
        }
    }

    /// Enable or disable the motion sensor contribution.
    ///
    /// Disabling zeroes the stored tilt so a stale sample cannot keep
    /// pulling particles.
    pub fn set_sensor_enabled(&mut self, enabled: bool) {
        self.sensor_enabled = enabled;
        if !enabled {
            self.tilt = Vec2::ZERO;
        }
    }

    /// Latest cursor position in surface pixels.
    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Combined gravity bias: pointer displacement plus sensor tilt.
    #[inline]
    pub fn gravity_bias(&self) -> Vec2 {
        self.pointer_bias + self.tilt
    }

    /// Whether sensor tilt is currently applied.
    #[inline]
    pub fn sensor_enabled(&self) -> bool {
        self.sensor_enabled
    }
}
