//! Pairwise collision resolution and wall bounces.
//!
//! Collisions use the 1-D elastic impulse formula in the collision-normal
//! frame: rotate both velocities so the normal lies on the x axis, exchange
//! momentum along that axis only, rotate back. Each outgoing velocity is
//! scaled by that particle's bounce coefficient and a fixed damping
//! constant so iterated resolution cannot gain energy from floating-point
//! noise. Overlapping pairs are separated by half the overlap each.

use crate::particle::Particle;
use crate::visuals::ParticleShape;
use glam::Vec2;

/// Fixed post-collision damping on top of per-particle bounce.
pub const COLLISION_DAMPING: f32 = 0.97;
/// Spin transfer asymmetry for non-circular pairs.
const SPIN_TRANSFER: f32 = 0.2;
/// Spin retention after hitting a wall.
const WALL_SPIN_DAMPING: f32 = 0.8;

/// Resolve a potential collision between two particles.
///
/// Returns `true` if the pair actually collided. Exactly coincident
/// particles are skipped: there is no collision normal to resolve along,
/// and the next step's forces will separate them.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle) -> bool {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let min_dist = a.collision_radius() + b.collision_radius();
    if dist_sq >= min_dist * min_dist || dist_sq == 0.0 {
        return false;
    }

    let dist = dist_sq.sqrt();
    let angle = delta.y.atan2(delta.x);
    let (sin, cos) = angle.sin_cos();

    // Rotate velocities into the collision-normal frame.
    let v1 = Vec2::new(
        a.vel.x * cos + a.vel.y * sin,
        a.vel.y * cos - a.vel.x * sin,
    );
    let v2 = Vec2::new(
        b.vel.x * cos + b.vel.y * sin,
        b.vel.y * cos - b.vel.x * sin,
    );

    // 1-D elastic exchange along the normal axis.
    let (m1, m2) = (a.mass(), b.mass());
    let m_sum = m1 + m2;
    let u1 = ((m1 - m2) * v1.x + 2.0 * m2 * v2.x) / m_sum;
    let u2 = ((m2 - m1) * v2.x + 2.0 * m1 * v1.x) / m_sum;

    // Rotate back, apply restitution and damping.
    a.vel = Vec2::new(u1 * cos - v1.y * sin, v1.y * cos + u1 * sin) * (a.bounce * COLLISION_DAMPING);
    b.vel = Vec2::new(u2 * cos - v2.y * sin, v2.y * cos + u2 * sin) * (b.bounce * COLLISION_DAMPING);

    // Push both out of the overlap, half each.
    let separation = delta / dist * ((min_dist - dist) * 0.5);
    a.pos -= separation;
    b.pos += separation;

    // Spin transfer is a stylistic effect, not physics: the pair's spins
    // converge to their average with the first particle gaining 20%.
    if a.shape != ParticleShape::Circle || b.shape != ParticleShape::Circle {
        let avg = (a.spin + b.spin) * 0.5;
        a.spin = avg * (1.0 + SPIN_TRANSFER);
        b.spin = avg * (1.0 - SPIN_TRANSFER);
    }

    true
}

/// Keep a particle inside the surface, treating the edges as walls at a
/// margin of one collision radius.
///
/// On penetration the position is clamped to the margin, the velocity
/// component is reflected and scaled by the bounce coefficient, and spin is
/// damped (wall impacts bleed rotational energy).
pub fn resolve_walls(p: &mut Particle, width: f32, height: f32) {
    let margin = p.collision_radius();

    if p.pos.x < margin {
        p.pos.x = margin;
        p.vel.x *= -p.bounce;
        p.spin *= WALL_SPIN_DAMPING;
    } else if p.pos.x > width - margin {
        p.pos.x = width - margin;
        p.vel.x *= -p.bounce;
        p.spin *= WALL_SPIN_DAMPING;
    }

    if p.pos.y < margin {
        p.pos.y = margin;
        p.vel.y *= -p.bounce;
        p.spin *= WALL_SPIN_DAMPING;
    } else if p.pos.y > height - margin {
        p.pos.y = height - margin;
        p.vel.y *= -p.bounce;
        p.spin *= WALL_SPIN_DAMPING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn particle(pos: Vec2, vel: Vec2, size: f32, bounce: f32) -> Particle {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut p = Particle::spawn(&SimConfig::default(), 800.0, 600.0, &mut rng);
        p.pos = pos;
        p.vel = vel;
        p.size = size;
        p.bounce = bounce;
        p
    }

    #[test]
    fn test_distant_pair_untouched() {
        let mut a = particle(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 10.0, 1.0);
        let mut b = particle(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0), 10.0, 1.0);
        let (pa, pb, va, vb) = (a.pos, b.pos, a.vel, b.vel);

        assert!(!resolve_pair(&mut a, &mut b));
        assert_eq!((a.pos, b.pos, a.vel, b.vel), (pa, pb, va, vb));
    }

    #[test]
    fn test_coincident_pair_skipped() {
        let mut a = particle(Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0), 10.0, 1.0);
        let mut b = particle(Vec2::new(50.0, 50.0), Vec2::new(-1.0, 0.0), 10.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b));
    }

    #[test]
    fn test_equal_mass_head_on_swaps_velocities() {
        // Two size-10 circles 15 apart, closing head on at ±5. Elastic
        // exchange with equal masses swaps the normal components, scaled by
        // bounce * damping.
        let mut a = particle(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), 10.0, 1.0);
        let mut b = particle(Vec2::new(15.0, 0.0), Vec2::new(-5.0, 0.0), 10.0, 1.0);

        assert!(resolve_pair(&mut a, &mut b));
        assert!((a.vel.x - (-5.0 * COLLISION_DAMPING)).abs() < 1e-4);
        assert!((b.vel.x - (5.0 * COLLISION_DAMPING)).abs() < 1e-4);
        assert!(a.vel.y.abs() < 1e-4 && b.vel.y.abs() < 1e-4);

        // Positional correction leaves them exactly touching.
        assert!(((b.pos - a.pos).length() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_momentum_conserved_before_damping() {
        // With bounce 1.0, undo the known damping factor and check the raw
        // exchange conserved momentum along the normal.
        let mut a = particle(Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0), 10.0, 1.0);
        let mut b = particle(Vec2::new(12.0, 0.0), Vec2::new(-1.0, 0.0), 4.0, 1.0);
        let before = a.mass() * a.vel.x + b.mass() * b.vel.x;

        assert!(resolve_pair(&mut a, &mut b));
        let after = (a.mass() * a.vel.x + b.mass() * b.vel.x) / COLLISION_DAMPING;
        assert!((before - after).abs() < 1e-3);
    }

    #[test]
    fn test_shape_factor_widens_collision() {
        // 25 apart: two size-10 circles (radii sum 20) miss, but two
        // size-10 squares (radii sum 20 * sqrt(2) ≈ 28.3) overlap.
        let mut a = particle(Vec2::new(0.0, 0.0), Vec2::ZERO, 10.0, 1.0);
        let mut b = particle(Vec2::new(25.0, 0.0), Vec2::ZERO, 10.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b));

        a.shape = ParticleShape::Square;
        b.shape = ParticleShape::Square;
        assert!(resolve_pair(&mut a, &mut b));
    }

    #[test]
    fn test_spin_transfer_only_for_non_circles() {
        let mut a = particle(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 10.0, 1.0);
        let mut b = particle(Vec2::new(15.0, 0.0), Vec2::new(-1.0, 0.0), 10.0, 1.0);
        a.spin = 1.0;
        b.spin = 0.0;
        resolve_pair(&mut a, &mut b);
        // Circles keep their spins.
        assert_eq!(a.spin, 1.0);
        assert_eq!(b.spin, 0.0);

        let mut c = particle(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 10.0, 1.0);
        let mut d = particle(Vec2::new(15.0, 0.0), Vec2::new(-1.0, 0.0), 10.0, 1.0);
        c.shape = ParticleShape::Square;
        c.spin = 1.0;
        d.spin = 0.0;
        resolve_pair(&mut c, &mut d);
        assert!((c.spin - 0.6).abs() < 1e-6); // avg 0.5 * 1.2
        assert!((d.spin - 0.4).abs() < 1e-6); // avg 0.5 * 0.8
    }

    #[test]
    fn test_walls_contain_particle() {
        let mut p = particle(Vec2::new(-5.0, 700.0), Vec2::new(-2.0, 3.0), 10.0, 0.85);
        p.spin = 1.0;
        resolve_walls(&mut p, 800.0, 600.0);

        let margin = p.collision_radius();
        assert_eq!(p.pos.x, margin);
        assert_eq!(p.pos.y, 600.0 - margin);
        // Both components reflected and scaled by bounce.
        assert!((p.vel.x - 2.0 * 0.85).abs() < 1e-6);
        assert!((p.vel.y - (-3.0 * 0.85)).abs() < 1e-6);
        // Spin damped once per wall hit.
        assert!((p.spin - 0.8 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_interior_particle_untouched_by_walls() {
        let mut p = particle(Vec2::new(400.0, 300.0), Vec2::new(1.0, 1.0), 10.0, 0.85);
        let (pos, vel) = (p.pos, p.vel);
        resolve_walls(&mut p, 800.0, 600.0);
        assert_eq!(p.pos, pos);
        assert_eq!(p.vel, vel);
    }
}
