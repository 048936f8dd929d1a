//! Particle state and per-tick motion

use glam::Vec2;
use rand::Rng;

use crate::field::{Bounds, SpawnParams};
use crate::forces::{reflect, Attraction};

/// Straight (non-premultiplied) RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A single point of the backdrop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement per tick
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    /// Spawn somewhere inside `bounds` with a small random drift
    pub fn random<R: Rng + ?Sized>(bounds: Bounds, spawn: &SpawnParams, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height,
        );
        let velocity = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * spawn.max_speed,
            (rng.random::<f32>() * 2.0 - 1.0) * spawn.max_speed,
        );
        // Multiply rather than `random_range` so a fixed radius (min == max) is allowed
        let radius = spawn.min_radius + rng.random::<f32>() * (spawn.max_radius - spawn.min_radius);

        Self::new(position, velocity, radius, spawn.color)
    }

    /// Advance one tick.
    ///
    /// Drift by `velocity`, bounce off the edges of `bounds`, then apply the
    /// pointer nudge. An absent pointer counts as the origin.
    pub fn update(&mut self, bounds: Bounds, pointer: Option<Vec2>, attraction: &Attraction) {
        self.position += self.velocity;

        reflect(&mut self.position.x, &mut self.velocity.x, bounds.width);
        reflect(&mut self.position.y, &mut self.velocity.y, bounds.height);

        self.position += attraction.nudge(self.position, pointer.unwrap_or(Vec2::ZERO));

        // A pointer outside the surface must not drag particles out with it
        self.position = self.position.max(Vec2::ZERO).min(bounds.extent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::PointerResponse;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds::new(1500.0, 800.0);

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, Rgba::WHITE)
    }

    #[test]
    fn test_drift_without_pointer_nearby() {
        let mut p = Particle::new(Vec2::new(700.0, 400.0), Vec2::new(0.2, -0.1), 1.0, Rgba::WHITE);
        p.update(BOUNDS, Some(Vec2::new(100.0, 100.0)), &Attraction::default());
        assert!((p.position - Vec2::new(700.2, 399.9)).length() < 1e-3);
        assert_eq!(p.velocity, Vec2::new(0.2, -0.1));
    }

    #[test]
    fn test_reflects_off_right_edge() {
        let mut p = Particle::new(Vec2::new(1499.9, 400.0), Vec2::new(0.25, 0.0), 1.0, Rgba::WHITE);
        p.update(BOUNDS, Some(Vec2::new(0.0, 0.0)), &Attraction::default());
        assert!(p.velocity.x < 0.0);
        assert!(BOUNDS.contains(p.position));

        // Next tick heads back inside
        let before = p.position.x;
        p.update(BOUNDS, Some(Vec2::new(0.0, 0.0)), &Attraction::default());
        assert!(p.position.x < before);
    }

    #[test]
    fn test_reflects_off_top_edge() {
        let mut p = Particle::new(Vec2::new(700.0, 0.1), Vec2::new(0.0, -0.25), 1.0, Rgba::WHITE);
        p.update(BOUNDS, Some(Vec2::new(1400.0, 700.0)), &Attraction::default());
        assert!(p.velocity.y > 0.0);
        assert!(p.position.y >= 0.0);
    }

    #[test]
    fn test_attraction_at_distance_fifty() {
        let mut p = still(100.0, 100.0);
        p.update(BOUNDS, Some(Vec2::new(130.0, 140.0)), &Attraction::default());
        // delta (30, 40) → nudge (0.6, 0.8)
        assert!((p.position - Vec2::new(100.6, 100.8)).length() < 1e-4);
    }

    #[test]
    fn test_no_attraction_beyond_radius() {
        let mut p = still(100.0, 100.0);
        p.update(BOUNDS, Some(Vec2::new(100.0, 251.0)), &Attraction::default());
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_absent_pointer_pulls_towards_origin() {
        let mut p = still(30.0, 40.0);
        p.update(BOUNDS, None, &Attraction::default());
        assert!((p.position - Vec2::new(29.4, 39.2)).length() < 1e-4);
    }

    #[test]
    fn test_repel_pushes_away() {
        let attraction = Attraction {
            response: PointerResponse::Repel,
            ..Attraction::default()
        };
        let mut p = still(100.0, 100.0);
        p.update(BOUNDS, Some(Vec2::new(130.0, 140.0)), &attraction);
        assert!((p.position - Vec2::new(99.4, 99.2)).length() < 1e-4);
    }

    #[test]
    fn test_pointer_outside_surface_keeps_particle_inside() {
        let mut p = still(1.0, 1.0);
        p.update(BOUNDS, Some(Vec2::new(-100.0, -100.0)), &Attraction::default());
        assert!(BOUNDS.contains(p.position));
    }

    #[test]
    fn test_random_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let spawn = SpawnParams::default();
        for _ in 0..500 {
            let p = Particle::random(BOUNDS, &spawn, &mut rng);
            assert!(BOUNDS.contains(p.position));
            assert!(p.velocity.x.abs() <= spawn.max_speed);
            assert!(p.velocity.y.abs() <= spawn.max_speed);
            assert!(p.radius >= spawn.min_radius && p.radius <= spawn.max_radius);
            assert_eq!(p.color, spawn.color);
        }
    }

    #[test]
    fn test_fixed_radius_spawn() {
        let mut rng = StdRng::seed_from_u64(1);
        let spawn = SpawnParams::constellation();
        let p = Particle::random(BOUNDS, &spawn, &mut rng);
        assert_eq!(p.radius, spawn.min_radius);
    }
}
