//! What the backdrop draws on

use glam::Vec2;
use particle_physics::{Bounds, Particle, Rgba};

/// A canvas-like 2D target.
///
/// Coordinates are surface pixels with the origin in the top-left corner and
/// y growing downwards.
pub trait DrawingSurface {
    /// Current drawable size
    fn size(&self) -> Bounds;

    /// Erase everything drawn so far
    fn clear(&mut self);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);

    /// Change the drawable size; implementations may drop existing content
    fn resize(&mut self, width: f32, height: f32);
}

/// Things that know how to put themselves on a surface
pub trait Draw {
    fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S);
}

impl Draw for Particle {
    fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.draw_circle(self.position, self.radius, self.color);
    }
}
