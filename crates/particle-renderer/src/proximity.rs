//! Particles plus the lines joining close neighbours

use particle_physics::{ParticleField, Rgba, LINK_DISTANCE};

use crate::surface::{Draw, DrawingSurface};

/// Appearance of the lines between neighbouring particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    /// Pairs at or beyond this distance are not joined
    pub distance: f32,
    /// Base color; its alpha is scaled by the distance falloff
    pub color: Rgba,
    pub width: f32,
    /// Draw the links before the particles so dots sit on top
    pub below_particles: bool,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            distance: LINK_DISTANCE,
            color: Rgba::WHITE,
            width: 1.0,
            below_particles: false,
        }
    }
}

impl LinkStyle {
    pub fn constellation() -> Self {
        Self {
            width: 0.5,
            below_particles: true,
            ..Self::default()
        }
    }
}

/// What one frame put on the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub particles: usize,
    pub links: usize,
}

/// Opacity of a link of length `distance`: 1 at zero, falling linearly to 0
/// at `threshold`. `None` when the pair is too far apart to be joined.
pub fn link_opacity(distance: f32, threshold: f32) -> Option<f32> {
    (distance < threshold).then(|| 1.0 - distance / threshold)
}

#[derive(Debug, Clone, Default)]
pub struct ProximityRenderer {
    style: LinkStyle,
}

impl ProximityRenderer {
    pub fn new(style: LinkStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &LinkStyle {
        &self.style
    }

    /// Redraw the whole field.
    ///
    /// Every unordered pair is checked, which is quadratic in the particle
    /// count. Nothing is drawn, not even the clear, when the field has no
    /// usable bounds.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        field: &ParticleField,
    ) -> RenderStats {
        if !field.bounds().is_populatable() {
            return RenderStats::default();
        }

        surface.clear();

        let links = if self.style.below_particles {
            let links = self.draw_links(surface, field);
            self.draw_particles(surface, field);
            links
        } else {
            self.draw_particles(surface, field);
            self.draw_links(surface, field)
        };

        RenderStats {
            particles: field.len(),
            links,
        }
    }

    fn draw_particles<S: DrawingSurface + ?Sized>(&self, surface: &mut S, field: &ParticleField) {
        for particle in field.iter() {
            particle.draw(surface);
        }
    }

    fn draw_links<S: DrawingSurface + ?Sized>(&self, surface: &mut S, field: &ParticleField) -> usize {
        let particles = field.particles();
        let mut links = 0;

        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if let Some(opacity) = link_opacity(distance, self.style.distance) {
                    let color = self.style.color.with_alpha(self.style.color.a * opacity);
                    surface.draw_line(a.position, b.position, color, self.style.width);
                    links += 1;
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use glam::Vec2;
    use particle_physics::{Bounds, Particle, SpawnParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lines(surface: &RecordingSurface) -> Vec<(Vec2, Vec2, Rgba, f32)> {
        surface
            .last_frame()
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => Some((from, to, color, width)),
                _ => None,
            })
            .collect()
    }

    /// A field whose particles sit exactly where the test wants them
    fn field_at(positions: &[Vec2]) -> ParticleField {
        let particles = positions
            .iter()
            .map(|&p| Particle::new(p, Vec2::ZERO, 1.0, Rgba::WHITE))
            .collect();
        ParticleField::from_particles(
            SpawnParams::default(),
            Bounds::new(1000.0, 1000.0),
            particles,
        )
    }

    #[test]
    fn test_link_opacity_falloff() {
        assert_eq!(link_opacity(0.0, 100.0), Some(1.0));
        assert_eq!(link_opacity(50.0, 100.0), Some(0.5));
        assert_eq!(link_opacity(100.0, 100.0), None);
        assert_eq!(link_opacity(150.0, 100.0), None);

        let faint = link_opacity(99.999, 100.0).unwrap();
        assert!(faint > 0.0 && (faint - 0.00001).abs() < 1e-5);
    }

    #[test]
    fn test_pair_at_threshold_is_not_linked() {
        let field = field_at(&[Vec2::new(100.0, 500.0), Vec2::new(200.0, 500.0)]);
        let mut surface = RecordingSurface::new(1000.0, 1000.0);
        let stats = ProximityRenderer::default().render(&mut surface, &field);

        assert_eq!(stats, RenderStats { particles: 2, links: 0 });
        assert!(lines(&surface).is_empty());
    }

    #[test]
    fn test_close_pair_is_linked_with_falloff() {
        let field = field_at(&[Vec2::new(100.0, 500.0), Vec2::new(150.0, 500.0)]);
        let mut surface = RecordingSurface::new(1000.0, 1000.0);
        let stats = ProximityRenderer::default().render(&mut surface, &field);

        assert_eq!(stats.links, 1);
        let drawn = lines(&surface);
        assert_eq!(drawn.len(), 1);
        let (_, _, color, width) = drawn[0];
        assert!((color.a - 0.5).abs() < 1e-3);
        assert_eq!(width, 1.0);
    }

    #[test]
    fn test_every_close_pair_once() {
        // Three particles within 100 of each other, one far away
        let field = field_at(&[
            Vec2::new(100.0, 100.0),
            Vec2::new(130.0, 100.0),
            Vec2::new(100.0, 130.0),
            Vec2::new(900.0, 900.0),
        ]);
        let mut surface = RecordingSurface::new(1000.0, 1000.0);
        let stats = ProximityRenderer::default().render(&mut surface, &field);

        assert_eq!(stats, RenderStats { particles: 4, links: 3 });
        for (from, to, color, _) in lines(&surface) {
            assert_ne!(from, to);
            assert!(color.a > 0.0 && color.a <= 1.0);
        }
    }

    #[test]
    fn test_frame_layout_clear_then_particles_then_links() {
        let field = field_at(&[Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)]);
        let mut surface = RecordingSurface::new(1000.0, 1000.0);
        ProximityRenderer::default().render(&mut surface, &field);

        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::Circle { .. }));
        assert!(matches!(commands[2], DrawCommand::Circle { .. }));
        assert!(matches!(commands[3], DrawCommand::Line { .. }));
    }

    #[test]
    fn test_constellation_draws_links_first() {
        let field = field_at(&[Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)]);
        let mut surface = RecordingSurface::new(1000.0, 1000.0);
        let renderer = ProximityRenderer::new(LinkStyle::constellation());
        assert!(renderer.style().below_particles);
        renderer.render(&mut surface, &field);

        let commands = surface.commands();
        assert!(matches!(commands[1], DrawCommand::Line { width, .. } if width == 0.5));
        assert!(matches!(commands[2], DrawCommand::Circle { .. }));
    }

    #[test]
    fn test_unusable_bounds_draw_nothing() {
        let mut field = ParticleField::new(SpawnParams::default());
        field.populate(Bounds::new(0.0, 0.0), &mut StdRng::seed_from_u64(1));
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let stats = ProximityRenderer::default().render(&mut surface, &field);

        assert_eq!(stats, RenderStats::default());
        assert!(surface.commands().is_empty());
    }
}
