//! The particle collection and the rectangle it lives in

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::forces::Attraction;
use crate::particle::{Particle, Rgba};
use crate::pointer::PointerTracker;

/// Size of the drawing surface the field is confined to
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether particles can be placed at all.
    ///
    /// Zero or negative widths, negative heights and non-finite values give an
    /// empty field. A zero height is allowed: particles then slide along y = 0.
    pub fn is_populatable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height >= 0.0
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Inclusive on all four edges
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// How many particles a population gets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopulationRule {
    /// `floor(width / pixels)` particles
    PerWidth(f32),
    /// Always the same number, whatever the size
    Fixed(usize),
}

impl PopulationRule {
    pub fn count(&self, bounds: Bounds) -> usize {
        if !bounds.is_populatable() {
            return 0;
        }

        let count = match *self {
            PopulationRule::PerWidth(pixels) if pixels > 0.0 => (bounds.width / pixels).floor() as usize,
            PopulationRule::PerWidth(_) => 0,
            PopulationRule::Fixed(count) => count,
        };

        if count > MAX_PARTICLES {
            log::debug!(
                "Population of {} for {}x{} capped at {}",
                count,
                bounds.width,
                bounds.height,
                MAX_PARTICLES
            );
            return MAX_PARTICLES;
        }
        count
    }
}

/// What freshly spawned particles look like
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub rule: PopulationRule,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Velocity components are drawn from `[-max_speed, max_speed)`
    pub max_speed: f32,
    pub color: Rgba,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            rule: PopulationRule::PerWidth(PIXELS_PER_PARTICLE),
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            max_speed: MAX_SPEED,
            color: Rgba::WHITE.with_alpha(PARTICLE_ALPHA),
        }
    }
}

impl SpawnParams {
    /// Fixed-size node layout with uniform one-pixel dots
    pub fn constellation() -> Self {
        Self {
            rule: PopulationRule::Fixed(CONSTELLATION_NODES),
            min_radius: CONSTELLATION_RADIUS,
            max_radius: CONSTELLATION_RADIUS,
            max_speed: MAX_SPEED,
            color: Rgba::WHITE.with_alpha(CONSTELLATION_ALPHA),
        }
    }
}

/// All particles of one backdrop.
///
/// The collection is only ever replaced wholesale by [`ParticleField::populate`];
/// individual particles are never added or removed.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    spawn: SpawnParams,
}

impl ParticleField {
    pub fn new(spawn: SpawnParams) -> Self {
        Self {
            particles: Vec::new(),
            bounds: Bounds::default(),
            spawn,
        }
    }

    /// A field holding exactly `particles`, e.g. a saved layout or a test fixture
    pub fn from_particles(spawn: SpawnParams, bounds: Bounds, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            bounds,
            spawn,
        }
    }

    /// Throw away every particle and spawn a new batch sized to `bounds`
    pub fn populate<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) {
        self.bounds = bounds;
        let count = self.spawn.rule.count(bounds);

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::random(bounds, &self.spawn, rng));
        }

        log::debug!(
            "Populated {} particles for {}x{}",
            count,
            bounds.width,
            bounds.height
        );
    }

    /// Advance every particle by one tick
    pub fn update(&mut self, pointer: &PointerTracker, attraction: &Attraction) {
        let bounds = self.bounds;
        let target = pointer.position();
        for particle in &mut self.particles {
            particle.update(bounds, target, attraction);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn spawn(&self) -> &SpawnParams {
        &self.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_population_count_follows_width() {
        let mut field = ParticleField::new(SpawnParams::default());
        for width in [0.0, 14.9, 15.0, 29.0, 1500.0, 1501.0, 1920.0] {
            field.populate(Bounds::new(width, 600.0), &mut rng());
            assert_eq!(field.len(), (width / 15.0_f32).floor() as usize, "width {width}");
        }
    }

    #[test]
    fn test_population_count_1920() {
        let mut field = ParticleField::new(SpawnParams::default());
        field.populate(Bounds::new(1920.0, 1080.0), &mut rng());
        assert_eq!(field.len(), 128);
    }

    #[test]
    fn test_invalid_bounds_give_empty_field() {
        let mut field = ParticleField::new(SpawnParams::default());
        for bounds in [
            Bounds::new(-100.0, 600.0),
            Bounds::new(600.0, -1.0),
            Bounds::new(f32::NAN, 600.0),
            Bounds::new(f32::INFINITY, 600.0),
        ] {
            field.populate(bounds, &mut rng());
            assert!(field.is_empty(), "{bounds:?}");
        }
    }

    #[test]
    fn test_fixed_rule_ignores_width() {
        let mut field = ParticleField::new(SpawnParams::constellation());
        field.populate(Bounds::new(300.0, 200.0), &mut rng());
        assert_eq!(field.len(), CONSTELLATION_NODES);
        assert_eq!(field.spawn().rule, PopulationRule::Fixed(CONSTELLATION_NODES));
        field.populate(Bounds::new(0.0, 200.0), &mut rng());
        assert!(field.is_empty());
    }

    #[test]
    fn test_repopulate_replaces_particles() {
        let mut field = ParticleField::new(SpawnParams::default());
        field.populate(Bounds::new(1500.0, 800.0), &mut rng());
        field.populate(Bounds::new(300.0, 200.0), &mut rng());
        assert_eq!(field.len(), 20);
        assert_eq!(field.bounds(), Bounds::new(300.0, 200.0));
        assert!(field.iter().all(|p| field.bounds().contains(p.position)));
    }

    #[test]
    fn test_seeded_population_is_deterministic() {
        let mut a = ParticleField::new(SpawnParams::default());
        let mut b = ParticleField::new(SpawnParams::default());
        a.populate(Bounds::new(900.0, 500.0), &mut StdRng::seed_from_u64(9));
        b.populate(Bounds::new(900.0, 500.0), &mut StdRng::seed_from_u64(9));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_update_keeps_particles_inside() {
        let bounds = Bounds::new(640.0, 360.0);
        let mut field = ParticleField::new(SpawnParams::default());
        field.populate(bounds, &mut rng());

        let mut pointer = PointerTracker::new();
        let attraction = Attraction::default();
        for step in 0..2000 {
            if step % 100 == 0 {
                pointer.on_pointer_move((step % 640) as f32, (step % 360) as f32);
            }
            field.update(&pointer, &attraction);
            assert!(field.iter().all(|p| bounds.contains(p.position)));
        }
        assert_eq!(field.len(), 42);
    }

    #[test]
    fn test_zero_height_is_populatable() {
        let mut field = ParticleField::new(SpawnParams::default());
        field.populate(Bounds::new(150.0, 0.0), &mut rng());
        assert_eq!(field.len(), 10);
        field.update(&PointerTracker::new(), &Attraction::default());
        assert!(field.iter().all(|p| p.position.y == 0.0));
    }

    #[test]
    fn test_huge_width_is_capped() {
        let huge = Bounds::new(1.0e20, 600.0);
        assert!(huge.is_populatable());
        assert_eq!(PopulationRule::PerWidth(15.0).count(huge), MAX_PARTICLES);
        assert_eq!(PopulationRule::Fixed(usize::MAX).count(huge), MAX_PARTICLES);

        let mut field = ParticleField::new(SpawnParams::default());
        field.populate(huge, &mut rng());
        assert_eq!(field.len(), MAX_PARTICLES);
        assert!(field.iter().all(|p| huge.contains(p.position)));
    }
}
