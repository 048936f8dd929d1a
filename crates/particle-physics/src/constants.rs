//! Tuning constants for the particle backdrop
//!
//! Distances are in surface pixels, speeds in pixels per tick.

/// One particle is spawned for every this many pixels of surface width
pub const PIXELS_PER_PARTICLE: f32 = 15.0;

/// Particles closer to the pointer than this are nudged
pub const ATTRACTION_RADIUS: f32 = 150.0;

/// The nudge is the particle→pointer vector divided by this
pub const ATTRACTION_DIVISOR: f32 = 50.0;

/// Particles closer than this are joined by a line
pub const LINK_DISTANCE: f32 = 100.0;

/// Smallest spawned radius
pub const MIN_RADIUS: f32 = 0.5;

/// Largest spawned radius (exclusive)
pub const MAX_RADIUS: f32 = 2.5;

/// Largest absolute spawned velocity component (exclusive)
pub const MAX_SPEED: f32 = 0.25;

/// Alpha of the default particle color
pub const PARTICLE_ALPHA: f32 = 0.5;

/// Upper limit on the particles of one field, whatever the surface size
pub const MAX_PARTICLES: usize = 10_000;

/// Node count of the fixed-size constellation layout
pub const CONSTELLATION_NODES: usize = 100;

/// Radius of every constellation node
pub const CONSTELLATION_RADIUS: f32 = 1.0;

/// Alpha of constellation nodes
pub const CONSTELLATION_ALPHA: f32 = 0.8;
