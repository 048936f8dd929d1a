//! # Particle Physics
//!
//! Point particles drifting inside a rectangle, bouncing off its edges and
//! drawn towards (or pushed away from) the pointer.

pub mod constants;
pub mod field;
pub mod forces;
pub mod particle;
pub mod pointer;

pub use constants::*;
pub use field::*;
pub use forces::*;
pub use particle::*;
pub use pointer::*;
