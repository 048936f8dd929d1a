//! # Particle Simulation
//!
//! Drives a particle backdrop: frame scheduling, debounced resizing and the
//! update → render loop.

pub mod clock;
pub mod events;
pub mod params;
pub mod resize;
pub mod scheduler;
pub mod simulation;

pub use clock::*;
pub use events::*;
pub use params::*;
pub use resize::*;
pub use scheduler::*;
pub use simulation::*;
