//! # Particle Renderer
//!
//! Draws a particle field and its proximity links onto a canvas-like surface:
//! a recording surface for headless runs or a wgpu canvas for windows.

pub mod canvas;
pub mod proximity;
pub mod recording;
pub mod surface;
pub mod tessellate;
mod vertex;

pub use canvas::*;
pub use proximity::*;
pub use recording::*;
pub use surface::*;
pub use tessellate::{Mesh, Tessellator};
