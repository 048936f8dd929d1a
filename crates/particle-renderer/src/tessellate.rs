//! Turns circles and lines into triangles

use std::f32::consts::TAU;

use glam::Vec2;
use particle_physics::Rgba;

/// Narrowest line the GPU draws; thinner strokes are widened to this and
/// faded by the same factor so they keep roughly the same ink.
pub const MIN_LINE_WIDTH: f32 = 1.0;

const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 32;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(pos: Vec2, color: Rgba) -> Self {
        Self {
            pos: pos.to_array(),
            color: color.to_array(),
        }
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Accumulates shapes into one mesh until cleared
#[derive(Debug, Default)]
pub struct Tessellator {
    mesh: Mesh,
}

impl Tessellator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn clear(&mut self) {
        self.mesh.clear();
    }

    /// Filled disc as a triangle fan around its center
    pub fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }

        let segments = circle_segments(radius);
        let base = self.mesh.vertices.len() as u32;

        self.mesh.vertices.push(Vertex::new(center, color));
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * TAU;
            let rim = center + Vec2::from_angle(angle) * radius;
            self.mesh.vertices.push(Vertex::new(rim, color));
        }

        for i in 0..segments {
            let current = base + 1 + i;
            let next = base + 1 + (i + 1) % segments;
            self.mesh.indices.extend_from_slice(&[base, current, next]);
        }
    }

    /// Straight stroke as a quad; zero-length strokes are skipped
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        let Some(direction) = (to - from).try_normalize() else {
            return;
        };
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }

        let (width, color) = if width < MIN_LINE_WIDTH {
            (MIN_LINE_WIDTH, color.with_alpha(color.a * width / MIN_LINE_WIDTH))
        } else {
            (width, color)
        };

        let offset = direction.perp() * (width * 0.5);
        let base = self.mesh.vertices.len() as u32;

        self.mesh.vertices.extend_from_slice(&[
            Vertex::new(from + offset, color),
            Vertex::new(to + offset, color),
            Vertex::new(to - offset, color),
            Vertex::new(from - offset, color),
        ]);
        self.mesh
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// More segments for bigger discs, within a fixed range
fn circle_segments(radius: f32) -> u32 {
    ((radius * 4.0).ceil() as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}
