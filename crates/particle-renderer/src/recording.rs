//! A surface that remembers what was drawn on it
//!
//! Used for headless runs and for checking renderer output in tests.

use glam::Vec2;
use particle_physics::{Bounds, Rgba};

use crate::surface::DrawingSurface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Bounds,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Bounds::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Every command since creation, oldest first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued after the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn clear_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Clear))
    }

    pub fn resize_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Resize { .. }))
    }

    /// Drop the recorded history, keeping the size
    pub fn forget(&mut self) {
        self.commands.clear();
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Bounds {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = Bounds::new(width, height);
        self.commands.push(DrawCommand::Resize { width, height });
    }
}
