//! Last known pointer position

use glam::Vec2;

/// Remembers where the pointer was last seen.
///
/// Only the latest position matters: moves between two ticks overwrite each
/// other and only the last one is seen by the next update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.position = Some(Vec2::new(x, y));
    }

    /// `None` until the first move has been reported
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_until_first_move() {
        let pointer = PointerTracker::new();
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut pointer = PointerTracker::new();
        pointer.on_pointer_move(10.0, 20.0);
        pointer.on_pointer_move(30.0, 40.0);
        pointer.on_pointer_move(750.0, 400.0);
        assert_eq!(pointer.position(), Some(Vec2::new(750.0, 400.0)));
    }
}
