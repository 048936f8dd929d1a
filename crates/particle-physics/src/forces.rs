//! Pointer interaction and edge handling
//!
//! Both act directly on position rather than through velocity, so their
//! strength per tick is independent of the frame rate.

use glam::Vec2;

use crate::constants::{ATTRACTION_DIVISOR, ATTRACTION_RADIUS};

/// How particles react to a nearby pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerResponse {
    /// Step towards the pointer
    #[default]
    Attract,
    /// Step away from the pointer
    Repel,
    /// No reaction
    Ignore,
}

/// Pointer nudge parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    /// Only particles strictly closer than this react
    pub radius: f32,
    /// The particle→pointer vector is divided by this to get the step
    pub divisor: f32,
    pub response: PointerResponse,
}

impl Default for Attraction {
    fn default() -> Self {
        Self {
            radius: ATTRACTION_RADIUS,
            divisor: ATTRACTION_DIVISOR,
            response: PointerResponse::Attract,
        }
    }
}

impl Attraction {
    pub fn ignore() -> Self {
        Self {
            response: PointerResponse::Ignore,
            ..Self::default()
        }
    }

    /// Positional step for a particle at `position` with the pointer at `pointer`
    pub fn nudge(&self, position: Vec2, pointer: Vec2) -> Vec2 {
        let sign = match self.response {
            PointerResponse::Attract => 1.0,
            PointerResponse::Repel => -1.0,
            PointerResponse::Ignore => return Vec2::ZERO,
        };

        let delta = pointer - position;
        if delta.length() < self.radius && self.divisor != 0.0 {
            delta / self.divisor * sign
        } else {
            Vec2::ZERO
        }
    }
}

/// Elastic bounce along one axis of `[0, extent]`.
///
/// A coordinate that left the range is put back on the edge it crossed and
/// its velocity component is turned to point inwards.
pub fn reflect(position: &mut f32, velocity: &mut f32, extent: f32) {
    if *position < 0.0 {
        *position = 0.0;
        *velocity = velocity.abs();
    } else if *position > extent {
        *position = extent;
        *velocity = -velocity.abs();
    }
}
