//! Frame to physics-step conversion

use std::time::Instant;

use crate::params::MAX_STEPS_PER_FRAME;

/// Decides how many physics steps a frame runs.
///
/// Without a rate every frame is exactly one step, so motion speed follows
/// the host's refresh rate. With a rate, elapsed wall time is converted into
/// whole steps and the remainder carried to the next frame.
#[derive(Debug, Clone)]
pub struct StepClock {
    rate: Option<f32>,
    last_frame: Option<Instant>,
    carry: f32,
}

impl StepClock {
    pub fn new(rate: Option<f32>) -> Self {
        Self {
            rate: rate.filter(|r| r.is_finite() && *r > 0.0),
            last_frame: None,
            carry: 0.0,
        }
    }

    /// Forget timing history; the next frame counts as the first
    pub fn reset(&mut self) {
        self.last_frame = None;
        self.carry = 0.0;
    }

    pub fn steps(&mut self, now: Instant) -> u32 {
        let Some(rate) = self.rate else {
            return 1;
        };

        let Some(last) = self.last_frame.replace(now) else {
            return 1;
        };

        let owed = now.saturating_duration_since(last).as_secs_f32() * rate + self.carry;
        let steps = owed.floor() as u32;
        if steps > MAX_STEPS_PER_FRAME {
            // Too far behind (stall, suspended window): drop the backlog
            self.carry = 0.0;
            MAX_STEPS_PER_FRAME
        } else {
            self.carry = owed - steps as f32;
            steps
        }
    }
}
