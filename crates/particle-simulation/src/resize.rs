//! Debounced reaction to viewport changes

use std::time::{Duration, Instant};

use particle_physics::Bounds;

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    viewport: Bounds,
    deadline: Instant,
}

/// Collapses a burst of resize notifications into one.
///
/// Each notification replaces the pending viewport and restarts the quiet
/// period; [`ResizeCoordinator::poll`] hands the viewport out once the period
/// has passed without another notification.
#[derive(Debug, Clone)]
pub struct ResizeCoordinator {
    delay: Duration,
    pending: Option<PendingResize>,
}

impl ResizeCoordinator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn notify_resize(&mut self, viewport: Bounds, now: Instant) {
        if self.pending.is_some() {
            log::trace!("Resize to {}x{} restarts debounce", viewport.width, viewport.height);
        }

        self.pending = Some(PendingResize {
            viewport,
            deadline: now + self.delay,
        });
    }

    /// The viewport to apply, once its quiet period is over
    pub fn poll(&mut self, now: Instant) -> Option<Bounds> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.viewport)
            }
            _ => None,
        }
    }

    /// When the pending resize becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop a pending resize without applying it
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
