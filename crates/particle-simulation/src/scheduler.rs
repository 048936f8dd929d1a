//! Frame scheduling
//!
//! The host owns the display-synchronised callback. The loop asks for a frame
//! with [`FrameScheduler::schedule`] and gets a handle back; the host later
//! hands that handle to [`crate::SimulationLoop::tick`]. Ticks carrying a
//! handle that is no longer pending are ignored, which is how cancellation
//! works.

/// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler {
    /// Request one future frame
    fn schedule(&mut self) -> FrameHandle;

    /// Withdraw a request; cancelling an unknown or already fired handle is a no-op
    fn cancel(&mut self, handle: FrameHandle);
}

/// Handle bookkeeping for scheduler implementations: at most one frame is
/// pending at a time and a new request replaces the old one.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Remove and return the pending frame, if any
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

/// A scheduler whose frames fire only when told to
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: FrameQueue,
    scheduled: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the pending frame, returning the handle to pass to `tick`
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.queue.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.queue.pending()
    }

    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.scheduled += 1;
        self.queue.schedule()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.queue.pending() == Some(handle) {
            self.cancelled += 1;
        }
        self.queue.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut queue = FrameQueue::new();
        let a = queue.schedule();
        let b = queue.schedule();
        assert_ne!(a, b);
        assert_eq!(queue.pending(), Some(b));
    }

    #[test]
    fn test_cancel_only_matching_handle() {
        let mut queue = FrameQueue::new();
        let old = queue.schedule();
        let current = queue.schedule();
        queue.cancel(old);
        assert_eq!(queue.pending(), Some(current));
        queue.cancel(current);
        assert_eq!(queue.pending(), None);
    }

    #[test]
    fn test_manual_fire_consumes_pending() {
        let mut scheduler = ManualScheduler::new();
        assert_eq!(scheduler.fire(), None);
        let handle = scheduler.schedule();
        assert_eq!(scheduler.fire(), Some(handle));
        assert_eq!(scheduler.fire(), None);
        assert_eq!(scheduler.scheduled_count(), 1);
    }

    #[test]
    fn test_manual_cancel_counts() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule();
        scheduler.cancel(handle);
        scheduler.cancel(handle);
        assert_eq!(scheduler.cancelled_count(), 1);
        assert_eq!(scheduler.fire(), None);
    }
}
