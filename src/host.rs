//! Window-backed frame scheduling

use std::sync::Arc;

use particle_simulation::{FrameHandle, FrameQueue, FrameScheduler};
use winit::window::Window;

/// Schedules frames through `Window::request_redraw`; the matching
/// `RedrawRequested` event fires the pending handle.
pub struct RedrawScheduler {
    window: Arc<Window>,
    queue: FrameQueue,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            queue: FrameQueue::new(),
        }
    }

    /// Take the pending frame for the redraw being handled. Redraws the
    /// system asks for on its own find nothing pending.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.queue.take()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let handle = self.queue.schedule();
        self.window.request_redraw();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        // An already requested redraw still arrives, but finds no handle
        self.queue.cancel(handle);
    }
}
