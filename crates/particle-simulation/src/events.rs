//! Events a host window feeds into the loop

/// Input the host forwards to a running backdrop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer position in surface pixels
    PointerMoved { x: f32, y: f32 },
    /// New viewport size in surface pixels
    Resized { width: f32, height: f32 },
}
