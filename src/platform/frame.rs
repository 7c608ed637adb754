//! Frame scheduling
//!
//! The game asks for "one more frame" and may cancel that request. Hosts
//! decide when the frame actually fires: the browser on its next repaint,
//! a native loop on its next iteration, a test whenever it likes.

/// Ticket for a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Something that can deliver frame callbacks
pub trait FrameScheduler {
    /// Ask for one frame callback
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Cooperative scheduler holding at most one pending request.
/// The host pulls it with `take_due` when it is ready to run a frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the pending request, if any
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}
