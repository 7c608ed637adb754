//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Frame scheduling (requestAnimationFrame on web, explicit loop natively)

pub mod frame;
pub mod time;

pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
pub use time::{Clock, ManualClock, SystemClock};
