//! Gesture injection contract

use super::runner::GestureReply;
use crate::android::input::Gesture;

/// Performs the actual input injection
///
/// Implementations may finish a gesture synchronously or hand the reply to
/// another thread; the runner accepts the outcome whenever it arrives.
pub trait GestureDispatcher: Send {
    /// Whether gestures can be injected right now
    fn is_ready(&self) -> bool {
        true
    }

    /// Inject `gesture` and eventually resolve `reply`
    ///
    /// Dropping the reply without resolving it leaves the run waiting until
    /// it is paused or stopped.
    fn dispatch(&mut self, gesture: Gesture, reply: GestureReply);
}
