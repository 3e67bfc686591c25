//! Host runtime
//!
//! Clocks, the gesture dispatcher contract and the threaded run loop that
//! executes controller effects.

pub mod clock;
pub mod dispatcher;
pub mod runner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::GestureDispatcher;
pub use runner::{GestureReply, Runner, RunnerHandle};
