//! Clicking run module
//!
//! This module contains the run state, status observers and the controller
//! that sequences center taps, reaction waits and tap bursts.

pub mod controller;
pub mod observer;
pub mod state;

pub use controller::{Effect, GestureOutcome, RunController, StartOutcome, Ticket, RETRY_DELAY_MS};
pub use observer::{ObserverId, ObserverRegistry, StateObserver};
pub use state::{Indicator, RunState, RunStatus, StatusUpdate};
