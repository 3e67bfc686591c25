//! Entropy Clicker - human-like tap automation core for Android
//!
//! This library turns a declarative click configuration into a stream of
//! taps whose positions, press durations and spacing statistically resemble
//! a person tapping a touch screen, and sequences those taps through a
//! pausable run state machine.
//!
//! ## Anti-Detection
//!
//! The `stealth` module provides the randomization: Gaussian positions around
//! a slowly drifting anchor, half-normal press durations and a burst/pause
//! cadence between taps.
//!
//! ## Hosting
//!
//! [`clicker::RunController`] performs no I/O. On Android the accessibility
//! service drives it through the JNI exports in [`android::bridge`]; elsewhere
//! [`runtime::Runner`] drives it on a worker thread against any
//! [`runtime::GestureDispatcher`].

pub mod android;
pub mod clicker;
pub mod config;
pub mod error;
pub mod runtime;
pub mod stealth;

pub use clicker::{RunController, RunState, RunStatus, StartOutcome, StatusUpdate};
pub use config::{ClickConfig, ClickStylePreset, ConfigStore, MemoryConfigStore};
pub use error::{ClickerError, Result};
pub use runtime::{GestureDispatcher, Runner, RunnerHandle};
