//! Android integration module
//!
//! Screen geometry and gesture descriptions, plus the JNI bindings used by
//! the Android Accessibility Service.

pub mod bridge;
pub mod input;

pub use bridge::Bridge;
pub use input::{Gesture, Point, ScreenMetrics, TapKind, TapPoint};
