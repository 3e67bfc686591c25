//! Stealth and anti-detection module
//!
//! This module turns a click configuration into human-looking input:
//! - Gaussian tap positions around the center or a drifting anchor
//! - Half-normal press durations and uniform reaction latency
//! - Burst/pause cadence between repeated taps

pub mod cadence;
pub mod coordinates;
pub mod humanize;
pub mod timing;

use rand::Rng;
use rand_distr::StandardNormal;

pub use cadence::{CadencePhase, CadenceScheduler, Interval};
pub use coordinates::CoordinateSynthesizer;
pub use humanize::Humanizer;
pub use timing::TimingSynthesizer;

/// Draw from N(0, 1)
fn standard_normal<R: Rng>(rng: &mut R) -> f32 {
    rng.sample(StandardNormal)
}

/// Uniform integer in `[min, max]`; a degenerate range yields `min`
fn uniform_ms<R: Rng>(rng: &mut R, min: u64, max: u64) -> u64 {
    if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Uniform float in `[min, max]`; a degenerate range yields `min`
fn uniform_f32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}
