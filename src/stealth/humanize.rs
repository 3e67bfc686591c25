//! Human behavior simulation for tap automation
//!
//! Bundles the coordinate, timing and cadence generators behind one handle so
//! the run controller can swap configurations on all three at once.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::cadence::{CadenceScheduler, Interval};
use super::coordinates::CoordinateSynthesizer;
use super::timing::TimingSynthesizer;
use crate::android::input::{Gesture, ScreenMetrics, TapKind};
use crate::config::ClickConfig;

/// Humanizer for generating realistic taps and delays
pub struct Humanizer {
    coordinates: CoordinateSynthesizer,
    timing: TimingSynthesizer,
    cadence: CadenceScheduler,
}

impl Humanizer {
    /// Create a humanizer seeded from system entropy
    pub fn new(screen: ScreenMetrics, config: &ClickConfig) -> Self {
        Self {
            coordinates: CoordinateSynthesizer::new(screen, config),
            timing: TimingSynthesizer::new(config),
            cadence: CadenceScheduler::new(config),
        }
    }

    /// Create a reproducible humanizer
    pub fn with_seed(screen: ScreenMetrics, config: &ClickConfig, seed: u64) -> Self {
        Self {
            coordinates: CoordinateSynthesizer::with_rng(
                screen,
                config,
                StdRng::seed_from_u64(seed),
            ),
            timing: TimingSynthesizer::with_rng(config, StdRng::seed_from_u64(seed.wrapping_add(1))),
            cadence: CadenceScheduler::with_rng(config, StdRng::seed_from_u64(seed.wrapping_add(2))),
        }
    }

    /// Apply a configuration for a fresh run, re-deriving the anchor
    pub fn configure(&mut self, config: &ClickConfig) {
        self.coordinates.configure(config);
        self.timing.set_config(config);
        self.cadence.set_config(config);
    }

    /// Apply a configuration mid-run without disturbing the anchor
    pub fn update_config(&mut self, config: &ClickConfig) {
        self.coordinates.set_config(config);
        self.timing.set_config(config);
        self.cadence.set_config(config);
    }

    /// Attention tap stroke near the screen center
    pub fn center_tap(&mut self) -> Gesture {
        let point = self.coordinates.center_tap_point();
        let duration = self.timing.center_press_duration();
        Gesture::tap(TapKind::Center, point, duration)
    }

    /// Repeated tap stroke around the anchor
    pub fn like_tap(&mut self) -> Gesture {
        let point = self.coordinates.like_tap_point();
        let duration = self.timing.press_duration();
        Gesture::tap(TapKind::Like, point, duration)
    }

    pub fn reaction_time(&mut self) -> u64 {
        self.timing.reaction_time()
    }

    pub fn next_interval(&mut self) -> Interval {
        self.cadence.next_interval()
    }

    pub fn should_stop(&self, click_count: u32, run_duration_ms: u64) -> bool {
        self.cadence.should_stop(click_count, run_duration_ms)
    }

    pub fn coordinates(&self) -> &CoordinateSynthesizer {
        &self.coordinates
    }

    /// Move the anchor back to the applied configuration's ratio position
    pub fn reset_anchor(&mut self) {
        self.coordinates.reset_anchor();
    }
}
