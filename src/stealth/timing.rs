//! Press duration and reaction latency synthesis

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{standard_normal, uniform_ms};
use crate::config::ClickConfig;

/// Generates hold times and reaction waits
pub struct TimingSynthesizer {
    config: ClickConfig,
    rng: StdRng,
}

impl TimingSynthesizer {
    pub fn new(config: &ClickConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &ClickConfig, rng: StdRng) -> Self {
        Self {
            config: config.normalized(),
            rng,
        }
    }

    pub fn set_config(&mut self, config: &ClickConfig) {
        self.config = config.normalized();
    }

    /// Hold time: `base + |N(0, 1)| * variance`, truncated to whole ms
    ///
    /// Never shorter than the base, with an occasional slow press in the tail.
    pub fn press_duration(&mut self) -> u64 {
        let tail = standard_normal(&mut self.rng).abs() * self.config.press_duration_variance;
        self.config.press_duration_base.saturating_add(tail as u64)
    }

    /// Hold time for the attention tap, held slightly longer
    pub fn center_press_duration(&mut self) -> u64 {
        self.press_duration()
            .saturating_add(self.config.center_tap_extra_duration)
    }

    /// Wait between the attention tap and the first repeated tap
    pub fn reaction_time(&mut self) -> u64 {
        uniform_ms(
            &mut self.rng,
            self.config.reaction_time_min,
            self.config.reaction_time_max,
        )
    }
}
