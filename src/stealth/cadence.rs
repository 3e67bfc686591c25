//! Burst/pause cadence and stop limits

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::uniform_ms;
use crate::config::ClickConfig;

/// Cadence phase of the next inter-tap delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CadencePhase {
    /// Short delay inside a burst of taps
    Burst,
    /// Longer breather between bursts
    Pause,
}

/// Delay until the next tap and the phase it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub duration_ms: u64,
    pub phase: CadencePhase,
}

/// Picks inter-tap delays and applies the run limits
pub struct CadenceScheduler {
    config: ClickConfig,
    rng: StdRng,
}

impl CadenceScheduler {
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

    /// Draw the next delay: a pause with the configured probability, else a burst
    pub fn next_interval(&mut self) -> Interval {
        if self.rng.gen::<f32>() < self.config.pause_probability {
            Interval {
                duration_ms: uniform_ms(
                    &mut self.rng,
                    self.config.pause_interval_min,
                    self.config.pause_interval_max,
                ),
                phase: CadencePhase::Pause,
            }
        } else {
            Interval {
                duration_ms: uniform_ms(
                    &mut self.rng,
                    self.config.burst_interval_min,
                    self.config.burst_interval_max,
                ),
                phase: CadencePhase::Burst,
            }
        }
    }

    /// Whether either run limit has been reached; a zero limit is disabled
    pub fn should_stop(&self, click_count: u32, run_duration_ms: u64) -> bool {
        let max_clicks = self.config.max_click_count;
        let max_duration = self.config.max_run_duration;

        (max_clicks > 0 && click_count >= max_clicks)
            || (max_duration > 0 && run_duration_ms >= max_duration)
    }
}
