//! Tap coordinate synthesis
//!
//! Center taps scatter normally around the middle of the screen. Like taps
//! jitter around a persistent anchor which itself drifts now and then, the
//! way a hand holding a phone slowly shifts posture.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{standard_normal, uniform_f32};
use crate::android::input::{Point, ScreenMetrics, TapPoint};
use crate::config::ClickConfig;

/// Generates center and anchor tap points for one screen
pub struct CoordinateSynthesizer {
    screen: ScreenMetrics,
    config: ClickConfig,
    anchor: Point,
    rng: StdRng,
}

impl CoordinateSynthesizer {
    /// Create a synthesizer with an entropy-seeded generator
    pub fn new(screen: ScreenMetrics, config: &ClickConfig) -> Self {
        Self::with_rng(screen, config, StdRng::from_entropy())
    }

    /// Create a synthesizer with a caller-supplied generator
    pub fn with_rng(screen: ScreenMetrics, config: &ClickConfig, rng: StdRng) -> Self {
        let mut synth = Self {
            screen,
            config: config.normalized(),
            anchor: Point::default(),
            rng,
        };
        synth.reset_anchor();
        synth
    }

    /// Replace the configuration and move the anchor back to its ratio position
    pub fn configure(&mut self, config: &ClickConfig) {
        self.config = config.normalized();
        self.reset_anchor();
    }

    /// Replace the configuration while keeping accumulated anchor drift
    pub fn set_config(&mut self, config: &ClickConfig) {
        self.config = config.normalized();
    }

    /// Force the anchor back to `screen size x (x ratio, y ratio)`
    pub fn reset_anchor(&mut self) {
        self.anchor = self
            .screen
            .at_ratio(self.config.like_anchor_x_ratio, self.config.like_anchor_y_ratio);
    }

    /// Current anchor position
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn screen(&self) -> ScreenMetrics {
        self.screen
    }

    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    /// Point near the screen center for the attention tap
    ///
    /// Each axis uses a standard deviation of a third of the scaled float
    /// range, so about 99.7% of samples land inside the range.
    pub fn center_tap_point(&mut self) -> TapPoint {
        let sigma_x = self.screen.scale_x(self.config.center_float_range_x) / 3.0;
        let sigma_y = self.screen.scale_y(self.config.center_float_range_y) / 3.0;

        let offset_x = standard_normal(&mut self.rng) * sigma_x;
        let offset_y = standard_normal(&mut self.rng) * sigma_y;

        let target = self.screen.clamp(self.screen.center().offset(offset_x, offset_y));
        self.tap_at(target)
    }

    /// Point around the anchor for a repeated tap
    ///
    /// May first drift the anchor in place; the drift persists across calls.
    pub fn like_tap_point(&mut self) -> TapPoint {
        if self.rng.gen::<f32>() < self.config.drift_probability {
            self.drift_anchor();
        }

        let radius = self.screen.scale_radius(self.config.like_jitter_radius);
        let jitter_x = standard_normal(&mut self.rng) * radius;
        let jitter_y = standard_normal(&mut self.rng) * radius;

        let target = self.screen.clamp(self.anchor.offset(jitter_x, jitter_y));
        self.tap_at(target)
    }

    fn drift_anchor(&mut self) {
        let amount = self.screen.scale_radius(self.config.drift_range);
        let dx = standard_normal(&mut self.rng) * amount;
        let dy = standard_normal(&mut self.rng) * amount;

        self.anchor = self.screen.clamp(self.anchor.offset(dx, dy));
        log::debug!("Anchor drifted to ({:.1}, {:.1})", self.anchor.x, self.anchor.y);
    }

    fn tap_at(&mut self, target: Point) -> TapPoint {
        TapPoint {
            x: target.x,
            y: target.y,
            slide: self.micro_slide(),
        }
    }

    /// Finger settle vector, uniform per axis within the scaled slide bounds
    fn micro_slide(&mut self) -> (f32, f32) {
        let min = self.screen.scale_radius(self.config.micro_slide_min);
        let max = self.screen.scale_radius(self.config.micro_slide_max);

        (
            uniform_f32(&mut self.rng, min, max),
            uniform_f32(&mut self.rng, min, max),
        )
    }
}
