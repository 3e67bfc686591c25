//! Click configuration
//!
//! Every pixel-like distance here is expressed against the 1080x1920 reference
//! screen and rescaled at use time. Anchor ratios are already screen-relative.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::presets::ClickStylePreset;
use crate::android::input::REFERENCE_HEIGHT;
use crate::error::Result;

/// Largest reference distance a config may carry; nothing spans more than the screen
pub const MAX_REFERENCE_DISTANCE: f32 = REFERENCE_HEIGHT;

/// Complete parameter set for one clicking profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClickConfig {
    /// Stable identifier used by configuration stores
    pub id: String,
    /// Display name
    pub name: String,
    /// Creation time (ms since the Unix epoch)
    pub created_at: u64,
    /// Last update time (ms since the Unix epoch)
    pub updated_at: u64,

    /// Open the run with a tap near the screen center
    pub enable_center_tap: bool,
    /// Horizontal float range around the center (reference px)
    pub center_float_range_x: f32,
    /// Vertical float range around the center (reference px)
    pub center_float_range_y: f32,
    /// Extra hold time for the center tap (ms)
    pub center_tap_extra_duration: u64,

    /// Minimum reaction wait after the center tap (ms)
    pub reaction_time_min: u64,
    /// Maximum reaction wait after the center tap (ms)
    pub reaction_time_max: u64,

    /// Anchor X position as a fraction of screen width
    pub like_anchor_x_ratio: f32,
    /// Anchor Y position as a fraction of screen height
    pub like_anchor_y_ratio: f32,
    /// Per-tap jitter standard deviation around the anchor (reference px)
    pub like_jitter_radius: f32,

    /// Chance per tap that the anchor drifts (0.0-1.0)
    pub drift_probability: f32,
    /// Drift step standard deviation (reference px)
    pub drift_range: f32,

    /// Burst cadence bounds (ms)
    pub burst_interval_min: u64,
    pub burst_interval_max: u64,
    /// Pause cadence bounds (ms)
    pub pause_interval_min: u64,
    pub pause_interval_max: u64,
    /// Chance that the next interval is a pause (0.0-1.0)
    pub pause_probability: f32,

    /// Minimum press duration (ms)
    pub press_duration_base: u64,
    /// Scale of the half-normal tail added to the base press (ms)
    pub press_duration_variance: f32,

    /// Stop after this many taps (0 = unlimited)
    pub max_click_count: u32,
    /// Stop after this much run time in ms (0 = unlimited)
    pub max_run_duration: u64,

    /// Finger settle slide bounds per axis (reference px)
    pub micro_slide_min: f32,
    pub micro_slide_max: f32,

    /// Cadence preset last applied through [`ClickConfig::with_style`]
    pub style_preset: ClickStylePreset,
    /// Whether the anchor was placed with the visual scope editor
    pub position_set_by_scope: bool,
}

impl Default for ClickConfig {
    fn default() -> Self {
        let now = now_millis();
        let style = ClickStylePreset::default();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Default".to_string(),
            created_at: now,
            updated_at: now,
            enable_center_tap: true,
            center_float_range_x: 200.0,
            center_float_range_y: 400.0,
            center_tap_extra_duration: 50,
            reaction_time_min: 800,
            reaction_time_max: 1800,
            like_anchor_x_ratio: 0.85,
            like_anchor_y_ratio: 0.80,
            like_jitter_radius: 50.0,
            drift_probability: 0.1,
            drift_range: 5.0,
            burst_interval_min: style.burst_interval_min(),
            burst_interval_max: style.burst_interval_max(),
            pause_interval_min: style.pause_interval_min(),
            pause_interval_max: style.pause_interval_max(),
            pause_probability: style.pause_probability(),
            press_duration_base: 40,
            press_duration_variance: 20.0,
            max_click_count: 0,
            max_run_duration: 0,
            micro_slide_min: 2.0,
            micro_slide_max: 5.0,
            style_preset: style,
            position_set_by_scope: false,
        }
    }
}

impl ClickConfig {
    /// Parse a configuration from the host's JSON representation
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the host's JSON representation
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Return a copy with every numeric field forced into its valid domain
    ///
    /// Probabilities and ratios are clamped to [0, 1], distances to
    /// `[0, MAX_REFERENCE_DISTANCE]`, and any inverted `min > max` range
    /// collapses onto its minimum.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();

        cfg.center_float_range_x = distance(cfg.center_float_range_x);
        cfg.center_float_range_y = distance(cfg.center_float_range_y);
        cfg.like_jitter_radius = distance(cfg.like_jitter_radius);
        cfg.drift_range = distance(cfg.drift_range);
        cfg.press_duration_variance = non_negative(cfg.press_duration_variance);
        cfg.micro_slide_min = distance(cfg.micro_slide_min);
        cfg.micro_slide_max = distance(cfg.micro_slide_max).max(cfg.micro_slide_min);

        cfg.like_anchor_x_ratio = unit(cfg.like_anchor_x_ratio);
        cfg.like_anchor_y_ratio = unit(cfg.like_anchor_y_ratio);
        cfg.drift_probability = unit(cfg.drift_probability);
        cfg.pause_probability = unit(cfg.pause_probability);

        cfg.reaction_time_max = cfg.reaction_time_max.max(cfg.reaction_time_min);
        cfg.burst_interval_max = cfg.burst_interval_max.max(cfg.burst_interval_min);
        cfg.pause_interval_max = cfg.pause_interval_max.max(cfg.pause_interval_min);

        cfg
    }

    /// Apply a cadence preset, overwriting the burst/pause fields
    pub fn with_style(mut self, preset: ClickStylePreset) -> Self {
        self.burst_interval_min = preset.burst_interval_min();
        self.burst_interval_max = preset.burst_interval_max();
        self.pause_interval_min = preset.pause_interval_min();
        self.pause_interval_max = preset.pause_interval_max();
        self.pause_probability = preset.pause_probability();
        self.style_preset = preset;
        self
    }

    /// Re-target the anchor from the visual scope editor
    pub fn with_scope_target(mut self, x_ratio: f32, y_ratio: f32, jitter_radius: f32) -> Self {
        self.like_anchor_x_ratio = x_ratio;
        self.like_anchor_y_ratio = y_ratio;
        self.like_jitter_radius = jitter_radius;
        self.position_set_by_scope = true;
        self
    }

    /// Stamp the update time with the current wall clock
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

/// Wall-clock milliseconds since the Unix epoch
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn distance(value: f32) -> f32 {
    non_negative(value).min(MAX_REFERENCE_DISTANCE)
}
