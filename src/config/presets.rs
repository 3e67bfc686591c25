//! Cadence style presets
//!
//! Collapses the five cadence parameters into three named profiles for the
//! quick-pick selector.

use serde::{Deserialize, Serialize};

/// Named cadence profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClickStylePreset {
    /// Slow taps with frequent pauses
    Casual,
    /// Balanced cadence
    #[default]
    Natural,
    /// Very fast taps, rare pauses
    Frenzy,
}

impl ClickStylePreset {
    /// All presets in display order
    pub const ALL: [ClickStylePreset; 3] = [Self::Casual, Self::Natural, Self::Frenzy];

    pub fn burst_interval_min(&self) -> u64 {
        match self {
            Self::Casual => 200,
            Self::Natural => 60,
            Self::Frenzy => 30,
        }
    }

    pub fn burst_interval_max(&self) -> u64 {
        match self {
            Self::Casual => 400,
            Self::Natural => 150,
            Self::Frenzy => 80,
        }
    }

    pub fn pause_interval_min(&self) -> u64 {
        match self {
            Self::Casual => 500,
            Self::Natural => 300,
            Self::Frenzy => 100,
        }
    }

    pub fn pause_interval_max(&self) -> u64 {
        match self {
            Self::Casual => 1000,
            Self::Natural => 600,
            Self::Frenzy => 200,
        }
    }

    pub fn pause_probability(&self) -> f32 {
        match self {
            Self::Casual => 0.3,
            Self::Natural => 0.1,
            Self::Frenzy => 0.05,
        }
    }

    /// Short label for selectors
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Natural => "Natural",
            Self::Frenzy => "Frenzy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Casual => "Like enjoying a live stream",
            Self::Natural => "Like a devoted fan",
            Self::Frenzy => "High risk",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_ordered_ranges() {
        for preset in ClickStylePreset::ALL {
            assert!(preset.burst_interval_min() <= preset.burst_interval_max());
            assert!(preset.pause_interval_min() <= preset.pause_interval_max());
            assert!(preset.burst_interval_max() <= preset.pause_interval_max());
            assert!((0.0..=1.0).contains(&preset.pause_probability()));
        }
    }

    #[test]
    fn test_presets_get_slower_towards_casual() {
        assert!(
            ClickStylePreset::Casual.burst_interval_min()
                > ClickStylePreset::Natural.burst_interval_min()
        );
        assert!(
            ClickStylePreset::Natural.burst_interval_min()
                > ClickStylePreset::Frenzy.burst_interval_min()
        );
    }
}
