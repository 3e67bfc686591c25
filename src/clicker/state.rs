//! Run state representation
//!
//! Tracks the current phase of a clicking run and its counters.

use serde::{Deserialize, Serialize};

/// Phase of the clicking run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    /// Not running
    #[default]
    Idle,
    /// Attention tap near the center is in flight
    CenterTap,
    /// Waiting out the reaction delay after the center tap
    ReactionWait,
    /// Repeated taps with short delays
    LikeBurst,
    /// Repeated taps with a longer breather
    LikePause,
    /// Suspended by the user
    Paused,
}

impl RunStatus {
    /// Check if a run is actively producing taps
    pub fn is_running(&self) -> bool {
        !matches!(self, RunStatus::Idle | RunStatus::Paused)
    }

    /// Check if this is one of the repeated-tap phases
    pub fn is_liking(&self) -> bool {
        matches!(self, RunStatus::LikeBurst | RunStatus::LikePause)
    }

    /// Collapse to the three-color overlay indicator
    pub fn indicator(&self) -> Indicator {
        match self {
            RunStatus::Idle => Indicator::Idle,
            RunStatus::Paused => Indicator::Paused,
            _ => Indicator::Running,
        }
    }
}

/// Coarse status shown by the floating overlay ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    Idle,
    Running,
    Paused,
}

/// Counters and timestamps of the current run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub status: RunStatus,
    pub click_count: u32,
    /// Clock reading when the run started
    pub start_time: Option<u64>,
    /// Clock reading of the last completed tap
    pub last_click_time: Option<u64>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Elapsed run time at `now`, zero when no run has started
    pub fn run_duration(&self, now: u64) -> u64 {
        self.start_time
            .map(|start| now.saturating_sub(start))
            .unwrap_or(0)
    }

    pub fn update(&self) -> StatusUpdate {
        StatusUpdate {
            status: self.status,
            click_count: self.click_count,
        }
    }
}

/// What observers receive on every transition and every completed tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: RunStatus,
    pub click_count: u32,
}

impl StatusUpdate {
    pub fn indicator(&self) -> Indicator {
        self.status.indicator()
    }
}
