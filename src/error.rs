//! Error types for the clicker core
//!
//! The run state machine itself never fails: malformed numbers are clamped and
//! out-of-order commands are ignored. These errors cover the edges around it,
//! where configuration arrives as JSON and hosts talk to the worker thread.

/// Errors surfaced by configuration parsing, stores and host integration
#[derive(Debug, thiserror::Error)]
pub enum ClickerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("Invalid screen size {width}x{height}")]
    InvalidScreenSize { width: u32, height: u32 },
    #[error("Configuration not found: {0}")]
    ConfigNotFound(String),
    #[error("Clicker core not initialized")]
    NotInitialized,
    #[error("Runner has shut down")]
    RunnerClosed,
}

pub type Result<T> = std::result::Result<T, ClickerError>;
