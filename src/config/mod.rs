//! Configuration module
//!
//! Handles click profiles, cadence presets and the storage contract.

pub mod click_config;
pub mod presets;
pub mod store;

pub use click_config::ClickConfig;
pub use presets::ClickStylePreset;
pub use store::{ConfigStore, MemoryConfigStore};
