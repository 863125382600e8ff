//! Shared types and configuration for the terrawalk workspace.
//!
//! # Invariants
//! - Configuration defaults reproduce the reference landscape and player tuning.
//! - A validated [`WalkConfig`] never carries non-positive sizes, speeds or gravity.

pub mod config;
pub mod types;

pub use config::{ConfigError, PlayerConfig, TerrainConfig, WalkConfig};
pub use types::TerrainScale;
