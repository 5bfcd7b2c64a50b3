// Core modules
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod runner;
pub mod strategy;

// Re-export commonly used types
pub use error::{IndicatorError, Result, StrategyError};
pub use indicators::{compute_sam, compute_sam_detailed, SamOutput, SamParams};
pub use models::*;
pub use strategy::Strategy;
