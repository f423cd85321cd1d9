//! Shared utilities
//!
//! - Config: tolerances and band selection, loaded from JSON

pub mod config;

pub use config::{AnalysisConfig, CONFIG_ENV_VAR};
