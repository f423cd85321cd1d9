//! Engine Configuration
//!
//! Decision tolerances and plausibility-band selection for the analyzer.
//! Every field falls back to its default, so a partial JSON file (or no file
//! at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "ACID_BASE_CONFIG";

/// Allowed |observed - expected| pCO2 in metabolic disorders (mmHg)
pub const DEFAULT_PCO2_TOLERANCE_MMHG: f64 = 5.0;

/// Allowed |observed - expected| HCO3 in respiratory disorders (mEq/L).
/// Chosen default; the classic rule set gives no tolerance for this branch.
pub const DEFAULT_HCO3_TOLERANCE_MEQ: f64 = 3.0;

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Winters'-type check: beyond this, compensation is inadequate
    pub pco2_tolerance_mmhg: f64,

    /// Expected-HCO3 check for respiratory disorders
    pub hco3_tolerance_meq: f64,

    /// Use operational bands (pCO2 10-100, HCO3 5-45) instead of the
    /// physiological limits (pCO2 10-130, HCO3 5-50)
    pub strict_sanity_bands: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pco2_tolerance_mmhg: DEFAULT_PCO2_TOLERANCE_MMHG,
            hco3_tolerance_meq: DEFAULT_HCO3_TOLERANCE_MEQ,
            strict_sanity_bands: false,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis config: {:?}", path))?;

        let config: AnalysisConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse analysis config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `ACID_BASE_CONFIG` if set, defaults otherwise
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.pco2_tolerance_mmhg.is_finite() && self.pco2_tolerance_mmhg > 0.0) {
            anyhow::bail!(
                "pco2_tolerance_mmhg must be a positive number (got {})",
                self.pco2_tolerance_mmhg
            );
        }
        if !(self.hco3_tolerance_meq.is_finite() && self.hco3_tolerance_meq > 0.0) {
            anyhow::bail!(
                "hco3_tolerance_meq must be a positive number (got {})",
                self.hco3_tolerance_meq
            );
        }
        Ok(())
    }
}
