//! Error kinds recorded on an `AnalysisReport`
//!
//! The engine never returns these as `Err` from `analyze`. Validation errors
//! are collected on the report and gate the rest of the pipeline; skipped
//! computations are recorded next to the findings that could still be made.

use crate::sample::Parameter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected by the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Required gas value outside its plausibility band
    #[error("{parameter} {value}{} outside plausible range [{min}, {max}]", .parameter.unit_suffix())]
    OutOfRange {
        parameter: Parameter,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Optional measurement present but not a usable number
    #[error("{parameter} must be a finite, non-negative value (got {value})")]
    InvalidMeasurement { parameter: Parameter, value: f64 },

    /// Values individually plausible but jointly implausible
    #[error("{rule}")]
    Inconsistent { rule: Inconsistency },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum Inconsistency {
    #[error("incompatible: acidemia with low pCO2 and normal HCO3")]
    AcidemiaWithLowPco2NormalHco3,
    #[error("incompatible: alkalemia with high pCO2 and normal HCO3")]
    AlkalemiaWithHighPco2NormalHco3,
    #[error("extreme values with normal pH: review input")]
    ExtremeValuesWithNormalPh,
}

/// Derived quantity that could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ComputationSkipped {
    #[error("anion gap not computed: Na and Cl are both required")]
    MissingElectrolytes,
    #[error("delta ratio not computed: HCO3 equals 24 mEq/L (zero denominator)")]
    DegenerateDeltaDenominator,
}
