//! Analyzer modules for blood-gas interpretation
//!
//! Each stage of the pipeline lives in its own module and returns a plain
//! result struct; `engine::AcidBaseAnalyzer` wires them together.

pub mod validation;
pub mod disorders;
pub mod compensation;
pub mod anion_gap;
pub mod electrolytes;
pub mod base_excess;

pub use validation::validate_sample;
pub use disorders::{classify_disorders, Disorder, DisorderList, DisorderPattern, PhBand};
pub use compensation::{evaluate_compensation, CompensationAssessment, CompensationPhase, ExpectedCompensation};
pub use anion_gap::{analyze_anion_gap, AnionGapAnalysis, AnionGapInterpretation, DeltaAnalysis, DeltaRatioBucket};
pub use electrolytes::{classify_electrolytes, Analyte, ElectrolyteFinding, Tier};
pub use base_excess::estimate_base_excess;

// Reference values shared by the validator, classifier and compensation rules

/// pH below this is acidemia
pub const PH_ACIDEMIA_BELOW: f64 = 7.35;
/// pH above this is alkalemia
pub const PH_ALKALEMIA_ABOVE: f64 = 7.45;

/// HCO3 below this is a metabolic acid load (mEq/L)
pub const HCO3_LOW: f64 = 22.0;
/// HCO3 above this is a metabolic base excess (mEq/L)
pub const HCO3_HIGH: f64 = 26.0;
/// pCO2 below this is hyperventilation (mmHg)
pub const PCO2_LOW: f64 = 35.0;
/// pCO2 above this is hypoventilation (mmHg)
pub const PCO2_HIGH: f64 = 45.0;

pub const NORMAL_PCO2_MMHG: f64 = 40.0;
pub const NORMAL_HCO3_MEQ: f64 = 24.0;
