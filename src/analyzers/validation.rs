//! Input Validation
//!
//! Physiological plausibility gate. Every check runs and every failure is
//! collected, so the caller sees all problems at once. An empty result means
//! the sample may be interpreted.
//!
//! Checks, in order:
//!   1. Range of the required gas values (pH, pCO2, HCO3)
//!   2. Optional measurements present but negative or non-finite
//!   3. Cross-consistency of the three gas values

use std::ops::RangeInclusive;

use crate::analyzers::disorders::PhBand;
use crate::analyzers::{HCO3_LOW, HCO3_HIGH, PCO2_LOW, PCO2_HIGH};
use crate::error::{Inconsistency, ValidationError};
use crate::sample::{BloodGasSample, Parameter};
use crate::utils::AnalysisConfig;

pub const PH_LIMITS: RangeInclusive<f64> = 6.8..=7.8;
pub const PCO2_LIMITS: RangeInclusive<f64> = 10.0..=130.0;
pub const HCO3_LIMITS: RangeInclusive<f64> = 5.0..=50.0;

/// Tighter operational bands (enabled by `strict_sanity_bands`)
pub const PCO2_SANITY_LIMITS: RangeInclusive<f64> = 10.0..=100.0;
pub const HCO3_SANITY_LIMITS: RangeInclusive<f64> = 5.0..=45.0;

/// With a normal pH, values outside these are treated as input errors
pub const NORMAL_PH_PCO2_LIMITS: RangeInclusive<f64> = 20.0..=70.0;
pub const NORMAL_PH_HCO3_LIMITS: RangeInclusive<f64> = 15.0..=35.0;

/// Validate a sample; never fails, returns the list of problems found
pub fn validate_sample(sample: &BloodGasSample, config: &AnalysisConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let (pco2_limits, hco3_limits) = if config.strict_sanity_bands {
        (PCO2_SANITY_LIMITS, HCO3_SANITY_LIMITS)
    } else {
        (PCO2_LIMITS, HCO3_LIMITS)
    };

    // STEP 1: Ranges (NaN fails `contains`)
    check_range(&mut errors, Parameter::Ph, sample.ph, &PH_LIMITS);
    check_range(&mut errors, Parameter::Pco2, sample.pco2, &pco2_limits);
    check_range(&mut errors, Parameter::Hco3, sample.hco3, &hco3_limits);

    // STEP 2: Optional measurements
    let optional = [
        (Parameter::Sodium, sample.na),
        (Parameter::Chloride, sample.cl),
        (Parameter::Potassium, sample.k),
        (Parameter::Lactate, sample.lactate),
        (Parameter::Albumin, Some(sample.albumin)),
    ];
    for (parameter, value) in optional {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                errors.push(ValidationError::InvalidMeasurement { parameter, value });
            }
        }
    }

    // STEP 3: Cross-consistency
    if let Some(rule) = check_consistency(sample.ph, sample.pco2, sample.hco3) {
        errors.push(ValidationError::Inconsistent { rule });
    }

    errors
}

fn check_range(
    errors: &mut Vec<ValidationError>,
    parameter: Parameter,
    value: f64,
    limits: &RangeInclusive<f64>,
) {
    if !limits.contains(&value) {
        errors.push(ValidationError::OutOfRange {
            parameter,
            value,
            min: *limits.start(),
            max: *limits.end(),
        });
    }
}

/// Jointly implausible gas values (at most one rule can fire per pH band)
pub fn check_consistency(ph: f64, pco2: f64, hco3: f64) -> Option<Inconsistency> {
    if !(ph.is_finite() && pco2.is_finite() && hco3.is_finite()) {
        return None;
    }

    match PhBand::from_ph(ph) {
        PhBand::Acidemic if pco2 < PCO2_LOW && hco3 >= HCO3_LOW => {
            Some(Inconsistency::AcidemiaWithLowPco2NormalHco3)
        }
        PhBand::Alkalemic if pco2 > PCO2_HIGH && hco3 <= HCO3_HIGH => {
            Some(Inconsistency::AlkalemiaWithHighPco2NormalHco3)
        }
        PhBand::Normal
            if !NORMAL_PH_PCO2_LIMITS.contains(&pco2) || !NORMAL_PH_HCO3_LIMITS.contains(&hco3) =>
        {
            Some(Inconsistency::ExtremeValuesWithNormalPh)
        }
        _ => None,
    }
}
