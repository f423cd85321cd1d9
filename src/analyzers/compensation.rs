//! Compensation Evaluation
//!
//! For a simple disorder, computes the expected response of the opposite
//! system and checks whether the observed value lies within tolerance.
//! A failed check implies a second (or third) process and names it.
//!
//! Formulas:
//! - Metabolic acidosis: expected pCO2 = 1.5 × HCO3 + 8 (Winters)
//! - Metabolic alkalosis: expected pCO2 = 0.7 × HCO3 + 21
//! - Respiratory acidosis: HCO3 = 24 + slope × |pCO2 − 40|,
//!   slope 1/10 acute, 3.5/10 chronic
//! - Respiratory alkalosis: HCO3 = 24 − slope × |pCO2 − 40|,
//!   slope 2/10 acute, 5/10 chronic
//!
//! Acute vs chronic is decided by |pCO2 − 40| ≤ 10 mmHg (acute).

use serde::{Deserialize, Serialize};

use crate::analyzers::disorders::{Disorder, DisorderList};
use crate::analyzers::{NORMAL_HCO3_MEQ, NORMAL_PCO2_MMHG};
use crate::sample::{BloodGasSample, Unit};
use crate::utils::AnalysisConfig;

pub const WINTERS_SLOPE: f64 = 1.5;
pub const WINTERS_INTERCEPT: f64 = 8.0;
pub const ALKALOSIS_PCO2_SLOPE: f64 = 0.7;
pub const ALKALOSIS_PCO2_INTERCEPT: f64 = 21.0;

/// mEq/L HCO3 per mmHg pCO2
pub const ACUTE_RESP_ACIDOSIS_SLOPE: f64 = 1.0 / 10.0;
pub const CHRONIC_RESP_ACIDOSIS_SLOPE: f64 = 3.5 / 10.0;
pub const ACUTE_RESP_ALKALOSIS_SLOPE: f64 = 2.0 / 10.0;
pub const CHRONIC_RESP_ALKALOSIS_SLOPE: f64 = 5.0 / 10.0;

/// |pCO2 − 40| up to this is treated as acute
pub const ACUTE_MAX_DELTA_PCO2: f64 = 10.0;

/// Time course assumed for a respiratory disorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationPhase {
    Acute,
    Chronic,
}

/// Expected value of the compensating variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedCompensation {
    pub value: f64,
    pub unit: Unit,
}

/// Result of the compensation check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationAssessment {
    /// The simple disorder being checked
    pub primary: Disorder,
    pub expected: ExpectedCompensation,
    /// Observed value of the compensating variable (pCO2 or HCO3)
    pub observed: f64,
    pub tolerance: f64,
    /// Respiratory disorders only
    pub phase: Option<CompensationPhase>,
    pub adequate: bool,
    /// Extra process implied by inadequate compensation
    pub additional_disorder: Option<Disorder>,
}

impl CompensationAssessment {
    /// observed − expected
    pub fn deviation(&self) -> f64 {
        self.observed - self.expected.value
    }
}

/// Expected compensation for a primary disorder
pub fn expected_compensation(
    primary: Disorder,
    sample: &BloodGasSample,
) -> (ExpectedCompensation, Option<CompensationPhase>) {
    match primary {
        Disorder::MetabolicAcidosis => (
            ExpectedCompensation {
                value: WINTERS_SLOPE * sample.hco3 + WINTERS_INTERCEPT,
                unit: Unit::MmHg,
            },
            None,
        ),
        Disorder::MetabolicAlkalosis => (
            ExpectedCompensation {
                value: ALKALOSIS_PCO2_SLOPE * sample.hco3 + ALKALOSIS_PCO2_INTERCEPT,
                unit: Unit::MmHg,
            },
            None,
        ),
        Disorder::RespiratoryAcidosis | Disorder::RespiratoryAlkalosis => {
            let delta_pco2 = (sample.pco2 - NORMAL_PCO2_MMHG).abs();
            let phase = if delta_pco2 <= ACUTE_MAX_DELTA_PCO2 {
                CompensationPhase::Acute
            } else {
                CompensationPhase::Chronic
            };

            let shift = match (primary, phase) {
                (Disorder::RespiratoryAcidosis, CompensationPhase::Acute) => {
                    ACUTE_RESP_ACIDOSIS_SLOPE * delta_pco2
                }
                (Disorder::RespiratoryAcidosis, CompensationPhase::Chronic) => {
                    CHRONIC_RESP_ACIDOSIS_SLOPE * delta_pco2
                }
                (_, CompensationPhase::Acute) => -ACUTE_RESP_ALKALOSIS_SLOPE * delta_pco2,
                (_, CompensationPhase::Chronic) => -CHRONIC_RESP_ALKALOSIS_SLOPE * delta_pco2,
            };

            (
                ExpectedCompensation {
                    value: NORMAL_HCO3_MEQ + shift,
                    unit: Unit::MeqPerL,
                },
                Some(phase),
            )
        }
    }
}

/// Check compensation of a simple disorder
///
/// Returns `None` unless exactly one disorder is present. When the observed
/// value falls outside tolerance, `additional_disorder` names the process
/// implied by the direction of the deviation:
/// - pCO2 below expected → respiratory alkalosis, above → respiratory acidosis
/// - HCO3 below expected → metabolic acidosis, above → metabolic alkalosis
pub fn evaluate_compensation(
    disorders: &DisorderList,
    sample: &BloodGasSample,
    config: &AnalysisConfig,
) -> Option<CompensationAssessment> {
    let [primary] = disorders.as_slice() else {
        return None;
    };
    let primary = *primary;

    let (expected, phase) = expected_compensation(primary, sample);
    let (observed, tolerance) = if primary.is_metabolic() {
        (sample.pco2, config.pco2_tolerance_mmhg)
    } else {
        (sample.hco3, config.hco3_tolerance_meq)
    };

    let deviation = observed - expected.value;
    let adequate = deviation.abs() <= tolerance;

    let additional_disorder = if adequate {
        None
    } else if primary.is_metabolic() {
        Some(if deviation < 0.0 {
            Disorder::RespiratoryAlkalosis
        } else {
            Disorder::RespiratoryAcidosis
        })
    } else {
        Some(if deviation < 0.0 {
            Disorder::MetabolicAcidosis
        } else {
            Disorder::MetabolicAlkalosis
        })
    };

    tracing::debug!(
        "Compensation for {:?}: expected {:.1} {}, observed {:.1}, adequate={}",
        primary,
        expected.value,
        expected.unit,
        observed,
        adequate
    );

    Some(CompensationAssessment {
        primary,
        expected,
        observed,
        tolerance,
        phase,
        adequate,
        additional_disorder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use smallvec::smallvec;

    fn evaluate(disorder: Disorder, sample: &BloodGasSample) -> CompensationAssessment {
        let disorders: DisorderList = smallvec![disorder];
        evaluate_compensation(&disorders, sample, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_winters_adequate() {
        let sample = BloodGasSample::new(7.20, 30.0, 12.0);
        let result = evaluate(Disorder::MetabolicAcidosis, &sample);
        assert_relative_eq!(result.expected.value, 26.0, epsilon = 1e-9);
        assert_eq!(result.expected.unit, Unit::MmHg);
        assert!(result.adequate);
        assert!(result.additional_disorder.is_none());
    }

    #[test]
    fn test_winters_pco2_too_high_adds_respiratory_acidosis() {
        let sample = BloodGasSample::new(7.05, 40.0, 12.0);
        let result = evaluate(Disorder::MetabolicAcidosis, &sample);
        assert!(!result.adequate);
        assert_eq!(result.additional_disorder, Some(Disorder::RespiratoryAcidosis));
        assert_relative_eq!(result.deviation(), 14.0, epsilon = 1e-9);
    }

    #[test]
    fn test_winters_pco2_too_low_adds_respiratory_alkalosis() {
        let sample = BloodGasSample::new(7.30, 18.0, 12.0);
        let result = evaluate(Disorder::MetabolicAcidosis, &sample);
        assert!(!result.adequate);
        assert_eq!(result.additional_disorder, Some(Disorder::RespiratoryAlkalosis));
    }

    #[test]
    fn test_metabolic_alkalosis_expected_pco2() {
        let sample = BloodGasSample::new(7.50, 48.0, 36.0);
        let result = evaluate(Disorder::MetabolicAlkalosis, &sample);
        // 0.7 × 36 + 21 = 46.2
        assert_relative_eq!(result.expected.value, 46.2, epsilon = 1e-9);
        assert!(result.adequate);
    }

    #[test]
    fn test_metabolic_alkalosis_pco2_too_high_adds_respiratory_acidosis() {
        // expected 46.2, observed 55
        let sample = BloodGasSample::new(7.47, 55.0, 36.0);
        let result = evaluate(Disorder::MetabolicAlkalosis, &sample);
        assert!(!result.adequate);
        assert_relative_eq!(result.deviation(), 8.8, epsilon = 1e-9);
        assert_eq!(result.additional_disorder, Some(Disorder::RespiratoryAcidosis));
    }

    #[test]
    fn test_metabolic_alkalosis_pco2_too_low_adds_respiratory_alkalosis() {
        // expected 46.2, observed 38
        let sample = BloodGasSample::new(7.55, 38.0, 36.0);
        let result = evaluate(Disorder::MetabolicAlkalosis, &sample);
        assert!(!result.adequate);
        assert_relative_eq!(result.deviation(), -8.2, epsilon = 1e-9);
        assert_eq!(result.additional_disorder, Some(Disorder::RespiratoryAlkalosis));
    }

    #[test]
    fn test_respiratory_acidosis_low_hco3_adds_metabolic_acidosis() {
        // Chronic: 24 + 0.35 × 30 = 34.5; observed 28 is 6.5 below
        let sample = BloodGasSample::new(7.20, 70.0, 28.0);
        let result = evaluate(Disorder::RespiratoryAcidosis, &sample);
        assert_eq!(result.phase, Some(CompensationPhase::Chronic));
        assert!(!result.adequate);
        assert_eq!(result.additional_disorder, Some(Disorder::MetabolicAcidosis));
    }

    #[test]
    fn test_respiratory_alkalosis_high_hco3_adds_metabolic_alkalosis() {
        // Acute: 24 − 0.2 × 10 = 22; observed 26 is 4 above
        let sample = BloodGasSample::new(7.55, 30.0, 26.0);
        let result = evaluate(Disorder::RespiratoryAlkalosis, &sample);
        assert_eq!(result.phase, Some(CompensationPhase::Acute));
        assert!(!result.adequate);
        assert_eq!(result.additional_disorder, Some(Disorder::MetabolicAlkalosis));
    }

    #[test]
    fn test_hco3_tolerance_boundary_is_inclusive() {
        // Acute acidosis expected 25; observed 28 deviates by exactly 3
        let sample = BloodGasSample::new(7.30, 50.0, 28.0);
        let result = evaluate(Disorder::RespiratoryAcidosis, &sample);
        assert!(result.adequate);
        assert!(result.additional_disorder.is_none());
    }

    #[test]
    fn test_acute_respiratory_acidosis() {
        let sample = BloodGasSample::new(7.30, 50.0, 25.0);
        let result = evaluate(Disorder::RespiratoryAcidosis, &sample);
        assert_eq!(result.phase, Some(CompensationPhase::Acute));
        assert_relative_eq!(result.expected.value, 25.0, epsilon = 1e-9);
        assert_eq!(result.expected.unit, Unit::MeqPerL);
        assert!(result.adequate);
    }

    #[test]
    fn test_chronic_respiratory_acidosis() {
        let sample = BloodGasSample::new(7.34, 60.0, 31.0);
        let result = evaluate(Disorder::RespiratoryAcidosis, &sample);
        assert_eq!(result.phase, Some(CompensationPhase::Chronic));
        // 24 + 0.35 × 20 = 31
        assert_relative_eq!(result.expected.value, 31.0, epsilon = 1e-9);
        assert!(result.adequate);
    }

    #[test]
    fn test_acute_respiratory_alkalosis() {
        let sample = BloodGasSample::new(7.50, 30.0, 24.0);
        let result = evaluate(Disorder::RespiratoryAlkalosis, &sample);
        assert_eq!(result.phase, Some(CompensationPhase::Acute));
        assert_relative_eq!(result.expected.value, 22.0, epsilon = 1e-9);
        assert!(result.adequate);
    }

    #[test]
    fn test_chronic_respiratory_alkalosis_low_hco3_adds_metabolic_acidosis() {
        // 24 − 0.5 × 20 = 14; observed 10 is 4 below
        let sample = BloodGasSample::new(7.46, 20.0, 10.0);
        let result = evaluate(Disorder::RespiratoryAlkalosis, &sample);
        assert_eq!(result.phase, Some(CompensationPhase::Chronic));
        assert_relative_eq!(result.expected.value, 14.0, epsilon = 1e-9);
        assert!(!result.adequate);
        assert_eq!(result.additional_disorder, Some(Disorder::MetabolicAcidosis));
    }

    #[test]
    fn test_not_evaluated_for_mixed_or_none() {
        let sample = BloodGasSample::new(7.40, 30.0, 18.0);
        let config = AnalysisConfig::default();
        let mixed: DisorderList =
            smallvec![Disorder::MetabolicAcidosis, Disorder::RespiratoryAlkalosis];
        assert!(evaluate_compensation(&mixed, &sample, &config).is_none());
        assert!(evaluate_compensation(&DisorderList::new(), &sample, &config).is_none());
    }
}
