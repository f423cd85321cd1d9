//! Anion Gap & Delta Ratio
//!
//! AG = Na − (Cl + HCO3), corrected for albumin as
//! AG_corr = AG + 2.5 × (4.0 − albumin). When the corrected value exists it
//! drives every downstream interpretation (AG band, delta ratio, bucket).
//!
//! Delta ratio = (AG − 12) / (24 − HCO3), undefined at HCO3 = 24.

use serde::{Deserialize, Serialize};

use crate::analyzers::NORMAL_HCO3_MEQ;
use crate::error::ComputationSkipped;
use crate::sample::BloodGasSample;

pub const NORMAL_ANION_GAP: f64 = 12.0;
pub const LOW_ANION_GAP: f64 = 8.0;
pub const REFERENCE_ALBUMIN_G_DL: f64 = 4.0;
/// mEq/L of AG per g/dL of albumin below reference
pub const ALBUMIN_CORRECTION_FACTOR: f64 = 2.5;

/// Bucket edges for the delta ratio
pub const DELTA_PURE_HYPERCHLOREMIC_BELOW: f64 = 0.4;
pub const DELTA_MIXED_BELOW: f64 = 0.8;
pub const DELTA_ISOLATED_MAX: f64 = 2.0;

/// Below this |24 − HCO3| the delta ratio is treated as undefined
const DELTA_DENOMINATOR_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnionGapInterpretation {
    High,
    Normal,
    Low,
}

impl AnionGapInterpretation {
    pub fn from_gap(gap: f64) -> Self {
        if gap > NORMAL_ANION_GAP {
            AnionGapInterpretation::High
        } else if gap < LOW_ANION_GAP {
            AnionGapInterpretation::Low
        } else {
            AnionGapInterpretation::Normal
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            AnionGapInterpretation::High => "High AG metabolic acidosis",
            AnionGapInterpretation::Normal => "Normal AG",
            AnionGapInterpretation::Low => "Low AG: consider hypoproteinemia or analytic error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaRatioBucket {
    /// < 0.4
    PureHyperchloremic,
    /// 0.4 to < 0.8
    MixedPossible,
    /// 0.8 to 2.0
    IsolatedHighAnionGap,
    /// > 2.0
    ConcurrentMetabolicAlkalosis,
}

impl DeltaRatioBucket {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < DELTA_PURE_HYPERCHLOREMIC_BELOW {
            DeltaRatioBucket::PureHyperchloremic
        } else if ratio < DELTA_MIXED_BELOW {
            DeltaRatioBucket::MixedPossible
        } else if ratio <= DELTA_ISOLATED_MAX {
            DeltaRatioBucket::IsolatedHighAnionGap
        } else {
            DeltaRatioBucket::ConcurrentMetabolicAlkalosis
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            DeltaRatioBucket::PureHyperchloremic => "Pure hyperchloremic (normal AG) acidosis",
            DeltaRatioBucket::MixedPossible => "Mixed high-AG and normal-AG acidosis possible",
            DeltaRatioBucket::IsolatedHighAnionGap => "Isolated high-AG metabolic acidosis",
            DeltaRatioBucket::ConcurrentMetabolicAlkalosis => {
                "High-AG acidosis with concurrent metabolic alkalosis"
            }
        }
    }
}

/// Delta gap / delta HCO3 comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaAnalysis {
    /// AG − 12
    pub delta_gap: f64,
    /// 24 − HCO3
    pub delta_hco3: f64,
    pub ratio: f64,
    pub bucket: DeltaRatioBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnionGapAnalysis {
    /// Uncorrected AG (mEq/L)
    pub value: f64,
    /// Albumin-corrected AG
    pub corrected: Option<f64>,
    /// Band of the corrected AG when present, raw AG otherwise
    pub interpretation: AnionGapInterpretation,
    pub delta: Option<DeltaAnalysis>,
    /// Why `delta` is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_skipped: Option<ComputationSkipped>,
}

impl AnionGapAnalysis {
    /// Value used for interpretation (corrected if available)
    pub fn effective(&self) -> f64 {
        self.corrected.unwrap_or(self.value)
    }

    pub fn is_elevated(&self) -> bool {
        self.interpretation == AnionGapInterpretation::High
    }
}

/// Albumin-corrected anion gap
///
/// `None` for a non-positive or non-finite albumin. An albumin of 0 is
/// treated as "not measured": the raw gap is used for interpretation.
pub fn correct_for_albumin(anion_gap: f64, albumin: f64) -> Option<f64> {
    if albumin.is_finite() && albumin > 0.0 {
        Some(anion_gap + ALBUMIN_CORRECTION_FACTOR * (REFERENCE_ALBUMIN_G_DL - albumin))
    } else {
        None
    }
}

/// Delta ratio for an (effective) anion gap
pub fn compute_delta(anion_gap: f64, hco3: f64) -> Result<DeltaAnalysis, ComputationSkipped> {
    let delta_gap = anion_gap - NORMAL_ANION_GAP;
    let delta_hco3 = NORMAL_HCO3_MEQ - hco3;

    if delta_hco3.abs() < DELTA_DENOMINATOR_EPSILON {
        return Err(ComputationSkipped::DegenerateDeltaDenominator);
    }

    let ratio = delta_gap / delta_hco3;
    Ok(DeltaAnalysis {
        delta_gap,
        delta_hco3,
        ratio,
        bucket: DeltaRatioBucket::from_ratio(ratio),
    })
}

/// Anion gap analysis; requires both Na and Cl
pub fn analyze_anion_gap(sample: &BloodGasSample) -> Result<AnionGapAnalysis, ComputationSkipped> {
    let (Some(na), Some(cl)) = (sample.na, sample.cl) else {
        return Err(ComputationSkipped::MissingElectrolytes);
    };

    let value = na - (cl + sample.hco3);
    let corrected = correct_for_albumin(value, sample.albumin);
    let effective = corrected.unwrap_or(value);

    let (delta, delta_skipped) = match compute_delta(effective, sample.hco3) {
        Ok(delta) => (Some(delta), None),
        Err(skipped) => (None, Some(skipped)),
    };

    Ok(AnionGapAnalysis {
        value,
        corrected,
        interpretation: AnionGapInterpretation::from_gap(effective),
        delta,
        delta_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_anion_gap_with_default_albumin() {
        let sample = BloodGasSample::new(7.20, 30.0, 12.0)
            .with_sodium(140.0)
            .with_chloride(100.0);
        let ag = analyze_anion_gap(&sample).unwrap();

        assert_relative_eq!(ag.value, 28.0, epsilon = 1e-9);
        // 28 + 2.5 × (4.0 − 4.5) = 26.75
        assert_relative_eq!(ag.corrected.unwrap(), 26.75, epsilon = 1e-9);
        assert_eq!(ag.interpretation, AnionGapInterpretation::High);

        let delta = ag.delta.unwrap();
        assert_relative_eq!(delta.ratio, 14.75 / 12.0, epsilon = 1e-9);
        assert_eq!(delta.bucket, DeltaRatioBucket::IsolatedHighAnionGap);
    }

    #[test]
    fn test_reference_albumin_leaves_gap_unchanged() {
        let sample = BloodGasSample::new(7.40, 40.0, 24.0)
            .with_sodium(140.0)
            .with_chloride(104.0)
            .with_albumin(4.0);
        let ag = analyze_anion_gap(&sample).unwrap();
        assert_eq!(ag.corrected, Some(ag.value));
    }

    #[test]
    fn test_low_albumin_unmasks_high_gap() {
        // Raw AG 10 looks normal; albumin 2.0 adds 5
        let sample = BloodGasSample::new(7.30, 32.0, 16.0)
            .with_sodium(136.0)
            .with_chloride(110.0)
            .with_albumin(2.0);
        let ag = analyze_anion_gap(&sample).unwrap();
        assert_relative_eq!(ag.value, 10.0, epsilon = 1e-9);
        assert_relative_eq!(ag.effective(), 15.0, epsilon = 1e-9);
        assert!(ag.is_elevated());
    }

    #[test]
    fn test_missing_electrolytes() {
        let sample = BloodGasSample::new(7.40, 40.0, 24.0).with_sodium(140.0);
        assert_eq!(
            analyze_anion_gap(&sample),
            Err(ComputationSkipped::MissingElectrolytes)
        );
    }

    #[test]
    fn test_delta_skipped_at_hco3_24() {
        let sample = BloodGasSample::new(7.50, 30.0, 24.0)
            .with_sodium(140.0)
            .with_chloride(100.0);
        let ag = analyze_anion_gap(&sample).unwrap();
        assert_relative_eq!(ag.value, 16.0, epsilon = 1e-9);
        assert!(ag.delta.is_none());
        assert_eq!(ag.delta_skipped, Some(ComputationSkipped::DegenerateDeltaDenominator));
    }

    #[test]
    fn test_zero_albumin_skips_correction() {
        // AG 140 − (104 + 24) = 12: normal raw, would be high if corrected
        let sample = BloodGasSample::new(7.40, 40.0, 24.0)
            .with_sodium(140.0)
            .with_chloride(104.0)
            .with_albumin(0.0);
        assert!(crate::analyzers::validate_sample(&sample, &Default::default()).is_empty());

        let ag = analyze_anion_gap(&sample).unwrap();
        assert!(ag.corrected.is_none());
        assert_relative_eq!(ag.effective(), 12.0, epsilon = 1e-9);
        assert_eq!(ag.interpretation, AnionGapInterpretation::Normal);
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(AnionGapInterpretation::from_gap(12.5), AnionGapInterpretation::High);
        assert_eq!(AnionGapInterpretation::from_gap(12.0), AnionGapInterpretation::Normal);
        assert_eq!(AnionGapInterpretation::from_gap(8.0), AnionGapInterpretation::Normal);
        assert_eq!(AnionGapInterpretation::from_gap(7.9), AnionGapInterpretation::Low);
    }

    #[test]
    fn test_delta_buckets() {
        assert_eq!(DeltaRatioBucket::from_ratio(0.2), DeltaRatioBucket::PureHyperchloremic);
        assert_eq!(DeltaRatioBucket::from_ratio(0.4), DeltaRatioBucket::MixedPossible);
        assert_eq!(DeltaRatioBucket::from_ratio(0.8), DeltaRatioBucket::IsolatedHighAnionGap);
        assert_eq!(DeltaRatioBucket::from_ratio(2.0), DeltaRatioBucket::IsolatedHighAnionGap);
        assert_eq!(
            DeltaRatioBucket::from_ratio(2.5),
            DeltaRatioBucket::ConcurrentMetabolicAlkalosis
        );
    }
}
