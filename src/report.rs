//! Analysis report
//!
//! One `AnalysisReport` is produced per sample. It holds tags, enums and
//! numbers only; turning it into text is the job of a formatter.

use serde::{Deserialize, Serialize};

use crate::analyzers::{
    AnionGapAnalysis, CompensationAssessment, DeltaRatioBucket, Disorder, DisorderList,
    DisorderPattern, ElectrolyteFinding, ExpectedCompensation,
};
use crate::error::{ComputationSkipped, ValidationError};
use crate::explanation::types::{InterpretationNote, TherapeuticNote};

/// Complete result for one blood-gas sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Detection order; empty means no disturbance
    pub disorders: DisorderList,
    pub pattern: DisorderPattern,
    /// Omitted when Na or Cl is missing
    pub anion_gap: Option<AnionGapAnalysis>,
    /// Present only for simple disorders
    pub compensation: Option<CompensationAssessment>,
    pub electrolyte_findings: Vec<ElectrolyteFinding>,
    /// `None` only for rejected samples
    pub base_excess: Option<f64>,
    pub interpretation_notes: Vec<InterpretationNote>,
    pub therapeutic_notes: Vec<TherapeuticNote>,
    pub skipped: Vec<ComputationSkipped>,
    /// Non-empty means nothing else was computed
    pub validation_errors: Vec<ValidationError>,
}

impl AnalysisReport {
    /// Report for a sample that failed validation
    pub fn rejected(validation_errors: Vec<ValidationError>) -> Self {
        Self {
            disorders: DisorderList::new(),
            pattern: DisorderPattern::None,
            anion_gap: None,
            compensation: None,
            electrolyte_findings: Vec::new(),
            base_excess: None,
            interpretation_notes: Vec::new(),
            therapeutic_notes: Vec::new(),
            skipped: Vec::new(),
            validation_errors,
        }
    }

    pub fn is_rejected(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    pub fn has_disorder(&self, disorder: Disorder) -> bool {
        self.disorders.contains(&disorder)
    }

    pub fn anion_gap_value(&self) -> Option<f64> {
        self.anion_gap.as_ref().map(|ag| ag.value)
    }

    pub fn anion_gap_corrected(&self) -> Option<f64> {
        self.anion_gap.as_ref().and_then(|ag| ag.corrected)
    }

    pub fn delta_ratio(&self) -> Option<f64> {
        self.anion_gap.as_ref().and_then(|ag| ag.delta).map(|d| d.ratio)
    }

    pub fn delta_ratio_bucket(&self) -> Option<DeltaRatioBucket> {
        self.anion_gap.as_ref().and_then(|ag| ag.delta).map(|d| d.bucket)
    }

    pub fn expected_compensation(&self) -> Option<ExpectedCompensation> {
        self.compensation.as_ref().map(|c| c.expected)
    }

    pub fn compensation_adequate(&self) -> Option<bool> {
        self.compensation.as_ref().map(|c| c.adequate)
    }

    pub fn therapeutic_messages(&self) -> Vec<&'static str> {
        self.therapeutic_notes.iter().map(|n| n.message()).collect()
    }

    pub fn validation_messages(&self) -> Vec<String> {
        self.validation_errors.iter().map(|e| e.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Inconsistency;

    #[test]
    fn test_rejected_report_is_empty() {
        let report = AnalysisReport::rejected(vec![ValidationError::Inconsistent {
            rule: Inconsistency::AcidemiaWithLowPco2NormalHco3,
        }]);
        assert!(report.is_rejected());
        assert!(report.disorders.is_empty());
        assert!(report.base_excess.is_none());
        assert!(report.anion_gap_value().is_none());
        assert_eq!(report.validation_messages().len(), 1);
    }

    #[test]
    fn test_json_round_trip_keeps_tags() {
        let report = AnalysisReport::rejected(vec![]);
        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
