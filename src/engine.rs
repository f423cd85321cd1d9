//! Acid-Base Analyzer - main coordinator
//!
//! Runs the pipeline for one sample and assembles the report:
//!
//! validate → classify → compensation → anion gap / electrolytes
//!          → base excess → notes / advice → report
//!
//! The analyzer holds only its configuration, so one instance can be shared
//! across threads. Batch helpers are provided in sequential and parallel
//! (Rayon) flavours; both preserve input order.

use rayon::prelude::*;

use crate::analyzers::{
    analyze_anion_gap, classify_disorders, classify_electrolytes, estimate_base_excess,
    evaluate_compensation, validate_sample, DisorderPattern,
};
use crate::explanation::{advise, interpret};
use crate::report::AnalysisReport;
use crate::sample::BloodGasSample;
use crate::utils::AnalysisConfig;

/// Main blood-gas analyzer
#[derive(Debug, Clone, Default)]
pub struct AcidBaseAnalyzer {
    config: AnalysisConfig,
}

impl AcidBaseAnalyzer {
    /// Build from an in-code config; tolerances must be positive
    pub fn new(config: AnalysisConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid analysis config: {:?}", config);
        Self { config }
    }

    /// Build after validating the config
    pub fn try_new(config: AnalysisConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one sample
    ///
    /// Never panics and never fails: rejected input yields a report that
    /// carries only `validation_errors`.
    pub fn analyze(&self, sample: &BloodGasSample) -> AnalysisReport {
        // STEP 1: Validation gate
        let validation_errors = validate_sample(sample, &self.config);
        if !validation_errors.is_empty() {
            tracing::warn!(
                "Sample rejected with {} validation error(s)",
                validation_errors.len()
            );
            return AnalysisReport::rejected(validation_errors);
        }

        // STEP 2: Primary classification
        let mut disorders = classify_disorders(sample);

        // STEP 3: Compensation (simple disorders only); may add a tag
        let compensation = evaluate_compensation(&disorders, sample, &self.config);
        if let Some(extra) = compensation.as_ref().and_then(|c| c.additional_disorder) {
            if !disorders.contains(&extra) {
                disorders.push(extra);
            }
        }

        // STEP 4: Anion gap and electrolytes (independent)
        let mut skipped = Vec::new();
        let anion_gap = match analyze_anion_gap(sample) {
            Ok(analysis) => {
                skipped.extend(analysis.delta_skipped);
                Some(analysis)
            }
            Err(reason) => {
                skipped.push(reason);
                None
            }
        };
        if !skipped.is_empty() {
            tracing::debug!("Skipped computations: {:?}", skipped);
        }

        let electrolyte_findings = classify_electrolytes(sample);

        // STEP 5: Base excess
        let base_excess = estimate_base_excess(sample.ph, sample.hco3);

        // STEP 6: Notes and advice
        let interpretation_notes =
            interpret(sample, &disorders, anion_gap.as_ref(), compensation.as_ref());
        let therapeutic_notes = advise(sample, &disorders, &electrolyte_findings);

        tracing::debug!(
            "Analysis complete: disorders={:?}, electrolyte findings={}, notes={}",
            disorders,
            electrolyte_findings.len(),
            therapeutic_notes.len()
        );

        AnalysisReport {
            pattern: DisorderPattern::from_count(disorders.len()),
            disorders,
            anion_gap,
            compensation,
            electrolyte_findings,
            base_excess: Some(base_excess),
            interpretation_notes,
            therapeutic_notes,
            skipped,
            validation_errors: Vec::new(),
        }
    }

    /// Analyze samples one after another
    pub fn analyze_batch(&self, samples: &[BloodGasSample]) -> Vec<AnalysisReport> {
        samples.iter().map(|s| self.analyze(s)).collect()
    }

    /// Analyze samples in parallel (Rayon); output order matches input
    pub fn analyze_batch_parallel(&self, samples: &[BloodGasSample]) -> Vec<AnalysisReport> {
        let reports: Vec<AnalysisReport> = samples.par_iter().map(|s| self.analyze(s)).collect();

        let rejected = reports.iter().filter(|r| r.is_rejected()).count();
        tracing::info!(
            "Analyzed {} samples in parallel ({} rejected)",
            reports.len(),
            rejected
        );

        reports
    }
}

/// Analyze one sample with the default configuration
pub fn analyze(sample: &BloodGasSample) -> AnalysisReport {
    AcidBaseAnalyzer::default().analyze(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::Disorder;
    use crate::error::ComputationSkipped;
    use crate::explanation::InterpretationNote;

    #[test]
    fn test_inadequate_compensation_promotes_to_mixed() {
        // Winters: expected 26 ± 5, observed 40
        let sample = BloodGasSample::new(7.05, 40.0, 12.0);
        let report = analyze(&sample);

        assert_eq!(
            report.disorders.as_slice(),
            &[Disorder::MetabolicAcidosis, Disorder::RespiratoryAcidosis]
        );
        assert_eq!(report.pattern, DisorderPattern::Mixed);
        assert_eq!(report.compensation_adequate(), Some(false));
        assert!(report
            .interpretation_notes
            .contains(&InterpretationNote::ConsiderMixedOrTripleDisorder));
    }

    #[test]
    fn test_missing_ionogram_is_skipped_not_fatal() {
        let sample = BloodGasSample::new(7.20, 30.0, 12.0);
        let report = analyze(&sample);

        assert!(report.anion_gap.is_none());
        assert_eq!(report.skipped, vec![ComputationSkipped::MissingElectrolytes]);
        assert!(report.base_excess.is_some());
        assert_eq!(report.disorders.as_slice(), &[Disorder::MetabolicAcidosis]);
    }

    #[test]
    fn test_batch_parallel_matches_sequential() {
        let samples = vec![
            BloodGasSample::new(7.20, 30.0, 12.0),
            BloodGasSample::new(7.10, 20.0, 24.0),
            BloodGasSample::new(7.50, 30.0, 24.0).with_sodium(140.0).with_chloride(100.0),
            BloodGasSample::new(7.40, 40.0, 24.0),
        ];
        let analyzer = AcidBaseAnalyzer::default();
        assert_eq!(
            analyzer.analyze_batch(&samples),
            analyzer.analyze_batch_parallel(&samples)
        );
    }

    #[test]
    fn test_try_new_rejects_bad_tolerances() {
        for bad in [0.0, -1.0, f64::NAN] {
            let config = AnalysisConfig {
                hco3_tolerance_meq: bad,
                ..Default::default()
            };
            assert!(AcidBaseAnalyzer::try_new(config).is_err());
        }
        let analyzer = AcidBaseAnalyzer::try_new(AnalysisConfig::default()).unwrap();
        assert_eq!(analyzer.config().hco3_tolerance_meq, 3.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid analysis config")]
    fn test_new_asserts_valid_config_in_debug() {
        AcidBaseAnalyzer::new(AnalysisConfig {
            pco2_tolerance_mmhg: -5.0,
            ..Default::default()
        });
    }

    #[test]
    fn test_strict_config_rejects_high_pco2() {
        let analyzer = AcidBaseAnalyzer::new(AnalysisConfig {
            strict_sanity_bands: true,
            ..Default::default()
        });
        let report = analyzer.analyze(&BloodGasSample::new(7.10, 110.0, 33.0));
        assert!(report.is_rejected());
    }
}
