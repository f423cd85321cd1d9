use crate::analyzers::{AnionGapAnalysis, CompensationAssessment, CompensationPhase, Disorder};
use crate::explanation::types::Severity;
use crate::report::AnalysisReport;

/// Markdown / plain-text formatter for analysis reports
///
/// `student_mode` appends the formula behind each derived value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter {
    pub student_mode: bool,
}

impl MarkdownFormatter {
    pub fn new(student_mode: bool) -> Self {
        Self { student_mode }
    }

    /// Format report as markdown
    pub fn format(&self, report: &AnalysisReport) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str("# Blood Gas Analysis\n\n");

        if report.is_rejected() {
            md.push_str("## Input Rejected\n\n");
            for message in report.validation_messages() {
                md.push_str(&format!("🚨 {}\n", message));
            }
            md.push('\n');
            return md;
        }

        // Disorders
        md.push_str("## Acid-Base Status\n\n");
        let names: Vec<&str> = report.disorders.iter().map(|d| d.display_text()).collect();
        if names.is_empty() {
            md.push_str(&format!(
                "{} {}\n\n",
                Severity::Info.icon(),
                report.pattern.display_text()
            ));
        } else {
            md.push_str(&format!(
                "**{}:** {}\n\n",
                report.pattern.display_text(),
                names.join(" + ")
            ));
        }

        if let Some(compensation) = &report.compensation {
            self.format_compensation(&mut md, compensation);
        }

        // Anion gap
        if let Some(anion_gap) = &report.anion_gap {
            self.format_anion_gap(&mut md, anion_gap);
        }

        if let Some(be) = report.base_excess {
            md.push_str(&format!("**Base excess (estimated):** {:.1} mEq/L\n\n", be));
            if self.student_mode {
                md.push_str(
                    "*Formula:* BE = 0.93 × (HCO3 − 24.4) + 14.83 × (pH − 7.4) (Siggaard-Andersen)\n\n",
                );
            }
        }

        for note in &report.interpretation_notes {
            md.push_str(&format!("{} {}\n\n", note.severity().icon(), note.message()));
        }

        // Electrolytes
        if !report.electrolyte_findings.is_empty() {
            md.push_str("## Electrolyte Disturbances\n\n");
            for finding in &report.electrolyte_findings {
                let severity = if finding.tier.is_severe() {
                    Severity::High
                } else {
                    Severity::Medium
                };
                md.push_str(&format!(
                    "- {} {} ({} {})\n",
                    severity.icon(),
                    finding.label(),
                    finding.analyte.symbol(),
                    finding.value
                ));
            }
            md.push('\n');
        }

        // Therapeutic guidance
        if !report.therapeutic_notes.is_empty() {
            md.push_str("## Therapeutic Guidance\n\n");
            for note in &report.therapeutic_notes {
                md.push_str(&format!("{} {}\n", note.severity().icon(), note.message()));
            }
            md.push('\n');
        }

        md
    }

    fn format_compensation(&self, md: &mut String, compensation: &CompensationAssessment) {
        let variable = if compensation.primary.is_metabolic() { "pCO2" } else { "HCO3" };
        let phase = match compensation.phase {
            Some(CompensationPhase::Acute) => " (acute)",
            Some(CompensationPhase::Chronic) => " (chronic)",
            None => "",
        };

        md.push_str(&format!(
            "**Expected {}{}:** {:.1} {} (observed {:.1}) - {}\n\n",
            variable,
            phase,
            compensation.expected.value,
            compensation.expected.unit,
            compensation.observed,
            if compensation.adequate { "adequate compensation" } else { "inadequate compensation" }
        ));

        if self.student_mode {
            let formula = match compensation.primary {
                Disorder::MetabolicAcidosis => "expected pCO2 = 1.5 × HCO3 + 8 (Winters)",
                Disorder::MetabolicAlkalosis => "expected pCO2 = 0.7 × HCO3 + 21",
                Disorder::RespiratoryAcidosis => {
                    "expected HCO3 = 24 + (1 acute / 3.5 chronic) × ΔpCO2 / 10"
                }
                Disorder::RespiratoryAlkalosis => {
                    "expected HCO3 = 24 − (2 acute / 5 chronic) × ΔpCO2 / 10"
                }
            };
            md.push_str(&format!("*Formula:* {}\n\n", formula));
        }
    }

    fn format_anion_gap(&self, md: &mut String, anion_gap: &AnionGapAnalysis) {
        md.push_str("## Anion Gap\n\n");
        match anion_gap.corrected {
            Some(corrected) => md.push_str(&format!(
                "**Anion gap:** {:.1} mEq/L | corrected for albumin: {:.1} mEq/L\n\n",
                anion_gap.value, corrected
            )),
            None => md.push_str(&format!("**Anion gap:** {:.1} mEq/L\n\n", anion_gap.value)),
        }
        md.push_str(&format!("{}\n\n", anion_gap.interpretation.display_text()));

        if let Some(delta) = &anion_gap.delta {
            md.push_str(&format!(
                "Delta gap: {:.1} | Delta HCO3: {:.1} | Delta ratio: {:.2} - {}\n\n",
                delta.delta_gap,
                delta.delta_hco3,
                delta.ratio,
                delta.bucket.display_text()
            ));
        }

        if self.student_mode {
            md.push_str("*Formula:* AG = Na − (Cl + HCO3); corrected AG = AG + 2.5 × (4.0 − albumin)\n\n");
            md.push_str("*Formula:* delta ratio = (AG − 12) / (24 − HCO3)\n\n");
        }
    }
}
