use serde::{Deserialize, Serialize};

/// Severity level for notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Low => "•",
            Severity::Medium => "⚠️",
            Severity::High => "🚨",
        }
    }
}

/// Structured interpretation of the gas beyond the disorder tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationNote {
    /// Observed compensation outside tolerance
    ConsiderMixedOrTripleDisorder,
    /// High-AG acidosis with lactate > 4 mmol/L
    SuspectLacticAcidosis,
    /// Metabolic alkalosis with Cl < 95
    SuspectHypochloremicAlkalosis,
    /// Respiratory acidosis with HCO3 > 30 and pH < 7.35
    SuspectChronicRespiratoryAcidosis,
}

impl InterpretationNote {
    pub fn message(&self) -> &'static str {
        match self {
            InterpretationNote::ConsiderMixedOrTripleDisorder => {
                "Inadequate compensation: consider a mixed or triple disorder"
            }
            InterpretationNote::SuspectLacticAcidosis => {
                "High anion gap with lactate above 4 mmol/L: suspect lactic acidosis"
            }
            InterpretationNote::SuspectHypochloremicAlkalosis => {
                "Metabolic alkalosis with low chloride: suspect hypochloremic alkalosis (vomiting, gastric losses)"
            }
            InterpretationNote::SuspectChronicRespiratoryAcidosis => {
                "Respiratory acidosis with HCO3 above 30: suspect chronic compensated respiratory acidosis"
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            InterpretationNote::ConsiderMixedOrTripleDisorder => Severity::Medium,
            InterpretationNote::SuspectLacticAcidosis => Severity::High,
            InterpretationNote::SuspectHypochloremicAlkalosis => Severity::Low,
            InterpretationNote::SuspectChronicRespiratoryAcidosis => Severity::Low,
        }
    }
}

/// Therapeutic guidance line
///
/// The tag is what the report carries; `message()` is the canonical English
/// wording for renderers that do not supply their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TherapeuticNote {
    // Disorder advice
    TreatHypoperfusion,
    ReplaceGastrointestinalBicarbonateLoss,
    InvestigateMetabolicAcidosis,
    VolumeRepletionWithPotassium,
    InvestigateMetabolicAlkalosis,
    VentilatorySupportCautiousOxygen,
    AssessVentilation,
    EvaluateEarlySepsis,
    TreatHyperventilationCause,

    // Sodium
    SevereHyponatremiaSlowCorrection,
    HyponatremiaAssessVolumeStatus,
    HypernatremiaReplaceFreeWater,
    SevereHypernatremiaGradualCorrection,

    // Potassium
    SevereHypokalemiaIntravenousReplacement,
    ReplacePotassium,
    HyperkalemiaStopPotassiumSources,
    EmergencyHyperkalemiaMeasures,

    // Chloride
    SevereHypochloremiaRepletion,
    ChlorideRepletion,
    HyperchloremiaLimitChlorideFluids,
    SevereHyperchloremiaStopChlorideFluids,

    // Lactate
    ReassessPerfusionAndLactate,
}

impl TherapeuticNote {
    pub fn message(&self) -> &'static str {
        use TherapeuticNote::*;
        match self {
            TreatHypoperfusion => {
                "Metabolic acidosis with elevated lactate or suspected sepsis: treat the underlying hypoperfusion (fluid resuscitation, source control, vasopressors if needed)"
            }
            ReplaceGastrointestinalBicarbonateLoss => {
                "Metabolic acidosis with severe diarrhea: replace volume and bicarbonate losses, monitor potassium"
            }
            InvestigateMetabolicAcidosis => {
                "Metabolic acidosis: identify and treat the cause (ketoacidosis, renal failure, intoxication)"
            }
            VolumeRepletionWithPotassium => {
                "Metabolic alkalosis after prolonged vomiting: volume repletion with saline and potassium-containing fluids"
            }
            InvestigateMetabolicAlkalosis => {
                "Metabolic alkalosis: review diuretics, volume status and chloride balance"
            }
            VentilatorySupportCautiousOxygen => {
                "Respiratory acidosis in COPD: consider non-invasive ventilatory support and titrate oxygen cautiously (SpO2 88-92%)"
            }
            AssessVentilation => {
                "Respiratory acidosis: assess airway and ventilation, consider ventilatory support"
            }
            EvaluateEarlySepsis => {
                "Respiratory alkalosis with suspected sepsis: may be an early sign of sepsis, obtain cultures and follow lactate"
            }
            TreatHyperventilationCause => {
                "Respiratory alkalosis: treat the cause of hyperventilation (hypoxemia, pain, anxiety)"
            }
            SevereHyponatremiaSlowCorrection => {
                "Severe hyponatremia: correct slowly (no more than 8-10 mEq/L in 24 h), hypertonic saline only if symptomatic"
            }
            HyponatremiaAssessVolumeStatus => {
                "Hyponatremia: assess volume status and serum osmolality"
            }
            HypernatremiaReplaceFreeWater => "Hypernatremia: replace the free water deficit",
            SevereHypernatremiaGradualCorrection => {
                "Severe hypernatremia: correct the free water deficit gradually, avoid rapid falls"
            }
            SevereHypokalemiaIntravenousReplacement => {
                "Severe hypokalemia: intravenous potassium replacement with cardiac monitoring"
            }
            ReplacePotassium => "Hypokalemia: oral or intravenous potassium replacement, check magnesium",
            HyperkalemiaStopPotassiumSources => {
                "Hyperkalemia: stop potassium intake and potassium-sparing drugs, obtain an ECG"
            }
            EmergencyHyperkalemiaMeasures => {
                "Severe hyperkalemia: emergency measures (IV calcium, insulin with glucose, beta-agonist) with continuous ECG monitoring"
            }
            SevereHypochloremiaRepletion => {
                "Severe hypochloremia: chloride repletion with isotonic saline, check for gastric losses"
            }
            ChlorideRepletion => "Hypochloremia: chloride repletion with isotonic saline",
            HyperchloremiaLimitChlorideFluids => {
                "Hyperchloremia: limit chloride-rich fluids, prefer balanced crystalloids"
            }
            SevereHyperchloremiaStopChlorideFluids => {
                "Severe hyperchloremia: stop chloride-rich fluids and reassess acid-base status"
            }
            ReassessPerfusionAndLactate => {
                "Elevated lactate: assess tissue perfusion and repeat lactate"
            }
        }
    }

    pub fn severity(&self) -> Severity {
        use TherapeuticNote::*;
        match self {
            EmergencyHyperkalemiaMeasures
            | SevereHypokalemiaIntravenousReplacement
            | SevereHyponatremiaSlowCorrection
            | TreatHypoperfusion => Severity::High,
            SevereHypernatremiaGradualCorrection
            | SevereHypochloremiaRepletion
            | SevereHyperchloremiaStopChlorideFluids
            | VentilatorySupportCautiousOxygen
            | ReassessPerfusionAndLactate => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Info < Severity::Low);
    }

    #[test]
    fn test_emergency_hyperkalemia_is_high() {
        let note = TherapeuticNote::EmergencyHyperkalemiaMeasures;
        assert_eq!(note.severity(), Severity::High);
        assert!(note.message().contains("emergency measures"));
    }

    #[test]
    fn test_note_serializes_as_tag() {
        let json = serde_json::to_string(&InterpretationNote::SuspectLacticAcidosis).unwrap();
        assert_eq!(json, "\"suspect_lactic_acidosis\"");
    }
}
