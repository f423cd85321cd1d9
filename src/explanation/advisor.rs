//! Therapeutic Advisor
//!
//! Deterministic mapping from disorders, electrolyte findings and clinical
//! context to guidance tags. Every applicable rule fires.
//!
//! Output order: disorder advice (in disorder order), then sodium,
//! potassium, chloride and lactate.

use crate::analyzers::electrolytes::LACTATE_ELEVATED_ABOVE;
use crate::analyzers::{Analyte, Disorder, ElectrolyteFinding, Tier};
use crate::explanation::types::TherapeuticNote;
use crate::sample::{BloodGasSample, ContextFlag};

/// Generate therapeutic notes for a classified sample
pub fn advise(
    sample: &BloodGasSample,
    disorders: &[Disorder],
    findings: &[ElectrolyteFinding],
) -> Vec<TherapeuticNote> {
    let mut notes = Vec::new();

    for disorder in disorders {
        disorder_advice(*disorder, sample, &mut notes);
    }

    for analyte in [Analyte::Sodium, Analyte::Potassium, Analyte::Chloride, Analyte::Lactate] {
        if let Some(finding) = findings.iter().find(|f| f.analyte == analyte) {
            notes.push(electrolyte_advice(finding));
        }
    }

    notes
}

fn disorder_advice(disorder: Disorder, sample: &BloodGasSample, notes: &mut Vec<TherapeuticNote>) {
    let context = &sample.context;

    match disorder {
        Disorder::MetabolicAcidosis => {
            let start = notes.len();
            if sample.lactate_above(LACTATE_ELEVATED_ABOVE)
                || context.has(ContextFlag::SuspectedSepsis)
            {
                notes.push(TherapeuticNote::TreatHypoperfusion);
            }
            if context.has(ContextFlag::SevereDiarrhea) {
                notes.push(TherapeuticNote::ReplaceGastrointestinalBicarbonateLoss);
            }
            if notes.len() == start {
                notes.push(TherapeuticNote::InvestigateMetabolicAcidosis);
            }
        }
        Disorder::MetabolicAlkalosis => notes.push(if context.has(ContextFlag::ProlongedVomiting) {
            TherapeuticNote::VolumeRepletionWithPotassium
        } else {
            TherapeuticNote::InvestigateMetabolicAlkalosis
        }),
        Disorder::RespiratoryAcidosis => notes.push(if context.has(ContextFlag::Copd) {
            TherapeuticNote::VentilatorySupportCautiousOxygen
        } else {
            TherapeuticNote::AssessVentilation
        }),
        Disorder::RespiratoryAlkalosis => notes.push(if context.has(ContextFlag::SuspectedSepsis) {
            TherapeuticNote::EvaluateEarlySepsis
        } else {
            TherapeuticNote::TreatHyperventilationCause
        }),
    }
}

fn electrolyte_advice(finding: &ElectrolyteFinding) -> TherapeuticNote {
    use TherapeuticNote::*;

    match (finding.analyte, finding.tier) {
        (Analyte::Sodium, Tier::SevereLow) => SevereHyponatremiaSlowCorrection,
        (Analyte::Sodium, Tier::Low) => HyponatremiaAssessVolumeStatus,
        (Analyte::Sodium, Tier::High) => HypernatremiaReplaceFreeWater,
        (Analyte::Sodium, Tier::SevereHigh) => SevereHypernatremiaGradualCorrection,
        (Analyte::Potassium, Tier::SevereLow) => SevereHypokalemiaIntravenousReplacement,
        (Analyte::Potassium, Tier::Low) => ReplacePotassium,
        (Analyte::Potassium, Tier::High) => HyperkalemiaStopPotassiumSources,
        (Analyte::Potassium, Tier::SevereHigh) => EmergencyHyperkalemiaMeasures,
        (Analyte::Chloride, Tier::SevereLow) => SevereHypochloremiaRepletion,
        (Analyte::Chloride, Tier::Low) => ChlorideRepletion,
        (Analyte::Chloride, Tier::High) => HyperchloremiaLimitChlorideFluids,
        (Analyte::Chloride, Tier::SevereHigh) => SevereHyperchloremiaStopChlorideFluids,
        (Analyte::Lactate, _) => ReassessPerfusionAndLactate,
    }
}
