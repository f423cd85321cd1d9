use crate::analyzers::{AnionGapAnalysis, CompensationAssessment, Disorder, PH_ACIDEMIA_BELOW};
use crate::explanation::types::InterpretationNote;
use crate::sample::BloodGasSample;

/// Lactate above this with a high AG points to lactic acidosis (mmol/L)
pub const LACTIC_ACIDOSIS_LACTATE_ABOVE: f64 = 4.0;
/// Cl below this in metabolic alkalosis points to gastric losses (mEq/L)
pub const HYPOCHLOREMIC_ALKALOSIS_CL_BELOW: f64 = 95.0;
/// HCO3 above this in acidemic respiratory acidosis suggests chronicity (mEq/L)
pub const CHRONIC_RESP_ACIDOSIS_HCO3_ABOVE: f64 = 30.0;

/// Contextual notes derived from the classified sample
///
/// Order: compensation, lactic acidosis, hypochloremic alkalosis, chronic
/// respiratory acidosis.
pub fn interpret(
    sample: &BloodGasSample,
    disorders: &[Disorder],
    anion_gap: Option<&AnionGapAnalysis>,
    compensation: Option<&CompensationAssessment>,
) -> Vec<InterpretationNote> {
    let mut notes = Vec::new();

    if compensation.map_or(false, |c| !c.adequate) {
        notes.push(InterpretationNote::ConsiderMixedOrTripleDisorder);
    }

    let high_gap = anion_gap.map_or(false, |ag| ag.is_elevated());
    if high_gap
        && disorders.contains(&Disorder::MetabolicAcidosis)
        && sample.lactate_above(LACTIC_ACIDOSIS_LACTATE_ABOVE)
    {
        notes.push(InterpretationNote::SuspectLacticAcidosis);
    }

    if disorders.contains(&Disorder::MetabolicAlkalosis)
        && sample.cl.map_or(false, |cl| cl < HYPOCHLOREMIC_ALKALOSIS_CL_BELOW)
    {
        notes.push(InterpretationNote::SuspectHypochloremicAlkalosis);
    }

    if disorders.contains(&Disorder::RespiratoryAcidosis)
        && sample.hco3 > CHRONIC_RESP_ACIDOSIS_HCO3_ABOVE
        && sample.ph < PH_ACIDEMIA_BELOW
    {
        notes.push(InterpretationNote::SuspectChronicRespiratoryAcidosis);
    }

    notes
}
