//! Electrolyte Classification
//!
//! Each analyte is tiered on its own scale; within one analyte the most
//! severe tier wins and at most one finding is produced. Absent analytes
//! produce nothing.
//!
//! | Analyte | Severe-low | Low   | Normal   | High   | Severe-high |
//! |---------|------------|-------|----------|--------|-------------|
//! | Na      | <120       | <135  | 135–145  | >145   | >155        |
//! | K       | <2.5       | <3.5  | 3.5–5.0  | >5.0   | >6.0        |
//! | Cl      | <90        | <98   | 98–106   | >106   | >115        |
//!
//! Lactate has a single threshold (> 2.2 mmol/L).

use serde::{Deserialize, Serialize};

use crate::sample::BloodGasSample;

/// Lactate above this is reported as elevated (mmol/L)
pub const LACTATE_ELEVATED_ABOVE: f64 = 2.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyte {
    Sodium,
    Potassium,
    Chloride,
    Lactate,
}

impl Analyte {
    pub fn symbol(&self) -> &'static str {
        match self {
            Analyte::Sodium => "Na",
            Analyte::Potassium => "K",
            Analyte::Chloride => "Cl",
            Analyte::Lactate => "Lactate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    SevereLow,
    Low,
    High,
    SevereHigh,
}

impl Tier {
    pub fn is_severe(&self) -> bool {
        matches!(self, Tier::SevereLow | Tier::SevereHigh)
    }
}

/// Tier cut-offs for one analyte
#[derive(Debug, Clone, Copy)]
pub struct TierThresholds {
    pub severe_low: f64,
    pub low: f64,
    pub high: f64,
    pub severe_high: f64,
}

impl TierThresholds {
    pub fn classify(&self, value: f64) -> Option<Tier> {
        if value < self.severe_low {
            Some(Tier::SevereLow)
        } else if value < self.low {
            Some(Tier::Low)
        } else if value > self.severe_high {
            Some(Tier::SevereHigh)
        } else if value > self.high {
            Some(Tier::High)
        } else {
            None
        }
    }
}

pub const SODIUM_TIERS: TierThresholds = TierThresholds {
    severe_low: 120.0,
    low: 135.0,
    high: 145.0,
    severe_high: 155.0,
};

pub const POTASSIUM_TIERS: TierThresholds = TierThresholds {
    severe_low: 2.5,
    low: 3.5,
    high: 5.0,
    severe_high: 6.0,
};

pub const CHLORIDE_TIERS: TierThresholds = TierThresholds {
    severe_low: 90.0,
    low: 98.0,
    high: 106.0,
    severe_high: 115.0,
};

/// One abnormal analyte
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteFinding {
    pub analyte: Analyte,
    pub tier: Tier,
    pub value: f64,
}

impl ElectrolyteFinding {
    pub fn label(&self) -> &'static str {
        match (self.analyte, self.tier) {
            (Analyte::Sodium, Tier::SevereLow) => "Severe hyponatremia",
            (Analyte::Sodium, Tier::Low) => "Hyponatremia",
            (Analyte::Sodium, Tier::High) => "Hypernatremia",
            (Analyte::Sodium, Tier::SevereHigh) => "Severe hypernatremia",
            (Analyte::Potassium, Tier::SevereLow) => "Severe hypokalemia",
            (Analyte::Potassium, Tier::Low) => "Hypokalemia",
            (Analyte::Potassium, Tier::High) => "Hyperkalemia",
            (Analyte::Potassium, Tier::SevereHigh) => "Severe hyperkalemia",
            (Analyte::Chloride, Tier::SevereLow) => "Severe hypochloremia",
            (Analyte::Chloride, Tier::Low) => "Hypochloremia",
            (Analyte::Chloride, Tier::High) => "Hyperchloremia",
            (Analyte::Chloride, Tier::SevereHigh) => "Severe hyperchloremia",
            (Analyte::Lactate, _) => "Elevated lactate: possible lactic acidosis",
        }
    }
}

/// Classify Na, K, Cl and lactate (in that order)
pub fn classify_electrolytes(sample: &BloodGasSample) -> Vec<ElectrolyteFinding> {
    let tiered = [
        (Analyte::Sodium, sample.na, SODIUM_TIERS),
        (Analyte::Potassium, sample.k, POTASSIUM_TIERS),
        (Analyte::Chloride, sample.cl, CHLORIDE_TIERS),
    ];

    let mut findings: Vec<ElectrolyteFinding> = tiered
        .into_iter()
        .filter_map(|(analyte, value, thresholds)| {
            let value = value?;
            thresholds.classify(value).map(|tier| ElectrolyteFinding { analyte, tier, value })
        })
        .collect();

    if let Some(lactate) = sample.lactate.filter(|&l| l > LACTATE_ELEVATED_ABOVE) {
        findings.push(ElectrolyteFinding {
            analyte: Analyte::Lactate,
            tier: Tier::High,
            value: lactate,
        });
    }

    findings
}
