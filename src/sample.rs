//! Blood-gas input record
//!
//! A `BloodGasSample` is the only input the engine accepts. It carries the three
//! required gas values, the optional electrolytes/lactate/albumin and the
//! clinical context flags used by the therapeutic advisor.
//!
//! Callers own locale handling. `parse_decimal` is provided for front ends that
//! receive decimal-comma text ("7,35").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

/// Albumin assumed when the caller does not report one (g/dL)
pub const DEFAULT_ALBUMIN_G_DL: f64 = 4.5;

fn default_albumin() -> f64 {
    DEFAULT_ALBUMIN_G_DL
}

/// Measured quantity, used to label validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Pco2,
    Hco3,
    Sodium,
    Potassium,
    Chloride,
    Lactate,
    Albumin,
}

impl Parameter {
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Pco2 => "pCO2",
            Parameter::Hco3 => "HCO3",
            Parameter::Sodium => "Na",
            Parameter::Potassium => "K",
            Parameter::Chloride => "Cl",
            Parameter::Lactate => "Lactate",
            Parameter::Albumin => "Albumin",
        }
    }

    /// Unit suffix for messages (empty for pH)
    pub fn unit_suffix(&self) -> &'static str {
        match self {
            Parameter::Ph => "",
            Parameter::Pco2 => " mmHg",
            Parameter::Hco3 | Parameter::Sodium | Parameter::Potassium | Parameter::Chloride => {
                " mEq/L"
            }
            Parameter::Lactate => " mmol/L",
            Parameter::Albumin => " g/dL",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit attached to an expected compensation value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "mmHg")]
    MmHg,
    #[serde(rename = "mEq/L")]
    MeqPerL,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::MmHg => "mmHg",
            Unit::MeqPerL => "mEq/L",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Single clinical context flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextFlag {
    Copd,
    ProlongedVomiting,
    SuspectedSepsis,
    SevereDiarrhea,
}

impl FromStr for ContextFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "copd" => Ok(ContextFlag::Copd),
            "vomiting" | "prolonged_vomiting" => Ok(ContextFlag::ProlongedVomiting),
            "sepsis" | "suspected_sepsis" => Ok(ContextFlag::SuspectedSepsis),
            "diarrhea" | "diarrhoea" | "severe_diarrhea" => Ok(ContextFlag::SevereDiarrhea),
            other => Err(format!("unknown clinical context flag '{}'", other)),
        }
    }
}

/// Clinical context flags (all default to false)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalContext {
    pub copd: bool,
    pub prolonged_vomiting: bool,
    pub suspected_sepsis: bool,
    pub severe_diarrhea: bool,
}

impl ClinicalContext {
    pub fn with_flag(mut self, flag: ContextFlag) -> Self {
        match flag {
            ContextFlag::Copd => self.copd = true,
            ContextFlag::ProlongedVomiting => self.prolonged_vomiting = true,
            ContextFlag::SuspectedSepsis => self.suspected_sepsis = true,
            ContextFlag::SevereDiarrhea => self.severe_diarrhea = true,
        }
        self
    }

    pub fn has(&self, flag: ContextFlag) -> bool {
        match flag {
            ContextFlag::Copd => self.copd,
            ContextFlag::ProlongedVomiting => self.prolonged_vomiting,
            ContextFlag::SuspectedSepsis => self.suspected_sepsis,
            ContextFlag::SevereDiarrhea => self.severe_diarrhea,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.copd || self.prolonged_vomiting || self.suspected_sepsis || self.severe_diarrhea)
    }
}

/// Arterial blood-gas measurements for one analysis request
///
/// Built once per request, either through `new` + `with_*` or by deserializing
/// JSON. The engine only ever borrows it.
///
/// # Example
/// ```
/// use acid_base_engine::sample::{BloodGasSample, ContextFlag};
///
/// let sample = BloodGasSample::new(7.20, 30.0, 12.0)
///     .with_sodium(140.0)
///     .with_chloride(100.0)
///     .with_context(ContextFlag::SuspectedSepsis);
///
/// assert!(sample.has_ionogram());
/// assert_eq!(sample.albumin, 4.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodGasSample {
    /// Arterial pH
    pub ph: f64,
    /// pCO2 (mmHg)
    pub pco2: f64,
    /// HCO3 (mEq/L)
    pub hco3: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub na: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
    /// mmol/L
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lactate: Option<f64>,

    /// g/dL
    #[serde(default = "default_albumin")]
    pub albumin: f64,

    #[serde(default)]
    pub context: ClinicalContext,
}

impl BloodGasSample {
    pub fn new(ph: f64, pco2: f64, hco3: f64) -> Self {
        Self {
            ph,
            pco2,
            hco3,
            na: None,
            cl: None,
            k: None,
            lactate: None,
            albumin: DEFAULT_ALBUMIN_G_DL,
            context: ClinicalContext::default(),
        }
    }

    pub fn with_sodium(mut self, na: f64) -> Self {
        self.na = Some(na);
        self
    }

    pub fn with_chloride(mut self, cl: f64) -> Self {
        self.cl = Some(cl);
        self
    }

    pub fn with_potassium(mut self, k: f64) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_lactate(mut self, lactate: f64) -> Self {
        self.lactate = Some(lactate);
        self
    }

    pub fn with_albumin(mut self, albumin: f64) -> Self {
        self.albumin = albumin;
        self
    }

    pub fn with_context(mut self, flag: ContextFlag) -> Self {
        self.context = self.context.with_flag(flag);
        self
    }

    /// Na and Cl are both available (anion gap can be computed)
    pub fn has_ionogram(&self) -> bool {
        self.na.is_some() && self.cl.is_some()
    }

    /// Lactate strictly above `threshold`; absent lactate never passes
    pub fn lactate_above(&self, threshold: f64) -> bool {
        self.lactate.map_or(false, |l| l > threshold)
    }
}

/// Parse a number that may use a decimal comma ("7,35" or "7.35")
pub fn parse_decimal(text: &str) -> Result<f64, ParseFloatError> {
    text.trim().replace(',', ".").parse::<f64>()
}
