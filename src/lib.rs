//! Acid-Base Engine
//!
//! Rule engine for arterial blood-gas interpretation. One `BloodGasSample`
//! in, one `AnalysisReport` out; no I/O and no state between calls.
//!
//! Module layout:
//! - `sample`: input record and clinical context flags
//! - `analyzers/`: validation, disorder classification, compensation,
//!   anion gap / delta ratio, electrolytes, base excess
//! - `explanation/`: interpretation notes, therapeutic advisor, formatters
//! - `engine`: pipeline coordinator (sequential and Rayon batch)
//! - `utils/`: configuration loading

pub mod sample;
pub mod error;
pub mod utils;
pub mod analyzers;
pub mod explanation;
pub mod report;
pub mod engine;

// Re-export commonly used types
pub use sample::{BloodGasSample, ClinicalContext, ContextFlag, parse_decimal};
pub use error::{ComputationSkipped, Inconsistency, ValidationError};
pub use utils::AnalysisConfig;
pub use analyzers::{Disorder, DisorderPattern, DeltaRatioBucket, AnionGapInterpretation, Analyte, Tier};
pub use explanation::{InterpretationNote, TherapeuticNote, Severity, JsonFormatter, MarkdownFormatter};
pub use report::AnalysisReport;
pub use engine::{AcidBaseAnalyzer, analyze};
