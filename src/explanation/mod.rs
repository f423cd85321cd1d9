pub mod types;
pub mod notes;
pub mod advisor;
pub mod formatters;

pub use types::{InterpretationNote, Severity, TherapeuticNote};

pub use notes::interpret;
pub use advisor::advise;

pub use formatters::{JsonFormatter, MarkdownFormatter};
