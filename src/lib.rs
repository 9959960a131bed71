// Triage: symptom text to medical specialty recommendation
//
// This is the library root. Each module corresponds to a major subsystem:
// the fixed specialty registry, the scoring pipeline, the word vector
// providers it depends on, and the outer surfaces (CLI output, web).

pub mod analysis;
pub mod companion;
pub mod config;
pub mod output;
pub mod specialty;
pub mod vectors;

#[cfg(feature = "web")]
pub mod web;
