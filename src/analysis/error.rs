// Errors surfaced by the analyzer to its callers.
//
// Missing vectors and empty input are not errors: the first is skipped
// silently and the second flows through to the fallback decision.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The embedding provider could not be loaded or failed while the
    /// analyzer was being built. Fatal at startup.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// Anything else that went wrong while scoring a request.
    #[error("symptom analysis failed: {0}")]
    UnexpectedFailure(String),
}

impl AnalyzeError {
    pub(crate) fn model_unavailable(err: anyhow::Error) -> Self {
        AnalyzeError::ModelUnavailable(format!("{err:#}"))
    }

    pub(crate) fn unexpected(err: anyhow::Error) -> Self {
        AnalyzeError::UnexpectedFailure(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_cause_chain() {
        let err = anyhow::anyhow!("file missing").context("loading model");
        let msg = AnalyzeError::model_unavailable(err).to_string();
        assert!(msg.contains("loading model"), "got: {msg}");
        assert!(msg.contains("file missing"), "got: {msg}");
    }
}
