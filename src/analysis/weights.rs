// Scoring constants for the analysis pipeline.

/// Tunable constants for keyword and similarity scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Added once per keyword found verbatim in the text (default 2.0).
    pub keyword_match: f64,
    /// Token/keyword cosine similarity must exceed this to count (default 0.7).
    /// The similarity value itself is what gets added.
    pub similarity_threshold: f64,
    /// A winning score below this falls back to the general physician
    /// (default 1.0).
    pub fallback_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_match: 2.0,
            similarity_threshold: 0.7,
            fallback_threshold: 1.0,
        }
    }
}
