// The symptom analyzer service.
//
// Built once at startup around a word vector provider and shared by
// reference (usually behind an Arc) across all requests. Construction
// resolves the keyword vectors; after that nothing is mutated, so
// concurrent calls need no locking. Each call owns its tokens and score
// table for its own duration only.

use std::sync::Arc;

use tracing::{debug, info};

use super::decision::{DecisionPolicy, Recommendation};
use super::error::AnalyzeError;
use super::keywords::KeywordMatcher;
use super::normalizer::TextNormalizer;
use super::scores::ScoreTable;
use super::similarity::{KeywordVectors, SimilarityScorer};
use super::weights::ScoringWeights;
use crate::specialty::registry::{Specialty, SpecialtyRegistry};
use crate::vectors::traits::WordVectors;

pub struct SymptomAnalyzer {
    registry: SpecialtyRegistry,
    normalizer: TextNormalizer,
    vectors: Arc<dyn WordVectors>,
    keyword_vectors: KeywordVectors,
    weights: ScoringWeights,
    max_chars: Option<usize>,
}

impl SymptomAnalyzer {
    /// Build an analyzer with the default English stop words.
    pub fn new(vectors: Arc<dyn WordVectors>) -> Result<Self, AnalyzeError> {
        Self::with_normalizer(vectors, TextNormalizer::default())
    }

    /// Build an analyzer with a custom normalizer.
    pub fn with_normalizer(
        vectors: Arc<dyn WordVectors>,
        normalizer: TextNormalizer,
    ) -> Result<Self, AnalyzeError> {
        let registry = SpecialtyRegistry::default();
        let keyword_vectors = KeywordVectors::resolve(&registry, &normalizer, vectors.as_ref())
            .map_err(AnalyzeError::model_unavailable)?;

        info!(
            provider = vectors.name(),
            keywords = keyword_vectors.total(),
            with_vectors = keyword_vectors.known(),
            "Symptom analyzer ready"
        );

        Ok(Self {
            registry,
            normalizer,
            vectors,
            keyword_vectors,
            weights: ScoringWeights::default(),
            max_chars: None,
        })
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Cap input length; longer text is cut at `max` characters.
    pub fn with_max_chars(mut self, max: Option<usize>) -> Self {
        self.max_chars = max;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.vectors.name()
    }

    pub fn registry(&self) -> &SpecialtyRegistry {
        &self.registry
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Score every specialty for `text`.
    pub fn score(&self, text: &str) -> Result<ScoreTable, AnalyzeError> {
        let text = match self.max_chars {
            Some(max) => truncate_chars(text, max),
            None => text,
        };

        let normalized = self
            .normalizer
            .normalize(text, self.vectors.as_ref())
            .map_err(AnalyzeError::unexpected)?;

        let mut table = ScoreTable::new();

        let keyword_hits = KeywordMatcher::new(self.registry, self.weights.keyword_match)
            .apply(&normalized.lowercased, &mut table);

        let similarity_hits = SimilarityScorer::new(
            &self.registry,
            &self.keyword_vectors,
            self.weights.similarity_threshold,
        )
        .apply(&normalized.tokens, &mut table);

        debug!(
            tokens = normalized.tokens.len(),
            keyword_hits,
            similarity_hits,
            max_score = table.max(),
            "Scored symptom text"
        );

        Ok(table)
    }

    /// Recommend one specialty for `text`.
    pub fn analyze(&self, text: &str) -> Result<Recommendation, AnalyzeError> {
        let table = self.score(text)?;
        let specialty = self.decide(&table);
        debug!(specialty = %specialty, "Recommendation");
        Ok(Recommendation::for_specialty(specialty))
    }

    /// Apply the decision policy to a table produced by `score`.
    pub fn decide(&self, table: &ScoreTable) -> Specialty {
        DecisionPolicy::new(self.weights.fallback_threshold).decide(table)
    }
}

/// The first `max` characters of `text`, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
