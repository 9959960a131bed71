// Semantic similarity between input tokens and specialty keywords.
//
// Every content token is compared against the vector of every keyword's
// first token, across every specialty. Each (token, keyword) pair that
// clears the threshold adds its similarity to that keyword's specialty,
// so one token can feed several specialties in the same request and a
// long input adds up without normalization.
//
// Cost is O(tokens x specialties x keywords) per request.

use anyhow::Result;
use tracing::debug;

use super::normalizer::{TextNormalizer, Token};
use super::scores::ScoreTable;
use crate::specialty::registry::SpecialtyRegistry;
use crate::vectors::traits::WordVectors;

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Returns 0.0 for empty, mismatched or zero-magnitude inputs.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// First-token vectors for every registry keyword, aligned with the
/// registry: `per_specialty[i][j]` belongs to keyword `j` of profile `i`.
#[derive(Debug, Clone, Default)]
pub struct KeywordVectors {
    per_specialty: Vec<Vec<Option<Vec<f64>>>>,
}

impl KeywordVectors {
    /// Resolve the vector of each keyword's first token.
    pub fn resolve(
        registry: &SpecialtyRegistry,
        normalizer: &TextNormalizer,
        vectors: &dyn WordVectors,
    ) -> Result<Self> {
        let mut per_specialty = Vec::with_capacity(registry.len());

        for profile in registry.all_specialties() {
            let mut firsts = Vec::with_capacity(profile.keywords.len());
            for keyword in profile.keywords {
                firsts.push(normalizer.first_token(keyword, vectors)?.unwrap_or_default());
            }
            per_specialty.push(vectors.vectors(&firsts)?);
        }

        Ok(Self { per_specialty })
    }

    /// Number of keywords that have a usable vector.
    pub fn known(&self) -> usize {
        self.per_specialty
            .iter()
            .flatten()
            .filter(|v| v.is_some())
            .count()
    }

    /// Total number of keywords covered.
    pub fn total(&self) -> usize {
        self.per_specialty.iter().map(Vec::len).sum()
    }
}

pub struct SimilarityScorer<'a> {
    registry: &'a SpecialtyRegistry,
    keyword_vectors: &'a KeywordVectors,
    threshold: f64,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(
        registry: &'a SpecialtyRegistry,
        keyword_vectors: &'a KeywordVectors,
        threshold: f64,
    ) -> Self {
        Self {
            registry,
            keyword_vectors,
            threshold,
        }
    }

    /// Add similarity contributions for `tokens` to `table`. Returns the
    /// number of (token, keyword) pairs that cleared the threshold.
    pub fn apply(&self, tokens: &[Token], table: &mut ScoreTable) -> usize {
        let mut hits = 0;

        for token in tokens.iter().filter(|t| t.is_content()) {
            let Some(token_vec) = token.vector.as_deref() else {
                continue;
            };

            for (profile, keyword_vecs) in self
                .registry
                .all_specialties()
                .iter()
                .zip(&self.keyword_vectors.per_specialty)
            {
                for keyword_vec in keyword_vecs.iter().flatten() {
                    let similarity = cosine_similarity(token_vec, keyword_vec);
                    if similarity > self.threshold {
                        table.add(profile.specialty, similarity.min(1.0));
                        hits += 1;
                    }
                }
            }
        }

        if hits > 0 {
            debug!(hits, "Similarity matches");
        }
        hits
    }
}
