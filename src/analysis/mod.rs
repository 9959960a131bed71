// Symptom analysis: text normalization, keyword and similarity scoring,
// and the final specialty decision.
//
// Data flow for one request:
//   raw text -> TextNormalizer -> {KeywordMatcher, SimilarityScorer}
//            -> ScoreTable -> DecisionPolicy -> Recommendation

pub mod analyzer;
pub mod decision;
pub mod error;
pub mod keywords;
pub mod normalizer;
pub mod scores;
pub mod similarity;
pub mod weights;
