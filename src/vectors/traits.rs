// Word vector provider trait: the swap-ready seam between the scoring
// pipeline and whatever model produces embeddings.

use anyhow::Result;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

/// Source of per-word embedding vectors.
///
/// Implementations are shared read-only across concurrent requests, so
/// every method takes `&self` and the trait requires `Send + Sync`.
pub trait WordVectors: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Vector for a single surface form.
    ///
    /// `Ok(None)` means the provider has no vector for this word, which is
    /// an expected outcome. `Err` means the provider itself failed.
    fn vector(&self, word: &str) -> Result<Option<Vec<f64>>>;

    /// Vectors for several words, returned in the same order.
    /// Default implementation calls `vector` sequentially; providers
    /// can override for batching if they support it.
    fn vectors(&self, words: &[String]) -> Result<Vec<Option<Vec<f64>>>> {
        words.iter().map(|w| self.vector(w)).collect()
    }

    /// Split text into word and punctuation units.
    fn pre_tokenize(&self, text: &str) -> Result<Vec<String>> {
        bert_pre_tokenize(text)
    }
}

/// BERT-style pre-tokenization: split on whitespace, and emit every
/// punctuation character as its own unit.
pub fn bert_pre_tokenize(text: &str) -> Result<Vec<String>> {
    let mut pretokenized = PreTokenizedString::from(text);
    BertPreTokenizer
        .pre_tokenize(&mut pretokenized)
        .map_err(|e| anyhow::anyhow!("Pre-tokenization failed: {}", e))?;

    Ok(pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(split, _, _)| split.to_string())
        .collect())
}
