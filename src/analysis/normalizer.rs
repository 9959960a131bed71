// Text normalization: lower-casing, tokenization, stop word and
// punctuation tagging, and per-token vector lookup.

use std::collections::HashSet;

use anyhow::Result;
use stop_words::{get, LANGUAGE};

use crate::vectors::traits::WordVectors;

/// One normalized unit of the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub is_stopword: bool,
    pub is_punctuation: bool,
    /// Embedding vector, if the provider has one for this surface form.
    pub vector: Option<Vec<f64>>,
}

impl Token {
    /// Whether this token takes part in similarity scoring.
    pub fn is_content(&self) -> bool {
        !self.is_stopword && !self.is_punctuation
    }
}

/// Output of normalizing one request's text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    /// The whole input, lower-cased. Keyword matching runs on this.
    pub lowercased: String,
    pub tokens: Vec<Token>,
}

/// Lower-cases and tokenizes symptom text.
pub struct TextNormalizer {
    stop_words: HashSet<String>,
}

impl Default for TextNormalizer {
    /// English stop words (the NLTK list) from the stop-words crate.
    fn default() -> Self {
        Self::with_stop_words(get(LANGUAGE::English))
    }
}

impl TextNormalizer {
    /// Build a normalizer with an explicit stop word list.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lower-case, tokenize, tag and vectorize `text`.
    pub fn normalize(&self, text: &str, vectors: &dyn WordVectors) -> Result<NormalizedText> {
        let lowercased = text.to_lowercase();
        let units = vectors.pre_tokenize(&lowercased)?;
        let unit_vectors = vectors.vectors(&units)?;

        let tokens = units
            .into_iter()
            .zip(unit_vectors)
            .map(|(unit, vector)| Token {
                is_stopword: self.is_stop_word(&unit),
                is_punctuation: is_punctuation(&unit),
                text: unit,
                vector,
            })
            .collect();

        Ok(NormalizedText { lowercased, tokens })
    }

    /// First token of a (possibly multi-word) keyword, e.g. "chest" for
    /// "chest pain".
    pub fn first_token(&self, keyword: &str, vectors: &dyn WordVectors) -> Result<Option<String>> {
        Ok(vectors
            .pre_tokenize(&keyword.to_lowercase())?
            .into_iter()
            .next())
    }
}

/// A unit made only of non-alphanumeric, non-space characters.
fn is_punctuation(unit: &str) -> bool {
    !unit.is_empty() && unit.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::table::StaticWordVectors;

    fn vectors() -> StaticWordVectors {
        StaticWordVectors::from_pairs([("rash", vec![1.0, 0.0]), ("itchy", vec![0.0, 1.0])])
            .unwrap()
    }

    #[test]
    fn test_lowercases_full_text() {
        let normalizer = TextNormalizer::with_stop_words(["a"]);
        let out = normalizer.normalize("A RASH, Itchy!", &vectors()).unwrap();
        assert_eq!(out.lowercased, "a rash, itchy!");
        let texts: Vec<&str> = out.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "rash", ",", "itchy", "!"]);
    }

    #[test]
    fn test_tags_stopwords_and_punctuation() {
        let normalizer = TextNormalizer::with_stop_words(["a"]);
        let out = normalizer.normalize("a rash, itchy!", &vectors()).unwrap();
        assert!(out.tokens[0].is_stopword);
        assert!(!out.tokens[0].is_content());
        assert!(out.tokens[2].is_punctuation);
        assert!(out.tokens[4].is_punctuation);
        assert!(out.tokens[1].is_content());
    }

    #[test]
    fn test_attaches_vectors_when_available() {
        let normalizer = TextNormalizer::with_stop_words(Vec::<String>::new());
        let out = normalizer.normalize("rash unknownword", &vectors()).unwrap();
        assert_eq!(out.tokens[0].vector, Some(vec![1.0, 0.0]));
        assert_eq!(out.tokens[1].vector, None);
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::default();
        let out = normalizer.normalize("", &vectors()).unwrap();
        assert!(out.lowercased.is_empty());
        assert!(out.tokens.is_empty());
    }

    #[test]
    fn test_default_stop_words_cover_common_words() {
        let normalizer = TextNormalizer::default();
        assert!(normalizer.is_stop_word("the"));
        assert!(normalizer.is_stop_word("and"));
        assert!(!normalizer.is_stop_word("migraine"));
    }

    #[test]
    fn test_default_stop_words_keep_symptom_words() {
        // Words that carry meaning in a symptom description stay content
        let normalizer = TextNormalizer::default();
        for word in ["general", "system", "face", "back", "problem", "pain"] {
            assert!(!normalizer.is_stop_word(word), "{word} should not be a stop word");
        }
    }

    #[test]
    fn test_first_token_of_phrase() {
        let normalizer = TextNormalizer::default();
        let first = normalizer.first_token("chest pain", &vectors()).unwrap();
        assert_eq!(first.as_deref(), Some("chest"));
        assert_eq!(normalizer.first_token("", &vectors()).unwrap(), None);
    }

    #[test]
    fn test_is_punctuation() {
        assert!(is_punctuation("!"));
        assert!(is_punctuation("—"));
        assert!(!is_punctuation("a"));
        assert!(!is_punctuation("3"));
        assert!(!is_punctuation(""));
    }
}
