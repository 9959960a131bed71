// Static word vector table in the GloVe / word2vec text format.
//
// One word per line followed by its components, separated by whitespace:
//
//   headache 0.213 -0.557 0.018 ...
//
// A word2vec-style header line ("<count> <dim>") is accepted and checked.
// This is the same kind of table classic NLP pipelines ship as their
// "large" English vectors: one fixed vector per surface form, and no
// vector at all for words outside the vocabulary.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::traits::WordVectors;

/// In-memory word → vector lookup table.
#[derive(Debug, Clone, Default)]
pub struct StaticWordVectors {
    vectors: HashMap<String, Vec<f64>>,
    dim: usize,
}

/// Dimension declared by a word2vec "<count> <dim>" first line.
///
/// Two integers on the first line are ambiguous with a one-dimensional
/// row for a numeric word, so they only count as a header when the rows
/// after them are not themselves one-dimensional.
fn word2vec_header(text: &str) -> Option<usize> {
    let mut lines = text.lines();
    let first: Vec<&str> = lines.next()?.split_whitespace().collect();
    let [count, dim] = first.as_slice() else {
        return None;
    };
    count.parse::<usize>().ok()?;
    let dim = dim.parse::<usize>().ok()?;

    let one_dimensional_rows = lines
        .map(|l| l.split_whitespace().count())
        .any(|n| n == 2);
    (!one_dimensional_rows).then_some(dim)
}

impl StaticWordVectors {
    /// Build a table from (word, vector) pairs. All vectors must share one
    /// dimension; the first occurrence of a duplicated word wins.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (word, vector) in pairs {
            table.insert(word.into(), vector)?;
        }
        Ok(table)
    }

    /// Load a table from a text file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vector table {}", path.display()))?;
        let table = Self::parse(&text)
            .with_context(|| format!("Invalid vector table {}", path.display()))?;

        if table.is_empty() {
            anyhow::bail!("Vector table {} contains no vectors", path.display());
        }

        info!(
            words = table.len(),
            dim = table.dim,
            "Loaded static word vectors from {}",
            path.display()
        );
        Ok(table)
    }

    /// Parse the text format described at the top of this module.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::default();
        let declared_dim = word2vec_header(text);

        for (line_no, line) in text.lines().enumerate() {
            if line_no == 0 && declared_dim.is_some() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            let vector = rest
                .iter()
                .map(|v| v.parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .with_context(|| format!("Line {}: non-numeric component", line_no + 1))?;

            if let Some(dim) = declared_dim {
                if vector.len() != dim {
                    anyhow::bail!(
                        "Line {}: expected {} components from header, found {}",
                        line_no + 1,
                        dim,
                        vector.len()
                    );
                }
            }

            table
                .insert(word.to_string(), vector)
                .with_context(|| format!("Line {}", line_no + 1))?;
        }

        Ok(table)
    }

    fn insert(&mut self, word: String, vector: Vec<f64>) -> Result<()> {
        if vector.is_empty() {
            anyhow::bail!("Vector for {word:?} has no components");
        }
        if self.vectors.is_empty() {
            self.dim = vector.len();
        } else if vector.len() != self.dim {
            anyhow::bail!(
                "Vector for {word:?} has {} components, table dimension is {}",
                vector.len(),
                self.dim
            );
        }
        self.vectors.entry(word).or_insert(vector);
        Ok(())
    }

    /// Vector dimension (0 for an empty table).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl WordVectors for StaticWordVectors {
    fn name(&self) -> &'static str {
        "table"
    }

    fn vector(&self, word: &str) -> Result<Option<Vec<f64>>> {
        let found = self
            .vectors
            .get(word)
            .or_else(|| self.vectors.get(&word.to_lowercase()));
        Ok(found.cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_glove_format() {
        let table = StaticWordVectors::parse("head 1.0 0.0\nache 0.5 0.5\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dim(), 2);
        assert_eq!(table.vector("ache").unwrap(), Some(vec![0.5, 0.5]));
    }

    #[test]
    fn test_parse_word2vec_header() {
        let table = StaticWordVectors::parse("2 3\na 1 2 3\nb 4 5 6\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dim(), 3);
    }

    #[test]
    fn test_numeric_first_row_of_one_dimensional_table_is_kept() {
        let table = StaticWordVectors::parse("5 3\n6 4\nseven 0.5\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.dim(), 1);
        assert_eq!(table.vector("5").unwrap(), Some(vec![3.0]));
    }

    #[test]
    fn test_header_without_rows_is_not_a_vector() {
        let table = StaticWordVectors::parse("0 300\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_header_dimension_mismatch_fails() {
        let result = StaticWordVectors::parse("1 3\na 1 2\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_ragged_rows_fail() {
        let result = StaticWordVectors::parse("a 1 2\nb 1 2 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_component_fails() {
        let result = StaticWordVectors::parse("a 1 two\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = StaticWordVectors::parse("\na 1 2\n\n   \nb 3 4\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_word_has_no_vector() {
        let table = StaticWordVectors::from_pairs([("skin", vec![1.0, 0.0])]).unwrap();
        assert_eq!(table.vector("asdf").unwrap(), None);
    }

    #[test]
    fn test_lookup_falls_back_to_lowercase() {
        let table = StaticWordVectors::from_pairs([("skin", vec![1.0, 0.0])]).unwrap();
        assert!(table.vector("Skin").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_word_keeps_first() {
        let table =
            StaticWordVectors::from_pairs([("a", vec![1.0]), ("a", vec![2.0])]).unwrap();
        assert_eq!(table.vector("a").unwrap(), Some(vec![1.0]));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fever 0.1 0.2 0.3").unwrap();
        writeln!(file, "rash 0.3 0.2 0.1").unwrap();
        let table = StaticWordVectors::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dim(), 3);
    }

    #[test]
    fn test_load_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(StaticWordVectors::load(file.path()).is_err());
    }
}
