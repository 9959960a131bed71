// Verbatim keyword matching over the lower-cased input.
//
// Plain substring containment: "ear" matches inside "hearing" and
// "earlier" alike. Each keyword counts once per request no matter how
// often it repeats.

use tracing::debug;

use super::scores::ScoreTable;
use crate::specialty::registry::{Specialty, SpecialtyRegistry};

/// A keyword found in the input text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordHit {
    pub specialty: Specialty,
    pub keyword: &'static str,
}

pub struct KeywordMatcher {
    registry: SpecialtyRegistry,
    increment: f64,
}

impl KeywordMatcher {
    pub fn new(registry: SpecialtyRegistry, increment: f64) -> Self {
        Self {
            registry,
            increment,
        }
    }

    /// Every (specialty, keyword) pair whose keyword occurs in `lowercased`.
    pub fn matches(&self, lowercased: &str) -> Vec<KeywordHit> {
        self.registry
            .all_specialties()
            .iter()
            .flat_map(|profile| {
                profile
                    .keywords
                    .iter()
                    .filter(|kw| lowercased.contains(**kw))
                    .map(move |&keyword| KeywordHit {
                        specialty: profile.specialty,
                        keyword,
                    })
            })
            .collect()
    }

    /// Add the fixed increment to `table` for every match. Returns the
    /// number of matches.
    pub fn apply(&self, lowercased: &str, table: &mut ScoreTable) -> usize {
        let hits = self.matches(lowercased);
        for hit in &hits {
            table.add(hit.specialty, self.increment);
        }
        if !hits.is_empty() {
            debug!(hits = ?hits, "Keyword matches");
        }
        hits.len()
    }
}
