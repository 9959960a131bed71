// Final specialty decision from a filled score table.
//
// Highest score wins, ties go to the specialty declared first in the
// registry, and a winning score below the fallback threshold is replaced
// by the general physician.

use serde::Serialize;

use super::scores::ScoreTable;
use crate::specialty::registry::Specialty;

/// The answer returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub specialty: Specialty,
    pub message: String,
}

impl Recommendation {
    pub fn for_specialty(specialty: Specialty) -> Self {
        Self {
            specialty,
            message: format!(
                "Based on your symptoms, I recommend consulting a {}.",
                specialty.name()
            ),
        }
    }
}

pub struct DecisionPolicy {
    fallback_threshold: f64,
    fallback: Specialty,
}

impl DecisionPolicy {
    pub fn new(fallback_threshold: f64) -> Self {
        Self {
            fallback_threshold,
            fallback: Specialty::FALLBACK,
        }
    }

    /// Pick the specialty for a finished score table.
    pub fn decide(&self, table: &ScoreTable) -> Specialty {
        let mut best: Option<(Specialty, f64)> = None;
        for (specialty, score) in table.iter() {
            // Strict comparison keeps the earliest specialty on ties
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((specialty, score));
            }
        }

        match best {
            Some((specialty, top)) if top >= self.fallback_threshold => specialty,
            _ => self.fallback,
        }
    }
}
