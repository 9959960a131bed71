// Per-request score table.

use crate::specialty::registry::Specialty;

/// Accumulated score per specialty, stored in registry order.
///
/// Created zeroed for each request and discarded after the decision.
/// Scores only ever grow, so every entry stays finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    scores: [f64; Specialty::COUNT],
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreTable {
    pub fn new() -> Self {
        Self {
            scores: [0.0; Specialty::COUNT],
        }
    }

    /// Add a contribution to a specialty. Negative or non-finite amounts
    /// are ignored.
    pub fn add(&mut self, specialty: Specialty, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.scores[specialty.index()] += amount;
        }
    }

    pub fn get(&self, specialty: Specialty) -> f64 {
        self.scores[specialty.index()]
    }

    /// (specialty, score) pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Specialty, f64)> + '_ {
        Specialty::ALL.iter().map(|&s| (s, self.scores[s.index()]))
    }

    /// The highest score in the table.
    pub fn max(&self) -> f64 {
        self.scores.iter().copied().fold(0.0, f64::max)
    }
}
