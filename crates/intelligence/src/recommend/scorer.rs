//! Relevance scoring of one candidate item against a capability gap.

use super::similarity::compute_similarity;
use crate::types::{CandidateItem, MatchScore, MatchedCapability, MissingCapability};
use serde::{Deserialize, Serialize};

/// Share of the combined score taken from the item title.
pub const NAME_WEIGHT: f64 = 0.7;
/// Share of the combined score taken from the item description.
pub const DESCRIPTION_WEIGHT: f64 = 0.3;
/// Combined scores at or below this are noise.
pub const MATCH_THRESHOLD: f64 = 0.3;
/// Multiplier for essential capabilities; optional ones count once.
pub const ESSENTIAL_WEIGHT: f64 = 2.0;

/// Tunable weights for relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the title similarity.
    pub name: f64,
    /// Weight of the description similarity.
    pub description: f64,
    /// Minimum combined score (exclusive) for a capability to count.
    pub threshold: f64,
    /// Multiplier applied to essential capabilities.
    pub essential: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name: NAME_WEIGHT,
            description: DESCRIPTION_WEIGHT,
            threshold: MATCH_THRESHOLD,
            essential: ESSENTIAL_WEIGHT,
        }
    }
}

/// Trait for scoring candidate items against missing capabilities.
pub trait Scorer {
    /// Score an item; `None` when no capability clears the threshold.
    fn evaluate(&self, item: &CandidateItem, missing: &[MissingCapability]) -> Option<MatchScore>;
}

/// Scores items by weighted title/description similarity.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
}

impl RelevanceScorer {
    /// Create a scorer with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Current weights.
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Combined similarity of a capability label to an item's title and description.
    ///
    /// Both texts are expected lower-cased already.
    pub fn combined_score(&self, label: &str, name: &str, description: &str) -> f64 {
        let name_score = compute_similarity(label, name);
        let desc_score = compute_similarity(label, description);
        name_score * self.weights.name + desc_score * self.weights.description
    }
}

impl Scorer for RelevanceScorer {
    fn evaluate(&self, item: &CandidateItem, missing: &[MissingCapability]) -> Option<MatchScore> {
        let name = item.name.to_lowercase();
        let description = item
            .description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let mut score = MatchScore::default();
        for capability in missing {
            let label = capability.label.to_lowercase();
            let combined = self.combined_score(&label, &name, &description);
            if combined <= self.weights.threshold {
                continue;
            }
            score.total_score += combined * capability.level.weight(self.weights.essential);
            score.matched.push(MatchedCapability {
                label,
                score: combined,
                level: capability.level,
            });
        }

        if score.matched.is_empty() {
            None
        } else {
            Some(score)
        }
    }
}


/// Property-based tests for the relevance scorer.
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::types::RequiredLevel;
    use proptest::prelude::*;

    fn level() -> impl Strategy<Value = RequiredLevel> {
        prop_oneof![Just(RequiredLevel::Essential), Just(RequiredLevel::Optional)]
    }

    proptest! {
        /// Property: every traced capability scored strictly above the threshold,
        /// and every capability at or below it is left out.
        #[test]
        fn threshold_filters_trace(
            labels in prop::collection::vec(("[a-z ]{1,20}", level()), 1..6),
            name in "[a-zA-Z ]{0,30}",
            description in proptest::option::of("[a-zA-Z ]{0,40}")
        ) {
            let scorer = RelevanceScorer::new();
            let missing: Vec<_> = labels
                .iter()
                .map(|(label, lvl)| MissingCapability::new(label.clone(), *lvl))
                .collect();
            let item = CandidateItem::new(name.clone(), description.as_deref());
            let desc_lower = description.unwrap_or_default().to_lowercase();

            let matched = scorer
                .evaluate(&item, &missing)
                .map(|s| s.matched)
                .unwrap_or_default();

            for m in &matched {
                prop_assert!(m.score > MATCH_THRESHOLD);
            }
            let clearing = missing
                .iter()
                .filter(|cap| {
                    let label = cap.label.to_lowercase();
                    scorer.combined_score(&label, &name.to_lowercase(), &desc_lower) > MATCH_THRESHOLD
                })
                .count();
            prop_assert_eq!(clearing, matched.len());
        }

        /// Property: a present score is strictly positive and equals the weighted sum.
        #[test]
        fn total_is_weighted_sum(
            labels in prop::collection::vec(("[a-z]{1,12}", level()), 1..5),
            name in "[a-z ]{1,30}"
        ) {
            let scorer = RelevanceScorer::new();
            let missing: Vec<_> = labels
                .iter()
                .map(|(label, lvl)| MissingCapability::new(label.clone(), *lvl))
                .collect();
            let item = CandidateItem::new(name, None);
            if let Some(score) = scorer.evaluate(&item, &missing) {
                prop_assert!(score.total_score > 0.0);
                let sum: f64 = score
                    .matched
                    .iter()
                    .map(|m| m.score * m.level.weight(ESSENTIAL_WEIGHT))
                    .sum();
                prop_assert!((sum - score.total_score).abs() < 1e-9);
            }
        }
    }
}
