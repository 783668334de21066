//! Course recommendations for a capability gap.
//!
//! Recommending runs in two phases. The fetch phase queries the content
//! source once per missing capability and flattens the answers into one
//! candidate list. The scoring phase is pure: every candidate is scored
//! against the whole gap, ranked and truncated.

pub mod explainer;
mod scorer;
pub mod similarity;

pub use explainer::{explain, summarize};
pub use scorer::{
    RelevanceScorer, Scorer, ScoringWeights, DESCRIPTION_WEIGHT, ESSENTIAL_WEIGHT,
    MATCH_THRESHOLD, NAME_WEIGHT,
};
pub use similarity::compute_similarity;

use crate::source::{ContentSource, SourceError};
use crate::taxonomy::{Taxonomy, TaxonomyError};
use crate::types::{CandidateItem, MissingCapability, RecommendationResult, ScoredItem};
use futures::future::join_all;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Number of recommendations returned by default.
pub const DEFAULT_TOP_K: usize = 3;
/// Candidates requested per missing capability.
pub const DEFAULT_PER_CAPABILITY_LIMIT: usize = 5;
/// Upper bound on a single content-source request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that abort a recommendation.
#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    #[error("failed to compute capability gap: {0}")]
    Taxonomy(#[from] TaxonomyError),
}

/// Knobs for the fetch and ranking phases.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendOptions {
    /// Items requested from the source for each missing capability.
    pub per_capability_limit: usize,
    /// Timeout for each source request; there are no retries.
    pub fetch_timeout: Duration,
    /// Drop candidates already fetched for an earlier capability.
    pub dedupe: bool,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            per_capability_limit: DEFAULT_PER_CAPABILITY_LIMIT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            dedupe: false,
        }
    }
}

/// A fetched item and the index of the missing capability whose query returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedCandidate {
    /// The item as the content source returned it.
    pub item: CandidateItem,
    /// Index into the missing capabilities that drove the query.
    pub capability: usize,
}

/// Ranks learning content against a person's capability gap.
pub struct Recommender {
    taxonomy: Arc<dyn Taxonomy>,
    source: Arc<dyn ContentSource>,
    scorer: RelevanceScorer,
    options: RecommendOptions,
}

impl Recommender {
    /// Create a recommender over a shared taxonomy and content source.
    pub fn new(taxonomy: Arc<dyn Taxonomy>, source: Arc<dyn ContentSource>) -> Self {
        Self {
            taxonomy,
            source,
            scorer: RelevanceScorer::new(),
            options: RecommendOptions::default(),
        }
    }

    /// Use a custom scorer.
    pub fn with_scorer(mut self, scorer: RelevanceScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Use custom fetch/ranking options.
    pub fn with_options(mut self, options: RecommendOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &RecommendOptions {
        &self.options
    }

    /// Top `top_k` items for closing the gap between a person and a role.
    ///
    /// An empty result means nothing relevant was found; an error means the
    /// gap itself could not be computed.
    pub async fn recommend(
        &self,
        person_id: &str,
        role_id: &str,
        top_k: usize,
    ) -> Result<RecommendationResult, RecommendError> {
        let missing = self.taxonomy.missing_capabilities(person_id, role_id)?;
        if missing.is_empty() {
            tracing::debug!(
                target: "upskill::recommend",
                person = %person_id,
                role = %role_id,
                "no capability gap; nothing to recommend"
            );
            return Ok(Vec::new());
        }

        let candidates = self.fetch_candidates(&missing).await;
        let ranked = rank_candidates(
            &self.scorer,
            &missing,
            candidates,
            top_k,
            self.options.dedupe,
        );

        tracing::info!(
            target: "upskill::recommend",
            person = %person_id,
            role = %role_id,
            missing = missing.len(),
            returned = ranked.len(),
            "ranked recommendations"
        );
        Ok(ranked)
    }

    /// Fetch phase: one request per missing capability, flattened in capability order.
    ///
    /// Failing or empty fetches contribute nothing.
    pub async fn fetch_candidates(&self, missing: &[MissingCapability]) -> Vec<FetchedCandidate> {
        let fetches = missing.iter().map(|cap| self.fetch_for(cap));
        let answers = join_all(fetches).await;
        answers
            .into_iter()
            .enumerate()
            .flat_map(|(capability, items)| {
                items
                    .into_iter()
                    .map(move |item| FetchedCandidate { item, capability })
            })
            .collect()
    }

    async fn fetch_for(&self, capability: &MissingCapability) -> Vec<CandidateItem> {
        let limit = self.options.per_capability_limit;
        let timeout = self.options.fetch_timeout;
        let search = self.source.search(&capability.label, limit);
        let result = match tokio::time::timeout(timeout, search).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(timeout)),
        };

        match result {
            Ok(items) => {
                if items.is_empty() {
                    tracing::debug!(
                        target: "upskill::recommend",
                        capability = %capability.label,
                        "no candidates for capability"
                    );
                }
                items
            }
            Err(e) => {
                tracing::warn!(
                    target: "upskill::recommend",
                    capability = %capability.label,
                    error = %e,
                    "content fetch failed; skipping capability"
                );
                Vec::new()
            }
        }
    }
}

/// Scoring phase: evaluate candidates against the full gap and keep the best `top_k`.
///
/// Ranking is by score descending, then by fetch position, so the result does
/// not depend on the order in which fetches completed.
pub fn rank_candidates(
    scorer: &impl Scorer,
    missing: &[MissingCapability],
    candidates: Vec<FetchedCandidate>,
    top_k: usize,
    dedupe: bool,
) -> RecommendationResult {
    let candidates = if dedupe {
        dedupe_candidates(candidates)
    } else {
        candidates
    };

    let mut scored: Vec<(usize, ScoredItem)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(position, candidate)| {
            let driver = missing.get(candidate.capability)?;
            let score = scorer.evaluate(&candidate.item, missing)?;
            if score.total_score <= 0.0 {
                return None;
            }
            Some((position, ScoredItem::new(candidate.item, score, driver)))
        })
        .collect();

    scored.sort_by(|(pos_a, a), (pos_b, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(pos_a.cmp(pos_b))
    });
    scored.truncate(top_k);
    scored.into_iter().map(|(_, item)| item).collect()
}

/// Keep the first occurrence of each candidate identity.
fn dedupe_candidates(candidates: Vec<FetchedCandidate>) -> Vec<FetchedCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.item.identity()))
        .collect()
}
