//! Skill-gap resolution and course ranking.
//!
//! This crate provides:
//! - A skill graph answering "which capabilities does this person lack for that role"
//! - A course catalogue client queried once per missing capability
//! - Similarity-based relevance scoring of candidate courses against the whole gap
//! - Ranking, explanation, and memoization of recommendation results

pub mod cache;
pub mod recommend;
pub mod source;
pub mod taxonomy;
pub mod types;

#[cfg(test)]
mod test_support;

pub use cache::{CachedRecommender, CachedSource, MemoTaxonomy, TtlCache, DEFAULT_CACHE_TTL};
pub use recommend::{
    compute_similarity, explain, rank_candidates, summarize, FetchedCandidate, RecommendError,
    RecommendOptions, Recommender, RelevanceScorer, Scorer, ScoringWeights,
    DEFAULT_FETCH_TIMEOUT, DEFAULT_PER_CAPABILITY_LIMIT, DEFAULT_TOP_K,
};
pub use source::{course_url, ContentSource, CourseraClient, SourceError, COURSERA_API_BASE};
pub use taxonomy::{
    EmployeeRecord, OccupationRecord, OccupationSkill, SkillGraph, SkillRecord, Taxonomy,
    TaxonomyError,
};
pub use types::{
    CandidateItem, MatchScore, MatchedCapability, MissingCapability, RecommendationResult,
    RequiredLevel, ScoredItem, DEFAULT_EXPERIENCE_LEVEL,
};
