//! Memoization layers around the recommendation pipeline.
//!
//! Four layers are kept, all cleared together by
//! [`CachedRecommender::invalidate_all`]:
//!
//! - recommendation results per `(person, role, top_k)`, expiring after a TTL;
//! - missing-capability lookups per `(person, role)`, kept until invalidated;
//! - content-source searches per `(query, limit)`, expiring after the same TTL;
//! - skill-graph listings (employee ids, occupations, skills), kept until invalidated.
//!
//! # Concurrency Model
//!
//! Each layer is a `parking_lot::Mutex` around a `HashMap`. Locks are held only
//! for lookups and inserts, never across an `.await`, so two concurrent misses
//! for the same key may both compute; the later insert wins.
//!
//! # Staleness
//!
//! The wrapped taxonomy is held by `Arc` identity. Writes to it (adding or
//! removing employees) do not re-key anything here; callers must call
//! `invalidate_all()` after every write or they will read stale gaps.

use crate::recommend::{RecommendError, RecommendOptions, Recommender, RelevanceScorer};
use crate::source::{ContentSource, SourceError};
use crate::taxonomy::{SkillGraph, Taxonomy, TaxonomyError};
use crate::types::{CandidateItem, MissingCapability, RecommendationResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Reference validity window for cached results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Key/value memo with an optional time-to-live.
pub struct TtlCache<K, V> {
    ttl: Option<Duration>,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Entries live until cleared.
    pub fn unbounded() -> Self {
        Self {
            ttl: None,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cloned value for `key`, if present and fresh. Stale entries are dropped.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock();
        let fresh = match (entries.get(key), self.ttl) {
            (None, _) => return None,
            (Some(_), None) => true,
            (Some((stored, _)), Some(ttl)) => stored.elapsed() < ttl,
        };
        if fresh {
            entries.get(key).map(|(_, value)| value.clone())
        } else {
            entries.remove(key);
            None
        }
    }

    /// Store `value` under `key`, pruning entries that have already expired.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock();
        if let Some(ttl) = self.ttl {
            entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
        }
        entries.insert(key, (Instant::now(), value));
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Taxonomy wrapper memoizing successful gap lookups.
///
/// Errors are not memoized.
pub struct MemoTaxonomy {
    inner: Arc<dyn Taxonomy>,
    memo: TtlCache<(String, String), Vec<MissingCapability>>,
}

impl MemoTaxonomy {
    /// Wrap `inner`; lookups are kept until [`MemoTaxonomy::clear`].
    pub fn new(inner: Arc<dyn Taxonomy>) -> Self {
        Self {
            inner,
            memo: TtlCache::unbounded(),
        }
    }

    /// Forget every memoized gap.
    pub fn clear(&self) {
        self.memo.clear();
    }
}

impl Taxonomy for MemoTaxonomy {
    fn missing_capabilities(
        &self,
        person_id: &str,
        role_id: &str,
    ) -> Result<Vec<MissingCapability>, TaxonomyError> {
        let key = (person_id.to_string(), role_id.to_string());
        if let Some(hit) = self.memo.get(&key) {
            return Ok(hit);
        }
        let missing = self.inner.missing_capabilities(person_id, role_id)?;
        self.memo.insert(key, missing.clone());
        Ok(missing)
    }
}

/// Content-source wrapper memoizing successful searches for a TTL.
pub struct CachedSource {
    inner: Arc<dyn ContentSource>,
    memo: TtlCache<(String, usize), Vec<CandidateItem>>,
}

impl CachedSource {
    /// Wrap `inner`; searches expire `ttl` after they were made.
    pub fn new(inner: Arc<dyn ContentSource>, ttl: Duration) -> Self {
        Self {
            inner,
            memo: TtlCache::new(ttl),
        }
    }

    /// Forget every memoized search.
    pub fn clear(&self) {
        self.memo.clear();
    }
}

#[async_trait]
impl ContentSource for CachedSource {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, SourceError> {
        let key = (query.to_string(), limit);
        if let Some(hit) = self.memo.get(&key) {
            tracing::trace!(target: "upskill::cache", query, limit, "search cache hit");
            return Ok(hit);
        }
        let items = self.inner.search(query, limit).await?;
        self.memo.insert(key, items.clone());
        Ok(items)
    }
}

#[derive(Default)]
struct Listings {
    employee_ids: Option<Vec<String>>,
    occupations: Option<Vec<(String, String)>>,
    skills: Option<Vec<(String, String)>>,
}

/// Recommender with result, gap, search and listing memoization.
pub struct CachedRecommender {
    recommender: Recommender,
    taxonomy: Arc<MemoTaxonomy>,
    source: Arc<CachedSource>,
    results: TtlCache<(String, String, usize), RecommendationResult>,
    graph: Option<Arc<SkillGraph>>,
    listings: Mutex<Listings>,
}

impl CachedRecommender {
    /// Wrap a taxonomy and content source; results and searches expire after `ttl`.
    pub fn new(
        taxonomy: Arc<dyn Taxonomy>,
        source: Arc<dyn ContentSource>,
        ttl: Duration,
    ) -> Self {
        let taxonomy = Arc::new(MemoTaxonomy::new(taxonomy));
        let source = Arc::new(CachedSource::new(source, ttl));
        let recommender = Recommender::new(taxonomy.clone(), source.clone());
        Self {
            recommender,
            taxonomy,
            source,
            results: TtlCache::new(ttl),
            graph: None,
            listings: Mutex::new(Listings::default()),
        }
    }

    /// Use a skill graph as the taxonomy and enable listing memoization.
    pub fn for_graph(
        graph: Arc<SkillGraph>,
        source: Arc<dyn ContentSource>,
        ttl: Duration,
    ) -> Self {
        let mut cached = Self::new(graph.clone(), source, ttl);
        cached.graph = Some(graph);
        cached
    }

    /// Score with `scorer` instead of the default weights.
    pub fn with_scorer(mut self, scorer: RelevanceScorer) -> Self {
        self.recommender = self.recommender.with_scorer(scorer);
        self
    }

    /// Fetch and rank with `options`.
    pub fn with_options(mut self, options: RecommendOptions) -> Self {
        self.recommender = self.recommender.with_options(options);
        self
    }

    /// Memoized [`Recommender::recommend`]. Errors are not cached.
    pub async fn recommend(
        &self,
        person_id: &str,
        role_id: &str,
        top_k: usize,
    ) -> Result<RecommendationResult, RecommendError> {
        let key = (person_id.to_string(), role_id.to_string(), top_k);
        if let Some(hit) = self.results.get(&key) {
            tracing::debug!(
                target: "upskill::cache",
                person = %person_id,
                role = %role_id,
                top_k,
                "recommendation cache hit"
            );
            return Ok(hit);
        }
        let result = self
            .recommender
            .recommend(person_id, role_id, top_k)
            .await?;
        self.results.insert(key, result.clone());
        Ok(result)
    }

    /// Memoized capability gap.
    pub fn missing_capabilities(
        &self,
        person_id: &str,
        role_id: &str,
    ) -> Result<Vec<MissingCapability>, TaxonomyError> {
        self.taxonomy.missing_capabilities(person_id, role_id)
    }

    /// Employee ids of the attached graph; empty without one.
    pub fn employee_ids(&self) -> Vec<String> {
        self.listing(|l| &mut l.employee_ids, SkillGraph::employee_ids)
    }

    /// `(uri, label)` occupations of the attached graph; empty without one.
    pub fn occupations(&self) -> Vec<(String, String)> {
        self.listing(|l| &mut l.occupations, SkillGraph::occupations)
    }

    /// `(uri, label)` skills of the attached graph; empty without one.
    pub fn skills(&self) -> Vec<(String, String)> {
        self.listing(|l| &mut l.skills, SkillGraph::skills)
    }

    fn listing<T: Clone>(
        &self,
        slot: impl FnOnce(&mut Listings) -> &mut Option<Vec<T>>,
        load: impl FnOnce(&SkillGraph) -> Vec<T>,
    ) -> Vec<T> {
        let Some(graph) = self.graph.as_deref() else {
            return Vec::new();
        };
        let mut listings = self.listings.lock();
        slot(&mut listings)
            .get_or_insert_with(|| load(graph))
            .clone()
    }

    /// Clear every memoization layer. Call after any write to the taxonomy.
    pub fn invalidate_all(&self) {
        self.results.clear();
        self.taxonomy.clear();
        self.source.clear();
        *self.listings.lock() = Listings::default();
        tracing::debug!(target: "upskill::cache", "invalidated all caches");
    }
}
