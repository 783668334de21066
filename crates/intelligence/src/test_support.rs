//! Test doubles for the taxonomy and content-source seams.

use crate::source::{ContentSource, SourceError};
use crate::taxonomy::{Taxonomy, TaxonomyError};
use crate::types::{CandidateItem, MissingCapability, RequiredLevel};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Taxonomy returning a fixed gap, or failing for every lookup.
pub(crate) struct StaticTaxonomy {
    missing: Option<Vec<MissingCapability>>,
    calls: AtomicUsize,
}

impl StaticTaxonomy {
    pub(crate) fn new(missing: Vec<MissingCapability>) -> Self {
        Self {
            missing: Some(missing),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            missing: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Taxonomy for StaticTaxonomy {
    fn missing_capabilities(
        &self,
        person_id: &str,
        _role_id: &str,
    ) -> Result<Vec<MissingCapability>, TaxonomyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.missing
            .clone()
            .ok_or_else(|| TaxonomyError::UnknownPerson(person_id.to_string()))
    }
}

enum Canned {
    Items(Vec<CandidateItem>),
    Fail(String),
    Slow(Duration, Vec<CandidateItem>),
}

/// Content source answering from canned per-query responses.
///
/// Unknown queries return an empty list.
#[derive(Default)]
pub(crate) struct MockSource {
    responses: HashMap<String, Canned>,
    calls: AtomicUsize,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_items(mut self, query: &str, items: Vec<CandidateItem>) -> Self {
        self.responses
            .insert(query.to_string(), Canned::Items(items));
        self
    }

    pub(crate) fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.responses
            .insert(query.to_string(), Canned::Fail(message.to_string()));
        self
    }

    pub(crate) fn with_delay(
        mut self,
        query: &str,
        delay: Duration,
        items: Vec<CandidateItem>,
    ) -> Self {
        self.responses
            .insert(query.to_string(), Canned::Slow(delay, items));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push((query.to_string(), limit));
        match self.responses.get(query) {
            Some(Canned::Items(items)) => Ok(items.iter().take(limit).cloned().collect()),
            Some(Canned::Fail(message)) => Err(SourceError::Unavailable(message.clone())),
            Some(Canned::Slow(delay, items)) => {
                tokio::time::sleep(*delay).await;
                Ok(items.iter().take(limit).cloned().collect())
            }
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn course(name: &str, description: &str) -> CandidateItem {
    CandidateItem::new(name, Some(description))
}

/// Gap of an aspiring data analyst: statistics, data visualization, python.
pub(crate) fn analyst_gap() -> Vec<MissingCapability> {
    vec![
        MissingCapability::new("statistics", RequiredLevel::Essential),
        MissingCapability::new("data visualization", RequiredLevel::Optional)
            .with_experience_level("Intermediate"),
        MissingCapability::new("python", RequiredLevel::Essential),
    ]
}

/// Catalogue answering the analyst gap.
///
/// Scores against the full gap: "Statistics with R" 1.2513,
/// "SQL for Data Science" 0.9867, "Python for Everybody" 0.8712,
/// "Data Visualization with Python" 0.5795 (returned for two queries).
pub(crate) fn analyst_catalogue() -> MockSource {
    MockSource::new()
        .with_items(
            "statistics",
            vec![
                course("Statistics with R", "Hypothesis testing"),
                course("SQL for Data Science", "Query relational databases"),
            ],
        )
        .with_items(
            "data visualization",
            vec![course("Data Visualization with Python", "Intro to charts")],
        )
        .with_items(
            "python",
            vec![
                course("Python for Everybody", "Learn to program in Python"),
                course("Data Visualization with Python", "Intro to charts"),
                course("Pottery for Everyone", "Ceramics and clay"),
            ],
        )
}
