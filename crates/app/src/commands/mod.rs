//! CLI command handlers for the upskill application.

mod catalog;
mod employees;
mod gap;
mod recommend;

pub(crate) use catalog::{handle_occupations_command, handle_skills_command};
pub(crate) use employees::{
    handle_employee_add_command, handle_employee_list_command, handle_employee_remove_command,
};
pub(crate) use gap::handle_gap_command;
pub(crate) use recommend::handle_recommend_command;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use upskill_intelligence::{
    CachedRecommender, ContentSource, CourseraClient, RecommendOptions, RelevanceScorer,
    ScoringWeights, SkillGraph,
};

/// Effective runtime settings after config, environment and flags are merged.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub data_dir: PathBuf,
    pub top_k: usize,
    pub per_capability_limit: usize,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    pub dedupe: bool,
    pub scoring: ScoringWeights,
}

impl Settings {
    /// Read every knob from the environment; `data_dir` overrides `UPSKILL_DATA_DIR`.
    pub(crate) fn from_env(data_dir: Option<PathBuf>, scoring: ScoringWeights) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(upskill_state::data_dir),
            top_k: upskill_state::default_top_k(),
            per_capability_limit: upskill_state::fetch_limit(),
            fetch_timeout: upskill_state::fetch_timeout(),
            cache_ttl: upskill_state::cache_ttl(),
            dedupe: upskill_state::env_dedupe(),
            scoring,
        }
    }

    fn options(&self) -> RecommendOptions {
        RecommendOptions {
            per_capability_limit: self.per_capability_limit,
            fetch_timeout: self.fetch_timeout,
            dedupe: self.dedupe,
        }
    }
}

/// Loaded skill graph plus the cached recommendation engine built on it.
pub(crate) struct AppContext {
    pub graph: Arc<SkillGraph>,
    pub engine: CachedRecommender,
}

impl AppContext {
    /// Load the graph and wire it to the Coursera catalogue.
    pub(crate) fn load(settings: &Settings) -> Result<Self> {
        let source = CourseraClient::from_env(settings.fetch_timeout)
            .context("failed to build course catalogue client")?;
        Self::with_source(settings, Arc::new(source))
    }

    /// Load the graph and wire it to an explicit content source.
    pub(crate) fn with_source(settings: &Settings, source: Arc<dyn ContentSource>) -> Result<Self> {
        let graph = Arc::new(load_graph(&settings.data_dir)?);
        let engine = CachedRecommender::for_graph(graph.clone(), source, settings.cache_ttl)
            .with_scorer(RelevanceScorer::new().with_weights(settings.scoring))
            .with_options(settings.options());
        Ok(Self { graph, engine })
    }
}

fn load_graph(dir: &Path) -> Result<SkillGraph> {
    SkillGraph::load(dir)
        .with_context(|| format!("failed to load skill graph from {}", dir.display()))
}

/// Print rendered output, one line per entry.
pub(crate) fn emit(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
