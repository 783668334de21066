//! Configuration file support for upskill.
//!
//! Loads settings from `~/.upskill/config.toml` (or `UPSKILL_CONFIG`) with the
//! following precedence: CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.upskill/config.toml
//!
//! [recommend]
//! top_k = 3
//! per_capability_limit = 5
//! fetch_timeout_ms = 10000
//! cache_ttl_ms = 3600000
//! dedupe = false
//!
//! [scoring]
//! name_weight = 0.7
//! description_weight = 0.3
//! match_threshold = 0.3
//! essential_weight = 2.0
//!
//! [data]
//! dir = "/srv/upskill/data"
//!
//! [source]
//! coursera_base_url = "https://api.coursera.org"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use upskill_intelligence::ScoringWeights;

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Recommendation and fetch knobs.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendConfig {
    pub top_k: Option<usize>,
    pub per_capability_limit: Option<usize>,
    pub fetch_timeout_ms: Option<u64>,
    pub cache_ttl_ms: Option<u64>,
    pub dedupe: Option<bool>,
}

/// Relevance-scoring weights. Unset fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ScoringConfig {
    pub name_weight: Option<f64>,
    pub description_weight: Option<f64>,
    pub match_threshold: Option<f64>,
    pub essential_weight: Option<f64>,
}

impl ScoringConfig {
    /// Scoring weights with file overrides applied.
    pub fn weights(&self) -> ScoringWeights {
        let defaults = ScoringWeights::default();
        ScoringWeights {
            name: self.name_weight.unwrap_or(defaults.name),
            description: self.description_weight.unwrap_or(defaults.description),
            threshold: self.match_threshold.unwrap_or(defaults.threshold),
            essential: self.essential_weight.unwrap_or(defaults.essential),
        }
    }
}

/// Skill-graph location.
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    pub dir: Option<String>,
}

/// Content-source settings.
#[derive(Debug, Default, Deserialize)]
pub struct SourceConfig {
    pub coursera_base_url: Option<String>,
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Ok(Some(config))` if the file exists and parses successfully.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = upskill_state::config_file() else {
        return Ok(None);
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;

    tracing::debug!(
        target: "upskill::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Applies configuration file settings to environment variables.
///
/// Only sets environment variables that are not already set, preserving
/// the precedence: CLI > ENV > config file. Scoring weights have no
/// environment form and are read from the [`Config`] directly.
pub fn apply_config_to_env(config: &Config) {
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "upskill::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    let recommend = &config.recommend;
    if let Some(top_k) = recommend.top_k {
        set_if_absent("UPSKILL_TOP_K", &top_k.to_string());
    }
    if let Some(limit) = recommend.per_capability_limit {
        set_if_absent("UPSKILL_FETCH_LIMIT", &limit.to_string());
    }
    if let Some(ms) = recommend.fetch_timeout_ms {
        set_if_absent("UPSKILL_FETCH_TIMEOUT_MS", &ms.to_string());
    }
    if let Some(ms) = recommend.cache_ttl_ms {
        set_if_absent("UPSKILL_CACHE_TTL_MS", &ms.to_string());
    }
    if let Some(dedupe) = recommend.dedupe {
        set_if_absent("UPSKILL_DEDUPE", if dedupe { "true" } else { "false" });
    }
    if let Some(ref dir) = config.data.dir {
        set_if_absent("UPSKILL_DATA_DIR", dir);
    }
    if let Some(ref url) = config.source.coursera_base_url {
        set_if_absent("UPSKILL_COURSERA_BASE_URL", url);
    }
}
