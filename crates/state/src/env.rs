use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CACHE_TTL_MS: u64 = 3_600_000; // 1 hour
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_FETCH_LIMIT: usize = 5;
const DEFAULT_TOP_K: usize = 3;
const DEFAULT_DATA_DIR: &str = "data";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the skill-graph data directory from `UPSKILL_DATA_DIR` (default: `./data`).
pub fn data_dir() -> PathBuf {
    std::env::var("UPSKILL_DATA_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Returns the path to the configuration file.
///
/// `UPSKILL_CONFIG` wins; otherwise `~/.upskill/config.toml`.
pub fn config_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("UPSKILL_CONFIG") {
        return Some(PathBuf::from(custom));
    }
    home_dir().ok().map(|h| h.join(".upskill/config.toml"))
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Validity window for cached recommendations and searches (`UPSKILL_CACHE_TTL_MS`).
pub fn cache_ttl() -> Duration {
    let ms = env_u64("UPSKILL_CACHE_TTL_MS")
        .unwrap_or(DEFAULT_CACHE_TTL_MS);
    Duration::from_millis(ms)
}

/// Timeout for one content-source request (`UPSKILL_FETCH_TIMEOUT_MS`).
///
/// Zero is ignored.
pub fn fetch_timeout() -> Duration {
    let ms = env_u64("UPSKILL_FETCH_TIMEOUT_MS")
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_MS);
    Duration::from_millis(ms)
}

/// Items requested per missing capability (`UPSKILL_FETCH_LIMIT`, default 5).
pub fn fetch_limit() -> usize {
    env_u64("UPSKILL_FETCH_LIMIT")
        .filter(|n| *n > 0)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_FETCH_LIMIT)
}

/// Default number of recommendations (`UPSKILL_TOP_K`, default 3).
pub fn default_top_k() -> usize {
    env_u64("UPSKILL_TOP_K")
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_TOP_K)
}

/// Checks if `UPSKILL_DEDUPE` environment variable is set to true.
pub fn env_dedupe() -> bool {
    std::env::var("UPSKILL_DEDUPE")
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
