//! Shared test utilities for upskill crates.
//!
//! This crate provides common test fixtures and utilities used across
//! multiple crates in the upskill workspace.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = upskill_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Employee seeded into every fixture: holds python only.
pub const FIXTURE_EMPLOYEE: &str = "EMP00000001";
/// Occupation seeded into every fixture: python, statistics, data visualization (optional).
pub const FIXTURE_OCCUPATION: &str = "occ:data-analyst";

/// Data directory pre-populated with a small skill graph.
///
/// Holds the tempdir; it is removed when this struct is dropped.
pub struct DataDirFixture {
    pub tempdir: tempfile::TempDir,
    /// `skills.json`, `occupations.json` and `employees.json` live here.
    pub data_dir: PathBuf,
}

impl DataDirFixture {
    /// Create a fixture with the standard graph.
    ///
    /// Creates `<tmp>/data/` with three skills, one occupation and one
    /// employee ([`FIXTURE_EMPLOYEE`]).
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("data");
        std::fs::create_dir_all(&data_dir)?;

        let fixture = Self { tempdir, data_dir };
        fixture.write_json(
            "skills.json",
            &json!([
                {"uri": "skill:python", "label": "python"},
                {"uri": "skill:statistics", "label": "statistics"},
                {"uri": "skill:dataviz", "label": "data visualization"}
            ]),
        )?;
        fixture.write_json(
            "occupations.json",
            &json!([{
                "uri": FIXTURE_OCCUPATION,
                "label": "data analyst",
                "skills": [
                    {"uri": "skill:python", "level": "essential"},
                    {"uri": "skill:statistics", "level": "essential"},
                    {"uri": "skill:dataviz", "level": "optional"}
                ]
            }]),
        )?;
        fixture.write_json(
            "employees.json",
            &json!([{
                "employee_id": FIXTURE_EMPLOYEE,
                "name": "Ada",
                "skills": ["skill:python"],
                "years_of_experience": 3,
                "experience_level": "Intermediate"
            }]),
        )?;
        Ok(fixture)
    }

    /// Path that should be used as the data directory.
    pub fn path(&self) -> &Path {
        &self.data_dir
    }

    /// Path that can be used as HOME (the tempdir root).
    pub fn home_path(&self) -> &Path {
        self.tempdir.path()
    }

    /// Overwrite one of the data files.
    pub fn write_json(&self, file: &str, value: &Value) -> std::io::Result<()> {
        let text = serde_json::to_string_pretty(value)?;
        std::fs::write(self.data_dir.join(file), text)
    }

    /// Parse one of the data files back.
    pub fn read_json(&self, file: &str) -> std::io::Result<Value> {
        let text = std::fs::read_to_string(self.data_dir.join(file))?;
        Ok(serde_json::from_str(&text)?)
    }
}
