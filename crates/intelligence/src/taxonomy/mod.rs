//! Capability-gap lookup seam and its file-backed implementation.

mod graph;

pub use graph::{EmployeeRecord, OccupationRecord, OccupationSkill, SkillGraph, SkillRecord};

use crate::types::MissingCapability;
use std::path::PathBuf;

/// Failures computing a capability gap. These are fatal for a recommendation.
#[derive(thiserror::Error, Debug)]
pub enum TaxonomyError {
    #[error("unknown employee: {0}")]
    UnknownPerson(String),
    #[error("unknown occupation: {0}")]
    UnknownRole(String),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid record: {0}")]
    Invalid(String),
}

/// Source of missing capabilities for a (person, role) pair.
///
/// Implementations must be deterministic for a fixed dataset and return a
/// stable order, since ranking ties fall back to fetch order.
pub trait Taxonomy: Send + Sync {
    /// Capabilities the role requires that the person lacks.
    fn missing_capabilities(
        &self,
        person_id: &str,
        role_id: &str,
    ) -> Result<Vec<MissingCapability>, TaxonomyError>;
}
