//! File-backed skill graph of skills, occupations and employees.
//!
//! The data directory holds three JSON documents:
//!
//! ```text
//! skills.json       [{"uri": "...", "label": "..."}]
//! occupations.json  [{"uri": "...", "label": "...", "skills": [{"uri": "...", "level": "essential"}]}]
//! employees.json    [{"employee_id": "...", "name": "...", "skills": ["uri"], "experience_level": "Beginner"}]
//! ```
//!
//! Skills and occupations are read-only after loading. The employee roster
//! is mutable through [`SkillGraph::add_employee`] and
//! [`SkillGraph::remove_employee`], which persist immediately. Anything
//! caching gap lookups over this graph must be invalidated after a write.

use super::{Taxonomy, TaxonomyError};
use crate::types::{MissingCapability, RequiredLevel, DEFAULT_EXPERIENCE_LEVEL};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SKILLS_FILE: &str = "skills.json";
const OCCUPATIONS_FILE: &str = "occupations.json";
const EMPLOYEES_FILE: &str = "employees.json";

/// A capability known to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub uri: String,
    pub label: String,
}

/// A skill an occupation requires, with its importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationSkill {
    pub uri: String,
    pub level: RequiredLevel,
}

/// A target role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationRecord {
    pub uri: String,
    pub label: String,
    #[serde(default)]
    pub skills: Vec<OccupationSkill>,
}

fn default_experience_level() -> String {
    DEFAULT_EXPERIENCE_LEVEL.to_string()
}

/// A person and the skills recorded for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
}

/// Skill graph loaded from a data directory.
#[derive(Debug)]
pub struct SkillGraph {
    data_dir: Option<PathBuf>,
    skills: Vec<SkillRecord>,
    skill_labels: HashMap<String, String>,
    occupations: Vec<OccupationRecord>,
    occupation_index: HashMap<String, usize>,
    employees: RwLock<Vec<EmployeeRecord>>,
}

impl SkillGraph {
    /// Load the graph from `dir`. A missing employee file is an empty roster.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let dir = dir.as_ref();
        let skills: Vec<SkillRecord> = read_json(&dir.join(SKILLS_FILE))?;
        let occupations: Vec<OccupationRecord> = read_json(&dir.join(OCCUPATIONS_FILE))?;
        let employees_path = dir.join(EMPLOYEES_FILE);
        let employees: Vec<EmployeeRecord> = if employees_path.exists() {
            read_json(&employees_path)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            target: "upskill::graph",
            dir = %dir.display(),
            skills = skills.len(),
            occupations = occupations.len(),
            employees = employees.len(),
            "loaded skill graph"
        );

        let mut graph = Self::from_records(skills, occupations, employees);
        graph.data_dir = Some(dir.to_path_buf());
        Ok(graph)
    }

    /// Build an in-memory graph. Roster writes are not persisted.
    pub fn from_records(
        skills: Vec<SkillRecord>,
        occupations: Vec<OccupationRecord>,
        employees: Vec<EmployeeRecord>,
    ) -> Self {
        let skill_labels = skills
            .iter()
            .map(|s| (s.uri.clone(), s.label.clone()))
            .collect();
        let occupation_index = occupations
            .iter()
            .enumerate()
            .map(|(i, o)| (o.uri.clone(), i))
            .collect();
        Self {
            data_dir: None,
            skills,
            skill_labels,
            occupations,
            occupation_index,
            employees: RwLock::new(employees),
        }
    }

    /// Label of a skill URI, if known.
    pub fn skill_label(&self, uri: &str) -> Option<&str> {
        self.skill_labels.get(uri).map(String::as_str)
    }

    /// Ids of every employee, in roster order.
    pub fn employee_ids(&self) -> Vec<String> {
        self.employees
            .read()
            .iter()
            .map(|e| e.employee_id.clone())
            .collect()
    }

    /// Look up one employee.
    pub fn employee(&self, id: &str) -> Option<EmployeeRecord> {
        self.employees
            .read()
            .iter()
            .find(|e| e.employee_id == id)
            .cloned()
    }

    /// `(uri, label)` of every occupation, in file order.
    pub fn occupations(&self) -> Vec<(String, String)> {
        self.occupations
            .iter()
            .map(|o| (o.uri.clone(), o.label.clone()))
            .collect()
    }

    /// `(uri, label)` of every labelled skill, sorted by label.
    pub fn skills(&self) -> Vec<(String, String)> {
        let mut list: Vec<_> = self
            .skills
            .iter()
            .filter(|s| !s.label.trim().is_empty())
            .map(|s| (s.uri.clone(), s.label.clone()))
            .collect();
        list.sort_by(|a, b| a.1.cmp(&b.1));
        list
    }

    /// Add an employee and persist the roster. Returns the generated id.
    ///
    /// The in-memory roster only changes once the write succeeds.
    pub fn add_employee(
        &self,
        name: &str,
        skill_uris: &[String],
    ) -> Result<String, TaxonomyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaxonomyError::Invalid("employee name is empty".into()));
        }
        let skills: Vec<String> = skill_uris
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if skills.is_empty() {
            return Err(TaxonomyError::Invalid("employee has no skills".into()));
        }
        if let Some(unknown) = skills.iter().find(|s| !self.skill_labels.contains_key(*s)) {
            return Err(TaxonomyError::Invalid(format!("unknown skill: {unknown}")));
        }

        let employee_id = new_employee_id();
        let record = EmployeeRecord {
            employee_id: employee_id.clone(),
            name: name.to_string(),
            skills,
            years_of_experience: 0,
            experience_level: default_experience_level(),
        };

        let mut employees = self.employees.write();
        let mut roster = employees.clone();
        roster.push(record);
        self.persist(&roster)?;
        *employees = roster;
        tracing::info!(target: "upskill::graph", employee = %employee_id, "added employee");
        Ok(employee_id)
    }

    /// Remove an employee and persist the roster. Returns whether one was removed.
    ///
    /// The in-memory roster only changes once the write succeeds.
    pub fn remove_employee(&self, id: &str) -> Result<bool, TaxonomyError> {
        let mut employees = self.employees.write();
        let roster: Vec<EmployeeRecord> = employees
            .iter()
            .filter(|e| e.employee_id != id)
            .cloned()
            .collect();
        if roster.len() == employees.len() {
            return Ok(false);
        }
        self.persist(&roster)?;
        *employees = roster;
        tracing::info!(target: "upskill::graph", employee = %id, "removed employee");
        Ok(true)
    }

    fn persist(&self, employees: &[EmployeeRecord]) -> Result<(), TaxonomyError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let path = dir.join(EMPLOYEES_FILE);
        let text = serde_json::to_string_pretty(employees).map_err(|source| {
            TaxonomyError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        fs::create_dir_all(dir).map_err(|source| TaxonomyError::Io {
            path: dir.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| TaxonomyError::Io { path, source })
    }
}

impl Taxonomy for SkillGraph {
    fn missing_capabilities(
        &self,
        person_id: &str,
        role_id: &str,
    ) -> Result<Vec<MissingCapability>, TaxonomyError> {
        let employee = self
            .employee(person_id)
            .ok_or_else(|| TaxonomyError::UnknownPerson(person_id.to_string()))?;
        let occupation = self
            .occupation_index
            .get(role_id)
            .map(|&i| &self.occupations[i])
            .ok_or_else(|| TaxonomyError::UnknownRole(role_id.to_string()))?;

        let held: HashSet<&str> = employee.skills.iter().map(|s| s.trim()).collect();
        let missing: Vec<MissingCapability> = occupation
            .skills
            .iter()
            .filter(|req| !held.contains(req.uri.as_str()))
            .map(|req| {
                let label = self.skill_label(&req.uri).unwrap_or(req.uri.as_str());
                MissingCapability::new(label, req.level)
                    .with_experience_level(employee.experience_level.clone())
            })
            .collect();

        tracing::debug!(
            target: "upskill::graph",
            employee = %person_id,
            occupation = %role_id,
            missing = missing.len(),
            "computed capability gap"
        );
        Ok(missing)
    }
}

fn new_employee_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("EMP{}", hex[..8].to_ascii_uppercase())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TaxonomyError> {
    let text = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TaxonomyError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
