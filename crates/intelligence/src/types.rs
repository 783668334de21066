//! Common types shared across intelligence modules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Default experience hint attached to a missing capability.
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "Beginner";

/// Importance tier of a capability required by an occupation.
///
/// # Examples
///
/// ```
/// use upskill_intelligence::RequiredLevel;
///
/// let level: RequiredLevel = "Essential".parse().unwrap();
/// assert_eq!(level, RequiredLevel::Essential);
/// assert_eq!(level.weight(2.0), 2.0);
/// assert_eq!(RequiredLevel::Optional.weight(2.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredLevel {
    /// Must-have capability for the role.
    Essential,
    /// Nice-to-have capability for the role.
    Optional,
}

impl RequiredLevel {
    /// Returns the stable lower-case label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Optional => "optional",
        }
    }

    /// Multiplier applied to a matched capability's combined score.
    ///
    /// Optional capabilities always count once.
    pub fn weight(&self, essential_weight: f64) -> f64 {
        match self {
            Self::Essential => essential_weight,
            Self::Optional => 1.0,
        }
    }
}

impl fmt::Display for RequiredLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequiredLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "essential" => Ok(Self::Essential),
            "optional" => Ok(Self::Optional),
            other => Err(format!("unknown skill level: {other}")),
        }
    }
}

fn default_experience_level() -> String {
    DEFAULT_EXPERIENCE_LEVEL.to_string()
}

/// A capability required by a target occupation that a person does not have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingCapability {
    /// Human-readable capability label.
    pub label: String,
    /// Importance of the capability for the occupation.
    pub level: RequiredLevel,
    /// Experience level the recommended content should suit.
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
}

impl MissingCapability {
    /// Create a missing capability with the default experience hint.
    pub fn new(label: impl Into<String>, level: RequiredLevel) -> Self {
        Self {
            label: label.into(),
            level,
            experience_level: default_experience_level(),
        }
    }

    /// Override the experience hint.
    pub fn with_experience_level(mut self, experience_level: impl Into<String>) -> Self {
        self.experience_level = experience_level.into();
        self
    }
}

/// A learning-content candidate supplied by a content source.
///
/// Only `name` and `description` are read by the scorer. Every other field
/// the source returned is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Item title.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source-specific fields (slug, id, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateItem {
    /// Create an item with a name and optional description.
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            extra: Map::new(),
        }
    }

    /// Attach a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Decode a raw source element.
    ///
    /// Returns `None` when the element has no string `name`; such elements
    /// carry zero relevance.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            _ => return None,
        };
        let description = match fields.remove("description") {
            Some(Value::String(desc)) => Some(desc),
            _ => None,
        };
        Some(Self {
            name,
            description,
            extra: fields,
        })
    }

    /// Read a pass-through string field.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Course slug, when the source supplied one.
    pub fn slug(&self) -> Option<&str> {
        self.field_str("slug")
    }

    /// Identity used when deduplicating candidates across fetches.
    pub fn identity(&self) -> String {
        if let Some(id) = self.field_str("id") {
            return format!("id:{id}");
        }
        if let Some(slug) = self.slug() {
            return format!("slug:{slug}");
        }
        format!("name:{}", self.name.to_lowercase())
    }
}

/// A missing capability that an item matched above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedCapability {
    /// Lower-cased capability label.
    pub label: String,
    /// Combined name/description similarity (0.0 - 1.0).
    pub score: f64,
    /// Importance tier of the capability.
    pub level: RequiredLevel,
}

/// Relevance of one item against a missing-capability set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Sum of weighted contributions of every matched capability.
    pub total_score: f64,
    /// Matched capabilities in missing-set order.
    pub matched: Vec<MatchedCapability>,
}

/// A ranked recommendation candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// The candidate as received from the source.
    pub item: CandidateItem,
    /// Aggregate weighted relevance (> 0 for every ranked item).
    pub score: f64,
    /// Capabilities the item matched.
    pub matched: Vec<MatchedCapability>,
    /// Level of the capability whose fetch produced the item.
    pub target_level: RequiredLevel,
    /// Experience hint of that capability.
    pub experience_level: String,
}

impl ScoredItem {
    /// Combine an item, its score, and the capability that surfaced it.
    pub fn new(item: CandidateItem, score: MatchScore, driver: &MissingCapability) -> Self {
        Self {
            item,
            score: score.total_score,
            matched: score.matched,
            target_level: driver.level,
            experience_level: driver.experience_level.clone(),
        }
    }
}

/// Ordered recommendation list, best first.
pub type RecommendationResult = Vec<ScoredItem>;
