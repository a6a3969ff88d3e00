//! Rule set loading and the immutable rule model.
//!
//! Responsibilities:
//! - Define a strict wire model for the YAML rules file
//! - Translate the wire model into immutable domain structures
//! - Validate cross-field constraints the schema cannot express
//!
//! Notes:
//! - A rule set is loaded once at startup and never mutated afterwards
//! - Any failure here is fatal; the engine never runs on a partial rule set

use crate::constants::{DEFAULT_AGE_WEIGHT, DEFAULT_KEYWORD_WEIGHT, DEFAULT_NEGATIVE_WEIGHT};
use crate::{TriageError, TriageResult};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Scoring weights for a single condition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    /// Added once per matched keyword.
    pub keyword: f64,
    /// Subtracted once per matched negative keyword.
    pub negative: f64,
    /// Added when the age falls inside the condition's age band.
    pub age: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD_WEIGHT,
            negative: DEFAULT_NEGATIVE_WEIGHT,
            age: DEFAULT_AGE_WEIGHT,
        }
    }
}

/// Inclusive age range in years.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeBand {
    pub low: u32,
    pub high: u32,
}

impl AgeBand {
    pub fn contains(&self, age: u32) -> bool {
        self.low <= age && age <= self.high
    }
}

/// A candidate condition and the evidence that supports or contradicts it.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub name: String,
    pub keywords: BTreeSet<String>,
    pub negative_keywords: BTreeSet<String>,
    pub weights: Weights,
    pub age_band: Option<AgeBand>,
}

/// A keyword set whose presence signals that urgent care is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct RedFlag {
    pub keywords: BTreeSet<String>,
    pub message: String,
}

/// The full, immutable rule configuration.
///
/// Conditions and red flags keep their configuration order, which drives both
/// the order of triage reasons and the tie-break between equally scored conditions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    conditions: Vec<Condition>,
    red_flags: Vec<RedFlag>,
    keyword_normalization: HashMap<String, String>,
    stopwords: HashSet<String>,
}

impl RuleSet {
    /// Parse a rule set from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `conditions[1].age_band`)
    /// to the failing field when the YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::RulesSchema`] if the YAML does not match the schema (including unknown
    /// keys), or [`TriageError::InvalidRules`] if a cross-field constraint is violated.
    pub fn parse(yaml_text: &str) -> TriageResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, RuleSetWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(TriageError::RulesSchema(format!("at {path}: {source}")));
            }
        };

        wire_to_domain(wire)
    }

    /// Read and parse a rule set from a YAML file.
    pub fn load(path: &Path) -> TriageResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TriageError::RulesRead {
            path: path.to_path_buf(),
            source,
        })?;

        let rules = Self::parse(&text)?;

        tracing::info!(
            path = %path.display(),
            conditions = rules.conditions.len(),
            red_flags = rules.red_flags.len(),
            synonyms = rules.keyword_normalization.len(),
            stopwords = rules.stopwords.len(),
            "loaded triage rules"
        );

        Ok(rules)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn red_flags(&self) -> &[RedFlag] {
        &self.red_flags
    }

    pub fn keyword_normalization(&self) -> &HashMap<String, String> {
        &self.keyword_normalization
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleSetWire {
    #[serde(default)]
    conditions: Vec<ConditionWire>,
    #[serde(default)]
    red_flags: Vec<RedFlagWire>,
    #[serde(default)]
    keyword_normalization: HashMap<String, String>,
    #[serde(default)]
    stopwords: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    negative_keywords: Vec<String>,
    #[serde(default)]
    weights: WeightsWire,
    #[serde(default)]
    age_band: Option<[u32; 2]>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WeightsWire {
    keyword: Option<f64>,
    negative: Option<f64>,
    age: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RedFlagWire {
    keywords: Vec<String>,
    message: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: RuleSetWire) -> TriageResult<RuleSet> {
    let mut seen_names = HashSet::new();
    let mut conditions = Vec::with_capacity(wire.conditions.len());

    for (index, cond) in wire.conditions.into_iter().enumerate() {
        let name = cond.name.trim().to_string();
        if name.is_empty() {
            return Err(TriageError::InvalidRules(format!(
                "conditions[{index}].name cannot be empty"
            )));
        }
        if !seen_names.insert(name.clone()) {
            return Err(TriageError::InvalidRules(format!(
                "duplicate condition name: {name}"
            )));
        }

        let weights = weights_from_wire(&cond.weights, index)?;

        let age_band = match cond.age_band {
            Some([low, high]) if low > high => {
                return Err(TriageError::InvalidRules(format!(
                    "conditions[{index}].age_band lower bound {low} exceeds upper bound {high}"
                )));
            }
            Some([low, high]) => Some(AgeBand { low, high }),
            None => None,
        };

        conditions.push(Condition {
            name,
            keywords: cond.keywords.into_iter().collect(),
            negative_keywords: cond.negative_keywords.into_iter().collect(),
            weights,
            age_band,
        });
    }

    let mut red_flags = Vec::with_capacity(wire.red_flags.len());
    for (index, flag) in wire.red_flags.into_iter().enumerate() {
        if flag.message.trim().is_empty() {
            return Err(TriageError::InvalidRules(format!(
                "red_flags[{index}].message cannot be empty"
            )));
        }
        red_flags.push(RedFlag {
            keywords: flag.keywords.into_iter().collect(),
            message: flag.message,
        });
    }

    Ok(RuleSet {
        conditions,
        red_flags,
        keyword_normalization: wire.keyword_normalization,
        stopwords: wire.stopwords.into_iter().collect(),
    })
}

fn weights_from_wire(wire: &WeightsWire, index: usize) -> TriageResult<Weights> {
    let defaults = Weights::default();
    let weights = Weights {
        keyword: wire.keyword.unwrap_or(defaults.keyword),
        negative: wire.negative.unwrap_or(defaults.negative),
        age: wire.age.unwrap_or(defaults.age),
    };

    for (field, value) in [
        ("keyword", weights.keyword),
        ("negative", weights.negative),
        ("age", weights.age),
    ] {
        if !value.is_finite() {
            return Err(TriageError::InvalidRules(format!(
                "conditions[{index}].weights.{field} must be a finite number"
            )));
        }
    }

    Ok(weights)
}
