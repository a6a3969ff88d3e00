//! # Triage Core
//!
//! Rule-evaluation engine for the symptom triage service.
//!
//! This crate contains the only real logic in the system:
//! - Rule set loading from YAML (conditions, red flags, synonyms, stopwords)
//! - Symptom text normalisation and token extraction
//! - Red-flag (urgency) detection
//! - Heuristic condition scoring and ranking
//!
//! Scores are keyword-overlap heuristics. Nothing here is a diagnosis.
//!
//! **No API concerns**: HTTP servers, request validation and presentation belong in
//! `api-rest`, `api-shared` and the CLI.

pub mod assessment;
pub mod config;
pub mod constants;
pub mod error;
mod normalise;
pub mod red_flags;
pub mod rules;
pub mod scoring;
pub mod tokens;

pub use assessment::{
    AssessmentInput, AssessmentResult, LikelyCondition, SymptomEngine, TriageLevel,
};
pub use config::{resolve_rules_path, CoreConfig};
pub use error::{TriageError, TriageResult};
pub use red_flags::{detect, RedFlagReport};
pub use rules::{AgeBand, Condition, RedFlag, RuleSet, Weights};
pub use scoring::score_condition;
pub use tokens::SymptomTokens;
