//! Constants used throughout the triage core crate.
//!
//! Fixed user-facing messages live here alongside scoring defaults and the
//! default rules location, so the wording and thresholds stay consistent
//! across the engine, the REST boundary and the CLI.

/// Directory holding the rules shipped with the crate, relative to the workspace root.
pub const RULES_DIR: &str = "crates/core/rules";

/// Filename of the default rules file.
pub const DEFAULT_RULES_FILENAME: &str = "symptom_rules.yaml";

/// Default weight applied per matched keyword.
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 1.0;

/// Default weight subtracted per matched negative keyword.
pub const DEFAULT_NEGATIVE_WEIGHT: f64 = 1.0;

/// Default bonus applied when the age falls inside a condition's age band.
pub const DEFAULT_AGE_WEIGHT: f64 = 0.5;

/// Ages at or below this value are considered higher risk.
pub const AGE_RISK_MAX_INFANT: u32 = 1;

/// Ages at or above this value are considered higher risk.
pub const AGE_RISK_MIN_ELDERLY: u32 = 75;

/// Reason appended for higher-risk ages. Does not change the triage level on its own.
pub const AGE_RISK_MESSAGE: &str = "Age at higher risk. Please consult a doctor.";

/// Reason appended after all red-flag messages when an assessment is urgent.
pub const ESCALATION_MESSAGE: &str = "If symptoms worsen, seek emergency care.";

/// Disclaimer returned with every assessment.
pub const ADVICE: [&str; 3] = [
    "This is a demo, not medical advice.",
    "Always consult a qualified doctor.",
    "If symptoms are severe, seek urgent care.",
];

/// Maximum number of likely conditions returned per assessment.
pub const MAX_LIKELY_CONDITIONS: usize = 5;

/// Upper bound for a valid age in years.
pub const MAX_AGE_YEARS: u32 = 120;
