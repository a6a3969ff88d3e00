//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the engine. Environment variables are read by the binaries only; nothing here
//! touches process-wide state during request handling.

use crate::constants::{DEFAULT_RULES_FILENAME, RULES_DIR};
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rules_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The rules path must point at an existing file.
    pub fn new(rules_path: PathBuf) -> TriageResult<Self> {
        if !rules_path.is_file() {
            return Err(TriageError::InvalidInput(format!(
                "rules path is not a file: {}",
                rules_path.display()
            )));
        }

        Ok(Self { rules_path })
    }

    pub fn rules_path(&self) -> &Path {
        &self.rules_path
    }
}

/// Resolve the rules file without reading environment variables.
///
/// If `override_path` is provided, it must be an existing file. Otherwise this searches for
/// `crates/core/rules/symptom_rules.yaml` relative to the current working directory and then
/// walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_rules_path(override_path: Option<PathBuf>) -> TriageResult<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        return Err(TriageError::InvalidInput(format!(
            "TRIAGE_RULES_PATH override is not a file: {}",
            path.display()
        )));
    }

    let cwd_relative = Path::new(RULES_DIR).join(DEFAULT_RULES_FILENAME);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(RULES_DIR).join(DEFAULT_RULES_FILENAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(TriageError::InvalidInput(format!(
        "could not locate {RULES_DIR}/{DEFAULT_RULES_FILENAME}"
    )))
}
