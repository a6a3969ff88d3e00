use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read rules file (path: {path}): {source}", path = path.display())]
    RulesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("rules schema mismatch: {0}")]
    RulesSchema(String),
    #[error("invalid rules: {0}")]
    InvalidRules(String),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
