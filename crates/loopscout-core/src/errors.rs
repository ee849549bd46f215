use crate::ast::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the analyses and their configuration.
///
/// Scope-stack imbalance during the selection pass is a contract violation
/// and panics instead of producing one of these.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A downstream consumer asked for a loop record the pass never wrote.
    #[error("loop analysis was not performed for loop {0}")]
    AnalysisNotPerformed(NodeId),

    #[error("expression cannot be lowered to symbolic form: {0}")]
    UnsupportedExpression(String),

    #[error("invalid library model pattern '{0}'")]
    InvalidPattern(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
