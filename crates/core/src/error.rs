use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures that stop a session from being built.
///
/// Selection on an unknown tile and misconfigured abilities are deliberately
/// absent: the former is an `Ignored` outcome, the latter falls back to the
/// documented defaults.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid layout `{layout}`: {reason}")]
    InvalidLayout { layout: String, reason: String },

    #[error("unknown layout: {name}")]
    UnknownLayout { name: String },

    #[error("tile catalog is empty")]
    EmptyCatalog,

    #[error("tile catalog holds more than {max} kinds")]
    CatalogTooLarge { max: usize },

    #[error("duplicate tile kind id: {id}")]
    DuplicateKind { id: String },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub fn invalid_layout(layout: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            layout: layout.into(),
            reason: reason.into(),
        }
    }
}
