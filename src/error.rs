//! Error types for content lookup and loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the content store and the view layer
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Duplicate slug '{slug}' in {path:?}")]
    DuplicateSlug { slug: String, path: PathBuf },

    #[error("Invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ContentError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        ContentError::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Whether this error means the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
