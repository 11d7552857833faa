//! Errors raised while loading and validating datasets and catalogs.

use std::path::PathBuf;
use thiserror::Error;

use crate::{Category, ConceptId, ExampleId, Level, SubjectId};

/// Errors produced by the data model.
///
/// Dangling references are deliberately absent: an id that does not resolve is
/// dropped where it is resolved and never surfaces as an error.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("level {0} is outside 1..=4")]
    InvalidLevel(u8),

    #[error("concept '{id}' has category {category} but level {level}")]
    CategoryLevelMismatch {
        id: ConceptId,
        category: Category,
        level: Level,
    },

    #[error("concept id '{0}' appears more than once")]
    DuplicateConcept(ConceptId),

    #[error("example id '{0}' appears more than once")]
    DuplicateExample(ExampleId),

    #[error("subject id '{0}' appears more than once in the catalog")]
    DuplicateSubject(SubjectId),

    #[error("unknown subject '{0}'")]
    UnknownSubject(SubjectId),
}

/// Result alias for data model operations.
pub type ModelResult<T> = Result<T, ModelError>;
