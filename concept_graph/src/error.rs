//! Errors raised at the boundary of the graph core.

use concept_model::ModelError;
use thiserror::Error;

/// Errors surfaced by session controls and configuration.
///
/// The derivation pipeline itself is total: dangling references are dropped
/// and an empty focus level yields an empty graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid focus level '{0}', expected one of all, 1, 2, 3, 4")]
    InvalidFocusLevel(String),

    #[error("invalid render mode '{0}', expected 2d or 3d")]
    InvalidRenderMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result alias for graph core operations.
pub type GraphResult<T> = Result<T, GraphError>;
