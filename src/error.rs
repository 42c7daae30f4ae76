// src/error.rs
use crate::types::FeatureId;
use thiserror::Error;

/// Fehler der Eingabeschicht. Treten sie auf, läuft der Kern gar nicht erst an.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("No active layer: {reason}")]
    NoActiveLayer { reason: String },

    #[error("Layer contains no features")]
    EmptyLayer,

    #[error("Must be line: layer geometry type is {found}")]
    WrongGeometryType { found: String },

    #[error("Feature {id} has {count} vertices, a line needs at least 2")]
    TooFewVertices { id: FeatureId, count: usize },

    #[error("Feature {id} contains a non-finite coordinate")]
    NonFiniteCoordinate { id: FeatureId },

    #[error("Feature id {id} appears more than once")]
    DuplicateFeatureId { id: FeatureId },
}

/// Fehler beim Schließen der Kette zum Ring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("{count} geometry errors found, polygon not assembled")]
    DefectsPresent { count: usize },

    #[error("Degenerate chain: expected at least {expected} distinct points, got {actual}")]
    TooFewDistinctPoints { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum PolygoniseError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PolygoniseResult<T> = Result<T, PolygoniseError>;
