// File: src/error.rs
//! Error kinds for the rent prediction core.
//!
//! Request-level errors (`InputError`, `InferenceError`) are recoverable and
//! end at the request handler. `ArtifactError` is fatal to the prediction
//! feature. `ReportError` only affects the report page.

use std::path::PathBuf;

/// User-correctable problems with a submitted form.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Unknown locality: {name}. Please check the spelling.")]
    UnknownLocality {
        name: String,
        /// Closest known localities, best first. May be empty.
        suggestions: Vec<String>,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Unknown {field}: '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is required")]
    Required { field: &'static str },
}

/// Failures while transforming a record or running the model.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("feature vector has {actual} values but the model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite estimate ({0})")]
    NonFinite(f64),
}

/// Everything that can go wrong in a single prediction request.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Missing, unreadable or inconsistent model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("could not read artifact '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("JSON export '{}' is malformed: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactError {
    pub fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            artifact,
            reason: reason.into(),
        }
    }
}

/// Problems rendering the static analysis report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report file not found. Please ensure '{file}' is in the artifact directory.")]
    Missing { file: String },

    #[error("could not read report '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
