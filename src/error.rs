//! Error types for the pipeline.
//!
//! Per-record and per-drive problems are recovered locally (skip and
//! continue); structural preconditions and serialization failures abort the
//! operation that hit them.

use thiserror::Error;

/// Unified error type for the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("serial {serial} has {num_days} days of data, window needs {window}")]
    InsufficientHistory {
        serial: String,
        num_days: usize,
        window: usize,
    },

    #[error("predictor initialization failed: {0}")]
    PredictorInit(String),

    #[error("requested {requested} representatives from a population of {available}")]
    ClusteringPrecondition { requested: usize, available: usize },

    #[error("model serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, PipelineError>;
