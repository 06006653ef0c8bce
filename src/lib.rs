//! DriveSense — SMART telemetry hard-drive failure risk pipeline.
//!
//! Modular structure:
//! - [`telemetry`] — Raw per-day SMART record model and dataset loading
//! - [`features`] — Record flattening and per-drive statistical aggregation
//! - [`sampler`] — Cluster-based representative downsampling
//! - [`risk`] — RUL-derived risk tiers
//! - [`model`] — Predictor boundary, ONNX adapter, opaque model store
//! - [`eval`] — Sliding-window backtest harness and metrics
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod error;
pub mod eval;
pub mod features;
pub mod logging;
pub mod model;
pub mod risk;
pub mod sampler;
pub mod telemetry;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use eval::{ClassificationReport, ConfusionMatrix, EvaluationHarness};
pub use features::{flatten_record, Featurizer, FlatRow};
pub use logging::StructuredLogger;
pub use model::{ModelStore, OnnxPredictor, Predictor};
pub use risk::{Prediction, RiskTier};
pub use sampler::{FeatureMatrix, RepresentativeSampler};
