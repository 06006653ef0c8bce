//! Pipeline configuration. Every default lives here, not inline in the
//! components; a component never constructs a hidden fallback on its own.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Dataset locations for the reference evaluation flow
    pub data: DataConfig,
    /// Per-drive statistical aggregation
    pub features: FeaturizerConfig,
    /// Representative downsampling of healthy populations
    pub sampler: SamplerConfig,
    /// RUL-to-tier thresholds
    pub risk: RiskConfig,
    /// Sliding-window backtest parameters
    pub evaluation: EvalConfig,
    /// Predictor model artifacts
    pub model: ModelConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Serial → date → record map of drives that failed
    pub failed_data_path: PathBuf,
    /// Serial → date → record map of drives still in service
    pub working_data_path: PathBuf,
    /// Directory for results logs
    pub results_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturizerConfig {
    /// Merge max observed capacity per drive into the feature table
    pub include_capacity: bool,
    /// Merge per-drive observation count into the feature table
    pub include_num_days: bool,
    /// Feature columns excluded before aggregation
    pub drop_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of representative drives to keep
    pub sample_count: usize,
    /// Lloyd iteration cap; the loop breaks early once assignments settle
    pub max_iterations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// RUL at or below this many days is bad
    pub bad_max_days: i64,
    /// RUL at or below this many days (and above bad) is warning
    pub warning_max_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Days per prediction window
    pub window_days: usize,
    /// Feed window records to the predictor newest-first
    pub descending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding predictor artifacts and saved models
    pub model_dir: PathBuf,
    /// ONNX model filename inside `model_dir`
    pub model_file: String,
    /// Feature keys the model consumes; the input vector is the per-key
    /// mean followed by the per-key std across the window
    pub input_features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            features: FeaturizerConfig::default(),
            sampler: SamplerConfig::default(),
            risk: RiskConfig::default(),
            evaluation: EvalConfig::default(),
            model: ModelConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            failed_data_path: PathBuf::from("data/failed_drives.json"),
            working_data_path: PathBuf::from("data/working_drives.json"),
            results_dir: PathBuf::from("results"),
        }
    }
}

impl Default for FeaturizerConfig {
    fn default() -> Self {
        Self {
            include_capacity: true,
            include_num_days: false,
            drop_columns: Vec::new(),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_count: 300,
            max_iterations: 1_000_000,
        }
    }
}

const DAYS_PER_WEEK: i64 = 7;

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            bad_max_days: 2 * DAYS_PER_WEEK,
            warning_max_days: 6 * DAYS_PER_WEEK,
        }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            window_days: 6,
            descending: false,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            model_file: "model.onnx".to_string(),
            input_features: vec![
                "smart_1_raw".to_string(),
                "smart_5_raw".to_string(),
                "smart_7_raw".to_string(),
                "smart_9_raw".to_string(),
                "smart_187_raw".to_string(),
                "smart_193_raw".to_string(),
                "smart_197_raw".to_string(),
                "smart_198_raw".to_string(),
            ],
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl PipelineConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<PipelineConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
