//! ONNX-backed predictor adapter. Input: [1, 2 × n_features] f32 (per-key
//! mean then per-key std across the window), output: 3-way class scores
//! mapped to good/warning/bad. Inference failures degrade to "unknown",
//! never panic.

use super::Predictor;
use crate::config::ModelConfig;
use crate::error::{PipelineError, Result};
use crate::features::FlatRow;
use crate::risk::RiskTier;
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

const CLASS_ORDER: [RiskTier; 3] = [RiskTier::Good, RiskTier::Warning, RiskTier::Bad];

pub struct OnnxPredictor {
    config: ModelConfig,
    session: Mutex<Option<Session>>,
}

impl OnnxPredictor {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    /// Per-key mean followed by per-key population std across the window;
    /// keys absent from every row contribute zeros.
    fn input_vector(&self, window: &[FlatRow]) -> Vec<f32> {
        let n = self.config.input_features.len();
        let mut out = vec![0.0f32; 2 * n];
        for (i, key) in self.config.input_features.iter().enumerate() {
            let values: Vec<f64> = window
                .iter()
                .filter_map(|row| row.values.get(key).copied())
                .collect();
            if values.is_empty() {
                continue;
            }
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
                / values.len() as f64;
            out[i] = mean as f32;
            out[n + i] = var.sqrt() as f32;
        }
        out
    }

    fn run_session(&self, input: Vec<f32>) -> std::result::Result<Vec<f32>, String> {
        let mut guard = self.session.lock().map_err(|_| "session lock poisoned")?;
        let session = guard.as_mut().ok_or("model not initialized")?;

        let dim = input.len();
        let array =
            Array2::from_shape_vec((1, dim), input).map_err(|e| e.to_string())?;
        let tensor = Value::from_array(array).map_err(|e| e.to_string())?;

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or("model defines no output")?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| e.to_string())?;
        let output = outputs
            .get(&output_name)
            .ok_or("model produced no output")?;
        let (_, scores) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| e.to_string())?;
        Ok(scores.to_vec())
    }
}

impl Predictor for OnnxPredictor {
    fn initialize(&mut self, model_dir: &Path) -> Result<()> {
        let path = model_dir.join(&self.config.model_file);
        if !path.exists() {
            return Err(PipelineError::PredictorInit(format!(
                "model file not found: {}",
                path.display()
            )));
        }
        let session = Session::builder()
            .and_then(|b| Ok(b.with_optimization_level(GraphOptimizationLevel::Level3)?))
            .and_then(|mut b| b.commit_from_file(&path))
            .map_err(|e| PipelineError::PredictorInit(e.to_string()))?;
        debug!(path = %path.display(), "ONNX model loaded");
        *self
            .session
            .lock()
            .map_err(|_| PipelineError::PredictorInit("session lock poisoned".into()))? =
            Some(session);
        Ok(())
    }

    fn predict(&self, window: &[FlatRow]) -> String {
        let input = self.input_vector(window);
        let scores = match self.run_session(input) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "inference failed");
                return "unknown".to_string();
            }
        };
        let tier = scores
            .iter()
            .take(CLASS_ORDER.len())
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| CLASS_ORDER[i]);
        match tier {
            Some(tier) => tier.as_str().to_string(),
            None => "unknown".to_string(),
        }
    }
}
