//! External predictor boundary and opaque model persistence.

mod onnx;
mod store;

pub use onnx::OnnxPredictor;
pub use store::ModelStore;

use crate::error::Result;
use crate::features::FlatRow;
use std::path::Path;

/// A trained risk classifier. Implementations live outside this crate's
/// scope; the harness only needs these two operations.
pub trait Predictor {
    /// Load model artifacts from a directory
    fn initialize(&mut self, model_dir: &Path) -> Result<()>;

    /// Predict a tier label for one preprocessed window of daily rows.
    /// Expected labels are good/warning/bad (case-insensitive); anything
    /// else lands in the harness's unknown bucket.
    fn predict(&self, window: &[FlatRow]) -> String;
}
