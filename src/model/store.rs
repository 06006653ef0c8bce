//! Opaque model persistence: serialize any serde model to
//! `<base_name>_<suffix>.bin`, suffix defaulting to a UTC timestamp. No
//! model-type validation on load; blob in, blob out.

use crate::error::Result;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const MODEL_EXT: &str = "bin";
const TIMESTAMP_FORMAT: &str = "%b_%d_%Y_%H_%M_%S";

pub struct ModelStore {
    base_dir: PathBuf,
}

impl ModelStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Serialize and write a model. The suffix identifies the model's state;
    /// when omitted, the current timestamp is used. Returns the written path.
    pub fn save<M: Serialize>(
        &self,
        model: &M,
        base_name: &str,
        suffix: Option<&str>,
    ) -> Result<PathBuf> {
        let suffix = match suffix {
            Some(s) => s.to_string(),
            None => Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        };
        let path = self
            .base_dir
            .join(format!("{base_name}_{suffix}.{MODEL_EXT}"));
        let bytes = bincode::serialize(model)?;
        std::fs::write(&path, bytes)?;
        debug!(path = %path.display(), "model saved");
        Ok(path)
    }

    /// Deserialize a model from a previously saved file.
    pub fn load<M: DeserializeOwned>(&self, path: &Path) -> Result<M> {
        let bytes = std::fs::read(path)?;
        Ok(bincode::deserialize(&bytes)?)
    }
}
