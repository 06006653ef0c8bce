//! Feature engineering: record flattening and per-drive statistical
//! aggregation.

mod featurize;
mod flatten;

pub use featurize::{missing_value_summary, DriveFeatures, Featurizer, MissingValueCount};
pub use flatten::{flatten_record, infer_vendor};

use crate::telemetry::DriveSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Capacity key produced by flattening and consumed by the featurizer
pub const CAPACITY_KEY: &str = "user_capacity";

/// Flat per-day feature row: numeric features keyed by name, plus the
/// non-numeric model/vendor tags carried alongside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatRow {
    pub values: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl FlatRow {
    /// A row with no usable content. Such rows are excluded by callers,
    /// never zero-filled.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.model_name.is_none() && self.vendor.is_none()
    }
}

/// One tagged row of the training-path table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRow {
    pub serial_number: String,
    pub date: NaiveDate,
    pub failure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_bytes: Option<f64>,
    pub values: BTreeMap<String, f64>,
}

/// Flatten a drive set into tagged daily rows for the training path.
/// Capacity moves out of the feature map into its own column; records that
/// flatten to nothing are excluded.
pub fn daily_rows(drives: &DriveSet, failed_serials: &HashSet<String>) -> Vec<DailyRow> {
    let mut rows = Vec::new();
    for (serial, history) in drives {
        let failure = failed_serials.contains(serial);
        for (date, record) in history {
            let mut flat = flatten_record(record);
            if flat.is_empty() {
                continue;
            }
            let capacity_bytes = flat.values.remove(CAPACITY_KEY);
            rows.push(DailyRow {
                serial_number: serial.clone(),
                date: *date,
                failure,
                capacity_bytes,
                values: flat.values,
            });
        }
    }
    rows
}
