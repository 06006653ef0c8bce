//! Per-drive statistical aggregation: daily rows → one feature vector per
//! serial number (mean/std per column, optional capacity and day count).

use super::DailyRow;
use crate::config::FeaturizerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One aggregated row of the drive feature table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveFeatures {
    pub serial_number: String,
    pub values: BTreeMap<String, f64>,
}

pub struct Featurizer {
    config: FeaturizerConfig,
}

impl Featurizer {
    pub fn new(config: FeaturizerConfig) -> Self {
        Self { config }
    }

    /// Aggregate daily rows into one feature vector per drive, sorted by
    /// serial number. Std uses the population denominator; a single
    /// observation yields 0, never an undefined value.
    pub fn featurize(&self, rows: &[DailyRow]) -> Vec<DriveFeatures> {
        let mut groups: BTreeMap<&str, Vec<&DailyRow>> = BTreeMap::new();
        for row in rows {
            groups.entry(row.serial_number.as_str()).or_default().push(row);
        }

        groups
            .into_iter()
            .map(|(serial, group)| {
                let mut values = BTreeMap::new();

                // Per-column sums over the values present in this group
                let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
                for row in &group {
                    for (col, v) in &row.values {
                        if self.config.drop_columns.iter().any(|d| d == col) {
                            continue;
                        }
                        let e = sums.entry(col.as_str()).or_insert((0.0, 0));
                        e.0 += v;
                        e.1 += 1;
                    }
                }

                let means: BTreeMap<&str, (f64, usize)> = sums
                    .into_iter()
                    .map(|(col, (sum, n))| (col, (sum / n as f64, n)))
                    .collect();

                for (col, (mean, n)) in &means {
                    let mut sq_dev = 0.0;
                    for row in &group {
                        if let Some(v) = row.values.get(*col) {
                            sq_dev += (v - mean) * (v - mean);
                        }
                    }
                    let std = (sq_dev / *n as f64).sqrt();
                    values.insert(format!("mean_{col}"), *mean);
                    values.insert(format!("std_{col}"), std);
                }

                if self.config.include_capacity {
                    let capacity = group
                        .iter()
                        .filter_map(|r| r.capacity_bytes)
                        .fold(None, |acc: Option<f64>, v| {
                            Some(acc.map_or(v, |a| a.max(v)))
                        });
                    if let Some(capacity) = capacity {
                        values.insert("capacity_bytes".to_string(), capacity);
                    }
                }
                if self.config.include_num_days {
                    values.insert("num_days".to_string(), group.len() as f64);
                }

                DriveFeatures {
                    serial_number: serial.to_string(),
                    values,
                }
            })
            .collect()
    }
}

/// Per-column missing-value audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingValueCount {
    pub column: String,
    pub count: usize,
    pub percent: f64,
}

/// Count absent cells per feature column across the rows, as an absolute
/// count and as a fraction of `divisor` (row count when not given).
pub fn missing_value_summary(rows: &[DailyRow], divisor: Option<usize>) -> Vec<MissingValueCount> {
    let mut columns: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        for col in row.values.keys() {
            columns.entry(col.as_str()).or_insert(0);
        }
    }
    for row in rows {
        for (col, missing) in columns.iter_mut() {
            if !row.values.contains_key(*col) {
                *missing += 1;
            }
        }
    }
    let divisor = divisor.unwrap_or(rows.len()).max(1) as f64;
    columns
        .into_iter()
        .map(|(column, count)| MissingValueCount {
            column: column.to_string(),
            count,
            percent: count as f64 / divisor,
        })
        .collect()
}
