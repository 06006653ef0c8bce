//! Representative downsampling of a drive population: scale, cluster, and
//! keep the member closest to each centroid.

mod kmeans;
mod scale;

pub use kmeans::{KMeans, KMeansFit};
pub use scale::RobustScaler;

use crate::config::SamplerConfig;
use crate::error::{PipelineError, Result};
use crate::features::DriveFeatures;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Dense matrix view over a drive feature table: one row per serial, columns
/// sorted by name, absent cells filled with 0.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub serials: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn from_features(features: &[DriveFeatures]) -> Self {
        let columns: Vec<String> = features
            .iter()
            .flat_map(|f| f.values.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut serials = Vec::with_capacity(features.len());
        let mut rows = Vec::with_capacity(features.len());
        for f in features {
            serials.push(f.serial_number.clone());
            rows.push(
                columns
                    .iter()
                    .map(|c| f.values.get(c).copied().unwrap_or(0.0))
                    .collect(),
            );
        }
        Self {
            serials,
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

pub struct RepresentativeSampler {
    config: SamplerConfig,
}

impl RepresentativeSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Select `sample_count` representative serial numbers: scale the matrix
    /// robustly, cluster with k-means, and per cluster keep the member with
    /// minimum distance to the centroid (first-encountered wins ties).
    /// Returned in cluster-index order.
    pub fn select(&self, matrix: &FeatureMatrix) -> Result<Vec<String>> {
        let k = self.config.sample_count;
        if k > matrix.len() {
            return Err(PipelineError::ClusteringPrecondition {
                requested: k,
                available: matrix.len(),
            });
        }

        let scaler = RobustScaler::fit(&matrix.rows);
        let scaled = scaler.transform(&matrix.rows);

        let fit = KMeans::new(k, self.config.max_iterations).fit(&scaled);
        debug!(clusters = k, iterations = fit.iterations, "k-means converged");

        let mut representatives = Vec::with_capacity(k);
        for (cluster, centroid) in fit.centroids.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (i, row) in scaled.iter().enumerate() {
                if fit.assignments[i] != cluster {
                    continue;
                }
                let dist = euclidean(row, centroid);
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some((i, dist));
                }
            }
            match best {
                Some((i, _)) => representatives.push(matrix.serials[i].clone()),
                None => warn!(cluster, "cluster has no members, no representative"),
            }
        }
        Ok(representatives)
    }
}
