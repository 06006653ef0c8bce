//! Deterministic k-means: farthest-point seeding, Lloyd iterations with a
//! cap and an early break once assignments settle. Deterministic for a
//! deterministic input row order.

use super::euclidean;

pub struct KMeans {
    k: usize,
    max_iterations: usize,
}

#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub centroids: Vec<Vec<f64>>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
}

impl KMeans {
    /// Caller guarantees `k <= rows.len()` when fitting.
    pub fn new(k: usize, max_iterations: usize) -> Self {
        Self { k, max_iterations }
    }

    fn nearest(centroids: &[Vec<f64>], row: &[f64]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::MAX;
        for (i, c) in centroids.iter().enumerate() {
            let d = euclidean(row, c);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    /// Seed with the first row, then repeatedly the point farthest from all
    /// chosen seeds.
    fn seed(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(self.k);
        centroids.push(rows[0].clone());
        while centroids.len() < self.k {
            let mut max_dist = -1.0f64;
            let mut max_idx = 0;
            for (i, row) in rows.iter().enumerate() {
                let min_dist = centroids
                    .iter()
                    .map(|c| euclidean(row, c))
                    .fold(f64::MAX, f64::min);
                if min_dist > max_dist {
                    max_dist = min_dist;
                    max_idx = i;
                }
            }
            centroids.push(rows[max_idx].clone());
        }
        centroids
    }

    pub fn fit(&self, rows: &[Vec<f64>]) -> KMeansFit {
        let dims = rows.first().map_or(0, |r| r.len());
        if rows.is_empty() || self.k == 0 {
            return KMeansFit {
                centroids: Vec::new(),
                assignments: Vec::new(),
                iterations: 0,
            };
        }

        let mut centroids = self.seed(rows);
        let mut assignments = vec![0usize; rows.len()];
        let mut iterations = 0;

        for _ in 0..self.max_iterations {
            iterations += 1;

            let next: Vec<usize> = rows
                .iter()
                .map(|row| Self::nearest(&centroids, row))
                .collect();
            let settled = next == assignments && iterations > 1;
            assignments = next;
            if settled {
                break;
            }

            // Recompute centroids; an emptied cluster keeps its previous one
            let mut sums = vec![vec![0.0f64; dims]; self.k];
            let mut counts = vec![0usize; self.k];
            for (row, &cluster) in rows.iter().zip(assignments.iter()) {
                counts[cluster] += 1;
                for (d, v) in row.iter().enumerate() {
                    sums[cluster][d] += v;
                }
            }
            for (cluster, count) in counts.iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                for d in 0..dims {
                    sums[cluster][d] /= *count as f64;
                }
                centroids[cluster] = std::mem::take(&mut sums[cluster]);
            }
        }

        KMeansFit {
            centroids,
            assignments,
            iterations,
        }
    }
}
