//! Robust feature scaling: per-column median center and IQR scale, so
//! outlying drives don't dominate the cluster geometry.

/// Fitted per-column centers and scales
#[derive(Debug, Clone)]
pub struct RobustScaler {
    centers: Vec<f64>,
    scales: Vec<f64>,
}

/// Percentile by linear interpolation over a sorted slice, q in [0, 1]
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 < sorted.len() {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

impl RobustScaler {
    /// Fit on the full matrix. A column with zero IQR gets unit scale.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let dims = rows.first().map_or(0, |r| r.len());
        let mut centers = Vec::with_capacity(dims);
        let mut scales = Vec::with_capacity(dims);
        for d in 0..dims {
            let mut column: Vec<f64> = rows.iter().map(|r| r[d]).collect();
            column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let median = percentile(&column, 0.5);
            let iqr = percentile(&column, 0.75) - percentile(&column, 0.25);
            centers.push(median);
            scales.push(if iqr == 0.0 { 1.0 } else { iqr });
        }
        Self { centers, scales }
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(d, v)| (v - self.centers[d]) / self.scales[d])
                    .collect()
            })
            .collect()
    }
}
