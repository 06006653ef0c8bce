//! Per-drive sliding-window evaluation. Drives shorter than the window are
//! skipped and logged; everything else contributes one (truth, prediction)
//! pair per window position.

use super::{ClassificationReport, ConfusionMatrix};
use crate::config::{EvalConfig, RiskConfig};
use crate::error::Result;
use crate::features::{flatten_record, FlatRow};
use crate::model::Predictor;
use crate::risk::{Prediction, RiskTier};
use crate::telemetry::{DriveHistory, DriveSet};
use chrono::NaiveDate;
use std::io::Write;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct EvaluationOutcome {
    pub matrix: ConfusionMatrix,
    pub report: ClassificationReport,
    pub windows: usize,
    pub drives_skipped: usize,
}

pub struct EvaluationHarness {
    eval: EvalConfig,
    risk: RiskConfig,
}

impl EvaluationHarness {
    pub fn new(eval: EvalConfig, risk: RiskConfig) -> Self {
        Self { eval, risk }
    }

    /// Flatten the window's records in the configured date order, dropping
    /// records with no usable attributes.
    fn preprocess(&self, history: &DriveHistory, dates: &[&NaiveDate]) -> Vec<FlatRow> {
        let ordered: Vec<&NaiveDate> = if self.eval.descending {
            dates.iter().rev().copied().collect()
        } else {
            dates.to_vec()
        };
        ordered
            .into_iter()
            .filter_map(|date| history.get(date))
            .map(flatten_record)
            .filter(|row| !row.is_empty())
            .collect()
    }

    /// Evaluate the predictor over every drive, appending one line per
    /// window to `results` and the matrix + report at the end of the run.
    pub fn evaluate<P: Predictor + ?Sized, W: Write>(
        &self,
        predictor: &P,
        drives: &DriveSet,
        results: &mut W,
    ) -> Result<EvaluationOutcome> {
        let window = self.eval.window_days;
        let mut pairs: Vec<(RiskTier, Prediction)> = Vec::new();
        let mut drives_skipped = 0;

        for (serial, history) in drives {
            let num_days = history.len();
            if num_days < window {
                warn!(serial = %serial, num_days, window, "insufficient history, drive skipped");
                writeln!(
                    results,
                    "Less than {window} days of data for serial number {serial}"
                )?;
                drives_skipped += 1;
                continue;
            }

            let dates: Vec<&NaiveDate> = history.keys().collect();
            for start in 0..=(num_days - window) {
                let rul = (num_days - start - window) as i64;
                let truth = RiskTier::from_rul(rul, &self.risk);

                let rows = self.preprocess(history, &dates[start..start + window]);
                let label = predictor.predict(&rows).to_ascii_lowercase();
                let predicted = Prediction::from_label(&label);

                writeln!(
                    results,
                    "Actual = {:<10}\tPredicted = {:<10}",
                    truth.as_str(),
                    predicted.as_str()
                )?;
                pairs.push((truth, predicted));
            }
            debug!(serial = %serial, windows = num_days - window + 1, "drive evaluated");
        }

        let mut matrix = ConfusionMatrix::default();
        for (truth, predicted) in &pairs {
            matrix.record(*truth, *predicted);
        }
        let report = ClassificationReport::from_matrix(&matrix);

        writeln!(results, "{matrix}")?;
        writeln!(results, "{report}")?;

        info!(
            windows = pairs.len(),
            drives_skipped, "evaluation complete"
        );
        Ok(EvaluationOutcome {
            matrix,
            report,
            windows: pairs.len(),
            drives_skipped,
        })
    }
}
