//! DriveSense entrypoint: load the failed and working drive datasets, run
//! the sliding-window evaluation against the configured predictor, and write
//! the results log (per-window lines, confusion matrix, report).

use chrono::Utc;
use drivesense::{
    config::PipelineConfig,
    eval::EvaluationHarness,
    logging::StructuredLogger,
    model::{OnnxPredictor, Predictor},
    telemetry::{load_drive_set, DriveSet},
};
use std::io::{BufWriter, Write};
use tracing::{info, warn};

fn merged_drive_set(config: &PipelineConfig) -> drivesense::Result<DriveSet> {
    let mut drives = load_drive_set(&config.data.failed_data_path)?;
    let working = load_drive_set(&config.data.working_data_path)?;
    for (serial, history) in working {
        drives.insert(serial, history);
    }
    Ok(drives)
}

fn main() -> drivesense::Result<()> {
    let config_path = std::env::var("DRIVESENSE_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = PipelineConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(config = %config_path.display(), "drivesense starting");

    let drives = merged_drive_set(&config)?;
    info!(drives = drives.len(), "datasets loaded");

    let mut predictor = OnnxPredictor::new(config.model.clone());
    // A failed init is non-fatal here; every prediction then lands in the
    // unknown bucket of the report.
    if let Err(e) = predictor.initialize(&config.model.model_dir) {
        warn!(error = %e, "predictor initialization failed, predictions will be unknown");
    }

    std::fs::create_dir_all(&config.data.results_dir)?;
    let model_stem = config
        .model
        .model_file
        .rsplit_once('.')
        .map(|(stem, _)| stem.to_string())
        .unwrap_or_else(|| config.model.model_file.clone());
    let results_path = config.data.results_dir.join(format!(
        "results_{}_reverse{}_{}.txt",
        model_stem,
        config.evaluation.descending,
        Utc::now().format("%b_%d_%Y_%H_%M_%S"),
    ));
    let file = std::fs::File::create(&results_path)?;
    let mut results = BufWriter::new(file);

    let harness = EvaluationHarness::new(config.evaluation.clone(), config.risk.clone());
    let outcome = harness.evaluate(&predictor, &drives, &mut results)?;
    results.flush()?;

    info!(
        windows = outcome.windows,
        drives_skipped = outcome.drives_skipped,
        accuracy = outcome.report.accuracy,
        results = %results_path.display(),
        "run complete"
    );
    println!("{}", outcome.matrix);
    println!("{}", outcome.report);

    Ok(())
}
