//! Dataset loading: direct-evaluation maps and bulk newline-delimited JSON.
//! Malformed records are dropped with a warning, never fatal.

use super::{DailyRecord, DriveSet};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One line of a bulk telemetry file
#[derive(Debug, Deserialize)]
struct TelemetryLine {
    date: NaiveDate,
    smartctl_json: DailyRecord,
}

/// Load a direct-evaluation dataset: a JSON map of serial → date → record.
pub fn load_drive_set(path: &Path) -> Result<DriveSet> {
    let file = std::fs::File::open(path)?;
    let drives: DriveSet = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), drives = drives.len(), "loaded drive set");
    Ok(drives)
}

/// Load bulk telemetry files (one JSON object per line), keeping only the
/// given serial numbers when a filter is supplied. Lines that fail to parse
/// or carry no serial are skipped.
pub fn load_jsonl_files(paths: &[&Path], serials: Option<&HashSet<String>>) -> Result<DriveSet> {
    let mut drives = DriveSet::new();
    for path in paths {
        let file = std::fs::File::open(path)?;
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let parsed: TelemetryLine = match serde_json::from_str(&line) {
                Ok(p) => p,
                Err(e) => {
                    warn!(path = %path.display(), lineno, error = %e, "skipping malformed record");
                    continue;
                }
            };
            let serial = match parsed.smartctl_json.serial_number.clone() {
                Some(s) => s,
                None => {
                    warn!(path = %path.display(), lineno, "skipping record without serial number");
                    continue;
                }
            };
            if let Some(filter) = serials {
                if !filter.contains(&serial) {
                    continue;
                }
            }
            let history = drives.entry(serial).or_default();
            if history.insert(parsed.date, parsed.smartctl_json).is_some() {
                debug!(date = %parsed.date, "duplicate date replaced earlier record");
            }
        }
    }
    Ok(drives)
}

/// Scan a directory for `.json`/`.jsonl` files and bulk-load them all.
pub fn load_jsonl_dir(dir: &Path, serials: Option<&HashSet<String>>) -> Result<DriveSet> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("jsonl") => files.push(path.to_path_buf()),
            _ => {}
        }
    }
    files.sort();
    let refs: Vec<&Path> = files.iter().map(|p| p.as_path()).collect();
    load_jsonl_files(&refs, serials)
}
