//! Flattening of one raw snapshot into a feature row. Raw values are parsed
//! through an ordered chain of strategies; parsing never fails the record,
//! it falls through or omits the key.

use super::{FlatRow, CAPACITY_KEY};
use crate::telemetry::{DailyRecord, RawAttributeValue};
use tracing::debug;

/// SMART attribute id reporting power-on hours
const POWER_ON_HOURS_ID: u16 = 9;

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse strategies, first success wins:
/// whole string is digits → leading space-delimited token is digits →
/// the raw entry's numeric value → none.
fn parse_raw_value(raw: &RawAttributeValue) -> Option<f64> {
    if let Some(s) = raw.string.as_deref() {
        if all_digits(s) {
            if let Ok(v) = s.parse::<i64>() {
                return Some(v as f64);
            }
        }
        if let Some(token) = s.split(' ').next() {
            if all_digits(token) {
                if let Ok(v) = token.parse::<i64>() {
                    return Some(v as f64);
                }
            }
        }
    }
    raw.value.map(|v| v as f64)
}

/// Flatten one daily record into a feature row. A record carrying no usable
/// attributes yields an empty row for the caller to drop.
pub fn flatten_record(record: &DailyRecord) -> FlatRow {
    let mut row = FlatRow::default();

    if let Some(attrs) = record.ata_smart_attributes.as_ref() {
        for entry in &attrs.table {
            if let Some(raw) = entry.raw.as_ref() {
                if raw.string.is_some() {
                    if let Some(v) = parse_raw_value(raw) {
                        row.values.insert(format!("smart_{}_raw", entry.id), v);
                    }
                }
            }
            if let Some(norm) = entry.value {
                row.values
                    .insert(format!("smart_{}_normalized", entry.id), norm as f64);
            }
        }
    }

    // Explicit power-on hours only fills in when the attribute table didn't
    if let Some(hours) = record.power_on_time.as_ref().and_then(|p| p.hours) {
        row.values
            .entry(format!("smart_{}_raw", POWER_ON_HOURS_ID))
            .or_insert(hours as f64);
    }

    if let Some(capacity) = record.user_capacity.as_ref() {
        match capacity.bytes {
            Some(bytes) => {
                row.values.insert(CAPACITY_KEY.to_string(), bytes as f64);
            }
            None => debug!("user capacity present without byte count"),
        }
    }

    if let Some(model) = record.model_name.as_deref() {
        row.model_name = Some(model.to_string());
    }
    row.vendor = record.vendor.clone().or_else(|| {
        record
            .model_name
            .as_deref()
            .map(|model| infer_vendor(model).to_string())
    });

    row
}

/// Vendor from model-name prefix. A lossy heuristic, not a lookup table:
/// single-letter prefixes are checked before "Hi", and everything else maps
/// to HGST. The precedence order is load-bearing downstream.
pub fn infer_vendor(model_name: &str) -> &'static str {
    if model_name.starts_with('W') {
        "WDC"
    } else if model_name.starts_with('T') {
        "Toshiba"
    } else if model_name.starts_with('S') {
        "Seagate"
    } else if model_name.starts_with("Hi") {
        "Hitachi"
    } else {
        "HGST"
    }
}
