//! Raw SMART telemetry data model: typed mirror of smartctl JSON snapshots.
//! Every field a snapshot may or may not carry is optional; records are
//! read-only once loaded.

mod loader;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use loader::{load_drive_set, load_jsonl_dir, load_jsonl_files};

/// One drive's telemetry snapshot for one calendar day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ata_smart_attributes: Option<AtaAttributeTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_on_time: Option<PowerOnTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_capacity: Option<UserCapacity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtaAttributeTable {
    #[serde(default)]
    pub table: Vec<AttributeEntry>,
}

/// One vendor attribute row: id, normalized value, raw value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub id: u16,
    /// Normalized (vendor-scaled) value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawAttributeValue>,
}

/// Raw attribute payload: a digit string, a digit string with trailing
/// vendor text, or an already-numeric value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAttributeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerOnTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCapacity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<i64>,
}

/// Ordered-by-date history for one drive. At most one record per calendar
/// day; keys iterate ascending.
pub type DriveHistory = BTreeMap<NaiveDate, DailyRecord>;

/// All drives keyed by serial number; iteration order is deterministic.
pub type DriveSet = BTreeMap<String, DriveHistory>;

/// Remaining useful life in days for every observed date of a history:
/// the gap to the failure date, or to the last observed date if the drive
/// never failed.
pub fn rul_days(history: &DriveHistory) -> BTreeMap<NaiveDate, i64> {
    let last = match history.keys().next_back() {
        Some(d) => *d,
        None => return BTreeMap::new(),
    };
    history
        .keys()
        .map(|date| (*date, (last - *date).num_days()))
        .collect()
}
