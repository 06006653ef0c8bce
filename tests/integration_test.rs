//! Integration tests: config load, record flattening, featurization,
//! tier thresholds, representative sampling, model store round-trip.

use drivesense::{
    config::{FeaturizerConfig, PipelineConfig, RiskConfig, SamplerConfig},
    features::{daily_rows, flatten_record, infer_vendor, missing_value_summary, Featurizer},
    model::ModelStore,
    risk::{Prediction, RiskTier},
    sampler::{FeatureMatrix, RepresentativeSampler, RobustScaler},
    telemetry::{
        rul_days, AtaAttributeTable, AttributeEntry, DailyRecord, DriveHistory, DriveSet,
        PowerOnTime, RawAttributeValue, UserCapacity,
    },
    PipelineError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, day).unwrap()
}

fn attr(id: u16, raw_string: Option<&str>, raw_value: Option<i64>, normalized: Option<i64>) -> AttributeEntry {
    AttributeEntry {
        id,
        value: normalized,
        raw: Some(RawAttributeValue {
            string: raw_string.map(String::from),
            value: raw_value,
        }),
    }
}

fn record_with_attrs(attrs: Vec<AttributeEntry>) -> DailyRecord {
    DailyRecord {
        ata_smart_attributes: Some(AtaAttributeTable { table: attrs }),
        ..DailyRecord::default()
    }
}

#[test]
fn config_load_default() {
    let c = PipelineConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.evaluation.window_days, 6);
    assert_eq!(c.sampler.sample_count, 300);
    assert_eq!(c.risk.bad_max_days, 14);
    assert_eq!(c.risk.warning_max_days, 42);
    assert!(!c.evaluation.descending);
}

#[test]
fn tier_thresholds_inclusive_on_lower_tier() {
    let config = RiskConfig::default();
    assert_eq!(RiskTier::from_rul(0, &config), RiskTier::Bad);
    assert_eq!(RiskTier::from_rul(14, &config), RiskTier::Bad);
    assert_eq!(RiskTier::from_rul(15, &config), RiskTier::Warning);
    assert_eq!(RiskTier::from_rul(42, &config), RiskTier::Warning);
    assert_eq!(RiskTier::from_rul(43, &config), RiskTier::Good);
}

#[test]
fn label_parse_is_case_insensitive() {
    assert_eq!(RiskTier::parse("Good"), Some(RiskTier::Good));
    assert_eq!(RiskTier::parse("WARNING"), Some(RiskTier::Warning));
    assert_eq!(Prediction::from_label("bad"), Prediction::Tier(RiskTier::Bad));
    assert_eq!(Prediction::from_label("???"), Prediction::Unknown);
}

#[test]
fn flatten_parses_raw_string_with_trailing_text() {
    let record = record_with_attrs(vec![attr(5, Some("120 (0 0 0)"), Some(999), Some(100))]);
    let row = flatten_record(&record);
    assert_eq!(row.values.get("smart_5_raw"), Some(&120.0));
    assert_eq!(row.values.get("smart_5_normalized"), Some(&100.0));
}

#[test]
fn flatten_parses_all_digit_raw_string() {
    let record = record_with_attrs(vec![attr(187, Some("42"), None, None)]);
    let row = flatten_record(&record);
    assert_eq!(row.values.get("smart_187_raw"), Some(&42.0));
    assert!(!row.values.contains_key("smart_187_normalized"));
}

#[test]
fn flatten_falls_back_to_raw_numeric_value() {
    let record = record_with_attrs(vec![attr(194, Some("21 (Min/Max)"), Some(7), None)]);
    let row = flatten_record(&record);
    assert_eq!(row.values.get("smart_194_raw"), Some(&21.0));

    let record = record_with_attrs(vec![attr(194, Some("(Min/Max)"), Some(7), None)]);
    let row = flatten_record(&record);
    assert_eq!(row.values.get("smart_194_raw"), Some(&7.0));
}

#[test]
fn flatten_omits_unparseable_raw_without_numeric_value() {
    let record = record_with_attrs(vec![attr(194, Some("n/a"), None, Some(50))]);
    let row = flatten_record(&record);
    assert!(!row.values.contains_key("smart_194_raw"));
    assert_eq!(row.values.get("smart_194_normalized"), Some(&50.0));
}

#[test]
fn flatten_skips_raw_entry_without_string() {
    let record = record_with_attrs(vec![attr(5, None, Some(3), None)]);
    let row = flatten_record(&record);
    assert!(!row.values.contains_key("smart_5_raw"));
}

#[test]
fn power_on_hours_fills_only_when_absent() {
    let mut record = record_with_attrs(vec![attr(9, Some("100"), None, None)]);
    record.power_on_time = Some(PowerOnTime { hours: Some(200) });
    let row = flatten_record(&record);
    assert_eq!(row.values.get("smart_9_raw"), Some(&100.0));

    let record = DailyRecord {
        power_on_time: Some(PowerOnTime { hours: Some(200) }),
        ..DailyRecord::default()
    };
    let row = flatten_record(&record);
    assert_eq!(row.values.get("smart_9_raw"), Some(&200.0));
}

#[test]
fn capacity_without_bytes_is_skipped() {
    let mut record = DailyRecord {
        user_capacity: Some(UserCapacity { bytes: None }),
        ..DailyRecord::default()
    };
    let row = flatten_record(&record);
    assert!(!row.values.contains_key("user_capacity"));

    record.user_capacity = Some(UserCapacity { bytes: Some(4_000_000_000_000) });
    let row = flatten_record(&record);
    assert_eq!(row.values.get("user_capacity"), Some(&4_000_000_000_000.0));
}

#[test]
fn vendor_prefix_precedence() {
    assert_eq!(infer_vendor("WDC123"), "WDC");
    assert_eq!(infer_vendor("ST2000"), "Seagate");
    assert_eq!(infer_vendor("TOSHIBA1"), "Toshiba");
    assert_eq!(infer_vendor("Hitachi5"), "Hitachi");
    assert_eq!(infer_vendor("XYZ"), "HGST");
}

#[test]
fn empty_record_is_excluded_from_rows() {
    let mut drives = DriveSet::new();
    let mut history = DriveHistory::new();
    history.insert(date(1), record_with_attrs(vec![attr(5, Some("10"), None, None)]));
    history.insert(date(2), DailyRecord::default());
    drives.insert("Z000".to_string(), history);

    let rows = daily_rows(&drives, &HashSet::new());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, date(1));
}

#[test]
fn featurize_single_day_std_is_zero() {
    let mut drives = DriveSet::new();
    for serial in ["A1", "B2"] {
        let mut history = DriveHistory::new();
        history.insert(date(1), record_with_attrs(vec![attr(5, Some("10"), None, Some(98))]));
        drives.insert(serial.to_string(), history);
    }
    let rows = daily_rows(&drives, &HashSet::new());
    let features = Featurizer::new(FeaturizerConfig::default()).featurize(&rows);
    assert_eq!(features.len(), 2);
    for drive in &features {
        assert_eq!(drive.values.get("std_smart_5_raw"), Some(&0.0));
        assert_eq!(drive.values.get("std_smart_5_normalized"), Some(&0.0));
    }
}

#[test]
fn featurize_mean_and_population_std() {
    let mut drives = DriveSet::new();
    let mut history = DriveHistory::new();
    history.insert(date(1), record_with_attrs(vec![attr(5, Some("10"), None, None)]));
    history.insert(date(2), record_with_attrs(vec![attr(5, Some("20"), None, None)]));
    drives.insert("A1".to_string(), history);

    let config = FeaturizerConfig {
        include_num_days: true,
        ..FeaturizerConfig::default()
    };
    let features = Featurizer::new(config).featurize(&daily_rows(&drives, &HashSet::new()));
    let drive = &features[0];
    assert_eq!(drive.values.get("mean_smart_5_raw"), Some(&15.0));
    assert_eq!(drive.values.get("std_smart_5_raw"), Some(&5.0));
    assert_eq!(drive.values.get("num_days"), Some(&2.0));
}

#[test]
fn featurize_honors_drop_columns() {
    let mut drives = DriveSet::new();
    let mut history = DriveHistory::new();
    history.insert(
        date(1),
        record_with_attrs(vec![
            attr(5, Some("10"), None, None),
            attr(199, Some("1"), None, None),
        ]),
    );
    drives.insert("A1".to_string(), history);

    let config = FeaturizerConfig {
        drop_columns: vec!["smart_199_raw".to_string()],
        ..FeaturizerConfig::default()
    };
    let features = Featurizer::new(config).featurize(&daily_rows(&drives, &HashSet::new()));
    assert!(features[0].values.contains_key("mean_smart_5_raw"));
    assert!(!features[0].values.contains_key("mean_smart_199_raw"));
}

#[test]
fn missing_value_summary_counts_absent_cells() {
    let mut drives = DriveSet::new();
    for (serial, with_attr_7) in [("A1", true), ("B2", false), ("C3", true), ("D4", false)] {
        let mut history = DriveHistory::new();
        let mut attrs = vec![attr(5, Some("10"), None, None)];
        if with_attr_7 {
            attrs.push(attr(7, Some("3"), None, None));
        }
        history.insert(date(1), record_with_attrs(attrs));
        drives.insert(serial.to_string(), history);
    }
    let rows = daily_rows(&drives, &HashSet::new());
    let summary = missing_value_summary(&rows, None);
    let col = summary.iter().find(|c| c.column == "smart_7_raw").unwrap();
    assert_eq!(col.count, 2);
    assert!((col.percent - 0.5).abs() < 1e-12);
}

#[test]
fn rul_days_spans_history() {
    let mut history = DriveHistory::new();
    for day in 1..=5 {
        history.insert(date(day), DailyRecord::default());
    }
    let rul = rul_days(&history);
    assert_eq!(rul.get(&date(1)), Some(&4));
    assert_eq!(rul.get(&date(5)), Some(&0));
}

#[test]
fn robust_scaler_zeroes_constant_column() {
    let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
    let scaler = RobustScaler::fit(&rows);
    let scaled = scaler.transform(&rows);
    for row in &scaled {
        assert_eq!(row[0], 0.0);
    }
    // median-centered second column straddles zero
    assert!(scaled[0][1] < 0.0 && scaled[2][1] > 0.0);
}

#[test]
fn sampler_k_of_k_returns_every_serial() {
    let rows = vec![
        vec![0.0, 0.0],
        vec![10.0, 0.0],
        vec![0.0, 10.0],
        vec![10.0, 10.0],
    ];
    let matrix = FeatureMatrix {
        serials: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        columns: vec!["x".into(), "y".into()],
        rows,
    };
    let sampler = RepresentativeSampler::new(SamplerConfig {
        sample_count: 4,
        max_iterations: 100,
    });
    let selected = sampler.select(&matrix).unwrap();
    assert_eq!(selected.len(), 4);
    let unique: HashSet<_> = selected.iter().cloned().collect();
    assert_eq!(unique.len(), 4);
}

#[test]
fn sampler_rejects_oversized_request() {
    let matrix = FeatureMatrix {
        serials: vec!["A".into()],
        columns: vec!["x".into()],
        rows: vec![vec![1.0]],
    };
    let sampler = RepresentativeSampler::new(SamplerConfig {
        sample_count: 2,
        max_iterations: 100,
    });
    match sampler.select(&matrix) {
        Err(PipelineError::ClusteringPrecondition { requested, available }) => {
            assert_eq!(requested, 2);
            assert_eq!(available, 1);
        }
        other => panic!("expected clustering precondition error, got {other:?}"),
    }
}

#[test]
fn sampler_picks_cluster_cores() {
    // Two tight clusters plus an outlier per cluster; the representative
    // must be a core member, not the outlier.
    let rows = vec![
        vec![0.0, 0.0],
        vec![0.1, 0.0],
        vec![0.05, 0.0],
        vec![100.0, 0.0],
        vec![100.1, 0.0],
        vec![100.05, 0.0],
    ];
    let matrix = FeatureMatrix {
        serials: (0..6).map(|i| format!("S{i}")).collect(),
        columns: vec!["x".into(), "y".into()],
        rows,
    };
    let sampler = RepresentativeSampler::new(SamplerConfig {
        sample_count: 2,
        max_iterations: 100,
    });
    let selected = sampler.select(&matrix).unwrap();
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0], "S2");
    assert_eq!(selected[1], "S5");
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct StubModel {
    name: String,
    weights: Vec<f64>,
}

#[test]
fn model_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new(dir.path());
    let model = StubModel {
        name: "forest".to_string(),
        weights: vec![0.25, 0.5, 0.25],
    };
    let path = store.save(&model, "risk", Some("v1")).unwrap();
    assert_eq!(path.file_name().unwrap(), "risk_v1.bin");
    let loaded: StubModel = store.load(&path).unwrap();
    assert_eq!(loaded, model);
}

#[test]
fn model_store_default_suffix_is_timestamped() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new(dir.path());
    let path = store.save(&StubModel { name: "m".into(), weights: vec![] }, "risk", None).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("risk_"));
    assert!(name.ends_with(".bin"));
    assert!(name.len() > "risk_.bin".len());
}

#[test]
fn model_store_corrupt_payload_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken_v1.bin");
    std::fs::write(&path, b"not a model").unwrap();
    let store = ModelStore::new(dir.path());
    let result: drivesense::Result<StubModel> = store.load(&path);
    assert!(matches!(result, Err(PipelineError::Serialization(_))));
}
