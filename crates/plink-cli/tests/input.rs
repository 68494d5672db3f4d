use std::fs;
use std::path::{Path, PathBuf};

use plink_cli::input::{load_candidates, load_config, load_grants, load_record};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_partial_record_json() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "source.json",
        r#"{"first_name": "Juan", "last_name": "Dela Cruz", "birth_date": "1990-01-01"}"#,
    );

    let record = load_record(&path).unwrap();
    assert_eq!(record.first_name, "Juan");
    assert_eq!(record.sex, "");
    assert_eq!(record.middle_name, None);
}

#[test]
fn loads_candidates_from_csv() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "candidates.CSV",
        "first_name,middle_name,last_name,sex,birth_date\n\
         Juan,Santos,Dela Cruz,M,1990-01-01\n\
         Maria,,Reyes,F,1985-07-12\n",
    );

    let candidates = load_candidates(&path).unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].middle_name.as_deref(), Some("Santos"));
    assert_eq!(candidates[1].middle_name, None);
    assert_eq!(candidates[1].birth_date, "1985-07-12");
}

#[test]
fn csv_columns_may_be_missing() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "candidates.csv",
        "last_name,first_name\nGarcia,Pedro\n",
    );

    let candidates = load_candidates(&path).unwrap();
    assert_eq!(candidates[0].first_name, "Pedro");
    assert_eq!(candidates[0].sex, "");
}

#[test]
fn loads_candidates_from_json_array() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "candidates.json",
        r#"[{"first_name": "Juan"}, {"last_name": "Reyes"}]"#,
    );

    assert_eq!(load_candidates(&path).unwrap().len(), 2);
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let error = load_record(&dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{error:#}").contains("nope.json"));
}

#[test]
fn config_defaults_when_absent() {
    let config = load_config(None).unwrap();
    assert_eq!(config.weights.last_name, 30);
    assert_eq!(config.thresholds.high, 85);
}

#[test]
fn partial_config_overrides_named_fields() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "config.json",
        r#"{"thresholds": {"high": 90}, "name_match_threshold": 0.8}"#,
    );

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.thresholds.high, 90);
    assert_eq!(config.thresholds.medium, 60);
    assert_eq!(config.weights.birth_date, 20);
    assert_eq!(config.name_match_threshold, 0.8);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "config.json", r#"{"weights": {"sex": 50}}"#);

    let error = load_config(Some(&path)).unwrap_err();
    assert!(format!("{error:#}").contains("must sum to 100"));
}

#[test]
fn loads_grant_rows() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "grants.json",
        r#"[{"role_id": "admin", "module_id": "roles", "can_read": true, "can_delete": true}]"#,
    );

    let grants = load_grants(&path).unwrap();
    assert_eq!(grants.len(), 1);
    assert!(grants[0].flags.delete);
    assert!(!grants[0].flags.create);
}
