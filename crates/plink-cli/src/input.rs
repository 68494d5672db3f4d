//! Loading records, candidate lists, grants and scoring config from disk.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use plink_access::PermissionGrant;
use plink_match::ScoringConfig;
use plink_model::IdentityRecord;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Read one identity record from a JSON object.
pub fn load_record(path: &Path) -> Result<IdentityRecord> {
    read_json(path).with_context(|| format!("load identity record {}", path.display()))
}

/// Read candidate records from a JSON array or a CSV file.
///
/// CSV files need a header row naming the record fields
/// (`first_name,middle_name,last_name,sex,birth_date`); missing columns
/// default to empty.
pub fn load_candidates(path: &Path) -> Result<Vec<IdentityRecord>> {
    let candidates = if has_extension(path, "csv") {
        read_csv(path)
    } else {
        read_json(path)
    }
    .with_context(|| format!("load candidates {}", path.display()))?;
    info!(count = candidates.len(), "loaded candidate records");
    Ok(candidates)
}

/// Load and validate the scoring config, falling back to defaults.
///
/// Fields missing from the file keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    let config = match path {
        Some(path) => {
            let config: ScoringConfig = read_json(path)
                .with_context(|| format!("load scoring config {}", path.display()))?;
            debug!(path = %path.display(), "loaded scoring config");
            config
        }
        None => ScoringConfig::default(),
    };
    config.validate().context("invalid scoring config")?;
    Ok(config)
}

pub fn load_grants(path: &Path) -> Result<Vec<PermissionGrant>> {
    read_json(path).with_context(|| format!("load permission grants {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

fn read_csv(path: &Path) -> Result<Vec<IdentityRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)?;
    let mut records = Vec::new();
    for (line, row) in reader.deserialize::<IdentityRecord>().enumerate() {
        // Line numbers are 1-based and skip the header.
        let record = row.with_context(|| format!("parse row {}", line + 2))?;
        records.push(record);
    }
    if records.is_empty() && reader.headers()?.is_empty() {
        bail!("missing CSV header row");
    }
    Ok(records)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
