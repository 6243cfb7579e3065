use crate::record::{MetricsSnapshot, RunCategory, RunRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read result file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("result file {path} is neither a record array nor a bare snapshot")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// File name for a run-group, `<category>-<timestamp>.json` with `:` and `.`
/// replaced so the name is safe on every filesystem.
pub fn results_file_name(category: RunCategory, at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}-{}.json", category.as_str(), stamp)
}

/// Write the full record sequence for a run-group.
///
/// The orchestrator calls this after every recorded cell with the whole
/// accumulated sequence, so the file is always a valid JSON array even if the
/// suite is interrupted before the matrix completes.
pub fn write_run_records(path: &Path, records: &[RunRecord]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

/// Load one result file as an ordered record sequence.
///
/// Accepts both persisted shapes: an array of run records, or the legacy
/// baseline form of a single bare snapshot, which is wrapped in a synthetic
/// record named after the file stem.
pub fn load_document(path: &Path, category: RunCategory) -> Result<Vec<RunRecord>, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match serde_json::from_str::<Vec<RunRecord>>(&raw) {
        Ok(records) => Ok(records),
        Err(array_err) => match serde_json::from_str::<MetricsSnapshot>(&raw) {
            Ok(snapshot) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Ok(vec![RunRecord {
                    scenario: stem.clone(),
                    endpoint: stem,
                    connections: 0,
                    duration_s: 0,
                    category,
                    requires_auth: false,
                    metrics: snapshot,
                }])
            }
            Err(_) => Err(StoreError::Malformed {
                path: path.display().to_string(),
                source: array_err,
            }),
        },
    }
}
