pub mod json_file;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::StoreError;
use crate::types::{Insight, Record, StoredEntry};

/// Flat-file record store: one JSON array, append-only.
///
/// The server keeps the only instance behind a mutex, so every
/// read-modify-write cycle in `append` runs alone.
pub struct Store {
    pub path: PathBuf,
}

impl Store {
    pub fn init(path: &Path) -> Result<Self, StoreError> {
        json_file::ensure_array_file(path)?;
        tracing::info!(path = %path.display(), "record store ready");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Stamp, wrap and persist one record. Existing entries, whatever their
    /// shape, are written back untouched. `summary` is stored as given; the
    /// webhook passes the newline-flattened summary without the dashboard
    /// link, so stored text differs from what the caller was sent.
    pub fn append(&mut self, insight: Insight, summary: String) -> Result<Record, StoreError> {
        let record = Record {
            structured_data: insight,
            human_summary: Some(summary),
            timestamp: now_timestamp(),
        };

        let mut items = json_file::read_array(&self.path)?;
        items.push(serde_json::to_value(&record).map_err(StoreError::Encode)?);
        json_file::write_array(&self.path, &items)?;

        tracing::debug!(count = items.len(), timestamp = %record.timestamp, "record appended");
        Ok(record)
    }

    /// All entries, newest first by timestamp string. Ties keep file order and
    /// entries without a timestamp come last.
    pub fn load_all(&self) -> Result<Vec<StoredEntry>, StoreError> {
        let items = json_file::read_array(&self.path)?;
        let mut entries: Vec<StoredEntry> = items
            .into_iter()
            .map(|v| {
                serde_json::from_value(v).map_err(|source| StoreError::Corrupted {
                    path: self.path.clone(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;

        entries.sort_by(|a, b| b.timestamp().cmp(a.timestamp()));
        Ok(entries)
    }
}

/// Local wall-clock time, ISO-8601 with microseconds and no offset.
fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
