use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::ErrorLog;
use crate::error::{AppError, AppResult};

/// A file holding a single JSON array of records.
///
/// Reads and writes never fail from the caller's point of view: problems are
/// recorded in the [`ErrorLog`] and the caller gets an empty list (on read) or
/// keeps its in-memory state (on write).
#[derive(Debug, Clone)]
pub struct JsonListFile {
    path: PathBuf,
    error_log: ErrorLog,
}

impl JsonListFile {
    pub fn new(path: impl Into<PathBuf>, error_log: ErrorLog) -> Self {
        Self {
            path: path.into(),
            error_log,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw array. `Ok(None)` means the file does not exist.
    pub fn try_load_values(&self) -> AppResult<Option<Vec<Value>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&contents)? {
            Value::Array(values) => Ok(Some(values)),
            _ => Err(AppError::InvalidInput("expected a JSON array".to_string())),
        }
    }

    /// Loads the raw records. A missing or malformed file yields an empty list.
    pub fn load_values(&self) -> Vec<Value> {
        match self.try_load_values() {
            Ok(Some(values)) => values,
            Ok(None) => {
                self.error_log.record(&format!(
                    "Error loading JSON from {}: file not found",
                    self.path.display()
                ));
                Vec::new()
            }
            Err(e) => {
                self.error_log
                    .record(&format!("Error loading JSON from {}: {}", self.path.display(), e));
                Vec::new()
            }
        }
    }

    /// Decodes `values`, skipping (and logging) records that do not fit `T`
    pub fn decode_all<T: DeserializeOwned>(&self, values: &[Value]) -> Vec<T> {
        values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match T::deserialize(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    self.error_log.record(&format!(
                        "Skipping record {} in {}: {}",
                        index,
                        self.path.display(),
                        e
                    ));
                    None
                }
            })
            .collect()
    }

    /// Overwrites the file with `items`
    pub fn try_save<T: Serialize>(&self, items: &[T]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Overwrites the file with `items`, returning whether the write landed
    pub fn save<T: Serialize>(&self, items: &[T]) -> bool {
        match self.try_save(items) {
            Ok(()) => {
                tracing::debug!(
                    path = %self.path.display(),
                    records = items.len(),
                    "Saved JSON list"
                );
                true
            }
            Err(e) => {
                self.error_log
                    .record(&format!("Error writing to {}: {}", self.path.display(), e));
                false
            }
        }
    }

    /// Appends one record, creating the file if needed.
    ///
    /// Existing records are carried over verbatim. An unreadable file is
    /// logged and replaced by a list holding only the new record.
    pub fn append<T: Serialize>(&self, entry: &T) -> bool {
        let mut values = match self.try_load_values() {
            Ok(values) => values.unwrap_or_default(),
            Err(e) => {
                self.error_log
                    .record(&format!("Error loading JSON from {}: {}", self.path.display(), e));
                Vec::new()
            }
        };

        match serde_json::to_value(entry) {
            Ok(value) => values.push(value),
            Err(e) => {
                self.error_log
                    .record(&format!("Error encoding record for {}: {}", self.path.display(), e));
                return false;
            }
        }

        self.save(&values)
    }
}
