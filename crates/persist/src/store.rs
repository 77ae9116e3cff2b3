//! File-backed settings.
//!
//! A single JSON document:
//! ```text
//! { "schema_version": 1, "values": { "score": 42 } }
//! ```
//! The whole document is rewritten on every `set_int`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::settings::SettingsStore;

/// Current settings document version.
const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// Errors from settings persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsDocument {
    schema_version: u32,
    values: BTreeMap<String, i64>,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            values: BTreeMap::new(),
        }
    }
}

/// Settings persisted to a JSON file so they survive restarts.
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    doc: SettingsDocument,
}

impl FileSettings {
    /// Open the settings file, creating it (and its parent directory) if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let doc = if path.exists() {
            let doc: SettingsDocument = serde_json::from_reader(std::fs::File::open(&path)?)?;
            if doc.schema_version != SETTINGS_SCHEMA_VERSION {
                return Err(StoreError::SchemaMismatch {
                    file_version: doc.schema_version,
                    expected_version: SETTINGS_SCHEMA_VERSION,
                });
            }
            doc
        } else {
            let doc = SettingsDocument::default();
            write_document(&path, &doc)?;
            doc
        };
        tracing::debug!(path = %path.display(), keys = doc.values.len(), "opened settings");

        Ok(Self { path, doc })
    }

    /// Open `settings.json` inside a data directory.
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(dir.as_ref().join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.doc.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let previous = self.doc.values.insert(key.to_string(), value);
        if let Err(e) = write_document(&self.path, &self.doc) {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.doc.values.insert(key.to_string(), old),
                None => self.doc.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_document(path: &Path, doc: &SettingsDocument) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    serde_json::to_writer_pretty(std::fs::File::create(&tmp)?, doc)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
