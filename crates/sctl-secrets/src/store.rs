//! The on-disk record store.
//!
//! All secrets live in one JSON document (by default `.scuttle.json` in the
//! working directory). The document is an array of [`SecretRecord`]s; a
//! missing document is an empty store, a malformed one is fatal.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SecretError};
use crate::types::SecretRecord;

/// File-backed store for the full record collection.
///
/// The store reads and writes the whole document on every operation; there
/// is no partial update. Saves go through a sibling temp file and a rename
/// so a failed write never leaves a structurally valid document with
/// records missing.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a store backed by the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store backed by the default document location.
    pub fn from_default_path() -> Self {
        Self::new(sctl_core::paths::default_store_file())
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full record collection.
    ///
    /// A missing document yields an empty collection. A document that
    /// exists but does not parse yields [`SecretError::CorruptStore`].
    pub async fn load(&self) -> Result<Vec<SecretRecord>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store document, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&data)
            .map_err(|e| SecretError::corrupt(self.path.display().to_string(), e.to_string()))
    }

    /// Overwrite the document with the given records.
    ///
    /// Writes to `<path>.tmp` first, restricts it to owner read/write on
    /// Unix, then renames over the document.
    pub async fn save(&self, records: &[SecretRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, json.as_bytes()).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp_path, perms).await?;
        }

        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!(path = %self.path.display(), count = records.len(), "saved store document");
        Ok(())
    }
}

/// Insert `record`, replacing any existing record with the same name.
///
/// Replacement relocates the last element into the vacated slot
/// (`swap_remove`); the new record is always appended. `record.name` must
/// already be normalized.
pub fn upsert(records: &mut Vec<SecretRecord>, record: SecretRecord) {
    remove(records, &record.name);
    records.push(record);
}

/// Remove every record whose name matches `name` (already normalized).
///
/// Absent names are a no-op, not an error.
pub fn remove(records: &mut Vec<SecretRecord>, name: &str) {
    let mut i = 0;
    while i < records.len() {
        if records[i].name == name {
            debug!(name, "removing entry");
            records.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

/// Record names in lexicographic order.
pub fn sorted_names(records: &[SecretRecord]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names
}
