//! Store document path resolution.

use std::path::PathBuf;

/// File name of the store document, kept from the original tool for
/// on-disk compatibility.
pub const STORE_FILE_NAME: &str = ".scuttle.json";

/// Default store document location: `.scuttle.json` in the current
/// working directory. The store is per-project, not per-user, so it lives
/// next to the code that consumes the secrets.
pub fn default_store_file() -> PathBuf {
    PathBuf::from(STORE_FILE_NAME)
}
