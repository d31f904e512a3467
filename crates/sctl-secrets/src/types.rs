//! On-disk record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SecretError};

/// A single secret as stored in the document.
///
/// Field names are fixed by the wire format of the original tool:
/// the ciphertext is serialized under the key `cypher`.
///
/// ```json
/// { "name": "A_SECRET", "cypher": "b2s...=", "created": "2019-05-01T13:01:27Z" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Upper-cased secret name; unique within the store.
    pub name: String,

    /// KMS ciphertext, base64-encoded. Never inspected locally, only
    /// handed back to the KMS for decryption.
    #[serde(rename = "cypher")]
    pub cyphertext: String,

    /// Timestamp of the last write (create or update), stamped by the
    /// service, not the caller.
    pub created: DateTime<Utc>,
}

/// Normalize a secret name: trim surrounding whitespace and upper-case.
///
/// Names are case-insensitive on input but always stored and listed in
/// upper case, matching environment variable convention.
pub fn normalize_name(name: &str) -> Result<String> {
    let normalized = name.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(SecretError::InvalidName(
            "name must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}
