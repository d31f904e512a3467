//! Key reference configuration.
//!
//! The key reference names a symmetric key inside the external KMS. It is
//! resolved once at the CLI boundary (flag, or the `SCTL_KEY` environment
//! variable via clap) and passed explicitly into every operation that needs
//! it. Library code never reads the ambient environment.

use std::fmt;

/// Opaque reference to a symmetric key held by the external KMS.
///
/// Example: `projects/my-proj/locations/global/keyRings/ring/cryptoKeys/key`.
/// sctl never inspects the structure beyond passing it through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRef(String);

impl KeyRef {
    /// Wrap a key reference string. Blank references are rejected.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw reference string, as handed to the KMS.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
