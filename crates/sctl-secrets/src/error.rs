//! Error types for secret operations.

use thiserror::Error;

/// Errors that can occur during secret operations.
///
/// There is no recoverable layer: every variant is terminal for the
/// invocation that hit it. The only softening is [`DecryptPolicy::Skip`],
/// which downgrades per-secret decrypt failures during `run` to warnings.
///
/// [`DecryptPolicy::Skip`]: crate::service::DecryptPolicy::Skip
#[derive(Debug, Error)]
pub enum SecretError {
    /// Secret name is empty or otherwise unusable.
    #[error("Invalid secret name: {0}")]
    InvalidName(String),

    /// The store document exists but cannot be parsed. Partial trust in
    /// secret integrity is unacceptable, so there is no recovery path.
    #[error("Corrupt store document {path}: {reason}")]
    CorruptStore { path: String, reason: String },

    /// The KMS could not be reached.
    #[error("KMS unavailable: {0}")]
    CryptoUnavailable(String),

    /// The KMS refused the request (bad key reference, unauthorized).
    #[error("KMS rejected the request: {0}")]
    CryptoRejected(String),

    /// A stored ciphertext could not be turned back into plaintext
    /// (damaged base64, non-UTF-8 plaintext).
    #[error("Could not decrypt secret '{name}': {reason}")]
    Decrypt { name: String, reason: String },

    /// The child process could not be started.
    #[error("Failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SecretError {
    /// Create a corrupt-store error.
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptStore {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a KMS-unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::CryptoUnavailable(message.into())
    }

    /// Create a KMS-rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::CryptoRejected(message.into())
    }

    /// Create a per-secret decrypt error.
    pub fn decrypt(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decrypt {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience result alias for secret operations.
pub type Result<T> = std::result::Result<T, SecretError>;
