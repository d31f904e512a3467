//! The crypto gateway: a narrow capability interface to an external KMS.
//!
//! sctl performs no cryptography of its own and stores no key material.
//! Every encrypt and decrypt is one call against a symmetric key that lives
//! inside the KMS, identified by an opaque [`KeyRef`].

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use sctl_core::{KeyRef, SecretString};

use crate::error::{Result, SecretError};

/// Capability interface to the external KMS.
///
/// Implementations must not retain plaintext beyond the call and must map
/// reachability failures to [`SecretError::CryptoUnavailable`] and
/// key/authorization failures to [`SecretError::CryptoRejected`].
#[async_trait]
pub trait KmsClient: Send + Sync {
    /// Encrypt `plaintext` with the symmetric key named by `key_ref`.
    async fn encrypt_symmetric(&self, key_ref: &KeyRef, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` with the symmetric key named by `key_ref`.
    async fn decrypt_symmetric(&self, key_ref: &KeyRef, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

const DEFAULT_API_BASE: &str = "https://cloudkms.googleapis.com/v1";

/// Google Cloud KMS binding over its REST surface.
///
/// The key reference is the fully qualified resource name
/// (`projects/P/locations/L/keyRings/R/cryptoKeys/K`), passed through
/// verbatim as the request path.
pub struct GcpKms {
    client: reqwest::Client,
    api_base: String,
    token: SecretString,
}

impl GcpKms {
    /// Create a binding using the given OAuth bearer token.
    pub fn new(token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            token,
        }
    }

    /// Create a binding with credentials discovered from the environment:
    /// `GOOGLE_OAUTH_ACCESS_TOKEN` if set, otherwise
    /// `gcloud auth print-access-token`.
    pub async fn from_env() -> Result<Self> {
        Ok(Self::new(resolve_access_token().await?))
    }

    /// Override the API base URL. Intended for tests against a local stub.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn post(&self, key_ref: &KeyRef, action: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}/{}:{}", self.api_base, key_ref.as_str(), action);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| SecretError::unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SecretError::rejected(format!(
                "{} for key '{}': {}",
                status,
                key_ref,
                detail.trim()
            )));
        }
        if !status.is_success() {
            return Err(SecretError::unavailable(format!(
                "KMS returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SecretError::unavailable(format!("malformed KMS response: {e}")))
    }
}

#[async_trait]
impl KmsClient for GcpKms {
    async fn encrypt_symmetric(&self, key_ref: &KeyRef, plaintext: &[u8]) -> Result<Vec<u8>> {
        #[derive(Deserialize)]
        struct EncryptResponse {
            ciphertext: String,
        }

        let body = json!({ "plaintext": BASE64.encode(plaintext) });
        let value = self.post(key_ref, "encrypt", body).await?;
        let parsed: EncryptResponse = serde_json::from_value(value)
            .map_err(|e| SecretError::unavailable(format!("malformed KMS response: {e}")))?;

        BASE64
            .decode(parsed.ciphertext)
            .map_err(|e| SecretError::unavailable(format!("undecodable KMS ciphertext: {e}")))
    }

    async fn decrypt_symmetric(&self, key_ref: &KeyRef, ciphertext: &[u8]) -> Result<Vec<u8>> {
        #[derive(Deserialize)]
        struct DecryptResponse {
            plaintext: String,
        }

        let body = json!({ "ciphertext": BASE64.encode(ciphertext) });
        let value = self.post(key_ref, "decrypt", body).await?;
        let parsed: DecryptResponse = serde_json::from_value(value)
            .map_err(|e| SecretError::unavailable(format!("malformed KMS response: {e}")))?;

        BASE64
            .decode(parsed.plaintext)
            .map_err(|e| SecretError::unavailable(format!("undecodable KMS plaintext: {e}")))
    }
}

/// Resolve an OAuth access token for Cloud KMS.
///
/// Checks `GOOGLE_OAUTH_ACCESS_TOKEN` first so CI and containers can inject
/// a token directly, then falls back to the local gcloud installation.
async fn resolve_access_token() -> Result<SecretString> {
    if let Ok(token) = std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN") {
        if !token.trim().is_empty() {
            return Ok(SecretString::new(token.trim().to_string()));
        }
    }

    let output = tokio::process::Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .await
        .map_err(|e| {
            SecretError::unavailable(format!(
                "no GOOGLE_OAUTH_ACCESS_TOKEN and gcloud could not run: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(SecretError::unavailable(format!(
            "gcloud auth print-access-token failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(SecretError::unavailable(
            "gcloud produced an empty access token",
        ));
    }
    Ok(SecretString::new(token))
}

/// In-memory KMS double for tests.
///
/// Applies a reversible keystream derived from the configured key reference,
/// so `decrypt(encrypt(x)) == x` holds for the known key and any other key
/// reference is rejected, mirroring the real gateway's failure contract.
pub struct FakeKms {
    key_ref: String,
}

impl FakeKms {
    /// A fake KMS that only accepts the given key reference.
    pub fn new(key_ref: &KeyRef) -> Self {
        Self {
            key_ref: key_ref.as_str().to_string(),
        }
    }

    fn check_key(&self, key_ref: &KeyRef) -> Result<()> {
        if key_ref.as_str() != self.key_ref {
            return Err(SecretError::rejected(format!(
                "unknown key reference '{key_ref}'"
            )));
        }
        Ok(())
    }

    fn keystream_apply(&self, data: &[u8]) -> Vec<u8> {
        // XOR with the cycled key bytes; applying twice is the identity.
        data.iter()
            .zip(self.key_ref.as_bytes().iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }
}

#[async_trait]
impl KmsClient for FakeKms {
    async fn encrypt_symmetric(&self, key_ref: &KeyRef, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.check_key(key_ref)?;
        Ok(self.keystream_apply(plaintext))
    }

    async fn decrypt_symmetric(&self, key_ref: &KeyRef, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.check_key(key_ref)?;
        Ok(self.keystream_apply(ciphertext))
    }
}
