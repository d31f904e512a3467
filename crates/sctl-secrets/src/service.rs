//! The secret service: add / remove / list / run over store + KMS.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use tracing::{debug, warn};

use sctl_core::{KeyRef, SecretString};

use crate::error::{Result, SecretError};
use crate::kms::KmsClient;
use crate::launcher;
use crate::store::{self, RecordStore};
use crate::types::{normalize_name, SecretRecord};

/// What to do when a stored secret cannot be decrypted during `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecryptPolicy {
    /// Abort before launching anything. The default: a command run with a
    /// silently missing variable is worse than no command at all.
    #[default]
    Fail,

    /// Log a warning naming the secret and launch without it.
    Skip,
}

/// Composes the record store and the crypto gateway into the user-facing
/// operations.
///
/// The gateway is injected per operation rather than held by the service:
/// `list` and `remove` never touch the KMS, and must keep working with no
/// KMS binding constructed at all. Each operation is one load, zero or more
/// sequential KMS calls, and at most one save; there is no session state
/// between calls.
pub struct SecretService {
    store: RecordStore,
}

impl SecretService {
    /// Create a service over the given record store.
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Encrypt `value` and persist it under the normalized `name`,
    /// replacing any existing record of that name.
    ///
    /// Nothing is persisted when encryption fails; there is no plaintext
    /// fallback.
    pub async fn add(
        &self,
        kms: &dyn KmsClient,
        key_ref: &KeyRef,
        name: &str,
        value: &str,
    ) -> Result<()> {
        let name = normalize_name(name)?;

        let cipher = kms.encrypt_symmetric(key_ref, value.as_bytes()).await?;

        let record = SecretRecord {
            name: name.clone(),
            cyphertext: BASE64.encode(cipher),
            created: Utc::now(),
        };

        let mut records = self.store.load().await?;
        store::upsert(&mut records, record);
        self.store.save(&records).await?;

        debug!(name, "stored secret");
        Ok(())
    }

    /// Remove the record for `name` (case-insensitive). Removing an absent
    /// name succeeds silently.
    pub async fn remove(&self, name: &str) -> Result<()> {
        let name = normalize_name(name)?;

        let mut records = self.store.load().await?;
        store::remove(&mut records, &name);
        self.store.save(&records).await?;
        Ok(())
    }

    /// Known secret names, sorted. Touches neither the KMS nor any
    /// ciphertext.
    pub async fn list(&self) -> Result<Vec<String>> {
        let records = self.store.load().await?;
        Ok(store::sorted_names(&records))
    }

    /// Decrypt every stored secret into `(NAME, plaintext)` pairs.
    ///
    /// Per-secret failures (damaged base64, KMS refusal, non-UTF-8
    /// plaintext) are governed by `policy`.
    pub async fn decrypt_all(
        &self,
        kms: &dyn KmsClient,
        key_ref: &KeyRef,
        policy: DecryptPolicy,
    ) -> Result<Vec<(String, SecretString)>> {
        let records = self.store.load().await?;
        let mut env = Vec::with_capacity(records.len());

        for record in &records {
            match decrypt_record(kms, key_ref, record).await {
                Ok(value) => env.push((record.name.clone(), value)),
                Err(e) => match policy {
                    DecryptPolicy::Fail => return Err(e),
                    DecryptPolicy::Skip => {
                        warn!(name = %record.name, error = %e, "skipping undecryptable secret");
                    }
                },
            }
        }

        Ok(env)
    }

    /// Decrypt all secrets and launch `command` with them exported in its
    /// environment. Returns the child's exit code.
    pub async fn run(
        &self,
        kms: &dyn KmsClient,
        key_ref: &KeyRef,
        policy: DecryptPolicy,
        command: &str,
        args: &[String],
    ) -> Result<i32> {
        let env = self.decrypt_all(kms, key_ref, policy).await?;
        launcher::launch(command, args, &env).await
    }
}

async fn decrypt_record(
    kms: &dyn KmsClient,
    key_ref: &KeyRef,
    record: &SecretRecord,
) -> Result<SecretString> {
    let cipher = BASE64
        .decode(&record.cyphertext)
        .map_err(|e| SecretError::decrypt(&record.name, format!("damaged base64: {e}")))?;

    let plain = kms.decrypt_symmetric(key_ref, &cipher).await?;

    String::from_utf8(plain)
        .map(SecretString::new)
        .map_err(|e| SecretError::decrypt(&record.name, format!("plaintext is not UTF-8: {e}")))
}
