//! KMS-encrypted secret storage and subprocess injection.
//!
//! sctl keeps secrets in a single local JSON document, encrypted at rest by
//! an external Key Management Service. Plaintext only ever materializes in
//! the environment of a child process launched through [`launcher`].
//!
//! The crate is organized around four pieces:
//!
//! - [`store`]: the on-disk record collection (`.scuttle.json`)
//! - [`kms`]: the [`KmsClient`] capability trait and its Cloud KMS binding
//! - [`service`]: add / remove / list / run composed over store + KMS
//! - [`launcher`]: child process execution with secrets in the environment

pub mod error;
pub mod kms;
pub mod launcher;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Result, SecretError};
pub use kms::{GcpKms, KmsClient};
pub use service::{DecryptPolicy, SecretService};
pub use store::RecordStore;
pub use types::SecretRecord;

/// Test doubles for consumers that need a KMS without the network.
pub mod testing {
    pub use crate::kms::FakeKms;
}
