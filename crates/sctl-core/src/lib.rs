//! # sctl-core
//!
//! Shared primitives for sctl:
//!
//! - **Plaintext handling**: [`SecretString`], a zeroed-on-drop wrapper that
//!   refuses to print its contents
//! - **Key references**: [`KeyRef`], the opaque identifier for a key held by
//!   the external KMS
//! - **Paths**: resolution of the store document location

pub mod config;
pub mod paths;
pub mod secret;

pub use config::KeyRef;
pub use secret::SecretString;
