//! Command handlers.
//!
//! Each submodule owns one subcommand: its clap argument struct and a `run`
//! function taking the secret service plus parsed arguments. Commands that
//! talk to the KMS (`add`, `run`) construct the binding here, at the edge;
//! `rm` and `list` never build one.

pub mod add;
pub mod list;
pub mod rm;
pub mod run;

use anyhow::Context;
use sctl_core::KeyRef;

/// Validate a key reference supplied via `--key` / `SCTL_KEY`.
pub(crate) fn parse_key_ref(raw: &str) -> anyhow::Result<KeyRef> {
    KeyRef::new(raw).context("key reference must not be blank (set --key or SCTL_KEY)")
}
