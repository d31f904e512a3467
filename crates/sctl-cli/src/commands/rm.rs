//! `sctl rm` - remove a secret.

use clap::Args;
use sctl_secrets::SecretService;

/// Rm command arguments.
#[derive(Args)]
pub struct RmArgs {
    /// Secret name (case-insensitive)
    pub name: String,
}

/// Run the rm command. Removing an absent name succeeds silently.
pub async fn run(service: &SecretService, args: RmArgs) -> anyhow::Result<()> {
    service.remove(&args.name).await?;
    Ok(())
}
