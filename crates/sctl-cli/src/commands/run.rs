//! `sctl run` - launch a command with secrets in its environment.

use clap::Args;
use sctl_secrets::{DecryptPolicy, GcpKms, SecretService};

/// Run command arguments.
#[derive(Args)]
pub struct RunArgs {
    /// KMS key reference, e.g. projects/P/locations/L/keyRings/R/cryptoKeys/K
    #[arg(long, env = "SCTL_KEY")]
    pub key: String,

    /// Launch even if some secrets cannot be decrypted (skipped with a warning)
    #[arg(long)]
    pub skip_failed: bool,

    /// Command and arguments to launch
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub command: Vec<String>,
}

/// Run the run command. Returns the child's exit code.
pub async fn run(service: &SecretService, args: RunArgs) -> anyhow::Result<i32> {
    let key_ref = super::parse_key_ref(&args.key)?;
    let policy = if args.skip_failed {
        DecryptPolicy::Skip
    } else {
        DecryptPolicy::Fail
    };

    let (command, command_args) = args
        .command
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("Command required. Usage: sctl run --key <KEY> <COMMAND> [ARGS...]"))?;

    let kms = GcpKms::from_env().await?;
    let code = service
        .run(&kms, &key_ref, policy, command, command_args)
        .await?;
    Ok(code)
}
