//! `sctl add` - encrypt and store a secret.

use clap::Args;
use sctl_secrets::{GcpKms, SecretService};

/// Add command arguments.
#[derive(Args)]
pub struct AddArgs {
    /// Secret name (stored upper-cased)
    pub name: String,

    /// Secret value (if omitted, prompts for hidden input)
    pub value: Option<String>,

    /// KMS key reference, e.g. projects/P/locations/L/keyRings/R/cryptoKeys/K
    #[arg(long, env = "SCTL_KEY")]
    pub key: String,
}

/// Run the add command.
pub async fn run(service: &SecretService, args: AddArgs) -> anyhow::Result<()> {
    let key_ref = super::parse_key_ref(&args.key)?;

    let value = match args.value {
        Some(v) => v,
        None => {
            let prompt = format!("Enter value for '{}': ", args.name);
            rpassword::prompt_password(prompt)
                .map_err(|e| anyhow::anyhow!("Failed to read secret value: {e}"))?
        }
    };
    if value.is_empty() {
        anyhow::bail!("Secret value must not be empty");
    }

    let kms = GcpKms::from_env().await?;
    service.add(&kms, &key_ref, &args.name, &value).await?;

    println!("Secret '{}' stored.", args.name.trim().to_uppercase());
    Ok(())
}
