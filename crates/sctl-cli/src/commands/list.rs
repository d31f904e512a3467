//! `sctl list` - print known secret names.

use sctl_secrets::SecretService;

/// Run the list command: one name per line, sorted. Requires no KMS access
/// and decrypts nothing.
pub async fn run(service: &SecretService) -> anyhow::Result<()> {
    for name in service.list().await? {
        println!("{name}");
    }
    Ok(())
}
