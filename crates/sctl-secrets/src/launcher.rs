//! Child process launch with secrets in the environment.

use std::process::Stdio;

use tracing::debug;

use sctl_core::SecretString;

use crate::error::{Result, SecretError};

/// Launch `command` with `args`, blocking until it exits.
///
/// The child inherits this process's environment and stdio streams; the
/// decrypted `secret_env` entries are applied on top, so a secret wins when
/// it collides with an inherited variable of the same name. Returns the
/// child's exit code, or -1 if it was terminated by a signal.
pub async fn launch(
    command: &str,
    args: &[String],
    secret_env: &[(String, SecretString)],
) -> Result<i32> {
    let mut cmd = tokio::process::Command::new(command);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    for (name, value) in secret_env {
        cmd.env(name, value.expose_secret());
    }

    debug!(command, secrets = secret_env.len(), "launching child process");

    let mut child = cmd.spawn().map_err(|source| SecretError::Launch {
        command: command.to_string(),
        source,
    })?;

    let status = child.wait().await?;

    let code = match status.code() {
        Some(code) => code,
        None => {
            #[cfg(unix)]
            {
                use std::os::unix::process::ExitStatusExt;
                debug!(signal = ?status.signal(), "child terminated by signal");
            }
            -1
        }
    };
    Ok(code)
}
