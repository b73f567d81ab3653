//! Shell command execution

use std::process::Command;

use crate::error::{Result, RuntimeError};

/// Run a compound shell command through bash, capturing combined output.
/// A non-zero exit becomes a CommandFailed error carrying the output.
pub fn run_shell(command: &str) -> Result<String> {
    tracing::debug!("running: {}", command);
    let output = Command::new("bash").arg("-c").arg(command).output()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(RuntimeError::CommandFailed {
            command: command.to_string(),
            code: output.status.code(),
            output: combined,
        });
    }
    Ok(combined)
}

/// Ensure a binary is on the path before composing commands around it.
pub fn require_binary(name: &str) -> Result<()> {
    which::which(name)
        .map(|_| ())
        .map_err(|_| RuntimeError::MissingBinary(name.to_string()))
}
