// src/cli/handlers/commons.rs

// Shared helpers for the handlers that launch child processes.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::{
    config::{self, HelperConfig},
    core::paths,
    models::CommandOutput,
};

/// Signals that a relayed child process failed, carrying the code to exit with.
/// The child's own stderr has already been shown, so nothing else is printed.
#[derive(Error, Debug)]
#[error("Child process exited with code {code}.")]
pub struct ChildExit {
    pub code: i32,
}

/// Resolves the `.achira` directory for `start` and loads its settings.
pub fn load_config_for(start: &Path) -> Result<(PathBuf, HelperConfig)> {
    let achira_dir = paths::resolve_achira_dir(start)?;
    let config = config::load_helper_config(&achira_dir)
        .with_context(|| format!("Invalid settings in {}", achira_dir.display()))?;
    Ok((achira_dir, config))
}

/// The timeout to use: the command-line value if given, else the configured one.
pub fn effective_timeout(cli_secs: Option<u64>, config: &HelperConfig) -> Duration {
    cli_secs.map(Duration::from_secs).unwrap_or_else(|| config.timeout())
}

/// Writes the captured output of a child to our own stdout/stderr and turns a
/// failing exit status into a `ChildExit` error.
pub fn relay_output(output: &CommandOutput) -> Result<()> {
    io::stdout().write_all(output.stdout.as_bytes())?;
    io::stdout().flush()?;
    io::stderr().write_all(output.stderr.as_bytes())?;

    if output.success() {
        return Ok(());
    }
    // A child killed by a signal has no code; report a generic failure.
    let code = output.code().unwrap_or(1);
    Err(ChildExit { code }.into())
}
