// src/cli/handlers/root.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::PathBuf;

use crate::core::paths;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct RootArgs {
    /// Where to start searching. Defaults to the current directory.
    path: Option<PathBuf>,

    /// Fail instead of printing the fallback path when no `.achira` exists.
    #[arg(long)]
    require: bool,
}

/// The main handler for the `root` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let root_args = RootArgs::try_parse_from(&args)?;
    let start = root_args.path.unwrap_or_else(|| PathBuf::from("."));

    let achira_dir = paths::resolve_achira_dir(&start)?;
    if root_args.require && !achira_dir.is_dir() {
        return Err(anyhow!(
            "No .achira directory found at or above '{}'.",
            start.display()
        ));
    }

    println!("{}", achira_dir.display());
    Ok(())
}
