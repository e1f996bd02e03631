// src/cli/handlers/exec.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::commons;
use crate::{models::CommandInvocation, system::executor};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct ExecArgs {
    /// Working directory for the command.
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Time limit in seconds. Defaults to the configured value (600).
    #[arg(long)]
    timeout: Option<u64>,

    /// The command to run. A single argument is split like a shell command line.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn build_invocation(command: Vec<String>) -> Result<CommandInvocation> {
    if let [line] = command.as_slice() {
        return Ok(CommandInvocation::parse(line)?);
    }
    Ok(CommandInvocation::from_parts(command)?)
}

/// The main handler for the `exec` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let exec_args = ExecArgs::try_parse_from(&args)?;

    let start = exec_args.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    let (_, config) = commons::load_config_for(&start)?;
    let timeout = commons::effective_timeout(exec_args.timeout, &config);

    let invocation = build_invocation(exec_args.command)?;
    let output = executor::run_command(&invocation, exec_args.cwd.as_deref(), timeout)?;

    commons::relay_output(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_argument_is_split_like_a_shell_line() {
        let invocation = build_invocation(vec!["git status --short".to_string()]).unwrap();
        assert_eq!(invocation.parts(), ["git", "status", "--short"]);
    }

    #[test]
    fn test_multiple_arguments_are_kept_verbatim() {
        let invocation =
            build_invocation(vec!["echo".to_string(), "two words".to_string()]).unwrap();
        assert_eq!(invocation.parts(), ["echo", "two words"]);
    }

    #[test]
    fn test_options_precede_the_command() {
        let args = ExecArgs::try_parse_from(["--timeout", "5", "--", "ls", "-la"]).unwrap();
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.command, ["ls", "-la"]);
    }
}
