// src/cli/handlers/script.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::commons;
use crate::{
    core::console,
    system::{
        executor,
        interpreter::{self, SystemProbe},
    },
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct ScriptArgs {
    /// Working directory for the script.
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Time limit in seconds. Defaults to the configured value (600).
    #[arg(long)]
    timeout: Option<u64>,

    /// The script to run.
    script: PathBuf,

    /// Arguments passed to the script.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// The main handler for the `script` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let script_args = ScriptArgs::try_parse_from(&args)?;

    let start = script_args.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    let (_, config) = commons::load_config_for(&start)?;
    let timeout = commons::effective_timeout(script_args.timeout, &config);

    let launcher = interpreter::select_interpreter(&SystemProbe, &config);
    let invocation =
        interpreter::script_invocation(launcher, &script_args.script, script_args.args);

    console::print_step(&format!("Running {}", invocation));
    let output = executor::run_command(&invocation, script_args.cwd.as_deref(), timeout)?;

    let relayed = commons::relay_output(&output);
    match &relayed {
        Ok(()) => console::print_success(&format!("{} finished", script_args.script.display())),
        Err(_) => console::print_error(&format!(
            "{} failed ({})",
            script_args.script.display(),
            output.status
        )),
    }
    relayed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_arguments_may_look_like_flags() {
        let args = ScriptArgs::try_parse_from(["--timeout", "9", "setup.py", "all", "--force", "-v"])
            .unwrap();
        assert_eq!(args.timeout, Some(9));
        assert_eq!(args.script, PathBuf::from("setup.py"));
        assert_eq!(args.args, ["all", "--force", "-v"]);
    }
}
