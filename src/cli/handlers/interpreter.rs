// src/cli/handlers/interpreter.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::commons;
use crate::system::interpreter::{self, SystemProbe};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct InterpreterArgs {
    /// Directory whose `.achira/helpers.toml` supplies the settings.
    #[arg(long)]
    from: Option<PathBuf>,
}

/// The main handler for the `interpreter` command.
/// Prints the selected invocation as a single shell-quoted line.
pub fn handle(args: Vec<String>) -> Result<()> {
    let interpreter_args = InterpreterArgs::try_parse_from(&args)?;
    let start = interpreter_args.from.unwrap_or_else(|| PathBuf::from("."));

    let (_, config) = commons::load_config_for(&start)?;
    let invocation = interpreter::select_interpreter(&SystemProbe, &config);

    println!("{}", invocation);
    Ok(())
}
