// src/cli/mod.rs

use clap::Parser;

pub mod handlers;

/// achira-kit: console, path and process helpers for Achira setup scripts.
///
/// Usage:
///    `achira-kit <action> [args...]`
///
/// Actions:
/// - `say <kind> <text>`           print a decorated status message
/// - `root [path]`                 print the `.achira` directory for a path
/// - `interpreter`                 print how sub-scripts are launched
/// - `exec [opts] -- <cmd>...`     run a command and relay its output
/// - `script [opts] <file> [args]` run a sub-script through the interpreter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The helper to run. If omitted, the list of actions is shown.
    pub action: Option<String>,

    /// All remaining arguments, passed untouched to the action's own parser.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
