// src/bin/achira-kit.rs

use achira_kit::{
    cli::{
        Cli,
        handlers::{self, commons::ChildExit},
    },
    constants::TIMEOUT_EXIT_CODE,
    core::console,
    system::executor::ExecutionError,
};
use anyhow::Result;
use clap::Parser;
use colored::*;

// --- Command Definition and Registry ---

/// Defines a helper command, its aliases, and its handler function.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    summary: &'static str,
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all helper commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "exec",
        aliases: &["x"],
        summary: "run a command and relay its captured output",
        handler: handlers::exec::handle,
    },
    CommandDefinition {
        name: "interpreter",
        aliases: &["python"],
        summary: "print how sub-scripts are launched",
        handler: handlers::interpreter::handle,
    },
    CommandDefinition {
        name: "root",
        aliases: &[],
        summary: "print the .achira directory for a path",
        handler: handlers::root::handle,
    },
    CommandDefinition {
        name: "say",
        aliases: &[],
        summary: "print a decorated status message",
        handler: handlers::say::handle,
    },
    CommandDefinition {
        name: "script",
        aliases: &["run"],
        summary: "run a sub-script through the selected interpreter",
        handler: handlers::script::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn print_overview() {
    console::print_header("achira-kit");
    for cmd in COMMAND_REGISTRY {
        println!("  {:<12} {}", cmd.name.cyan(), cmd.summary);
    }
    println!();
}

/// The main entry point of the `achira-kit` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // --- Centralized Error Handling ---
        // A failing child already printed its own diagnostics; just mirror its code.
        if let Some(exit) = e.downcast_ref::<ChildExit>() {
            std::process::exit(exit.code);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        if let Some(ExecutionError::Timeout { .. }) = e.downcast_ref::<ExecutionError>() {
            std::process::exit(TIMEOUT_EXIT_CODE);
        }
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let Some(action) = cli.action else {
        print_overview();
        return Ok(());
    };

    match find_command(&action) {
        Some(command) => (command.handler)(cli.args),
        None => {
            print_overview();
            Err(anyhow::anyhow!("Unknown action '{}'.", action))
        }
    }
}
