// src/system/interpreter.rs

use crate::{
    config::HelperConfig,
    constants::INTERPRETER_ENV_VAR,
    models::{CommandInvocation, ProbeOutcome},
    system::executor,
};
use std::{env, ffi::OsString, path::Path, time::Duration};

/// Upper bound for a `--version` probe. A tool that hangs is treated as missing.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Checks whether an external tool can be used.
pub trait ToolProbe {
    fn probe(&self, tool: &str) -> ProbeOutcome;
}

/// Probes the real system by running `<tool> --version`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ToolProbe for SystemProbe {
    fn probe(&self, tool: &str) -> ProbeOutcome {
        let invocation = CommandInvocation::new(tool).arg("--version");
        match executor::run_command(&invocation, None, PROBE_TIMEOUT) {
            Ok(output) if output.success() => ProbeOutcome::Available,
            Ok(output) => ProbeOutcome::Unavailable {
                reason: format!("'{}' exited with {}", invocation, output.status),
            },
            Err(e) => ProbeOutcome::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

/// Chooses how to launch the interpreter for sub-scripts.
///
/// When the package manager answers its probe, scripts run through it
/// (`uv run python`). Otherwise the interpreter is launched directly; see
/// [`fallback_interpreter`]. Nothing is cached: every call probes again.
pub fn select_interpreter(probe: &dyn ToolProbe, config: &HelperConfig) -> CommandInvocation {
    match probe.probe(&config.package_manager) {
        ProbeOutcome::Available => {
            log::debug!("'{}' is available; delegating to it.", config.package_manager);
            CommandInvocation::new(&config.package_manager)
                .arg(&config.run_subcommand)
                .arg(&config.interpreter)
        }
        ProbeOutcome::Unavailable { reason } => {
            log::debug!(
                "'{}' is unavailable ({}); launching the interpreter directly.",
                config.package_manager,
                reason
            );
            fallback_interpreter(config)
        }
    }
}

/// Selects the interpreter using the real system probe and default settings.
pub fn select_default_interpreter() -> CommandInvocation {
    select_interpreter(&SystemProbe, &HelperConfig::default())
}

/// The one-element invocation used when no package manager is available.
///
/// Prefers the executable pinned in `ACHIRA_PYTHON`, then the interpreter found
/// on `PATH`, then the bare interpreter name.
pub fn fallback_interpreter(config: &HelperConfig) -> CommandInvocation {
    resolve_fallback(config, env::var_os(INTERPRETER_ENV_VAR))
}

fn resolve_fallback(config: &HelperConfig, pinned: Option<OsString>) -> CommandInvocation {
    if let Some(pinned) = pinned.filter(|value| !value.is_empty()) {
        return CommandInvocation::new(pinned.to_string_lossy());
    }
    match which::which(&config.interpreter) {
        Ok(path) => CommandInvocation::new(path.to_string_lossy()),
        Err(_) => CommandInvocation::new(&config.interpreter),
    }
}

/// Appends a script path and its arguments to an interpreter invocation.
pub fn script_invocation<I, S>(interpreter: CommandInvocation, script: &Path, args: I) -> CommandInvocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    interpreter
        .arg(script.to_string_lossy())
        .args(args)
}
