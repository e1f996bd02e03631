// src/constants.rs

/// The name of the directory that marks the root of an Achira configuration tree.
pub const ACHIRA_DIR: &str = ".achira";

/// The name of the optional settings file (inside .achira/).
pub const HELPERS_CONFIG_FILENAME: &str = "helpers.toml";

/// How many parent directories the root search climbs above the starting directory.
pub const MAX_SEARCH_DEPTH: usize = 5;

/// Width of the border lines (and the centering field) of a header message.
pub const HEADER_WIDTH: usize = 70;

/// Default time limit for a child process, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// The package/environment manager probed before falling back to a bare interpreter.
pub const DEFAULT_PACKAGE_MANAGER: &str = "uv";

/// The manager subcommand that runs a program inside its managed environment.
pub const DEFAULT_RUN_SUBCOMMAND: &str = "run";

/// The generic name of the interpreter used to run sub-scripts.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Environment variable that pins the fallback interpreter executable.
pub const INTERPRETER_ENV_VAR: &str = "ACHIRA_PYTHON";

/// Exit code reported when a child process exceeds its time limit.
pub const TIMEOUT_EXIT_CODE: i32 = 124;
