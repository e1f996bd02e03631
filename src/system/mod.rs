//! # System Interaction Layer
//!
//! This module provides abstractions for interacting with the underlying operating system.
//! It serves as a boundary between the helpers and the specifics of process management.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns a child process, captures its output as text and enforces a
//!   time limit. Exit codes are reported, never interpreted.
//! - **`interpreter`**: Decides how sub-scripts are launched, preferring a package manager
//!   (`uv run python`) when it answers a probe and falling back to a bare interpreter.

pub mod executor;
pub mod interpreter;
