//! Console, path discovery and subprocess helpers for Achira setup scripts.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
