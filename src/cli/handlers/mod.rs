// src/cli/handlers/mod.rs

// This module contains the logic for each CLI action.

pub mod commons;
pub mod exec;
pub mod interpreter;
pub mod root;
pub mod say;
pub mod script;
