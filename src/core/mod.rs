// src/core/mod.rs

pub mod console;
pub mod paths;
