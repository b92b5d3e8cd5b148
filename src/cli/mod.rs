//! CLI module for the hoverloon-images tool
//!
//! This module is only available when the "cli" feature is enabled.

mod config;
#[path = "main.rs"]
mod main_impl;

pub use main_impl::{main, Cli, EXIT_MISSING_INPUT_DIR, EXIT_OPERATION_FAILED};
