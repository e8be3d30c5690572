//! Statical CLI library.
//!
//! This library provides the core functionality for the `statical` tool,
//! exposing the argument definitions, commands and formatters so they can
//! be tested without spawning the binary.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)] // Every command returns Result<ExitCode>

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
pub mod types;
