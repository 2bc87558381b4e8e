//! nextline CLI library
//!
//! This library provides the command-line interface for reading files
//! one line at a time through the `nextline-core` reader.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
