//! simspan CLI library
//!
//! This library provides the command-line driver that runs span
//! propagation over JSON documents.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
