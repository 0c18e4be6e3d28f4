//! Command-line interface for vidfetch.
//!
//! `vidfetch serve` runs the HTTP service; the other commands are
//! one-shot operations over the same core types.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for integration-only crates
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use tempfile as _;

// Used by main.rs binary
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{Commands, FetcherArgs, ServeArgs, StorageArgs};
pub use error::CliError;
pub use parser::Cli;
