//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Build the adapters a command needs from its arguments
//! 2. Call into the core and download crates
//! 3. Format output for the terminal

pub mod check_deps;
pub mod download;
pub mod paths;
pub mod serve;
