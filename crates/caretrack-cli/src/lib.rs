//! caretrack-cli library root.
//!
//! Config and command handlers live here so integration tests can drive
//! them without going through argument parsing.

pub mod commands;
pub mod config;
