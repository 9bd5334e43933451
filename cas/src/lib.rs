//! Operator CLI for the CAS records desk.
//!
//! Loads a directory seed, then answers permission, navigation and case
//! taxonomy questions from the command line.

pub mod commands;
pub mod config;

pub use commands::{run, Desk, Report};
pub use config::{Args, Command, ConfigError, DeskConfig};
