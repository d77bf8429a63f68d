//! Configuration for the LOD engine and its demo.
//!
//! Settings persist to disk as RON, can be overridden from the command line,
//! and unknown or missing fields fall back to defaults.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, ValidationArg};
pub use config::{Config, DebugConfig, DemoConfig};
pub use error::ConfigError;
