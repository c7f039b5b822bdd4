//! docfields CLI library.
//!
//! Exposes the CLI building blocks so the binary stays a thin wrapper
//! and the pieces remain testable.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
