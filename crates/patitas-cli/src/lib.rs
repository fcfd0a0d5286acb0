//! Patitas CLI library.
//!
//! Suite tooling for feature files: validation, scenario listing by
//! platform filter, and tag-expression inspection.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod commands;
mod error;
pub mod handlers;

pub use commands::{CheckArgs, Cli, Commands, ListArgs, OutputFormat, PlatformArg, TagsArgs};
pub use error::{CliError, CliResult};
