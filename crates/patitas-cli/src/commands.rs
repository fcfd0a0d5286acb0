//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use patitas::Platform;

/// Patitas: suite tooling for the Huellitas E2E test harness
#[derive(Parser, Debug)]
#[command(name = "patitas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate feature files and list their scenarios
    Check(CheckArgs),

    /// List scenarios selected by a platform's tag filter
    List(ListArgs),

    /// Parse a tag expression and show which scenarios it selects
    Tags(TagsArgs),
}

/// Target platform argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum PlatformArg {
    /// Web suite
    #[default]
    Web,
    /// Android suite
    Android,
    /// iOS suite
    Ios,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Web => Self::Web,
            PlatformArg::Android => Self::Android,
            PlatformArg::Ios => Self::Ios,
        }
    }
}

/// Output format for list-style commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Directory of feature files
    #[arg(default_value = "features")]
    pub features: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory of feature files
    #[arg(default_value = "features")]
    pub features: PathBuf,

    /// Platform whose preset filter to apply
    #[arg(short, long, default_value = "web")]
    pub platform: PlatformArg,

    /// Override the platform's preset tag filter
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the tags command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Tag expression, e.g. '@web and not @legacy'
    pub expression: String,

    /// Directory of feature files to match against (optional)
    #[arg(short = 'd', long)]
    pub features: Option<PathBuf>,
}
