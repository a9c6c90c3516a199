use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sigcheck binary.
#[derive(Parser, Debug)]
#[command(
    name = "sigcheck",
    version,
    about = "Check that a delegate function can stand in for a mocked method"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file of named type declarations usable in signatures.
    #[arg(long, global = true)]
    pub types: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check one substitute signature against a declared signature.
    Check {
        /// Signature of the mocked method, e.g. 'func(...interface{}) bool'.
        declared: String,
        /// Signature of the delegate, e.g. 'func([]int) bool'.
        substitute: String,
    },
    /// Check every case in a JSON batch file.
    Batch {
        /// Path to the batch file.
        file: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
