//! CLI parse: clap types for autoroute-index. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// autoroute-index - flatten content items into route index records
#[derive(Parser)]
#[command(name = "autoroute-index")]
#[command(about = "Flatten hierarchical content items into route index records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the route index records of a content item document
    Index {
        /// JSON content item document
        file: PathBuf,
        /// Output format (text or json); defaults to the configured format
        #[arg(long)]
        format: Option<String>,
        /// Persist the document when building cleared its removed marker
        #[arg(long)]
        write_back: bool,
    },
    /// Show the effective configuration
    Config,
}
