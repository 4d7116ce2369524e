//! CLI parse: clap types for fabric-defaults. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fabric-defaults CLI - list-default normalization for fabric data models
#[derive(Parser)]
#[command(name = "fabric-defaults")]
#[command(about = "Default every list field of a fabric data model to an empty list")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Normalize a JSON model document
    Normalize {
        /// Model document to read ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,

        /// Write the normalized document here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Rule file (.toml or .json) replacing the built-in VXLAN table
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Fail on type mismatches instead of skipping them
        #[arg(long)]
        strict: bool,

        /// JSON pointer to the model tree inside the document (e.g. /model_extended)
        #[arg(long)]
        pointer: Option<String>,

        /// Pretty-print the output document
        #[arg(long)]
        pretty: bool,
    },
    /// Show the presence state of one dotted path in a model document
    Classify {
        /// Model document to read ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,

        /// Dotted key path (e.g. vxlan.topology.switches)
        #[arg(long)]
        path: String,

        /// JSON pointer to the model tree inside the document
        #[arg(long)]
        pointer: Option<String>,

        /// Fail on type mismatches instead of reporting missing
        #[arg(long)]
        strict: bool,
    },
    /// Print the effective rule table
    Rules {
        /// Rule file (.toml or .json) replacing the built-in VXLAN table
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format (text, json or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Load and validate a rule file
    Check {
        /// Rule file (.toml or .json)
        #[arg(long)]
        rules: PathBuf,
    },
}
