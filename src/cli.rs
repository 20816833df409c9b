//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`init_logging`] - stderr `tracing` subscriber for the binary

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::ChatlensError;

/// Analyze a WhatsApp chat export: activity, words, emoji and sentiment.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens 'WhatsApp Chat with Trip.txt'
    chatlens chat.txt --list-users
    chatlens chat.txt -u Alice --top 10
    chatlens chat.txt -f json -o dashboard.json
    chatlens chat.txt -f csv -o records.csv --cloud cloud.svg")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Analyze one user instead of the whole chat
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Analysis configuration (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rows in the most-common-words table
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Print the users of the chat and exit
    #[arg(long)]
    pub list_users: bool,

    /// Write the word cloud as SVG
    #[arg(long, value_name = "PATH")]
    pub cloud: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use chatlens::cli::OutputFormat;
///
/// let format: chatlens::format::OutputFormat = OutputFormat::Json.into();
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Text,

    /// Full dashboard as JSON
    Json,

    /// Records table with semicolon delimiter
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` for this
/// crate and the default is `warn`.
pub fn init_logging(verbose: bool) -> Result<(), ChatlensError> {
    let fallback = if verbose { "chatlens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| ChatlensError::config(format!("invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ChatlensError::config(format!("cannot install logger: {e}")))
}
