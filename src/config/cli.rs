//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CloudFormation custom-resource webhook notifier
///
/// Without a subcommand, serves invocations from the AWS Lambda runtime API.
#[derive(Debug, Parser)]
#[command(name = "cfn-phonehome")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for cfn-phonehome
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Handle a single event read from a JSON file
    Invoke {
        /// Path to the custom-resource event JSON
        #[arg(long, short)]
        event: PathBuf,

        /// PUT the response to the event's ResponseURL instead of logging it
        #[arg(long = "send-response")]
        send_response: bool,

        /// Log stream name used in the response document
        #[arg(long = "log-stream")]
        log_stream: Option<String>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
