//! Validated configuration.
//!
//! All validation is performed during construction; the rest of the
//! application only sees well-formed values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::webhook::RetryPolicy;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};

/// What the process does after startup.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Serve invocations from the Lambda runtime API.
    Serve,
    /// Handle one event from a file and exit.
    Invoke(InvokeOptions),
}

/// Options of the local `invoke` command.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeOptions {
    /// File the event was read from
    pub event_path: PathBuf,
    /// The parsed event
    pub event: Value,
    /// Whether to PUT the response instead of logging it
    pub send_response: bool,
    /// Log stream name reported in the response document
    pub log_stream: String,
}

/// Fully validated configuration ready for use by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    /// Serve or invoke
    pub mode: Mode,

    /// Timeout applied to each HTTP request
    pub http_timeout: Duration,

    /// Retry policy for webhook delivery
    pub retry_policy: RetryPolicy,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match &self.mode {
            Mode::Serve => "serve".to_string(),
            Mode::Invoke(options) => format!(
                "invoke {} (send_response: {})",
                options.event_path.display(),
                options.send_response
            ),
        };

        write!(
            f,
            "Config {{ mode: {mode}, http_timeout: {}s, retry: {}x/{}s }}",
            self.http_timeout.as_secs(),
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Validates CLI arguments, reading the event file for `invoke`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The timeout is zero
    /// - The event file cannot be read or is not valid JSON
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let http_timeout = Self::resolve_timeout(cli.timeout)?;

        let mode = match &cli.command {
            None => Mode::Serve,
            Some(Command::Invoke {
                event,
                send_response,
                log_stream,
            }) => Mode::Invoke(InvokeOptions {
                event_path: event.clone(),
                event: read_event(event)?,
                send_response: *send_response,
                log_stream: log_stream
                    .clone()
                    .unwrap_or_else(|| defaults::LOCAL_LOG_STREAM.to_string()),
            }),
        };

        Ok(Self {
            mode,
            http_timeout,
            retry_policy: RetryPolicy::default(),
            verbose: cli.verbose,
        })
    }

    fn resolve_timeout(secs: Option<u64>) -> Result<Duration, ConfigError> {
        match secs {
            None => Ok(defaults::http_timeout()),
            Some(0) => Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than zero".to_string(),
            }),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }
}

fn read_event(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::EventParse {
        path: path.to_path_buf(),
        source,
    })
}
