//! Configuration layer.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Validated configuration ([`ValidatedConfig`], [`Mode`])
//! - Default values ([`defaults`])
//!
//! Running without a subcommand starts the Lambda runtime loop; the event
//! and the invocation context then come from the runtime API. The
//! `invoke` subcommand handles a single event read from a file.
//!
//! The retry budget is fixed (3 attempts, 1s then 2s backoff) and is not
//! user-configurable. Only the per-request HTTP timeout can be tuned.

mod cli;
pub mod defaults;
mod error;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use validated::{InvokeOptions, Mode, ValidatedConfig};
