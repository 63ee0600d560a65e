//! cfn-phonehome: CloudFormation custom-resource webhook notifier
//!
//! A library for forwarding custom-resource lifecycle events to a webhook
//! and reporting the outcome back to CloudFormation.

pub mod cfn;
pub mod config;
pub mod notifier;
pub mod time;
pub mod webhook;

#[cfg(test)]
mod test_support;
