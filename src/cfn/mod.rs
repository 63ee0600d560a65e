//! CloudFormation custom-resource protocol.
//!
//! This module provides:
//! - The inbound event ([`CustomResourceEvent`], [`RequestType`])
//! - The flattened webhook body ([`OutboundPayload`])
//! - The completion signal and response document ([`ResponseSignal`], [`ResponseDocument`])
//! - Signal delivery ([`Responder`], [`CfnResponder`], [`LogResponder`])

mod error;
pub mod event;
pub mod payload;
mod responder;
mod response;

#[cfg(test)]
mod event_tests;

pub use error::{EventError, RespondError};
pub use event::{CustomResourceEvent, RequestType};
pub use payload::OutboundPayload;
pub use responder::{CfnResponder, LogResponder, Responder};
pub use response::{ERROR_KEY, InvocationContext, ResponseDocument, ResponseSignal, ResponseStatus};
