//! Webhook dispatch core.

#![warn(clippy::all)]

pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod events;
pub mod executor;
pub mod identify;
pub mod parser;
pub mod resolver;
pub mod verify;
mod webhook;

pub use dispatcher::{dispatch, DispatchResult};
pub use errors::{ParseError, VerificationFailure};
#[cfg(any(test, feature = "testkit"))]
pub use executor::MockDeploymentExecutor;
pub use executor::{DeploymentExecutor, ProcessExecutor};
pub use parser::ParsedPayload;
pub use webhook::{IncomingWebhook, WebhookHeaders};
