//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod health;
mod metrics;
pub mod reload;
pub mod server;
mod webhook;

pub use errors::{Result, ServerError};
