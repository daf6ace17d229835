//! Crypto module.

mod errors;
mod sig;
mod token;

pub use self::{
    errors::{CryptoError, Result},
    sig::{HmacAlgorithm, Signature},
    token::constant_time_eq,
};
