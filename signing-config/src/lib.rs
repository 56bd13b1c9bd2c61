//! Credential model and configuration validation for SafetySigning Engine
//!
//! The host hands this crate a display name, the signing-service address,
//! and a free-form JSON blob persisted with the config entry. Validation
//! runs a fixed sequence of checks and reports the first failure under a
//! category the host can map onto the offending form field:
//!
//! - Display name and service address syntax
//! - Structured decode of the blob (the missing field is named)
//! - Serial, token-serial and PIN length bounds
//! - Access-token field completeness
//! - App-tag membership and tax-identifier normalization
//!
//! On success the caller receives a [`Credential`], immutable for the
//! lifetime of the config entry.

pub mod credential;
pub mod error;
pub mod validation;

pub use credential::*;
pub use error::*;
pub use validation::*;
