//! HTTP client for the local signing service
//!
//! Two endpoints exist, both JSON POSTs on port 3000:
//!
//! - `/api/token/getInfo` — certificate lookup used to confirm a token
//!   serial is known to the service (fail-closed on any problem)
//! - `/api/autoSign` — triggers one document auto-signing run; transport
//!   failures come back as a synthetic `{status: 1}` payload instead of an
//!   error, and nothing is ever retried
//!
//! The wire layer sits behind [`SignTransport`] so tests can swap in a
//! mock without a live service.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::*;
pub use error::*;
pub use models::*;
pub use transport::*;
