//! Token and signer runtime objects for SafetySigning Engine
//!
//! The pieces a host platform wires its entities onto:
//!
//! - [`Token`] — owns one validated credential and its derived signer
//! - [`Signer`] — the On/Off toggle; activation performs one signing run
//!   at the service, deactivation is local, state changes fan out through
//!   registered callbacks
//! - [`TokenRegistry`] — one token per config entry, set up fail-open from
//!   the persisted config and dropped on unload
//!
//! All state lives behind async locks and is only touched from the host's
//! cooperative executor; at most one outbound request is in flight per
//! activation.

pub mod registry;
pub mod signer;
pub mod token;

pub use registry::*;
pub use signer::*;
pub use token::*;
