//! Shared runtime plumbing for qrfeed services: tracing setup, the clock port
//! and serde helpers.

pub mod clock;
pub mod serde;
pub mod tracing;
