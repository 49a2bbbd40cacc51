//! Test utilities for qrfeed services.
//!
//! Provides `ManualClock` and timestamp fixtures.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod clock;
pub mod fixture;
