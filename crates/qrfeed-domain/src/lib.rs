//! Domain types shared across qrfeed crates.
//!
//! This crate contains only pure types and pure functions with no framework
//! dependencies. Import in `usecase/` and `domain/` layers.

pub mod filter;
pub mod id;
pub mod rating;
pub mod sentiment;
