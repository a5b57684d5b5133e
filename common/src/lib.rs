//! Shared building blocks for `sweepr`.
//!
//! * [`config`]: scan tuning knobs.
//! * [`error`]: the library error type.
//! * [`network`]: local interface selection, target range derivation and probe results.

pub mod config;
pub mod error;
pub mod network;
