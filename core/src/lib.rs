//! Scanning side of `sweepr`.
//!
//! * [`network`]: the TCP connect probe.
//! * [`scanner`]: fans probes out over an address range.
//! * [`discovery`]: ties interface selection, range derivation and the scanner together.

pub mod discovery;
pub mod network;
pub mod scanner;
