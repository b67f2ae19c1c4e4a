#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// depth filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;
