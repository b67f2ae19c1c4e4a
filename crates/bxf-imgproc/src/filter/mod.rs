//! Filter operations
//!
//! This module provides the cross-bilateral filter used to reconstruct and smooth depth
//! images guided by an intensity image.

/// Filter kernels
pub mod kernels;

/// Filter errors
mod error;
pub use error::FilterError;

/// Cross-bilateral filter operations
mod cross_bilateral;
pub use cross_bilateral::*;
