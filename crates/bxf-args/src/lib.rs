#![deny(missing_docs)]
//! Host array marshaling and validation for the cross-bilateral filter.
//!
//! Numerical environments hand over dense, column-major arrays tagged with an element
//! class. This crate checks a five-argument call `(depth, intensity, noise, sigmaS, sigmaR)`
//! in a fixed order with fixed diagnostic messages, converts the arrays to row-major
//! images and runs the filter. It does not depend on any particular host runtime.

/// Column-major host arrays.
pub mod array;

/// Error types for argument marshaling.
pub mod error;

/// Argument validation.
pub mod validate;

mod call;

pub use crate::array::{ClassId, HostArray, HostData};
pub use crate::call::run_cbf;
pub use crate::error::{ArgCheck, ArgsError};
pub use crate::validate::{validate_args, BindingLimits};
