#![deny(missing_docs)]
//! Image types for depth and intensity maps

/// image representation for depth filtering purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
