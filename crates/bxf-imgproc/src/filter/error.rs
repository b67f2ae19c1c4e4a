use bxf_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;

/// Errors raised by the cross-bilateral filter.
///
/// Every variant except a thread pool build failure is a precondition violation, i.e.
/// the input was invalid and no pixel has been processed.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// An image does not have the same size as the depth image.
    #[error("{name} image size {actual} does not match the depth image size {expected}")]
    SizeMismatch {
        /// Which image is wrong.
        name: &'static str,
        /// Size of the depth image.
        expected: ImageSize,
        /// Size of the offending image.
        actual: ImageSize,
    },

    /// No scale was provided.
    #[error("at least one (sigma_s, sigma_r) scale is required")]
    EmptyScales,

    /// The spatial and range sigma sequences have different lengths.
    #[error("sigma_s and sigma_r must have the same length ({0} != {1})")]
    ScaleLengthMismatch(usize, usize),

    /// A spatial sigma is not finite or not positive.
    #[error("sigma_s at scale {index} must be finite and > 0, got {value}")]
    InvalidSigmaS {
        /// Index of the scale.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// A range sigma is not finite or not positive.
    #[error("sigma_r at scale {index} must be finite and > 0, got {value}")]
    InvalidSigmaR {
        /// Index of the scale.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// The support radius factor is not finite or not positive.
    #[error("radius factor must be finite and > 0, got {0}")]
    InvalidRadiusFactor(f64),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the execution backend.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

impl FilterError {
    /// Whether the error is an invalid input, as opposed to an execution failure.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, FilterError::Parallel(ParallelError::BuildError(_)))
    }
}
