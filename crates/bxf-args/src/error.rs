use bxf_image::ImageError;
use bxf_imgproc::filter::FilterError;

/// The argument check that failed, in validation order.
///
/// Each check maps to a fixed message that callers may surface verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgCheck {
    /// Wrong number of arguments.
    Usage,
    /// Depth is not uint8.
    DepthType,
    /// Intensity is not uint8.
    IntensityType,
    /// Noise mask is not logical.
    NoiseType,
    /// Spatial sigmas are not double.
    SigmaSType,
    /// Range sigmas are not double.
    SigmaRType,
    /// Depth is not 2-D.
    DepthDims,
    /// Intensity is not 2-D.
    IntensityDims,
    /// Noise mask is not 2-D.
    NoiseDims,
    /// Spatial sigmas are not a column vector.
    SigmaSShape,
    /// Spatial sigmas do not have the required length.
    SigmaSLength,
    /// Range sigmas are not a column vector.
    SigmaRShape,
    /// Range sigmas do not have the required length.
    SigmaRLength,
    /// Depth has the wrong size.
    DepthSize,
    /// Intensity has the wrong size.
    IntensitySize,
    /// Noise mask has the wrong size.
    NoiseSize,
    /// Spatial and range sigmas differ in length.
    SigmaLengthMismatch,
}

impl ArgCheck {
    /// The diagnostic message for the failed check.
    pub fn message(&self) -> &'static str {
        // NOTE: the texts, typos and stale sizes included, are part of the host contract
        match self {
            ArgCheck::Usage => "Usage: mex_cbf(depth, intensity, noise, sigmaS, sigmaR);",
            ArgCheck::DepthType => "Depth image must be of type uint8.",
            ArgCheck::IntensityType => "Intensity image must be of type uint8.",
            ArgCheck::NoiseType => "Noise image must be logical.",
            ArgCheck::SigmaSType => "SigmaS image must be double.",
            ArgCheck::SigmaRType => "SigmaR image must be double.",
            ArgCheck::DepthDims => "Depth image must be HxW",
            ArgCheck::IntensityDims => "Intensity image must be HxW",
            ArgCheck::NoiseDims => "Noise image must be HxW",
            ArgCheck::SigmaSShape => "SigamS must be Hx1",
            ArgCheck::SigmaSLength => "SigmaS's length is fixed",
            ArgCheck::SigmaRShape => "SigamR must be Hx1",
            ArgCheck::SigmaRLength => "SigmaR's length is fixed",
            ArgCheck::DepthSize => "Depth image must be 480x640",
            ArgCheck::IntensitySize => "Intensity image must be 480x640",
            ArgCheck::NoiseSize => "Noise image must be 480x640",
            ArgCheck::SigmaLengthMismatch => "SigmaS and SigmaR must be the same size (Sx1)",
        }
    }
}

impl std::fmt::Display for ArgCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// An error type for argument marshaling.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ArgsError {
    /// An argument failed validation.
    #[error("{0}")]
    InvalidArgument(ArgCheck),

    /// The array data does not match its dimensions.
    #[error("Array data length ({0}) does not match its dimensions ({1})")]
    InvalidDataLength(usize, usize),

    /// Error from the filter.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl From<ArgCheck> for ArgsError {
    fn from(check: ArgCheck) -> Self {
        ArgsError::InvalidArgument(check)
    }
}
