use crate::array::{ClassId, HostArray};
use crate::error::ArgCheck;

/// Number of arguments of a filter call.
pub const NUM_ARGS: usize = 5;

const ARG_DEPTH: usize = 0;
const ARG_INTENSITY: usize = 1;
const ARG_NOISE: usize = 2;
const ARG_SIG_S: usize = 3;
const ARG_SIG_R: usize = 4;

/// Fixed sizes enforced at the host boundary.
///
/// The filter itself works on any size; these limits only describe what a given host
/// deployment accepts. `None` lifts a constraint, in which case the intensity and noise
/// images are checked against the depth image instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingLimits {
    /// Required image height.
    pub height: Option<usize>,
    /// Required image width.
    pub width: Option<usize>,
    /// Required number of scales.
    pub num_scales: Option<usize>,
}

impl Default for BindingLimits {
    fn default() -> Self {
        Self {
            height: Some(427),
            width: Some(561),
            num_scales: Some(3),
        }
    }
}

impl BindingLimits {
    /// Limits accepting any image size and any number of scales.
    pub fn unconstrained() -> Self {
        Self {
            height: None,
            width: None,
            num_scales: None,
        }
    }
}

/// Validate the arguments of a filter call.
///
/// Checks run in a fixed order: argument count, element classes, dimensionality and
/// sigma vector shapes, image sizes, and finally sigma length agreement. The first
/// failing check is returned.
///
/// # Arguments
///
/// * `args` - The call arguments `(depth, intensity, noise, sigmaS, sigmaR)`.
/// * `limits` - The sizes enforced by the host deployment.
pub fn validate_args(args: &[HostArray], limits: &BindingLimits) -> Result<(), ArgCheck> {
    if args.len() != NUM_ARGS {
        return Err(ArgCheck::Usage);
    }

    validate_types(args)?;
    validate_sizes(args, limits)?;

    log::debug!(
        "validated cbf arguments: image {}x{}, {} scales",
        args[ARG_DEPTH].m(),
        args[ARG_DEPTH].n(),
        args[ARG_SIG_S].m()
    );

    Ok(())
}

fn validate_types(args: &[HostArray]) -> Result<(), ArgCheck> {
    let expected = [
        (ARG_DEPTH, ClassId::Uint8, ArgCheck::DepthType),
        (ARG_INTENSITY, ClassId::Uint8, ArgCheck::IntensityType),
        (ARG_NOISE, ClassId::Logical, ArgCheck::NoiseType),
        (ARG_SIG_S, ClassId::Double, ArgCheck::SigmaSType),
        (ARG_SIG_R, ClassId::Double, ArgCheck::SigmaRType),
    ];

    for (arg, class, check) in expected {
        if args[arg].class_id() != class {
            return Err(check);
        }
    }
    Ok(())
}

// checks that all of the images are of the same size
fn validate_sizes(args: &[HostArray], limits: &BindingLimits) -> Result<(), ArgCheck> {
    let images = [
        (ARG_DEPTH, ArgCheck::DepthDims),
        (ARG_INTENSITY, ArgCheck::IntensityDims),
        (ARG_NOISE, ArgCheck::NoiseDims),
    ];
    for (arg, check) in images {
        if args[arg].num_dims() != 2 {
            return Err(check);
        }
    }

    let sigmas = [
        (ARG_SIG_S, ArgCheck::SigmaSShape, ArgCheck::SigmaSLength),
        (ARG_SIG_R, ArgCheck::SigmaRShape, ArgCheck::SigmaRLength),
    ];
    for (arg, shape_check, length_check) in sigmas {
        let sigma = &args[arg];
        if sigma.num_dims() != 2 || sigma.n() != 1 {
            return Err(shape_check);
        }
        if limits.num_scales.is_some_and(|s| sigma.numel() != s) {
            return Err(length_check);
        }
    }

    let depth = &args[ARG_DEPTH];
    let height = limits.height.unwrap_or(depth.m());
    let width = limits.width.unwrap_or(depth.n());

    let sizes = [
        (ARG_DEPTH, ArgCheck::DepthSize),
        (ARG_INTENSITY, ArgCheck::IntensitySize),
        (ARG_NOISE, ArgCheck::NoiseSize),
    ];
    for (arg, check) in sizes {
        if args[arg].m() != height || args[arg].n() != width {
            return Err(check);
        }
    }

    if args[ARG_SIG_R].m() != args[ARG_SIG_S].m() {
        return Err(ArgCheck::SigmaLengthMismatch);
    }

    Ok(())
}
