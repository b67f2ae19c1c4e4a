use bxf_imgproc::filter::{CrossBilateralConfig, CrossBilateralFilter};

use crate::array::HostArray;
use crate::error::{ArgCheck, ArgsError};
use crate::validate::{validate_args, BindingLimits};

/// Run the cross-bilateral filter on host arrays.
///
/// The arguments are validated with [`validate_args`], converted from column-major host
/// layout to row-major images, filtered, and the result is returned as an `H x W` uint8
/// host array.
///
/// # Arguments
///
/// * `args` - The call arguments `(depth, intensity, noise, sigmaS, sigmaR)`.
/// * `limits` - The sizes enforced by the host deployment.
/// * `config` - The filter configuration.
pub fn run_cbf(
    args: &[HostArray],
    limits: &BindingLimits,
    config: CrossBilateralConfig,
) -> Result<HostArray, ArgsError> {
    validate_args(args, limits)?;

    let depth = args[0].to_image_u8().ok_or(ArgCheck::DepthType)??;
    let intensity = args[1].to_image_u8().ok_or(ArgCheck::IntensityType)??;
    let mask = args[2].to_mask().ok_or(ArgCheck::NoiseType)??;
    let sigma_s = args[3].as_f64().ok_or(ArgCheck::SigmaSType)?;
    let sigma_r = args[4].as_f64().ok_or(ArgCheck::SigmaRType)?;

    let filter = CrossBilateralFilter::from_sigmas(sigma_s, sigma_r, config)?;
    let result = filter.apply(&depth, &intensity, &mask)?;

    Ok(HostArray::from_image_u8(&result))
}
