/// Number of distinct differences between two 8-bit intensities.
pub const RANGE_LUT_SIZE: usize = 256;

/// Compute the half size of the spatial support for a given sigma.
///
/// # Arguments
///
/// * `sigma_s` - The spatial sigma in pixels.
/// * `radius_factor` - How many sigmas the support extends on each side.
/// * `max_radius` - Upper bound for the radius, usually the largest image extent.
///
/// # Returns
///
/// `ceil(radius_factor * sigma_s)`, at least 1 and at most `max_radius`.
pub fn kernel_radius(sigma_s: f64, radius_factor: f64, max_radius: usize) -> usize {
    let radius = (radius_factor * sigma_s).ceil();
    // float to int casts saturate
    (radius as usize).max(1).min(max_radius)
}

/// Create a 2d spatial gaussian kernel.
///
/// The weights are not normalized since the cross-bilateral estimate divides by the
/// accumulated weight anyway.
///
/// # Arguments
///
/// * `radius` - The half size of the kernel.
/// * `sigma_s` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A row-major vector of `(2 * radius + 1)^2` weights, the center weight being 1.
pub fn spatial_gaussian_kernel_2d(radius: usize, sigma_s: f64) -> Vec<f64> {
    let size = 2 * radius + 1;

    // scale before squaring, 2 * sigma^2 underflows to zero for tiny sigmas
    let mut kernel = Vec::with_capacity(size * size);
    for ky in 0..size {
        let ty = (ky as f64 - radius as f64) / sigma_s;
        for kx in 0..size {
            let tx = (kx as f64 - radius as f64) / sigma_s;
            kernel.push((-0.5 * (tx * tx + ty * ty)).exp());
        }
    }
    kernel
}

/// Create a range kernel indexed by absolute intensity difference.
///
/// Differences are normalized to [0, 1] by dividing by 255 before the exponent so that
/// `sigma_r` is expressed in normalized intensity units.
///
/// # Arguments
///
/// * `sigma_r` - The range sigma in normalized intensity units.
///
/// # Returns
///
/// A lookup table where entry `i` is the weight for an intensity difference of `i`.
pub fn range_gaussian_lut(sigma_r: f64) -> [f64; RANGE_LUT_SIZE] {
    let mut lut = [0.0f64; RANGE_LUT_SIZE];

    for (i, w) in lut.iter_mut().enumerate() {
        let t = i as f64 / 255.0 / sigma_r;
        *w = (-0.5 * t * t).exp();
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_radius() {
        assert_eq!(kernel_radius(1.0, 3.0, 100), 3);
        assert_eq!(kernel_radius(1.2, 3.0, 100), 4);
        assert_eq!(kernel_radius(1e-6, 3.0, 100), 1);
        assert_eq!(kernel_radius(1e6, 3.0, 10), 10);
        assert_eq!(kernel_radius(f64::MAX, 3.0, 7), 7);
    }

    #[test]
    fn test_spatial_gaussian_kernel_2d() {
        let kernel = spatial_gaussian_kernel_2d(1, 1.0);
        assert_eq!(kernel.len(), 9);
        assert_relative_eq!(kernel[4], 1.0);
        assert_relative_eq!(kernel[1], (-0.5f64).exp());
        assert_relative_eq!(kernel[0], (-1.0f64).exp());
        // symmetric
        assert_relative_eq!(kernel[0], kernel[8]);
        assert_relative_eq!(kernel[3], kernel[5]);
    }

    #[test]
    fn test_range_gaussian_lut() {
        let lut = range_gaussian_lut(0.5);
        assert_relative_eq!(lut[0], 1.0);
        assert_relative_eq!(lut[255], (-2.0f64).exp());
        assert!(lut.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_tiny_sigmas_stay_finite() {
        let lut = range_gaussian_lut(1e-170);
        assert_relative_eq!(lut[0], 1.0);
        assert!(lut[1..].iter().all(|&w| w == 0.0));

        let kernel = spatial_gaussian_kernel_2d(1, 1e-170);
        assert_relative_eq!(kernel[4], 1.0);
        assert!(kernel.iter().all(|w| w.is_finite()));
        assert_eq!(kernel[0], 0.0);
    }
}
