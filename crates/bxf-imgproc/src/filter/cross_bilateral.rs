use bxf_image::{Image, ImageSize};

use super::error::FilterError;
use super::kernels;
use crate::parallel::{self, ExecutionStrategy};

/// Default number of spatial sigmas covered by the support on each side.
pub const DEFAULT_RADIUS_FACTOR: f64 = 3.0;

/// One (spatial, range) scale of the cross-bilateral filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CbfScale {
    /// Spatial standard deviation in pixels.
    pub sigma_s: f64,
    /// Range standard deviation in normalized intensity units [0, 1].
    pub sigma_r: f64,
}

impl CbfScale {
    /// Create a new scale.
    pub fn new(sigma_s: f64, sigma_r: f64) -> Self {
        Self { sigma_s, sigma_r }
    }

    /// Zip separate spatial and range sigma sequences into scales.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::ScaleLengthMismatch`] if the lengths differ and
    /// [`FilterError::EmptyScales`] if both are empty.
    pub fn from_slices(sigma_s: &[f64], sigma_r: &[f64]) -> Result<Vec<Self>, FilterError> {
        if sigma_s.len() != sigma_r.len() {
            return Err(FilterError::ScaleLengthMismatch(sigma_s.len(), sigma_r.len()));
        }
        if sigma_s.is_empty() {
            return Err(FilterError::EmptyScales);
        }
        Ok(sigma_s
            .iter()
            .zip(sigma_r.iter())
            .map(|(&s, &r)| Self::new(s, r))
            .collect())
    }
}

/// Which pixels are recomputed at each scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillPolicy {
    /// Every pixel is replaced by its cross-bilateral estimate.
    #[default]
    SmoothAll,
    /// Only pixels marked invalid are estimated, valid pixels pass through unchanged.
    InvalidOnly,
}

/// How the validity mask evolves between scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskUpdate {
    /// The caller's mask is used unchanged for every scale.
    #[default]
    Keep,
    /// Invalid pixels that received an estimate become valid for the following scales.
    MarkFilled,
}

/// Configuration of the cross-bilateral filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrossBilateralConfig {
    /// Support radius in units of `sigma_s`.
    pub radius_factor: f64,
    /// Which pixels are recomputed.
    pub fill_policy: FillPolicy,
    /// How the mask evolves between scales.
    pub mask_update: MaskUpdate,
    /// How rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for CrossBilateralConfig {
    fn default() -> Self {
        Self {
            radius_factor: DEFAULT_RADIUS_FACTOR,
            fill_policy: FillPolicy::default(),
            mask_update: MaskUpdate::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl CrossBilateralConfig {
    /// Set the support radius factor.
    pub fn with_radius_factor(mut self, radius_factor: f64) -> Self {
        self.radius_factor = radius_factor;
        self
    }

    /// Set the fill policy.
    pub fn with_fill_policy(mut self, fill_policy: FillPolicy) -> Self {
        self.fill_policy = fill_policy;
        self
    }

    /// Set the mask update rule.
    pub fn with_mask_update(mut self, mask_update: MaskUpdate) -> Self {
        self.mask_update = mask_update;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the configuration values.
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(self.radius_factor.is_finite() && self.radius_factor > 0.0) {
            return Err(FilterError::InvalidRadiusFactor(self.radius_factor));
        }
        self.strategy.validate()?;
        Ok(())
    }
}

/// Outcome of the estimate for a single pixel at one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Estimate {
    /// Weighted average of the valid neighbours.
    Reconstructed(f64),
    /// No valid neighbour carried weight, the input value is kept.
    Degenerate(f64),
    /// The pixel was not recomputed.
    PassThrough(f64),
}

impl Estimate {
    fn value(&self) -> f64 {
        match *self {
            Estimate::Reconstructed(v) | Estimate::Degenerate(v) | Estimate::PassThrough(v) => v,
        }
    }
}

/// Precomputed weights for one scale.
struct ScaleKernel {
    radius: usize,
    spatial: Vec<f64>,
    range: [f64; kernels::RANGE_LUT_SIZE],
}

impl ScaleKernel {
    fn new(scale: &CbfScale, radius_factor: f64, size: ImageSize) -> Self {
        let max_radius = size.width.max(size.height).saturating_sub(1);
        let radius = kernels::kernel_radius(scale.sigma_s, radius_factor, max_radius);
        Self {
            radius,
            spatial: kernels::spatial_gaussian_kernel_2d(radius, scale.sigma_s),
            range: kernels::range_gaussian_lut(scale.sigma_r),
        }
    }

    /// Weighted average of the valid samples around `(y, x)`.
    ///
    /// Returns `None` if no valid sample carries a positive weight.
    fn estimate(
        &self,
        depth: &[f64],
        intensity: &[u8],
        invalid: &[bool],
        size: ImageSize,
        y: usize,
        x: usize,
    ) -> Option<f64> {
        let cols = size.width;
        let r = self.radius;
        let k = 2 * r + 1;

        // the support is truncated at the image borders
        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(size.height - 1);
        let x0 = x.saturating_sub(r);
        let x1 = (x + r).min(cols - 1);

        let center = intensity[y * cols + x];

        let mut sum = 0.0f64;
        let mut weight_sum = 0.0f64;

        for qy in y0..=y1 {
            let row_offset = qy * cols;
            let kernel_row = &self.spatial[(qy + r - y) * k..(qy + r - y + 1) * k];
            for qx in x0..=x1 {
                let idx = row_offset + qx;
                if invalid[idx] {
                    continue;
                }
                let w_s = kernel_row[qx + r - x];
                let w_r = self.range[center.abs_diff(intensity[idx]) as usize];
                let w = w_s * w_r;
                sum += w * depth[idx];
                weight_sum += w;
            }
        }

        (weight_sum > 0.0).then(|| sum / weight_sum)
    }
}

/// Multi-scale cross-bilateral filter for depth images.
///
/// The filter reconstructs missing or noisy depth samples, flagged `true` in a validity
/// mask, from the valid samples around them. Neighbours are weighted by a spatial gaussian
/// and by a range gaussian on the difference of a guidance intensity image, so that depth
/// does not bleed across intensity edges.
///
/// Scales are applied in the given order, each one reading the unquantized output of the
/// previous one. Only the final result is rounded to `u8`. Whether pixels filled at a scale
/// count as valid for the following scales is controlled by [`MaskUpdate`]; by default the
/// original mask is used for every scale.
#[derive(Debug, Clone)]
pub struct CrossBilateralFilter {
    scales: Vec<CbfScale>,
    config: CrossBilateralConfig,
}

impl CrossBilateralFilter {
    /// Create a new filter.
    ///
    /// # Arguments
    ///
    /// * `scales` - The ordered (sigma_s, sigma_r) pairs.
    /// * `config` - The filter configuration.
    ///
    /// # Errors
    ///
    /// Fails if `scales` is empty, any sigma is not finite and positive, or the
    /// configuration is invalid.
    pub fn new(scales: Vec<CbfScale>, config: CrossBilateralConfig) -> Result<Self, FilterError> {
        validate_scales(&scales)?;
        config.validate()?;
        Ok(Self { scales, config })
    }

    /// Create a new filter from separate spatial and range sigma sequences.
    pub fn from_sigmas(
        sigma_s: &[f64],
        sigma_r: &[f64],
        config: CrossBilateralConfig,
    ) -> Result<Self, FilterError> {
        Self::new(CbfScale::from_slices(sigma_s, sigma_r)?, config)
    }

    /// The scales applied by the filter, in order.
    pub fn scales(&self) -> &[CbfScale] {
        &self.scales
    }

    /// The filter configuration.
    pub fn config(&self) -> &CrossBilateralConfig {
        &self.config
    }

    /// Filter a depth image.
    ///
    /// # Arguments
    ///
    /// * `depth` - The depth image with shape (H, W, 1).
    /// * `intensity` - The guidance intensity image with shape (H, W, 1).
    /// * `mask` - The validity mask with shape (H, W, 1), `true` marks invalid depth.
    ///
    /// # Returns
    ///
    /// The filtered depth image with shape (H, W, 1).
    pub fn apply(
        &self,
        depth: &Image<u8, 1>,
        intensity: &Image<u8, 1>,
        mask: &Image<bool, 1>,
    ) -> Result<Image<u8, 1>, FilterError> {
        let mut dst = Image::from_size_val(depth.size(), 0u8)?;
        self.apply_into(depth, intensity, mask, &mut dst)?;
        Ok(dst)
    }

    /// Filter a depth image into a preallocated destination.
    ///
    /// PRECONDITION: `depth`, `intensity`, `mask` and `dst` must have the same size.
    pub fn apply_into(
        &self,
        depth: &Image<u8, 1>,
        intensity: &Image<u8, 1>,
        mask: &Image<bool, 1>,
        dst: &mut Image<u8, 1>,
    ) -> Result<(), FilterError> {
        check_size("intensity", depth.size(), intensity.size())?;
        check_size("mask", depth.size(), mask.size())?;
        check_size("destination", depth.size(), dst.size())?;

        let estimate = self.apply_f64(depth, intensity, mask)?;

        dst.as_slice_mut()
            .iter_mut()
            .zip(estimate.iter())
            .for_each(|(out, &v)| *out = quantize(v));

        Ok(())
    }

    fn apply_f64(
        &self,
        depth: &Image<u8, 1>,
        intensity: &Image<u8, 1>,
        mask: &Image<bool, 1>,
    ) -> Result<Vec<f64>, FilterError> {
        let size = depth.size();
        let mut current = depth.cast::<f64>()?.into_vec();
        let mut invalid = mask.as_slice().to_vec();

        if size.area() == 0 {
            return Ok(current);
        }

        let mut estimates = vec![Estimate::PassThrough(0.0); size.area()];

        for (index, scale) in self.scales.iter().enumerate() {
            let kernel = ScaleKernel::new(scale, self.config.radius_factor, size);
            let fill_policy = self.config.fill_policy;

            {
                let (current, invalid) = (&current, &invalid);
                let intensity = intensity.as_slice();
                parallel::par_iter_rows_indexed(
                    &mut estimates,
                    size.width,
                    self.config.strategy,
                    |y, row| {
                        for (x, out) in row.iter_mut().enumerate() {
                            let idx = y * size.width + x;
                            *out = if fill_policy == FillPolicy::InvalidOnly && !invalid[idx] {
                                Estimate::PassThrough(current[idx])
                            } else {
                                match kernel.estimate(current, intensity, invalid, size, y, x) {
                                    Some(v) => Estimate::Reconstructed(v),
                                    None => Estimate::Degenerate(current[idx]),
                                }
                            };
                        }
                    },
                )?;
            }

            let mut reconstructed = 0usize;
            let mut degenerate = 0usize;
            for ((value, flag), estimate) in current
                .iter_mut()
                .zip(invalid.iter_mut())
                .zip(estimates.iter())
            {
                match estimate {
                    Estimate::Reconstructed(_) => {
                        reconstructed += 1;
                        if self.config.mask_update == MaskUpdate::MarkFilled {
                            *flag = false;
                        }
                    }
                    Estimate::Degenerate(_) => degenerate += 1,
                    Estimate::PassThrough(_) => {}
                }
                *value = estimate.value();
            }

            log::debug!(
                "cbf scale {}/{}: sigma_s={} sigma_r={} radius={} reconstructed={} degenerate={}",
                index + 1,
                self.scales.len(),
                scale.sigma_s,
                scale.sigma_r,
                kernel.radius,
                reconstructed,
                degenerate,
            );
        }

        Ok(current)
    }
}

/// Filter a depth image with a multi-scale cross-bilateral filter.
///
/// # Arguments
///
/// * `depth` - The depth image with shape (H, W, 1).
/// * `intensity` - The guidance intensity image with shape (H, W, 1).
/// * `mask` - The validity mask with shape (H, W, 1), `true` marks invalid depth.
/// * `scales` - The ordered (sigma_s, sigma_r) pairs.
/// * `config` - The filter configuration.
///
/// # Returns
///
/// The filtered depth image with shape (H, W, 1).
///
/// # Errors
///
/// All inputs are validated before any pixel is processed.
///
/// # Examples
///
/// ```
/// use bxf_image::{Image, ImageSize};
/// use bxf_imgproc::filter::{cross_bilateral_filter, CbfScale, CrossBilateralConfig};
///
/// let size = ImageSize { width: 3, height: 3 };
/// let depth = Image::<u8, 1>::new(size, vec![10, 10, 10, 10, 0, 10, 10, 10, 10]).unwrap();
/// let intensity = Image::<u8, 1>::from_size_val(size, 128).unwrap();
/// let mask = depth.map(|&d| d == 0);
///
/// let result = cross_bilateral_filter(
///     &depth,
///     &intensity,
///     &mask,
///     &[CbfScale::new(1.0, 0.5)],
///     CrossBilateralConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(result.get([1, 1, 0]), Some(&10));
/// ```
pub fn cross_bilateral_filter(
    depth: &Image<u8, 1>,
    intensity: &Image<u8, 1>,
    mask: &Image<bool, 1>,
    scales: &[CbfScale],
    config: CrossBilateralConfig,
) -> Result<Image<u8, 1>, FilterError> {
    check_size("intensity", depth.size(), intensity.size())?;
    check_size("mask", depth.size(), mask.size())?;
    CrossBilateralFilter::new(scales.to_vec(), config)?.apply(depth, intensity, mask)
}

/// Filter a depth image with a multi-scale cross-bilateral filter into `dst`.
///
/// PRECONDITION: `depth`, `intensity`, `mask` and `dst` must have the same size.
pub fn cross_bilateral_filter_into(
    depth: &Image<u8, 1>,
    intensity: &Image<u8, 1>,
    mask: &Image<bool, 1>,
    dst: &mut Image<u8, 1>,
    scales: &[CbfScale],
    config: CrossBilateralConfig,
) -> Result<(), FilterError> {
    check_size("intensity", depth.size(), intensity.size())?;
    check_size("mask", depth.size(), mask.size())?;
    check_size("destination", depth.size(), dst.size())?;
    CrossBilateralFilter::new(scales.to_vec(), config)?.apply_into(depth, intensity, mask, dst)
}

fn check_size(
    name: &'static str,
    expected: ImageSize,
    actual: ImageSize,
) -> Result<(), FilterError> {
    if expected != actual {
        return Err(FilterError::SizeMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

fn validate_scales(scales: &[CbfScale]) -> Result<(), FilterError> {
    if scales.is_empty() {
        return Err(FilterError::EmptyScales);
    }
    for (index, scale) in scales.iter().enumerate() {
        if !(scale.sigma_s.is_finite() && scale.sigma_s > 0.0) {
            return Err(FilterError::InvalidSigmaS {
                index,
                value: scale.sigma_s,
            });
        }
        if !(scale.sigma_r.is_finite() && scale.sigma_r > 0.0) {
            return Err(FilterError::InvalidSigmaR {
                index,
                value: scale.sigma_r,
            });
        }
    }
    Ok(())
}

// round half away from zero, then saturate
fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
