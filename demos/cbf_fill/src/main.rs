use argh::FromArgs;
use std::{path::PathBuf, time::Instant};

use bxf::imgproc::filter::{CrossBilateralConfig, CrossBilateralFilter, FillPolicy, MaskUpdate};
use bxf::imgproc::parallel::ExecutionStrategy;
use bxf::io::png as P;

#[derive(FromArgs)]
/// Fill missing depth with a multi-scale cross-bilateral filter
struct Args {
    /// path to the mono8 depth png
    #[argh(option, short = 'd')]
    depth: PathBuf,

    /// path to the mono8 intensity png
    #[argh(option, short = 'i')]
    intensity: PathBuf,

    /// path to the mono8 mask png, non-zero marks invalid depth; zero depth otherwise
    #[argh(option, short = 'm')]
    mask: Option<PathBuf>,

    /// path to write the filtered depth png
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// spatial sigma in pixels, repeat once per scale
    #[argh(option)]
    sigma_s: Vec<f64>,

    /// range sigma in [0, 1], repeat once per scale
    #[argh(option)]
    sigma_r: Vec<f64>,

    /// path to a json filter configuration
    #[argh(option)]
    config: Option<PathBuf>,

    /// only reconstruct invalid pixels, keep valid depth untouched
    #[argh(switch)]
    fill_invalid_only: bool,

    /// treat pixels filled at a scale as valid for the following scales
    #[argh(switch)]
    mark_filled: bool,

    /// run on the current thread only
    #[argh(switch)]
    serial: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => CrossBilateralConfig::default(),
    };
    if args.fill_invalid_only {
        config = config.with_fill_policy(FillPolicy::InvalidOnly);
    }
    if args.mark_filled {
        config = config.with_mask_update(MaskUpdate::MarkFilled);
    }
    if args.serial {
        config = config.with_strategy(ExecutionStrategy::Serial);
    }

    // default scales for kinect-style depth maps
    let (sigma_s, sigma_r) = if args.sigma_s.is_empty() && args.sigma_r.is_empty() {
        (vec![12.0, 5.0, 8.0], vec![0.2, 0.08, 0.02])
    } else {
        (args.sigma_s, args.sigma_r)
    };

    let filter = CrossBilateralFilter::from_sigmas(&sigma_s, &sigma_r, config)?;
    log::info!("filter config: {:?}", filter.config());

    let depth = P::read_image_png_mono8(&args.depth)?;
    let intensity = P::read_image_png_mono8(&args.intensity)?;
    let mask = match &args.mask {
        Some(path) => P::read_mask_png_mono8(path)?,
        None => depth.map(|&d| d == 0),
    };

    let invalid = mask.as_slice().iter().filter(|&&m| m).count();
    log::info!(
        "depth {}: {} of {} pixels to reconstruct",
        depth.size(),
        invalid,
        depth.size().area()
    );

    let start = Instant::now();
    let filtered = filter.apply(&depth, &intensity, &mask)?;
    log::info!(
        "filtered {} scales in {:.2?}",
        filter.scales().len(),
        start.elapsed()
    );

    P::write_image_png_gray8(&args.output, &filtered)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
