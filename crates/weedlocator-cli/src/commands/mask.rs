use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use weedlocator_core::detection::compute_mask;
use weedlocator_core::io::image_io::{load_frame, save_mask};

use super::thresholds::ThresholdArgs;

#[derive(Args)]
pub struct MaskArgs {
    /// Input image
    pub image: PathBuf,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Output mask file (PNG)
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: &MaskArgs) -> Result<()> {
    let config = args.thresholds.resolve()?;
    let frame = load_frame(&args.image)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;

    let mask = compute_mask(&frame, &config)?;
    save_mask(&mask, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let lit = mask.iter().filter(|&&v| v).count();
    println!(
        "Mask [{}]: {lit} of {} pixels selected, saved to {}",
        config.algorithm,
        mask.len(),
        args.output.display()
    );
    Ok(())
}
