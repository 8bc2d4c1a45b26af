use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use weedlocator_core::detection::{detect_batch, BoundingBox, Centroid, DetectionResult};
use weedlocator_core::frame::Frame;
use weedlocator_core::io::image_io::{load_frame, save_frame};

use super::thresholds::ThresholdArgs;
use crate::summary::print_detection_summary;

#[derive(Args)]
pub struct DetectArgs {
    /// Input images
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Draw an ordinal label above each box
    #[arg(long)]
    pub labels: bool,

    /// Output directory for annotated images (defaults to each input's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON report of all detections
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Serialize)]
struct ImageReport {
    path: PathBuf,
    count: usize,
    boxes: Vec<BoundingBox>,
    centroids: Vec<Centroid>,
    areas: Vec<u64>,
}

impl ImageReport {
    fn new(path: &Path, result: &DetectionResult) -> Self {
        Self {
            path: path.to_path_buf(),
            count: result.len(),
            boxes: result.bounding_boxes.clone(),
            centroids: result.centroids.clone(),
            areas: result.areas.clone(),
        }
    }
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let mut config = args.thresholds.resolve()?;
    if args.labels {
        config.annotation.draw_labels = true;
    }

    if let Some(ref dir) = args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    print_detection_summary(&config, args.images.len(), args.output.as_deref());

    let error_style = Style::new().red().bold();
    let total = args.images.len();
    let mut failed = 0usize;

    // Inputs are read one at a time; detection fans out afterwards.
    let mut paths = Vec::with_capacity(total);
    let mut frames: Vec<Frame> = Vec::with_capacity(total);
    for path in &args.images {
        match load_frame(path) {
            Ok(frame) => {
                paths.push(path.as_path());
                frames.push(frame);
            }
            Err(e) => {
                eprintln!("{} {}: {e}", error_style.apply_to("error"), path.display());
                failed += 1;
            }
        }
    }

    let pb = if frames.len() > 1 {
        let pb = ProgressBar::new(frames.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        pb.set_message("Detecting");
        pb
    } else {
        ProgressBar::hidden()
    };

    let results = detect_batch(&frames, &config, |done| pb.set_position(done as u64));
    pb.finish_and_clear();

    let (reports, write_failures) = write_results(&paths, results, args.output.as_deref());
    failed += write_failures;

    if let Some(ref report_path) = args.report {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(report_path, json)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
        println!("Report saved to {}", report_path.display());
    }

    if failed > 0 {
        bail!("{failed} of {total} images failed");
    }
    Ok(())
}

/// Save every annotated frame and collect report entries.
///
/// A failed detection or write is printed and counted; the remaining images
/// are still processed.
fn write_results(
    paths: &[&Path],
    results: Vec<weedlocator_core::Result<DetectionResult>>,
    output_dir: Option<&Path>,
) -> (Vec<ImageReport>, usize) {
    let error_style = Style::new().red().bold();
    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0usize;

    for (path, result) in paths.iter().zip(results) {
        let result = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{} {}: {e}", error_style.apply_to("error"), path.display());
                failed += 1;
                continue;
            }
        };

        let out_path = annotated_output_path(path, output_dir);
        if let Err(e) = save_frame(&result.annotated_frame, &out_path) {
            eprintln!(
                "{} failed to write {}: {e}",
                error_style.apply_to("error"),
                out_path.display()
            );
            failed += 1;
            continue;
        }

        println!("{}: Detected {} weeds", path.display(), result.len());
        reports.push(ImageReport::new(path, &result));
    }

    (reports, failed)
}

fn annotated_output_path(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let dir = output_dir
        .or_else(|| source.parent())
        .unwrap_or(Path::new("."));
    dir.join(format!("{stem}_weeds.png"))
}
