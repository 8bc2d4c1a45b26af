use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::frame::Frame;

use super::config::DetectionConfig;
use super::detect::{detect, DetectionResult};

/// Run [`detect`] on independent frames in parallel.
///
/// Results are returned in input order; a failure on one frame does not
/// affect the others. Calls `on_progress(frames_done)` as each frame finishes,
/// from whichever worker thread finished it.
pub fn detect_batch(
    frames: &[Frame],
    config: &DetectionConfig,
    on_progress: impl Fn(usize) + Send + Sync,
) -> Vec<Result<DetectionResult>> {
    let done = AtomicUsize::new(0);
    let results: Vec<Result<DetectionResult>> = frames
        .par_iter()
        .map(|frame| {
            let result = detect(frame, config);
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            on_progress(completed);
            result
        })
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        frames = frames.len(),
        failed,
        algorithm = %config.algorithm,
        "Batch detection complete"
    );
    results
}
