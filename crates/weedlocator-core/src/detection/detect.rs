use ndarray::Array2;
use tracing::debug;

use crate::annotate::annotate;
use crate::color::transform;
use crate::error::Result;
use crate::frame::Frame;

use super::config::DetectionConfig;
use super::contour::{find_external_contours, Contour};
use super::geometry::{bounding_box, centroid, filter_by_area, BoundingBox, Centroid};
use super::morphology::morphological_closing;
use super::threshold::build_mask;

/// Everything found in one frame. The per-detection vectors are parallel:
/// index `i` of each describes the same region.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionResult {
    pub contours: Vec<Contour>,
    pub bounding_boxes: Vec<BoundingBox>,
    pub centroids: Vec<Centroid>,
    /// Filled pixel count of each region, holes included.
    pub areas: Vec<u64>,
    /// Copy of the input frame with detections drawn on it.
    pub annotated_frame: Frame,
}

/// One row of a [`DetectionResult`].
#[derive(Clone, Copy, Debug)]
pub struct Detection<'a> {
    pub contour: &'a Contour,
    pub bounding_box: BoundingBox,
    pub centroid: Centroid,
    pub area: u64,
}

impl DetectionResult {
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn detections(&self) -> impl Iterator<Item = Detection<'_>> {
        self.contours
            .iter()
            .zip(&self.bounding_boxes)
            .zip(&self.centroids)
            .zip(&self.areas)
            .map(|(((contour, &bounding_box), &centroid), &area)| Detection {
                contour,
                bounding_box,
                centroid,
                area,
            })
    }
}

/// Locate vegetation in a BGR frame.
///
/// Pipeline: validate -> color transform -> threshold mask -> optional
/// closing -> external contours -> area filter -> boxes and centroids ->
/// annotation.
///
/// Fails before any pixel is processed if the frame or the configuration is
/// invalid; no partial result is ever returned.
pub fn detect(frame: &Frame, config: &DetectionConfig) -> Result<DetectionResult> {
    frame.validate()?;
    config.validate()?;

    let mask = segment(frame, config);
    let regions = find_external_contours(&mask);
    let found = regions.len();
    let kept = filter_by_area(regions, config.min_area, config.max_area);

    let mut contours = Vec::with_capacity(kept.len());
    let mut bounding_boxes = Vec::with_capacity(kept.len());
    let mut centroids = Vec::with_capacity(kept.len());
    let mut areas = Vec::with_capacity(kept.len());

    for region in kept {
        bounding_boxes.push(bounding_box(&region.contour)?);
        centroids.push(centroid(&region.moments)?);
        areas.push(region.moments.m00 as u64);
        contours.push(region.contour);
    }

    let annotated_frame = annotate(frame, &bounding_boxes, &centroids, &config.annotation);

    debug!(
        algorithm = %config.algorithm,
        width = frame.width(),
        height = frame.height(),
        regions = found,
        kept = contours.len(),
        "Detection complete"
    );

    Ok(DetectionResult {
        contours,
        bounding_boxes,
        centroids,
        areas,
        annotated_frame,
    })
}

/// The binary vegetation mask `detect` searches for contours, after closing.
pub fn compute_mask(frame: &Frame, config: &DetectionConfig) -> Result<Array2<bool>> {
    frame.validate()?;
    config.validate()?;
    Ok(segment(frame, config))
}

fn segment(frame: &Frame, config: &DetectionConfig) -> Array2<bool> {
    let channels = transform(frame);
    let mask = build_mask(&channels, config);
    if config.close_iterations > 0 {
        morphological_closing(&mask, config.close_iterations)
    } else {
        mask
    }
}
