use imageproc::contours::{find_contours, BorderType};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::frame::mask_to_gray;

use super::components::{label_components, Connectivity};
use super::morphology::fill_holes;

/// Integer pixel coordinate: x = column, y = row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Closed outer boundary of one connected foreground region in tracing order,
/// starting at the region's first pixel in raster order. The last point
/// connects back to the first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Raw spatial moments of a filled region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    /// Pixel count.
    pub m00: f64,
    /// Sum of x over all pixels.
    pub m10: f64,
    /// Sum of y over all pixels.
    pub m01: f64,
}

/// An extracted region: its outer contour plus the moments of the area it encloses.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub contour: Contour,
    pub moments: Moments,
}

impl Region {
    /// Filled pixel count, holes included.
    pub fn area(&self) -> f64 {
        self.moments.m00
    }
}

/// Find the outer boundary of every 8-connected foreground region.
///
/// Only top-level outer borders are kept, so a region nested inside another
/// region's hole is part of the enclosing region and is not reported. Moments
/// come from the hole-filled mask. Regions are returned in raster order of
/// their first pixel. An empty mask yields no regions.
pub fn find_external_contours(mask: &Array2<bool>) -> Vec<Region> {
    let filled = fill_holes(mask);
    let labeling = label_components(&filled, Connectivity::Eight);

    let mut regions: Vec<(u32, Region)> = find_contours::<i32>(&mask_to_gray(mask))
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .filter_map(|c| {
            let mut points: Vec<Point> = c
                .points
                .iter()
                .map(|p| Point::new(p.x as u32, p.y as u32))
                .collect();
            let first = *points.first()?;
            let label = labeling.labels[[first.y as usize, first.x as usize]];
            let component = labeling.components.get(label.checked_sub(1)? as usize)?;

            let (row, col) = component.first;
            let start = Point::new(col as u32, row as u32);
            if let Some(pos) = points.iter().position(|&p| p == start) {
                points.rotate_left(pos);
            }

            let region = Region {
                contour: Contour { points },
                moments: Moments {
                    m00: component.area as f64,
                    m10: component.sum_col as f64,
                    m01: component.sum_row as f64,
                },
            };
            Some((label, region))
        })
        .collect();

    regions.sort_by_key(|(label, _)| *label);
    regions.into_iter().map(|(_, region)| region).collect()
}
