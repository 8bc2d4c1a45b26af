use serde::{Deserialize, Serialize};

use crate::error::{Result, WeedError};

use super::contour::{Contour, Moments, Region};

/// Minimal axis-aligned rectangle containing a contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && y >= self.y as f64
            && x <= (self.right() - 1) as f64
            && y <= (self.bottom() - 1) as f64
    }

    /// True if `other` lies entirely within this box.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// First-moment center of a filled region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    /// Nearest pixel coordinate (x, y).
    pub fn to_pixel(&self) -> (u32, u32) {
        (self.x.round() as u32, self.y.round() as u32)
    }
}

/// Keep regions whose filled area lies in `[min_area, max_area]`.
pub fn filter_by_area(regions: Vec<Region>, min_area: i64, max_area: Option<i64>) -> Vec<Region> {
    let min_area = min_area.max(0) as f64;
    let max_area = max_area.map_or(f64::INFINITY, |max| max as f64);
    regions
        .into_iter()
        .filter(|region| (min_area..=max_area).contains(&region.area()))
        .collect()
}

/// Bounding box over the contour's points.
pub fn bounding_box(contour: &Contour) -> Result<BoundingBox> {
    let first = contour
        .points
        .first()
        .ok_or_else(|| WeedError::Computation("bounding box of an empty contour".into()))?;

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &contour.points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    Ok(BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Centroid from raw moments: (m10 / m00, m01 / m00).
pub fn centroid(moments: &Moments) -> Result<Centroid> {
    if moments.m00 <= 0.0 {
        return Err(WeedError::Computation(
            "zero-area region reached centroid computation".into(),
        ));
    }
    Ok(Centroid {
        x: moments.m10 / moments.m00,
        y: moments.m01 / moments.m00,
    })
}
