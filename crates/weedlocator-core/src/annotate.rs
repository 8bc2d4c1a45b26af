use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BOX_COLOR, DEFAULT_BOX_THICKNESS, DEFAULT_LABEL_COLOR, DEFAULT_MARKER_COLOR,
    DEFAULT_MARKER_RADIUS, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, LABEL_MARGIN,
};
use crate::detection::geometry::{BoundingBox, Centroid};
use crate::frame::Frame;

/// How detections are drawn onto the annotated frame. Colors are BGR.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    #[serde(default = "default_box_color")]
    pub box_color: [u8; 3],
    #[serde(default = "default_marker_color")]
    pub marker_color: [u8; 3],
    #[serde(default = "default_label_color")]
    pub label_color: [u8; 3],
    /// Rectangle outline thickness; drawn inward from the box edge. 0 draws no outline.
    #[serde(default = "default_thickness")]
    pub thickness: u32,
    /// Radius of the filled centroid disc. 0 draws a single pixel.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: u32,
    /// Draw `WEED <n>` (1-based ordinal) next to each box.
    #[serde(default)]
    pub draw_labels: bool,
}

fn default_box_color() -> [u8; 3] {
    DEFAULT_BOX_COLOR
}
fn default_marker_color() -> [u8; 3] {
    DEFAULT_MARKER_COLOR
}
fn default_label_color() -> [u8; 3] {
    DEFAULT_LABEL_COLOR
}
fn default_thickness() -> u32 {
    DEFAULT_BOX_THICKNESS
}
fn default_marker_radius() -> u32 {
    DEFAULT_MARKER_RADIUS
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            box_color: DEFAULT_BOX_COLOR,
            marker_color: DEFAULT_MARKER_COLOR,
            label_color: DEFAULT_LABEL_COLOR,
            thickness: DEFAULT_BOX_THICKNESS,
            marker_radius: DEFAULT_MARKER_RADIUS,
            draw_labels: false,
        }
    }
}

/// Draw boxes, centroid markers and optional labels onto a copy of `frame`.
///
/// The input frame is never modified. Drawing is clipped to the frame.
pub fn annotate(
    frame: &Frame,
    boxes: &[BoundingBox],
    centroids: &[Centroid],
    style: &AnnotationStyle,
) -> Frame {
    let mut out = frame.clone();

    for bbox in boxes {
        draw_rectangle(&mut out, bbox, style.thickness, style.box_color);
    }

    for c in centroids {
        let (x, y) = c.to_pixel();
        draw_disc(&mut out, x as i64, y as i64, style.marker_radius, style.marker_color);
    }

    if style.draw_labels {
        for (i, bbox) in boxes.iter().enumerate() {
            let text = format!("Weed {}", i + 1);
            let (x, y) = label_origin(bbox, style.thickness);
            draw_label(&mut out, x, y, &text, style.label_color);
        }
    }

    out
}

fn put(frame: &mut Frame, x: i64, y: i64, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i64 || y >= frame.height() as i64 {
        return;
    }
    frame.set_bgr(y as usize, x as usize, color);
}

fn draw_rectangle(frame: &mut Frame, bbox: &BoundingBox, thickness: u32, color: [u8; 3]) {
    let left = bbox.x as i64;
    let top = bbox.y as i64;
    let right = bbox.right() as i64 - 1;
    let bottom = bbox.bottom() as i64 - 1;

    for t in 0..thickness as i64 {
        let (l, tp, r, b) = (left + t, top + t, right - t, bottom - t);
        if l > r || tp > b {
            break;
        }
        for x in l..=r {
            put(frame, x, tp, color);
            put(frame, x, b, color);
        }
        for y in tp..=b {
            put(frame, l, y, color);
            put(frame, r, y, color);
        }
    }
}

fn draw_disc(frame: &mut Frame, cx: i64, cy: i64, radius: u32, color: [u8; 3]) {
    let r = radius as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(frame, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Above the box when there is room, otherwise just inside its top edge.
fn label_origin(bbox: &BoundingBox, thickness: u32) -> (i64, i64) {
    let x = bbox.x as i64;
    let above = bbox.y as i64 - (LABEL_MARGIN + GLYPH_HEIGHT) as i64;
    if above >= 0 {
        (x + 1, above)
    } else {
        (x + thickness as i64 + 1, bbox.y as i64 + thickness as i64 + 1)
    }
}

fn draw_label(frame: &mut Frame, mut x: i64, y: i64, text: &str, color: [u8; 3]) {
    for ch in text.chars().flat_map(char::to_uppercase) {
        if let Some(glyph) = glyph_bits(ch) {
            for (row, pattern) in glyph.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (pattern >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                        put(frame, x + col as i64, y + row as i64, color);
                    }
                }
            }
        }
        x += GLYPH_ADVANCE as i64;
    }
}

fn glyph_bits(ch: char) -> Option<[u8; GLYPH_HEIGHT as usize]> {
    match ch {
        'W' => Some([
            0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001,
        ]),
        'E' => Some([
            0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111,
        ]),
        'D' => Some([
            0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110,
        ]),
        '0' => Some([
            0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
        ]),
        '1' => Some([
            0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ]),
        '2' => Some([
            0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111,
        ]),
        '3' => Some([
            0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110,
        ]),
        '4' => Some([
            0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010,
        ]),
        '5' => Some([
            0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110,
        ]),
        '6' => Some([
            0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110,
        ]),
        '7' => Some([
            0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000,
        ]),
        '8' => Some([
            0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110,
        ]),
        '9' => Some([
            0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100,
        ]),
        _ => None,
    }
}
