use ndarray::Array2;

use super::components::{label_components, touches_border, Connectivity};

/// Morphological closing (dilation followed by erosion) with a 3x3 square
/// kernel, repeated `iterations` times.
///
/// Bridges one-pixel gaps and fills pinholes in foreground regions.
pub fn morphological_closing(mask: &Array2<bool>, iterations: u32) -> Array2<bool> {
    let mut result = mask.clone();
    for _ in 0..iterations {
        let dilated = dilate(&result);
        result = erode(&dilated);
    }
    result
}

/// Set every background region that cannot reach the image border to foreground.
///
/// Background is grouped with 4-connectivity, the dual of 8-connected foreground.
pub fn fill_holes(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let background = mask.mapv(|v| !v);
    let labeling = label_components(&background, Connectivity::Four);

    let mut is_hole = vec![false; labeling.components.len() + 1];
    for component in &labeling.components {
        is_hole[component.label as usize] = !touches_border(component.bbox, h, w);
    }

    let mut filled = mask.clone();
    for ((row, col), &lbl) in labeling.labels.indexed_iter() {
        if lbl > 0 && is_hole[lbl as usize] {
            filled[[row, col]] = true;
        }
    }
    filled
}

/// Binary erosion: a pixel stays true only if all in-bounds pixels in its 3x3
/// neighborhood are true. The border never erodes.
fn erode(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let mut all_true = true;
            for dr in -1..=1_i32 {
                for dc in -1..=1_i32 {
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    if nr < 0 || nr >= h as i32 || nc < 0 || nc >= w as i32 {
                        continue;
                    }
                    if !mask[[nr as usize, nc as usize]] {
                        all_true = false;
                        break;
                    }
                }
                if !all_true {
                    break;
                }
            }
            result[[row, col]] = all_true;
        }
    }

    result
}

/// Binary dilation: a pixel becomes true if ANY pixel in its 3x3 neighborhood is true.
fn dilate(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            let mut any_true = false;
            for dr in -1..=1_i32 {
                for dc in -1..=1_i32 {
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    if nr >= 0
                        && nr < h as i32
                        && nc >= 0
                        && nc < w as i32
                        && mask[[nr as usize, nc as usize]]
                    {
                        any_true = true;
                        break;
                    }
                }
                if any_true {
                    break;
                }
            }
            result[[row, col]] = any_true;
        }
    }

    result
}
