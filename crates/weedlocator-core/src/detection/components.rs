use ndarray::Array2;

/// Pixel adjacency used when grouping foreground pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge neighbors only.
    Four,
    /// Edge and corner neighbors.
    Eight,
}

/// Statistics for a single connected component.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentStats {
    /// Label of this component in [`Labeling::labels`], starting at 1.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
    /// First pixel of the component in raster order: (row, col).
    pub first: (usize, usize),
    /// Sum of column indices over all pixels (first moment in x).
    pub sum_col: u64,
    /// Sum of row indices over all pixels (first moment in y).
    pub sum_row: u64,
}

/// Label image plus per-component statistics.
#[derive(Clone, Debug)]
pub struct Labeling {
    /// Component label per pixel; 0 = background.
    pub labels: Array2<u32>,
    /// Components in raster order of their first pixel; `components[i].label == i + 1`.
    pub components: Vec<ComponentStats>,
}

/// Perform connected component analysis on a binary mask using two-pass
/// labeling with union-find.
///
/// Labels are compact and follow raster order of each component's first pixel,
/// so the result is fully determined by the mask.
pub fn label_components(mask: &Array2<bool>, connectivity: Connectivity) -> Labeling {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return Labeling {
            labels,
            components: Vec::new(),
        };
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels from already-visited neighbors.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbors = [0u32; 4];
            neighbors[0] = if col > 0 { labels[[row, col - 1]] } else { 0 };
            neighbors[1] = if row > 0 { labels[[row - 1, col]] } else { 0 };
            if connectivity == Connectivity::Eight && row > 0 {
                neighbors[2] = if col > 0 { labels[[row - 1, col - 1]] } else { 0 };
                neighbors[3] = if col + 1 < w { labels[[row - 1, col + 1]] } else { 0 };
            }

            let smallest = neighbors.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(smallest) => {
                    labels[[row, col]] = smallest;
                    for &other in neighbors.iter().filter(|&&l| l > 0 && l != smallest) {
                        union(&mut parent, smallest, other);
                    }
                }
            }
        }
    }

    // Flatten parent references, then map roots to compact labels. Roots are
    // the smallest provisional label of each component, so iterating labels in
    // increasing order visits components in raster order.
    let mut compact = vec![0u32; next_label as usize];
    let mut count: u32 = 0;
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
        if parent[i] == i as u32 {
            count += 1;
            compact[i] = count;
        }
    }

    // Pass 2: resolve labels and collect stats.
    let mut components: Vec<Option<ComponentStats>> = vec![None; count as usize];

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let resolved = compact[parent[lbl as usize] as usize];
            labels[[row, col]] = resolved;

            let entry = components[resolved as usize - 1].get_or_insert(ComponentStats {
                label: resolved,
                area: 0,
                bbox: (row, row, col, col),
                first: (row, col),
                sum_col: 0,
                sum_row: 0,
            });

            entry.area += 1;
            entry.sum_col += col as u64;
            entry.sum_row += row as u64;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    Labeling {
        labels,
        components: components.into_iter().flatten().collect(),
    }
}

/// Returns true if the component's bounding box touches any edge of the image.
pub fn touches_border(bbox: (usize, usize, usize, usize), height: usize, width: usize) -> bool {
    let (min_row, max_row, min_col, max_col) = bbox;
    min_row == 0 || max_row >= height - 1 || min_col == 0 || max_col >= width - 1
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
