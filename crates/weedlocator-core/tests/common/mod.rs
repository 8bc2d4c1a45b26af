use weedlocator_core::frame::Frame;

/// Brown soil, BGR. Excess green 0, hue 15: background under every algorithm.
pub const SOIL: [u8; 3] = [60, 90, 120];

/// Leaf green, BGR. Excess green 173, hue 57, saturation 164, value 140.
pub const LEAF: [u8; 3] = [50, 140, 60];

/// Pale bright green, BGR. Passes the default exg window but value 220 fails hsv.
pub const BRIGHT_LEAF: [u8; 3] = [100, 220, 120];

/// Dull olive, BGR. Passes the default hsv windows but excess green 20 fails exg.
pub const OLIVE: [u8; 3] = [95, 110, 100];

/// Uniform soil frame.
pub fn soil_frame(width: usize, height: usize) -> Frame {
    Frame::filled(width, height, SOIL)
}

/// Paint a filled rectangle in place.
pub fn paint_rect(frame: &mut Frame, x: usize, y: usize, w: usize, h: usize, bgr: [u8; 3]) {
    for row in y..y + h {
        for col in x..x + w {
            frame.set_bgr(row, col, bgr);
        }
    }
}

/// Soil frame with one leaf-green square.
pub fn frame_with_square(width: usize, height: usize, x: usize, y: usize, size: usize) -> Frame {
    let mut frame = soil_frame(width, height);
    paint_rect(&mut frame, x, y, size, size, LEAF);
    frame
}

/// Deterministic pseudo-random patches of leaf on soil.
pub fn speckled_frame(width: usize, height: usize, seed: u64) -> Frame {
    let mut frame = soil_frame(width, height);
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    for _ in 0..40 {
        let w = 1 + next() % 12;
        let h = 1 + next() % 12;
        let x = next() % (width - w);
        let y = next() % (height - h);
        paint_rect(&mut frame, x, y, w, h, LEAF);
    }
    frame
}
