/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a color frame (B, G, R).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Largest representable hue in the 8-bit HSV convention (degrees / 2).
pub const HUE_DOMAIN_MAX: u8 = 179;

/// Scale applied to the chromatic excess-green index before clamping to u8.
pub const EXG_SCALE: f32 = 255.0;

/// Default lower bound of the excess-green window.
pub const DEFAULT_EXG_MIN: u8 = 30;

/// Default upper bound of the excess-green window.
pub const DEFAULT_EXG_MAX: u8 = 250;

/// Default lower hue bound (8-bit hue, so 60 degrees).
pub const DEFAULT_HUE_MIN: u8 = 30;

/// Default upper hue bound (8-bit hue, so 180 degrees).
pub const DEFAULT_HUE_MAX: u8 = 90;

pub const DEFAULT_BRIGHTNESS_MIN: u8 = 5;
pub const DEFAULT_BRIGHTNESS_MAX: u8 = 200;
pub const DEFAULT_SATURATION_MIN: u8 = 30;
pub const DEFAULT_SATURATION_MAX: u8 = 255;

/// Default minimum filled-region area (pixels) for a detection.
pub const DEFAULT_MIN_AREA: i64 = 1;

/// Rectangle outline color in BGR order (red).
pub const DEFAULT_BOX_COLOR: [u8; 3] = [0, 0, 255];

/// Centroid marker color in BGR order (yellow).
pub const DEFAULT_MARKER_COLOR: [u8; 3] = [0, 255, 255];

/// Ordinal label color in BGR order (white).
pub const DEFAULT_LABEL_COLOR: [u8; 3] = [255, 255, 255];

/// Rectangle outline thickness in pixels.
pub const DEFAULT_BOX_THICKNESS: u32 = 2;

/// Radius of the filled centroid marker in pixels.
pub const DEFAULT_MARKER_RADIUS: u32 = 2;

/// Width and height of one glyph in the built-in label font.
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal advance between label glyphs.
pub const GLYPH_ADVANCE: u32 = 6;

/// Gap between a bounding box and the label drawn above it.
pub const LABEL_MARGIN: u32 = 3;
