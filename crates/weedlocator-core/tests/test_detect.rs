#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use ndarray::Array3;

use weedlocator_core::detection::{compute_mask, detect, Algorithm, BoundingBox, DetectionConfig};
use weedlocator_core::error::{ConfigError, WeedError};
use weedlocator_core::frame::Frame;

use common::{
    frame_with_square, paint_rect, soil_frame, speckled_frame, BRIGHT_LEAF, LEAF, OLIVE, SOIL,
};

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_uniform_soil_has_no_detections() {
    let frame = soil_frame(120, 80);
    let result = detect(&frame, &DetectionConfig::default()).unwrap();
    assert!(result.is_empty());
    assert!(result.bounding_boxes.is_empty());
    assert!(result.centroids.is_empty());
    assert_eq!(result.annotated_frame, frame);
}

#[test]
fn test_single_green_square() {
    let frame = frame_with_square(200, 150, 60, 40, 50);
    let result = detect(&frame, &DetectionConfig::default()).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(
        result.bounding_boxes[0],
        BoundingBox {
            x: 60,
            y: 40,
            width: 50,
            height: 50
        }
    );
    assert_relative_eq!(result.centroids[0].x, 84.5, epsilon = 1e-9);
    assert_relative_eq!(result.centroids[0].y, 64.5, epsilon = 1e-9);
    assert_eq!(result.areas[0], 2500);
    // Every border pixel of the square, each once.
    assert_eq!(result.contours[0].len(), 4 * 49);
}

#[test]
fn test_min_area_above_square_drops_it() {
    let frame = frame_with_square(200, 150, 60, 40, 50);
    let config = DetectionConfig::default().with_min_area(2501);
    let result = detect(&frame, &config).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.annotated_frame, frame);
}

#[test]
fn test_min_area_equal_to_square_keeps_it() {
    let frame = frame_with_square(200, 150, 60, 40, 50);
    let config = DetectionConfig::default().with_min_area(2500);
    assert_eq!(detect(&frame, &config).unwrap().len(), 1);
}

#[test]
fn test_inverted_exg_range_is_config_error() {
    let frame = frame_with_square(64, 64, 10, 10, 20);
    let config = DetectionConfig {
        exg_min: 200,
        exg_max: 100,
        ..DetectionConfig::default()
    };
    match detect(&frame, &config) {
        Err(WeedError::Config(ConfigError::InvertedRange { channel, min, max })) => {
            assert_eq!(channel, "exg");
            assert_eq!((min, max), (200, 100));
        }
        other => panic!("expected inverted range error, got {other:?}"),
    }
}

#[test]
fn test_detect_is_deterministic() {
    let frame = speckled_frame(160, 120, 7);
    let config = DetectionConfig::default();
    let first = detect(&frame, &config).unwrap();
    let second = detect(&frame, &config).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn test_result_invariants_hold_on_speckled_frames() {
    for seed in 1..6 {
        let frame = speckled_frame(140, 100, seed);
        for min_area in [0, 1, 20, 60] {
            let config = DetectionConfig::default().with_min_area(min_area);
            let result = detect(&frame, &config).unwrap();

            assert_eq!(result.contours.len(), result.bounding_boxes.len());
            assert_eq!(result.contours.len(), result.centroids.len());
            assert_eq!(result.contours.len(), result.areas.len());
            assert_eq!(result.annotated_frame.width(), frame.width());
            assert_eq!(result.annotated_frame.height(), frame.height());

            for d in result.detections() {
                assert!(d.area as i64 >= min_area);
                let xs = d.contour.points.iter().map(|p| p.x);
                let ys = d.contour.points.iter().map(|p| p.y);
                let min_x = xs.clone().min().unwrap();
                let max_x = xs.max().unwrap();
                let min_y = ys.clone().min().unwrap();
                let max_y = ys.max().unwrap();
                assert_eq!(d.bounding_box.x, min_x);
                assert_eq!(d.bounding_box.y, min_y);
                assert_eq!(d.bounding_box.width, max_x - min_x + 1);
                assert_eq!(d.bounding_box.height, max_y - min_y + 1);
                assert!(d.bounding_box.contains_point(d.centroid.x, d.centroid.y));
            }
        }
    }
}

#[test]
fn test_detections_in_raster_order() {
    let mut frame = soil_frame(100, 100);
    paint_rect(&mut frame, 70, 60, 10, 10, LEAF);
    paint_rect(&mut frame, 10, 60, 10, 10, LEAF);
    paint_rect(&mut frame, 40, 10, 10, 10, LEAF);

    let result = detect(&frame, &DetectionConfig::default()).unwrap();
    let origins: Vec<_> = result.bounding_boxes.iter().map(|b| (b.x, b.y)).collect();
    assert_eq!(origins, vec![(40, 10), (10, 60), (70, 60)]);
}

#[test]
fn test_min_area_filters_small_regions() {
    let mut frame = soil_frame(80, 80);
    paint_rect(&mut frame, 5, 5, 3, 3, LEAF);
    paint_rect(&mut frame, 40, 40, 10, 10, LEAF);

    let all = detect(&frame, &DetectionConfig::default().with_min_area(0)).unwrap();
    assert_eq!(all.areas, vec![9, 100]);

    let large = detect(&frame, &DetectionConfig::default().with_min_area(50)).unwrap();
    assert_eq!(large.areas, vec![100]);
}

#[test]
fn test_max_area_drops_large_regions() {
    let mut frame = soil_frame(80, 80);
    paint_rect(&mut frame, 5, 5, 3, 3, LEAF);
    paint_rect(&mut frame, 40, 40, 10, 10, LEAF);

    let capped = DetectionConfig::default().with_max_area(Some(99));
    let result = detect(&frame, &capped).unwrap();
    assert_eq!(result.areas, vec![9]);
    assert_eq!(result.bounding_boxes[0].x, 5);

    let inclusive = DetectionConfig::default().with_max_area(Some(100));
    assert_eq!(detect(&frame, &inclusive).unwrap().areas, vec![9, 100]);
}

#[test]
fn test_max_area_below_min_area_is_config_error() {
    let frame = soil_frame(10, 10);
    let config = DetectionConfig::default()
        .with_min_area(50)
        .with_max_area(Some(49));
    assert!(matches!(
        detect(&frame, &config),
        Err(WeedError::Config(ConfigError::InvertedAreaRange { min: 50, max: 49 }))
    ));
}

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

fn three_patch_frame() -> Frame {
    let mut frame = soil_frame(120, 60);
    paint_rect(&mut frame, 5, 5, 20, 20, LEAF);
    paint_rect(&mut frame, 45, 5, 20, 20, BRIGHT_LEAF);
    paint_rect(&mut frame, 85, 5, 20, 20, OLIVE);
    frame
}

#[test]
fn test_algorithm_selects_expected_patches() {
    let frame = three_patch_frame();
    let xs = |algorithm: Algorithm| -> Vec<u32> {
        let config = DetectionConfig::default().with_algorithm(algorithm);
        detect(&frame, &config)
            .unwrap()
            .bounding_boxes
            .iter()
            .map(|b| b.x)
            .collect()
    };
    assert_eq!(xs(Algorithm::Exg), vec![5, 45]);
    assert_eq!(xs(Algorithm::Hsv), vec![5, 85]);
    assert_eq!(xs(Algorithm::ExHsv), vec![5]);
}

#[test]
fn test_exhsv_detections_contained_in_exg_and_hsv() {
    for seed in [3, 11, 29] {
        let mut frame = speckled_frame(150, 100, seed);
        paint_rect(&mut frame, 100, 70, 12, 12, BRIGHT_LEAF);
        paint_rect(&mut frame, 5, 80, 12, 12, OLIVE);

        let run = |algorithm| {
            detect(&frame, &DetectionConfig::default().with_algorithm(algorithm)).unwrap()
        };
        let exg = run(Algorithm::Exg);
        let hsv = run(Algorithm::Hsv);
        let exhsv = run(Algorithm::ExHsv);

        for b in &exhsv.bounding_boxes {
            assert!(exg.bounding_boxes.iter().any(|o| o.contains_box(b)));
            assert!(hsv.bounding_boxes.iter().any(|o| o.contains_box(b)));
        }
    }
}

// ---------------------------------------------------------------------------
// Holes, nesting and closing
// ---------------------------------------------------------------------------

#[test]
fn test_ring_with_island_is_one_filled_detection() {
    let mut frame = soil_frame(40, 40);
    paint_rect(&mut frame, 10, 10, 20, 20, LEAF);
    paint_rect(&mut frame, 14, 14, 12, 12, SOIL);
    paint_rect(&mut frame, 18, 18, 4, 4, LEAF);

    let result = detect(&frame, &DetectionConfig::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(
        result.bounding_boxes[0],
        BoundingBox {
            x: 10,
            y: 10,
            width: 20,
            height: 20
        }
    );
    assert_eq!(result.areas[0], 400);
    assert_relative_eq!(result.centroids[0].x, 19.5, epsilon = 1e-9);
    assert_relative_eq!(result.centroids[0].y, 19.5, epsilon = 1e-9);
}

#[test]
fn test_non_convex_centroid_uses_area_moments() {
    // L shape: 20x4 horizontal bar plus 4x16 vertical bar below its left end.
    let mut frame = soil_frame(60, 60);
    paint_rect(&mut frame, 10, 10, 20, 4, LEAF);
    paint_rect(&mut frame, 10, 14, 4, 16, LEAF);

    let result = detect(&frame, &DetectionConfig::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.areas[0], 80 + 64);

    // Bar: 80 px centered (19.5, 11.5). Leg: 64 px centered (11.5, 21.5).
    let cx = (80.0 * 19.5 + 64.0 * 11.5) / 144.0;
    let cy = (80.0 * 11.5 + 64.0 * 21.5) / 144.0;
    assert_relative_eq!(result.centroids[0].x, cx, epsilon = 1e-9);
    assert_relative_eq!(result.centroids[0].y, cy, epsilon = 1e-9);
}

#[test]
fn test_closing_merges_nearby_regions() {
    let mut frame = soil_frame(50, 40);
    paint_rect(&mut frame, 10, 10, 10, 10, LEAF);
    paint_rect(&mut frame, 21, 10, 10, 10, LEAF);

    let open = detect(&frame, &DetectionConfig::default()).unwrap();
    assert_eq!(open.len(), 2);

    let config = DetectionConfig {
        close_iterations: 1,
        ..DetectionConfig::default()
    };
    let closed = detect(&frame, &config).unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(
        closed.bounding_boxes[0],
        BoundingBox {
            x: 10,
            y: 10,
            width: 21,
            height: 10
        }
    );
}

#[test]
fn test_compute_mask_marks_vegetation() {
    let frame = frame_with_square(30, 30, 5, 5, 10);
    let mask = compute_mask(&frame, &DetectionConfig::default()).unwrap();
    assert_eq!(mask.dim(), (30, 30));
    assert_eq!(mask.iter().filter(|&&v| v).count(), 100);
    assert!(mask[[5, 5]]);
    assert!(!mask[[4, 5]]);
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[test]
fn test_empty_frame_is_input_error() {
    let frame = Frame::new(Array3::zeros((0, 0, 3)));
    assert!(matches!(
        detect(&frame, &DetectionConfig::default()),
        Err(WeedError::Input(_))
    ));
}

#[test]
fn test_zero_width_frame_is_input_error() {
    let frame = Frame::new(Array3::zeros((10, 0, 3)));
    assert!(matches!(
        detect(&frame, &DetectionConfig::default()),
        Err(WeedError::Input(_))
    ));
}

#[test]
fn test_wrong_channel_count_is_input_error() {
    let frame = Frame::new(Array3::zeros((8, 8, 4)));
    assert!(matches!(
        detect(&frame, &DetectionConfig::default()),
        Err(WeedError::Input(_))
    ));
    assert!(matches!(
        compute_mask(&frame, &DetectionConfig::default()),
        Err(WeedError::Input(_))
    ));
}

#[test]
fn test_negative_min_area_is_config_error() {
    let frame = soil_frame(10, 10);
    let config = DetectionConfig::default().with_min_area(-1);
    assert!(matches!(
        detect(&frame, &config),
        Err(WeedError::Config(ConfigError::NegativeMinArea(-1)))
    ));
}

#[test]
fn test_hue_beyond_domain_is_config_error() {
    let frame = soil_frame(10, 10);
    let config = DetectionConfig {
        hue_max: 200,
        ..DetectionConfig::default()
    };
    assert!(matches!(
        detect(&frame, &config),
        Err(WeedError::Config(ConfigError::HueOutOfRange { bound: "hue_max", value: 200 }))
    ));
}

#[test]
fn test_each_inverted_pair_is_rejected() {
    let frame = soil_frame(10, 10);
    let configs = [
        ("hue", DetectionConfig { hue_min: 91, hue_max: 90, ..DetectionConfig::default() }),
        (
            "brightness",
            DetectionConfig { brightness_min: 201, brightness_max: 200, ..DetectionConfig::default() },
        ),
        (
            "saturation",
            DetectionConfig { saturation_min: 255, saturation_max: 30, ..DetectionConfig::default() },
        ),
    ];
    for (expected, config) in configs {
        match detect(&frame, &config) {
            Err(WeedError::Config(ConfigError::InvertedRange { channel, .. })) => {
                assert_eq!(channel, expected)
            }
            other => panic!("expected inverted {expected} range, got {other:?}"),
        }
    }
}
