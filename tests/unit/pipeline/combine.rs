use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use super::*;
use crate::shape::params::RegionMode;

fn canvas20() -> Canvas {
    Canvas {
        width: 20,
        height: 20,
    }
}

// 20x20 RGBA PNG, opaque square over (8..12)^2, transparent elsewhere.
fn blob_uri() -> String {
    let mut img = image::RgbaImage::new(20, 20);
    for y in 8..12 {
        for x in 8..12 {
            img.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
        }
    }
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&buf))
}

fn base_with_dot() -> MaskBatch {
    let mut data = vec![0.0f32; 400];
    data[3 * 20 + 3] = 128.0 / 255.0;
    MaskBatch::new(vec![Mask::new(20, 20, data).unwrap()]).unwrap()
}

#[test]
fn drawn_only_keeps_base_contours() {
    let overlays = OverlayMap::from_entries([(0, blob_uri())]);
    let shape = ShapeParams {
        mode: RegionMode::BBox,
        padding: 2,
        ..ShapeParams::default()
    };
    let base = base_with_dot();

    let out = resolve_frame_mask(
        0,
        canvas20(),
        Some(&base),
        &overlays,
        CombinePolicy::DrawnOnly,
        &shape,
    )
    .unwrap();

    assert_eq!(out.overlay, OverlayStatus::Decoded);
    // The drawn blob becomes its padded box, the base dot stays a dot.
    assert_eq!(out.mask.data[6 * 20 + 6], 1.0);
    assert_eq!(out.mask.data[13 * 20 + 13], 1.0);
    assert_eq!(out.mask.data[3 * 20 + 3], 128.0 / 255.0);
    assert_eq!(out.mask.data[5 * 20 + 5], 0.0);
    assert_eq!(out.mask.data[0], 0.0);
}

#[test]
fn combine_then_shape_boxes_the_base_too() {
    let overlays = OverlayMap::from_entries([(0, blob_uri())]);
    let shape = ShapeParams {
        mode: RegionMode::BBox,
        padding: 2,
        ..ShapeParams::default()
    };
    let base = base_with_dot();

    let out = resolve_frame_mask(
        0,
        canvas20(),
        Some(&base),
        &overlays,
        CombinePolicy::CombineThenShape,
        &shape,
    )
    .unwrap();

    // Both regions get boxes, including the one from the base dot.
    assert_eq!(out.mask.data[3 * 20 + 3], 1.0);
    assert_eq!(out.mask.data[5 * 20 + 5], 1.0);
    assert_eq!(out.mask.data[6 * 20 + 6], 1.0);
    assert_eq!(out.mask.data[0], 0.0);
}

#[test]
fn missing_inputs_give_a_zero_mask() {
    let out = resolve_frame_mask(
        0,
        canvas20(),
        None,
        &OverlayMap::empty(),
        CombinePolicy::CombineThenShape,
        &ShapeParams::default(),
    )
    .unwrap();

    assert_eq!(out.overlay, OverlayStatus::Missing);
    assert!(!out.base_wrapped);
    assert!(out.mask.data.iter().all(|&v| v == 0.0));
}

#[test]
fn failed_overlay_degrades_to_the_base_alone() {
    let overlays = OverlayMap::from_entries([(0, "data:image/png;base64,%%%%".to_string())]);
    let base = base_with_dot();

    let out = resolve_frame_mask(
        0,
        canvas20(),
        Some(&base),
        &overlays,
        CombinePolicy::CombineThenShape,
        &ShapeParams::default(),
    )
    .unwrap();

    assert_eq!(out.overlay, OverlayStatus::Failed);
    assert_eq!(out.mask.data[3 * 20 + 3], 128.0 / 255.0);
    assert_eq!(out.mask.data.iter().filter(|&&v| v > 0.0).count(), 1);
}

#[test]
fn wrapped_base_lookup_sets_the_flag() {
    let masks = MaskBatch::new(
        [0u8, 51, 102]
            .iter()
            .map(|&v| {
                Mask::new(20, 20, vec![f32::from(v) / 255.0; 400]).unwrap()
            })
            .collect(),
    )
    .unwrap();

    let out = resolve_frame_mask(
        5,
        canvas20(),
        Some(&masks),
        &OverlayMap::empty(),
        CombinePolicy::CombineThenShape,
        &ShapeParams::default(),
    )
    .unwrap();

    assert!(out.base_wrapped);
    assert_eq!(out.mask.data[0], 102.0 / 255.0); // 5 % 3 == 2
}

#[test]
fn decoded_overlay_maxes_with_the_base() {
    let overlays = OverlayMap::from_entries([(0, blob_uri())]);
    let base = MaskBatch::new(vec![
        Mask::new(20, 20, vec![64.0 / 255.0; 400]).unwrap(),
    ])
    .unwrap();

    let out = resolve_frame_mask(
        0,
        canvas20(),
        Some(&base),
        &overlays,
        CombinePolicy::CombineThenShape,
        &ShapeParams::default(),
    )
    .unwrap();

    assert_eq!(out.mask.data[9 * 20 + 9], 1.0);
    assert_eq!(out.mask.data[0], 64.0 / 255.0);
}

#[test]
fn mismatched_base_canvas_is_an_error() {
    let base = MaskBatch::new(vec![Mask::zeros(Canvas {
        width: 10,
        height: 10,
    })])
    .unwrap();

    let out = resolve_frame_mask(
        0,
        canvas20(),
        Some(&base),
        &OverlayMap::empty(),
        CombinePolicy::CombineThenShape,
        &ShapeParams::default(),
    );
    assert!(out.is_err());
}
