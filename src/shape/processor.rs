use std::collections::HashSet;

use image::{GrayImage, Luma};
use imageproc::contours::find_contours;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::point::Point;
use imageproc::rect::Rect;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::batch::model::Mask;
use crate::foundation::error::{MatteboxError, MatteboxResult};
use crate::shape::blur::{blur_luma8, sigma_for_radius};
use crate::shape::params::{RegionMode, ShapeParams};

/// Shape one mask: repaint coverage solid with holes filled, reshape
/// regions, feather edges.
///
/// All work happens on an 8-bit plane, so the result is quantized to 255ths
/// even when every stage is disabled. Fill and reshape are skipped on
/// all-zero masks; feathering runs whenever a radius is set.
pub fn shape_mask(mask: &Mask, params: &ShapeParams) -> MatteboxResult<Mask> {
    let mut plane = mask.to_luma8();
    let has_coverage = plane.as_raw().iter().any(|&v| v > 0);

    if params.fill_holes && has_coverage {
        solidify_coverage(&mut plane);
    }
    if params.mode != RegionMode::Original && has_coverage {
        plane = reshape_regions(&plane, params.mode, params.padding);
    }
    if params.blur_radius > 0 {
        plane = feather(&plane, params.blur_radius)?;
    }
    Ok(Mask::from_luma8(&plane))
}

/// Repaint coverage solid: every nonzero pixel and every zero region that
/// cannot reach the border become 255.
///
/// This is the filled redraw of the mask's outermost contours. Zero pixels
/// are grouped 4-connected; a group still touching the image border is
/// outside coverage and stays clear, the rest are enclosed holes.
fn solidify_coverage(plane: &mut GrayImage) {
    let (width, height) = plane.dimensions();
    let zeros = GrayImage::from_fn(width, height, |x, y| {
        if plane.get_pixel(x, y)[0] > 0 {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    let labels = connected_components(&zeros, Connectivity::Four, Luma([0u8]));

    let mut border_labels = HashSet::new();
    for x in 0..width {
        border_labels.insert(labels.get_pixel(x, 0)[0]);
        border_labels.insert(labels.get_pixel(x, height - 1)[0]);
    }
    for y in 0..height {
        border_labels.insert(labels.get_pixel(0, y)[0]);
        border_labels.insert(labels.get_pixel(width - 1, y)[0]);
    }

    for (x, y, px) in plane.enumerate_pixels_mut() {
        if px[0] > 0 {
            *px = Luma([255u8]);
            continue;
        }
        // Zero pixels always carry a component label >= 1.
        if !border_labels.contains(&labels.get_pixel(x, y)[0]) {
            *px = Luma([255u8]);
        }
    }
}

/// Replace coverage with one filled box per top-level region.
///
/// Child contours (holes and nested islands) do not get their own boxes.
/// Padded boxes clamp to the canvas; squares keep their size anchored at
/// the unclamped origin, so they can lose squareness at the border.
fn reshape_regions(plane: &GrayImage, mode: RegionMode, padding: u32) -> GrayImage {
    let (width, height) = plane.dimensions();
    let contours = find_contours::<i32>(plane);
    let mut boxes = GrayImage::new(width, height);
    let (w, h) = (i64::from(width), i64::from(height));
    let pad = i64::from(padding);

    for contour in contours.iter().filter(|c| c.parent.is_none()) {
        let Some((min_x, min_y, max_x, max_y)) = point_bounds(&contour.points) else {
            continue;
        };
        let mut x1 = (i64::from(min_x) - pad).max(0);
        let mut y1 = (i64::from(min_y) - pad).max(0);
        let mut x2 = (i64::from(max_x) + 1 + pad).min(w);
        let mut y2 = (i64::from(max_y) + 1 + pad).min(h);

        if mode == RegionMode::Square {
            let size = (x2 - x1).max(y2 - y1);
            let left = (x1 + x2) / 2 - size / 2;
            let top = (y1 + y2) / 2 - size / 2;
            x1 = left.max(0);
            y1 = top.max(0);
            x2 = (left + size).min(w);
            y2 = (top + size).min(h);
        }

        if x2 <= x1 || y2 <= y1 {
            continue;
        }
        draw_filled_rect_mut(
            &mut boxes,
            Rect::at(x1 as i32, y1 as i32).of_size((x2 - x1) as u32, (y2 - y1) as u32),
            Luma([255u8]),
        );
    }
    boxes
}

fn point_bounds(points: &[Point<i32>]) -> Option<(i32, i32, i32, i32)> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some((min_x, min_y, max_x, max_y))
}

fn feather(plane: &GrayImage, radius: u32) -> MatteboxResult<GrayImage> {
    let (width, height) = plane.dimensions();
    let blurred = blur_luma8(plane.as_raw(), width, height, radius, sigma_for_radius(radius))?;
    GrayImage::from_raw(width, height, blurred)
        .ok_or_else(|| MatteboxError::invalid_input("blurred plane size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/shape/processor.rs"]
mod tests;
