use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use image::{DynamicImage, GrayImage, Luma, imageops::FilterType};
use tracing::warn;

use crate::batch::model::Mask;
use crate::foundation::core::Canvas;
use crate::foundation::error::{MatteboxError, MatteboxResult};

/// Decode one drawn overlay data URI into a mask on `canvas`.
///
/// Everything after the first comma is treated as base64. The decoded
/// raster's alpha plane becomes the mask when the format carries alpha,
/// otherwise its luma does. Rasters whose size differs from the canvas are
/// resized with Catmull-Rom interpolation. A zero-dimension canvas is
/// rejected, so the result always upholds the mask's non-zero-dims rule.
pub fn decode_data_uri_mask(uri: &str, canvas: Canvas) -> MatteboxResult<Mask> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(MatteboxError::invalid_input(
            "overlay canvas must be non-zero",
        ));
    }
    let Some((_, payload)) = uri.split_once(',') else {
        return Err(MatteboxError::decode(
            "data URI has no comma before its payload",
        ));
    };
    let bytes = BASE64_STANDARD
        .decode(payload)
        .context("base64-decode overlay payload")?;
    let img = image::load_from_memory(&bytes).context("decode overlay raster")?;
    let gray = to_coverage_plane(&img);
    let sized = if gray.dimensions() == (canvas.width, canvas.height) {
        gray
    } else {
        image::imageops::resize(&gray, canvas.width, canvas.height, FilterType::CatmullRom)
    };
    Ok(Mask::from_luma8(&sized))
}

/// Decode an overlay, degrading any failure to an all-zero mask.
///
/// A single bad overlay must never fail a whole batch; the failure is logged
/// and the frame proceeds without drawn coverage.
pub fn decode_or_zero(uri: &str, canvas: Canvas) -> Mask {
    match decode_data_uri_mask(uri, canvas) {
        Ok(mask) => mask,
        Err(err) => {
            warn!("overlay decode failed ({}), using an empty mask", err);
            Mask::zeros(canvas)
        }
    }
}

fn to_coverage_plane(img: &DynamicImage) -> GrayImage {
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            Luma([rgba.get_pixel(x, y)[3]])
        })
    } else {
        img.to_luma8()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/decode.rs"]
mod tests;
