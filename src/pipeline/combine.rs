use tracing::warn;

use crate::batch::model::{Mask, MaskBatch};
use crate::foundation::core::Canvas;
use crate::foundation::error::MatteboxResult;
use crate::overlay::decode::decode_data_uri_mask;
use crate::overlay::map::OverlayMap;
use crate::shape::params::ShapeParams;
use crate::shape::processor::shape_mask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a frame's base and drawn masks merge.
pub enum CombinePolicy {
    /// Shape only the drawn layer, then take the maximum with the base
    /// mask. The base keeps its original contours.
    DrawnOnly,
    /// Take the maximum of base and drawn, then shape the result.
    CombineThenShape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What happened to a frame's drawn overlay.
pub enum OverlayStatus {
    /// No overlay was drawn for this frame.
    Missing,
    /// The overlay decoded into a mask.
    Decoded,
    /// The overlay failed to decode and degraded to an empty mask.
    Failed,
}

/// One frame's resolved mask plus its degradation notes.
#[derive(Clone, Debug)]
pub struct MaskOutcome {
    /// The shaped mask for the frame.
    pub mask: Mask,
    /// Whether the base mask lookup wrapped modulo its batch length.
    pub base_wrapped: bool,
    /// Drawn overlay outcome.
    pub overlay: OverlayStatus,
}

/// Resolve the shaped mask for the frame at `pos`.
///
/// A missing base batch and a missing or undecodable overlay both act as
/// all-zero masks; nothing here fails the frame except mismatched mask
/// dimensions.
pub fn resolve_frame_mask(
    pos: usize,
    canvas: Canvas,
    base: Option<&MaskBatch>,
    overlays: &OverlayMap,
    policy: CombinePolicy,
    shape: &ShapeParams,
) -> MatteboxResult<MaskOutcome> {
    let (base_mask, base_wrapped) = match base {
        Some(batch) => {
            let (mask, wrapped) = batch.get_wrapped(pos);
            (mask.clone(), wrapped)
        }
        None => (Mask::zeros(canvas), false),
    };

    let (drawn_mask, overlay) = match overlays.get(pos) {
        None => (Mask::zeros(canvas), OverlayStatus::Missing),
        Some(uri) => match decode_data_uri_mask(uri, canvas) {
            Ok(mask) => (mask, OverlayStatus::Decoded),
            Err(err) => {
                warn!(
                    "overlay for frame {} failed to decode ({}), using an empty mask",
                    pos, err
                );
                (Mask::zeros(canvas), OverlayStatus::Failed)
            }
        },
    };

    let mask = match policy {
        CombinePolicy::DrawnOnly => {
            let mut shaped = shape_mask(&drawn_mask, shape)?;
            shaped.max_in_place(&base_mask)?;
            shaped
        }
        CombinePolicy::CombineThenShape => {
            let mut combined = drawn_mask;
            combined.max_in_place(&base_mask)?;
            shape_mask(&combined, shape)?
        }
    };

    Ok(MaskOutcome {
        mask,
        base_wrapped,
        overlay,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/combine.rs"]
mod tests;
