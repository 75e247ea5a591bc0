//! Mattebox is a per-frame mask compositing and shaping engine for video
//! frame batches.
//!
//! Mattebox v0.1.0 turns a frame batch plus optional base masks and drawn
//! overlay data into exactly one shaped mask per selected frame.
//!
//! # Pipeline overview
//!
//! 1. **Select**: [`resolve_range`] turns raw start/end requests into a valid `[start, end)` window
//! 2. **Decode**: [`OverlayMap`] and [`decode_data_uri_mask`] turn drawn overlays into masks
//! 3. **Combine**: [`resolve_frame_mask`] merges base and drawn coverage under a [`CombinePolicy`]
//! 4. **Shape**: [`shape_mask`] fills holes, reshapes regions and feathers edges
//! 5. **Assemble**: [`process_batch`] runs the per-frame loop and aligns masks 1:1 with frames
//!
//! The key design constraints in v0.1.0:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Degrade, don't abort**: a malformed overlay costs one frame's coverage, never the batch.
//! - **Deterministic**: sequential and parallel runs produce bit-identical masks.
//! - **Coverage stays in [0, 1]**: mask math is `f32`; shaping quantizes to 255ths.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod foundation;
mod overlay;
mod pipeline;
mod preview;
mod shape;

pub use batch::model::{FrameBatch, FrameRgb, Mask, MaskBatch};
pub use foundation::core::{Canvas, FrameRange};
pub use foundation::error::{MatteboxError, MatteboxResult};
pub use overlay::decode::{decode_data_uri_mask, decode_or_zero};
pub use overlay::map::OverlayMap;
pub use pipeline::assemble::{
    ProcessOutput, ProcessStats, Threading, process_batch, process_batch_with_threading,
};
pub use pipeline::combine::{CombinePolicy, MaskOutcome, OverlayStatus, resolve_frame_mask};
pub use pipeline::range::resolve_range;
pub use preview::{PreviewArtifacts, PreviewNamer, PreviewRecord, SessionNamer, write_previews};
pub use shape::blur::{blur_luma8, sigma_for_radius};
pub use shape::params::{MAX_BLUR_RADIUS, MAX_PADDING, ProcessParams, RegionMode, ShapeParams};
pub use shape::processor::shape_mask;
