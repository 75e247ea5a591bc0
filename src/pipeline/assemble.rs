use anyhow::Context;
use rayon::prelude::*;
use tracing::debug;

use crate::batch::model::{FrameBatch, MaskBatch};
use crate::foundation::error::{MatteboxError, MatteboxResult};
use crate::overlay::map::OverlayMap;
use crate::pipeline::combine::{OverlayStatus, resolve_frame_mask};
use crate::pipeline::range::resolve_range;
use crate::shape::params::ProcessParams;

/// Worker configuration for the per-frame loop.
#[derive(Clone, Debug, Default)]
pub struct Threading {
    /// Run frames on a dedicated rayon pool instead of sequentially.
    pub parallel: bool,
    /// Pool size; `None` lets rayon pick.
    pub threads: Option<usize>,
}

/// Counters describing degradations taken while assembling a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Frames in the resolved window.
    pub frames_total: u64,
    /// Base mask lookups that wrapped modulo a shorter mask batch.
    pub wrapped_base_lookups: u64,
    /// Drawn overlays that decoded into masks.
    pub overlays_decoded: u64,
    /// Drawn overlays that failed to decode and degraded to empty masks.
    pub overlays_failed: u64,
}

/// Result of one batch run: masks and frames aligned 1:1, plus counters.
#[derive(Clone, Debug)]
pub struct ProcessOutput {
    /// One shaped mask per selected frame.
    pub masks: MaskBatch,
    /// The selected frames, in order.
    pub frames: FrameBatch,
    /// Degradation counters for the run.
    pub stats: ProcessStats,
}

/// Resolve, combine and shape one mask per frame of the selected window.
///
/// Sequential convenience wrapper around
/// [`process_batch_with_threading`].
pub fn process_batch(
    frames: &FrameBatch,
    base: Option<&MaskBatch>,
    overlays: &OverlayMap,
    params: &ProcessParams,
) -> MatteboxResult<ProcessOutput> {
    process_batch_with_threading(frames, base, overlays, params, &Threading::default())
}

/// Resolve, combine and shape one mask per frame of the selected window.
///
/// The output mask batch is aligned index-for-index with the returned
/// frame slice. The parallel path produces bit-identical results to the
/// sequential one; ordering comes from indexed collection, not completion
/// order.
#[tracing::instrument(skip(frames, base, overlays))]
pub fn process_batch_with_threading(
    frames: &FrameBatch,
    base: Option<&MaskBatch>,
    overlays: &OverlayMap,
    params: &ProcessParams,
    threading: &Threading,
) -> MatteboxResult<ProcessOutput> {
    params.validate()?;
    let canvas = frames.canvas();
    if let Some(batch) = base
        && batch.canvas() != canvas
    {
        return Err(MatteboxError::invalid_input(format!(
            "base masks are {}x{} but frames are {}x{}",
            batch.canvas().width,
            batch.canvas().height,
            canvas.width,
            canvas.height
        )));
    }

    let range = resolve_range(params.start_frame, params.end_frame, frames.len())?;
    let policy = params.policy();
    let shape = params.shape();

    let outcomes = if threading.parallel {
        let pool = build_worker_pool(threading.threads)?;
        pool.install(|| {
            range
                .positions()
                .into_par_iter()
                .map(|pos| resolve_frame_mask(pos, canvas, base, overlays, policy, &shape))
                .collect::<MatteboxResult<Vec<_>>>()
        })?
    } else {
        let mut seq = Vec::with_capacity(range.len());
        for pos in range.positions() {
            seq.push(resolve_frame_mask(pos, canvas, base, overlays, policy, &shape)?);
        }
        seq
    };

    let mut stats = ProcessStats {
        frames_total: outcomes.len() as u64,
        ..ProcessStats::default()
    };
    let mut masks = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        if outcome.base_wrapped {
            stats.wrapped_base_lookups += 1;
        }
        match outcome.overlay {
            OverlayStatus::Decoded => stats.overlays_decoded += 1,
            OverlayStatus::Failed => stats.overlays_failed += 1,
            OverlayStatus::Missing => {}
        }
        masks.push(outcome.mask);
    }
    debug!(
        "assembled {} masks ({} wrapped base lookups, {} overlays decoded, {} failed)",
        stats.frames_total,
        stats.wrapped_base_lookups,
        stats.overlays_decoded,
        stats.overlays_failed
    );

    Ok(ProcessOutput {
        masks: MaskBatch::new(masks)?,
        frames: frames.slice(range)?,
        stats,
    })
}

fn build_worker_pool(threads: Option<usize>) -> MatteboxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MatteboxError::invalid_input(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build().context("build rayon worker pool")?)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/assemble.rs"]
mod tests;
