use crate::foundation::core::FrameRange;
use crate::foundation::error::{MatteboxError, MatteboxResult};

/// Resolve a raw `[start, end)` request against a batch of `batch_len` frames.
///
/// An end of 0 or less, or past the batch, selects to the end. Start clamps
/// into `[0, end]`. A window still degenerate after that (start >= end)
/// falls back to the full batch, so the resolved range always selects at
/// least one frame. Only an empty batch is an error.
pub fn resolve_range(
    start_frame: i64,
    end_frame: i64,
    batch_len: usize,
) -> MatteboxResult<FrameRange> {
    if batch_len == 0 {
        return Err(MatteboxError::invalid_input(
            "cannot resolve a frame range over an empty batch",
        ));
    }
    let len = batch_len as i64;
    let end = if end_frame <= 0 || end_frame > len {
        len
    } else {
        end_frame
    };
    let start = start_frame.clamp(0, end);
    if start >= end {
        FrameRange::new(0, batch_len)
    } else {
        FrameRange::new(start as usize, end as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/range.rs"]
mod tests;
