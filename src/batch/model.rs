use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::foundation::core::{Canvas, FrameRange};
use crate::foundation::error::{MatteboxError, MatteboxResult};

/// One RGB frame. Channels are `f32` in `[0.0, 1.0]`, row-major, interleaved
/// (`width * height * 3` samples).
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRgb {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interleaved RGB samples.
    pub data: Vec<f32>,
}

impl FrameRgb {
    /// Build a frame, rejecting zero dimensions and mismatched buffer sizes.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> MatteboxResult<Self> {
        let canvas = Canvas { width, height };
        if width == 0 || height == 0 {
            return Err(MatteboxError::invalid_input("frame canvas must be non-zero"));
        }
        let expected = canvas.pixel_count() * 3;
        if data.len() != expected {
            return Err(MatteboxError::invalid_input(format!(
                "frame data has {} samples but {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// All-black frame on the given canvas.
    pub fn zeros(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0.0; canvas.pixel_count() * 3],
        }
    }

    /// Canvas of this frame.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Quantize to an 8-bit RGB image (`(v * 255.0) as u8`, saturating).
    pub fn to_rgb8(&self) -> RgbImage {
        let w = self.width as usize;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let base = (y as usize * w + x as usize) * 3;
            Rgb([
                (self.data[base] * 255.0) as u8,
                (self.data[base + 1] * 255.0) as u8,
                (self.data[base + 2] * 255.0) as u8,
            ])
        })
    }
}

/// One grayscale mask. Coverage is `f32` in `[0.0, 1.0]`, row-major
/// (`width * height` samples).
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Coverage samples.
    pub data: Vec<f32>,
}

impl Mask {
    /// Build a mask, rejecting zero dimensions and mismatched buffer sizes.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> MatteboxResult<Self> {
        if width == 0 || height == 0 {
            return Err(MatteboxError::invalid_input("mask canvas must be non-zero"));
        }
        let expected = Canvas { width, height }.pixel_count();
        if data.len() != expected {
            return Err(MatteboxError::invalid_input(format!(
                "mask data has {} samples but {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// All-zero mask on the given canvas.
    pub fn zeros(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0.0; canvas.pixel_count()],
        }
    }

    /// Canvas of this mask.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel-wise maximum with `other`, written into `self`.
    pub fn max_in_place(&mut self, other: &Mask) -> MatteboxResult<()> {
        if self.canvas() != other.canvas() {
            return Err(MatteboxError::invalid_input(format!(
                "mask max needs matching canvases, got {}x{} and {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = a.max(*b);
        }
        Ok(())
    }

    /// Quantize to an 8-bit grayscale image (`(v * 255.0) as u8`, saturating).
    pub fn to_luma8(&self) -> GrayImage {
        let w = self.width as usize;
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([(self.data[y as usize * w + x as usize] * 255.0) as u8])
        })
    }

    /// Lift an 8-bit grayscale image back to `f32` coverage (`v / 255.0`).
    pub fn from_luma8(img: &GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect(),
        }
    }
}

/// Non-empty batch of frames sharing one canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBatch {
    frames: Vec<FrameRgb>,
}

impl FrameBatch {
    /// Build a batch, rejecting empty input and mixed canvases.
    pub fn new(frames: Vec<FrameRgb>) -> MatteboxResult<Self> {
        let Some(first) = frames.first() else {
            return Err(MatteboxError::invalid_input(
                "frame batch must contain at least one frame",
            ));
        };
        let canvas = first.canvas();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(MatteboxError::invalid_input("frame canvas must be non-zero"));
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.canvas() != canvas {
                return Err(MatteboxError::invalid_input(format!(
                    "frame {} is {}x{} but the batch canvas is {}x{}",
                    i, frame.width, frame.height, canvas.width, canvas.height
                )));
            }
        }
        Ok(Self { frames })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; batches are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared canvas.
    pub fn canvas(&self) -> Canvas {
        self.frames[0].canvas()
    }

    /// All frames in order.
    pub fn frames(&self) -> &[FrameRgb] {
        &self.frames
    }

    /// Frame at `pos`, if within the batch.
    pub fn get(&self, pos: usize) -> Option<&FrameRgb> {
        self.frames.get(pos)
    }

    /// Copy of the frames selected by `range`, preserving order.
    pub fn slice(&self, range: FrameRange) -> MatteboxResult<FrameBatch> {
        if range.is_empty() {
            return Err(MatteboxError::invalid_input(
                "frame slice must select at least one frame",
            ));
        }
        if range.end > self.frames.len() {
            return Err(MatteboxError::invalid_input(format!(
                "frame slice [{}, {}) is out of bounds for {} frames",
                range.start,
                range.end,
                self.frames.len()
            )));
        }
        Ok(FrameBatch {
            frames: self.frames[range.start..range.end].to_vec(),
        })
    }
}

/// Non-empty batch of masks sharing one canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskBatch {
    masks: Vec<Mask>,
}

impl MaskBatch {
    /// Build a batch, rejecting empty input and mixed canvases.
    pub fn new(masks: Vec<Mask>) -> MatteboxResult<Self> {
        let Some(first) = masks.first() else {
            return Err(MatteboxError::invalid_input(
                "mask batch must contain at least one mask",
            ));
        };
        let canvas = first.canvas();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(MatteboxError::invalid_input("mask canvas must be non-zero"));
        }
        for (i, mask) in masks.iter().enumerate() {
            if mask.canvas() != canvas {
                return Err(MatteboxError::invalid_input(format!(
                    "mask {} is {}x{} but the batch canvas is {}x{}",
                    i, mask.width, mask.height, canvas.width, canvas.height
                )));
            }
        }
        Ok(Self { masks })
    }

    /// Number of masks.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Always false; batches are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Shared canvas.
    pub fn canvas(&self) -> Canvas {
        self.masks[0].canvas()
    }

    /// All masks in order.
    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    /// Mask at `pos`, if within the batch.
    pub fn get(&self, pos: usize) -> Option<&Mask> {
        self.masks.get(pos)
    }

    /// Mask at `pos % len`, plus whether the lookup wrapped.
    ///
    /// Shorter mask batches repeat over longer frame batches instead of
    /// failing; callers surface the wrap count as a diagnostic.
    pub fn get_wrapped(&self, pos: usize) -> (&Mask, bool) {
        let len = self.masks.len();
        (&self.masks[pos % len], pos >= len)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/model.rs"]
mod tests;
