use crate::foundation::error::{MatteboxError, MatteboxResult};

/// Pixel dimensions shared by every frame and mask in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of pixels on this canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Half-open window of frame positions within a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First selected position.
    pub start: usize,
    /// One past the last selected position.
    pub end: usize, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting inverted bounds.
    pub fn new(start: usize, end: usize) -> MatteboxResult<Self> {
        if start > end {
            return Err(MatteboxError::invalid_input("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of selected frames.
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the range selects nothing.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True when `pos` falls inside the window.
    pub fn contains(self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Iterate the selected positions in order.
    pub fn positions(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
