use crate::foundation::error::{MatteboxError, MatteboxResult};
use crate::pipeline::combine::CombinePolicy;

/// Largest accepted region padding in pixels.
pub const MAX_PADDING: u32 = 500;
/// Largest accepted feather radius in pixels.
pub const MAX_BLUR_RADIUS: u32 = 100;

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
/// How each coverage region is reshaped.
pub enum RegionMode {
    /// Keep the mask's own contours.
    #[default]
    Original,
    /// Replace each region with its padded bounding box.
    BBox,
    /// Replace each region with a square grown from its padded box.
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Shaping applied to a single mask: hole filling, then region reshaping,
/// then edge feathering.
pub struct ShapeParams {
    /// Region mode applied after hole filling.
    #[serde(default)]
    pub mode: RegionMode,
    /// Pixels of padding around each reshaped region.
    #[serde(default)]
    pub padding: u32,
    /// Repaint coverage solid with enclosed holes filled before reshaping.
    #[serde(default)]
    pub fill_holes: bool,
    /// Gaussian feather radius in pixels, 0 to disable.
    #[serde(default)]
    pub blur_radius: u32,
}

impl ShapeParams {
    /// Validate parameter ranges.
    pub fn validate(&self) -> MatteboxResult<()> {
        if self.padding > MAX_PADDING {
            return Err(MatteboxError::invalid_input(format!(
                "padding must be <= {}",
                MAX_PADDING
            )));
        }
        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(MatteboxError::invalid_input(format!(
                "blur_radius must be <= {}",
                MAX_BLUR_RADIUS
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Host-facing parameters for one batch run.
///
/// Field names and defaults match the editor's serialized form, so the
/// host's parameter JSON deserializes directly.
pub struct ProcessParams {
    /// Region mode applied during shaping.
    #[serde(default)]
    pub mode: RegionMode,
    /// Requested first frame of the window.
    #[serde(default)]
    pub start_frame: i64,
    /// Requested end frame (exclusive); 0 or negative selects to the end.
    #[serde(default)]
    pub end_frame: i64,
    /// Pixels of padding around each reshaped region.
    #[serde(default)]
    pub padding: u32,
    /// Repaint coverage solid with enclosed holes filled before reshaping.
    #[serde(default)]
    pub fill_holes: bool,
    /// Gaussian feather radius in pixels, 0 to disable.
    #[serde(default)]
    pub blur_radius: u32,
    /// Shape only the drawn layer, leaving base masks untouched.
    #[serde(default)]
    pub process_drawn_only: bool,
}

impl ProcessParams {
    /// Shaping subset of these parameters.
    pub fn shape(&self) -> ShapeParams {
        ShapeParams {
            mode: self.mode,
            padding: self.padding,
            fill_holes: self.fill_holes,
            blur_radius: self.blur_radius,
        }
    }

    /// Combination policy selected by `process_drawn_only`.
    pub fn policy(&self) -> CombinePolicy {
        if self.process_drawn_only {
            CombinePolicy::DrawnOnly
        } else {
            CombinePolicy::CombineThenShape
        }
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> MatteboxResult<()> {
        self.shape().validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/params.rs"]
mod tests;
