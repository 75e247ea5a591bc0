use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::batch::model::{FrameBatch, MaskBatch};
use crate::foundation::error::MatteboxResult;

/// Naming scheme for preview files written alongside a batch run.
pub trait PreviewNamer {
    /// File name for the preview of frame `pos`.
    fn frame_name(&self, pos: usize) -> String;
    /// File name for the preview of base mask `pos`.
    fn mask_name(&self, pos: usize) -> String;
}

/// Default namer: a session prefix plus zero-padded frame numbers.
#[derive(Clone, Debug)]
pub struct SessionNamer {
    prefix: String,
}

impl SessionNamer {
    /// Namer with a process-unique session prefix.
    pub fn new() -> Self {
        Self {
            prefix: format!(
                "matte_edit_{}_{}",
                std::process::id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or(0)
            ),
        }
    }

    /// Namer with a caller-chosen prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for SessionNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewNamer for SessionNamer {
    fn frame_name(&self, pos: usize) -> String {
        format!("{}_{:05}.png", self.prefix, pos)
    }

    fn mask_name(&self, pos: usize) -> String {
        format!("{}_mask_{:05}.png", self.prefix, pos)
    }
}

/// One preview file written to disk.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PreviewRecord {
    /// File name within the preview directory.
    pub filename: String,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// Ordered preview records for one batch.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct PreviewArtifacts {
    /// One record per frame.
    pub frames: Vec<PreviewRecord>,
    /// One record per base mask, capped at the frame count.
    pub masks: Vec<PreviewRecord>,
}

/// Write 8-bit PNG previews of `frames` and optional `base` masks into `dir`.
///
/// Mask previews are capped at the frame count so the editor's film strips
/// stay aligned. The directory is created when missing.
pub fn write_previews(
    dir: &Path,
    frames: &FrameBatch,
    base: Option<&MaskBatch>,
    namer: &dyn PreviewNamer,
) -> MatteboxResult<PreviewArtifacts> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create preview directory '{}'", dir.display()))?;

    let mut artifacts = PreviewArtifacts::default();
    for (pos, frame) in frames.frames().iter().enumerate() {
        let filename = namer.frame_name(pos);
        let path = dir.join(&filename);
        frame
            .to_rgb8()
            .save(&path)
            .with_context(|| format!("failed to write frame preview '{}'", path.display()))?;
        artifacts.frames.push(PreviewRecord { filename, path });
    }
    if let Some(masks) = base {
        for (pos, mask) in masks.masks().iter().take(frames.len()).enumerate() {
            let filename = namer.mask_name(pos);
            let path = dir.join(&filename);
            mask.to_luma8()
                .save(&path)
                .with_context(|| format!("failed to write mask preview '{}'", path.display()))?;
            artifacts.masks.push(PreviewRecord { filename, path });
        }
    }
    Ok(artifacts)
}

#[cfg(test)]
#[path = "../tests/unit/preview.rs"]
mod tests;
