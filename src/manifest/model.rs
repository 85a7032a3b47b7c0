use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Authoring-time description of a reel, as written by the encoder into `manifest.json`.
///
/// The manifest is immutable once loaded and is the source of truth for every derived
/// [`Settings`](crate::Settings) value. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Output width in pixels.
    pub video_width: u32,
    /// Output height in pixels.
    pub video_height: u32,
    /// Number of sprite-diff images (`diff_001` .. `diff_NNN`).
    pub images_required: u32,
    /// Total frame count, including the full base image at frame 0.
    pub frame_count: u32,
    /// Edge length of a square block in pixels.
    pub block_size: u32,
    /// Edge length of a sprite sheet measured in blocks.
    pub source_grid: u32,
    /// Authoring frame rate; may be fractional.
    pub frames_per_second: f64,
    /// Image format tag (`JPEG`, `PNG`, `GIF`); anything else is treated as JPEG.
    #[serde(default)]
    pub format: String,
    /// Raw diff strings, one per playable frame.
    pub frames: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::manifest(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> ReelResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ReelError::manifest(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::manifest(format!("open manifest '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Image container used for the base image and the sprite sheets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// `.jpg`
    #[default]
    Jpeg,
    /// `.png`
    Png,
    /// `.gif`
    Gif,
}

impl ImageFormat {
    /// Map a manifest format tag to a format; unrecognized tags fall back to JPEG.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "JPEG" => Self::Jpeg,
            "PNG" => Self::Png,
            "GIF" => Self::Gif,
            _ => Self::Jpeg,
        }
    }

    /// Lowercase file extension used by the asset naming convention.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
