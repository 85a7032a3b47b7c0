use crate::{
    foundation::core::round_decimals,
    foundation::error::{ReelError, ReelResult},
    manifest::model::{ImageFormat, Manifest},
    playback::progress::format_time,
};

/// Largest frame buffer a reel may ask for, in bytes (RGBA8, `videoWidth * videoHeight * 4`).
pub const MAX_FRAME_BYTES: u64 = 1 << 30;

/// Playback settings derived from a [`Manifest`]; immutable for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Output width in pixels.
    pub video_width: u32,
    /// Output height in pixels.
    pub video_height: u32,
    /// Number of sprite sheets.
    pub images_required: u32,
    /// Number of diff frames (`manifest.frameCount - 1`); frame 0 is the base image.
    pub frame_count: u32,
    /// Block edge length in pixels.
    pub block_size: u32,
    /// Sprite sheet edge length in blocks.
    pub source_grid: u32,
    /// Frame rate rounded to the nearest integer.
    pub frames_per_second: u32,
    /// Asset image format.
    pub format: ImageFormat,
}

impl Settings {
    /// Number of block columns in the destination grid (`ceil(videoWidth / blockSize)`).
    pub fn columns(&self) -> u32 {
        self.video_width.div_ceil(self.block_size)
    }

    /// Number of block rows in the destination grid.
    pub fn rows(&self) -> u32 {
        self.video_height.div_ceil(self.block_size)
    }

    /// Blocks held by one sprite sheet.
    pub fn blocks_per_sheet(&self) -> u64 {
        u64::from(self.source_grid) * u64::from(self.source_grid)
    }

    /// Size of one RGBA8 frame in bytes, or `None` if it does not fit in a `u64`.
    pub fn frame_bytes(&self) -> Option<u64> {
        u64::from(self.video_width)
            .checked_mul(u64::from(self.video_height))?
            .checked_mul(4)
    }

    /// Total blocks available across every sprite sheet.
    pub fn cursor_capacity(&self) -> u64 {
        u64::from(self.images_required) * self.blocks_per_sheet()
    }

    /// Duration of the reel formatted as `mm:ss.mmm`.
    pub fn max_time(&self) -> String {
        format_time(f64::from(self.frame_count) / f64::from(self.frames_per_second))
    }

    /// Target inter-frame interval in milliseconds for a normalized `speed`.
    pub fn frame_interval_ms(&self, speed: f64) -> f64 {
        let ms = 1000.0 / f64::from(self.frames_per_second);
        round_decimals(ms / speed, 2)
    }
}

/// Validate `manifest` and derive the session [`Settings`].
#[tracing::instrument(skip(manifest))]
pub fn interpret(manifest: &Manifest) -> ReelResult<Settings> {
    require_positive("videoWidth", manifest.video_width)?;
    require_positive("videoHeight", manifest.video_height)?;
    require_positive("blockSize", manifest.block_size)?;
    require_positive("sourceGrid", manifest.source_grid)?;
    if manifest.frame_count == 0 {
        return Err(ReelError::manifest(
            "frameCount must be >= 1 (frame 0 is the base image)",
        ));
    }

    let fps = manifest.frames_per_second;
    if !fps.is_finite() || fps.round() < 1.0 || fps.round() > f64::from(u32::MAX) {
        return Err(ReelError::manifest(format!(
            "framesPerSecond must round to a positive integer, got {fps}"
        )));
    }

    let settings = Settings {
        video_width: manifest.video_width,
        video_height: manifest.video_height,
        images_required: manifest.images_required,
        frame_count: manifest.frame_count - 1,
        block_size: manifest.block_size,
        source_grid: manifest.source_grid,
        frames_per_second: fps.round() as u32,
        format: ImageFormat::from_tag(&manifest.format),
    };

    require_frame_size(&settings)?;

    let needed = settings.frame_count as usize;
    if manifest.frames.len() < needed {
        return Err(ReelError::manifest(format!(
            "manifest lists {} diff frames but frameCount {} needs {needed}",
            manifest.frames.len(),
            manifest.frame_count
        )));
    }

    tracing::debug!(
        width = settings.video_width,
        height = settings.video_height,
        frames = settings.frame_count,
        fps = settings.frames_per_second,
        sheets = settings.images_required,
        "interpreted manifest"
    );
    Ok(settings)
}

/// Reject settings whose frame buffer would exceed [`MAX_FRAME_BYTES`].
pub(crate) fn require_frame_size(settings: &Settings) -> ReelResult<()> {
    match settings.frame_bytes() {
        Some(bytes) if bytes <= MAX_FRAME_BYTES => Ok(()),
        _ => Err(ReelError::manifest(format!(
            "video size {}x{} exceeds the {MAX_FRAME_BYTES}-byte frame limit",
            settings.video_width, settings.video_height
        ))),
    }
}

fn require_positive(field: &str, value: u32) -> ReelResult<()> {
    if value == 0 {
        return Err(ReelError::manifest(format!("{field} must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/settings.rs"]
mod tests;
