use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameBuffer;

/// Size announced to a [`Surface`] once the reel's dimensions are known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Presentation target for composited frames.
///
/// The core never draws to the screen itself: it hands the frame buffer to a surface once per
/// drawn frame, in increasing frame order within one pass.
pub trait Surface {
    /// Called once when the session learns the video size, before any frame is presented.
    fn begin(&mut self, cfg: SurfaceConfig) -> ReelResult<()>;
    /// Present the buffer after displayed frame `frame` was composited.
    fn present(&mut self, frame: usize, buffer: &FrameBuffer) -> ReelResult<()>;
    /// Playback position was reset and the visible surface should be blanked.
    fn clear(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn begin(&mut self, cfg: SurfaceConfig) -> ReelResult<()> {
        (**self).begin(cfg)
    }

    fn present(&mut self, frame: usize, buffer: &FrameBuffer) -> ReelResult<()> {
        (**self).present(frame, buffer)
    }

    fn clear(&mut self) -> ReelResult<()> {
        (**self).clear()
    }
}

/// Surface that discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn begin(&mut self, _cfg: SurfaceConfig) -> ReelResult<()> {
        Ok(())
    }

    fn present(&mut self, _frame: usize, _buffer: &FrameBuffer) -> ReelResult<()> {
        Ok(())
    }
}

/// In-memory surface for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    cfg: Option<SurfaceConfig>,
    frames: Vec<(usize, FrameBuffer)>,
    clears: usize,
}

impl InMemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SurfaceConfig> {
        self.cfg
    }

    /// Presented frames in presentation order.
    pub fn frames(&self) -> &[(usize, FrameBuffer)] {
        &self.frames
    }

    /// Indices of presented frames in presentation order.
    pub fn frame_indices(&self) -> Vec<usize> {
        self.frames.iter().map(|(i, _)| *i).collect()
    }

    /// How many times the surface was cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Surface for InMemorySurface {
    fn begin(&mut self, cfg: SurfaceConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn present(&mut self, frame: usize, buffer: &FrameBuffer) -> ReelResult<()> {
        self.frames.push((frame, buffer.clone()));
        Ok(())
    }

    fn clear(&mut self) -> ReelResult<()> {
        self.clears += 1;
        Ok(())
    }
}

/// Writes every presented frame to `<dir>/frame_NNNNN.png`.
///
/// Looping playback overwrites files from the previous pass.
#[derive(Debug)]
pub struct PngSequenceSurface {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSurface {
    /// Target directory; created in `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of PNG files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path used for displayed frame `frame`.
    pub fn path_for(&self, frame: usize) -> PathBuf {
        self.dir.join(format!("frame_{frame:05}.png"))
    }
}

impl Surface for PngSequenceSurface {
    fn begin(&mut self, _cfg: SurfaceConfig) -> ReelResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))
            .map_err(output_error)
    }

    fn present(&mut self, frame: usize, buffer: &FrameBuffer) -> ReelResult<()> {
        let path = self.path_for(frame);
        image::save_buffer_with_format(
            &path,
            buffer.data(),
            buffer.width(),
            buffer.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))
        .map_err(output_error)?;
        self.written += 1;
        Ok(())
    }
}

/// The output directory is the rendering target, so any write failure is a configuration error.
fn output_error(err: anyhow::Error) -> ReelError {
    ReelError::configuration(format!("{err:#}"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
