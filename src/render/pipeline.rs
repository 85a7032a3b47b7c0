use crate::{
    bootstrap::loader::LoadedReel,
    foundation::error::{ReelError, ReelResult},
    render::{
        composite::{composite_frame, draw_base_frame},
        cursor::SourceCursor,
        frame::FrameBuffer,
        surface::{Surface, SurfaceConfig},
    },
};

/// Forward replay state: the frame buffer, the source cursor and the next frame to draw.
///
/// Frames must be drawn strictly in order; [`Replay::draw_next`] is the only way forward and
/// [`Replay::reset`] the only way back.
#[derive(Clone, Debug)]
pub struct Replay {
    buffer: FrameBuffer,
    cursor: SourceCursor,
    next_frame: usize,
}

impl Replay {
    /// Empty replay sized for `reel`.
    pub fn new(reel: &LoadedReel) -> Self {
        let s = reel.settings();
        Self {
            buffer: FrameBuffer::new(s.video_width, s.video_height),
            cursor: SourceCursor::default(),
            next_frame: 0,
        }
    }

    /// Displayed frame that the next [`Replay::draw_next`] call composites.
    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Current cursor position.
    pub fn cursor(&self) -> SourceCursor {
        self.cursor
    }

    /// `true` once every displayed frame (`0..=frameCount`) has been drawn.
    pub fn is_finished(&self, reel: &LoadedReel) -> bool {
        self.next_frame > reel.settings().frame_count as usize
    }

    /// Rewind to before frame 0: cursor to the first block, buffer cleared.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.buffer.clear();
        self.next_frame = 0;
    }

    /// Composite the next displayed frame and return its index.
    ///
    /// Frame 0 is the base image; frame `n > 0` replays program `n - 1`. On error the replay is
    /// left exactly as it was.
    pub fn draw_next(&mut self, reel: &LoadedReel) -> ReelResult<usize> {
        let frame = self.next_frame;
        if frame == 0 {
            draw_base_frame(reel.first(), &mut self.buffer);
        } else {
            let program = reel.program_for(frame).ok_or_else(|| {
                ReelError::configuration(format!(
                    "frame {frame} is past the last frame {}",
                    reel.settings().frame_count
                ))
            })?;
            composite_frame(
                frame,
                program,
                &mut self.cursor,
                reel.sheets(),
                reel.settings(),
                &mut self.buffer,
            )?;
        }
        self.next_frame += 1;
        Ok(frame)
    }
}

/// Totals from an offline render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames presented.
    pub frames: usize,
    /// Source blocks consumed from the sprite sheets.
    pub blocks: u64,
}

/// Replay frames `0..=frame` and return the buffer as displayed frame `frame`.
pub fn render_frame_at(reel: &LoadedReel, frame: usize) -> ReelResult<FrameBuffer> {
    let last = reel.settings().frame_count as usize;
    if frame > last {
        return Err(ReelError::configuration(format!(
            "frame {frame} is past the last frame {last}"
        )));
    }

    let mut replay = Replay::new(reel);
    while replay.next_frame() <= frame {
        replay.draw_next(reel)?;
    }
    Ok(replay.buffer)
}

/// Replay every displayed frame in order and present each one to `surface`.
#[tracing::instrument(skip(reel, surface))]
pub fn render_sequence(reel: &LoadedReel, surface: &mut dyn Surface) -> ReelResult<RenderStats> {
    let s = reel.settings();
    surface.begin(SurfaceConfig {
        width: s.video_width,
        height: s.video_height,
    })?;

    let mut replay = Replay::new(reel);
    let mut stats = RenderStats::default();
    while !replay.is_finished(reel) {
        let frame = replay.draw_next(reel)?;
        surface.present(frame, replay.buffer())?;
        stats.frames += 1;
        if let Some(program) = reel.program_for(frame) {
            stats.blocks += program.total_blocks();
        }
    }
    tracing::debug!(frames = stats.frames, blocks = stats.blocks, "rendered sequence");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
