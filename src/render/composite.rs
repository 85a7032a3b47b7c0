use crate::{
    assets::decode::RasterImage,
    codec::{grid::grid_cell_of, program::FrameProgram},
    foundation::core::{GridCell, PixelRect},
    foundation::error::{ReelError, ReelResult},
    manifest::settings::Settings,
    render::{cursor::SourceCursor, frame::FrameBuffer},
};

/// One planned block copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blit {
    /// Sprite sheet to read from.
    pub sheet: usize,
    /// Source rectangle inside the sheet.
    pub src: PixelRect,
    /// Destination rectangle inside the frame.
    pub dst: PixelRect,
}

/// Resolve a program into block copies, advancing a scratch copy of `cursor`.
///
/// Nothing is drawn. Returns the blits in replay order and the cursor position after the last
/// instruction, or a [`ReelError::CursorOverflow`] if an instruction needs a block beyond the last
/// sheet.
pub fn plan_frame(
    frame: usize,
    program: &FrameProgram,
    cursor: SourceCursor,
    available_sheets: usize,
    settings: &Settings,
) -> ReelResult<(Vec<Blit>, SourceCursor)> {
    let columns = settings.columns();
    let block = settings.block_size;
    let mut cursor = cursor;
    let mut blits = Vec::with_capacity(program.len());

    for (instruction, op) in program.instructions().iter().enumerate() {
        if op.run_length == 0 {
            continue;
        }
        if cursor.image_index as usize >= available_sheets {
            return Err(ReelError::CursorOverflow {
                frame,
                instruction,
                image_index: cursor.image_index as usize,
                available: available_sheets,
            });
        }

        let dst = grid_cell_of(op.position, columns).run_rect(op.run_length, block);
        let src = GridCell::new(cursor.grid_x, cursor.grid_y).run_rect(op.run_length, block);
        blits.push(Blit {
            sheet: cursor.image_index as usize,
            src,
            dst,
        });
        cursor.advance(op.run_length, settings.source_grid);
    }

    Ok((blits, cursor))
}

/// Replay one diff frame into `target`, advancing `cursor`.
///
/// `frame` is the displayed frame number and only feeds diagnostics. The whole program is
/// planned before any pixel is touched, so on error neither `target` nor `cursor` changes.
pub fn composite_frame(
    frame: usize,
    program: &FrameProgram,
    cursor: &mut SourceCursor,
    sheets: &[RasterImage],
    settings: &Settings,
    target: &mut FrameBuffer,
) -> ReelResult<()> {
    let (blits, next) = plan_frame(frame, program, *cursor, sheets.len(), settings)?;
    for blit in &blits {
        target.copy_rect(&sheets[blit.sheet], blit.src, blit.dst.x, blit.dst.y);
    }
    tracing::trace!(
        frame,
        blits = blits.len(),
        image_index = next.image_index,
        grid_x = next.grid_x,
        grid_y = next.grid_y,
        "composited diff frame"
    );
    *cursor = next;
    Ok(())
}

/// Draw frame 0: the full base image, with no cursor involvement.
pub fn draw_base_frame(base: &RasterImage, target: &mut FrameBuffer) {
    target.draw_image(base);
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
