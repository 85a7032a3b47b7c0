/// Raster-scan read position across the sprite sheets.
///
/// The cursor walks `grid_x` left to right, then `grid_y` top to bottom within sheet
/// `image_index`, then moves on to the next sheet. It only moves forward during a pass and is
/// rewound solely by a playback reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceCursor {
    /// Sprite sheet currently being read.
    pub image_index: u32,
    /// Block column within the sheet.
    pub grid_x: u32,
    /// Block row within the sheet.
    pub grid_y: u32,
}

impl SourceCursor {
    /// Rewind to the first block of the first sheet.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Linear block offset: `image_index * grid² + grid_y * grid + grid_x`.
    pub fn linear(&self, source_grid: u32) -> u64 {
        let grid = u64::from(source_grid);
        u64::from(self.image_index) * grid * grid
            + u64::from(self.grid_y) * grid
            + u64::from(self.grid_x)
    }

    /// Step past a run of `run_length` blocks.
    ///
    /// Overflowing the row moves to the start of the next row (the encoder never lets a run span
    /// more than one row boundary); overflowing the last row moves to the next sheet.
    pub fn advance(&mut self, run_length: u32, source_grid: u32) {
        self.grid_x = self.grid_x.saturating_add(run_length);
        if self.grid_x >= source_grid {
            self.grid_x = 0;
            self.grid_y += 1;
            if self.grid_y >= source_grid {
                self.grid_y = 0;
                self.image_index += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cursor.rs"]
mod tests;
