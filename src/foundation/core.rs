/// Column/row address of a block inside a block grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridCell {
    /// Block column (0-based).
    pub col: u32,
    /// Block row (0-based).
    pub row: u32,
}

impl GridCell {
    /// Construct a cell from column and row.
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Pixel rectangle of a horizontal run of `run_length` blocks starting at this cell.
    pub fn run_rect(self, run_length: u32, block_size: u32) -> PixelRect {
        PixelRect {
            x: self.col.saturating_mul(block_size),
            y: self.row.saturating_mul(block_size),
            width: run_length.saturating_mul(block_size),
            height: block_size,
        }
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Construct a rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Clip to a `width × height` area anchored at the origin.
    pub fn clip_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.right().min(u64::from(width)) as u32;
        let bottom = self.bottom().min(u64::from(height)) as u32;
        Self {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// Round `value` to `digits` decimal places (half away from zero).
pub fn round_decimals(value: f64, digits: i32) -> f64 {
    let multiplier = 10f64.powi(digits);
    (value * multiplier).round() / multiplier
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
