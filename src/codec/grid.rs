use crate::foundation::core::GridCell;

/// Map a linear block `position` to a cell in a grid `columns` blocks wide.
///
/// Positions on the first row map to `(position, 0)`; everything else wraps row-major.
/// `columns` must be non-zero.
pub fn grid_cell_of(position: u32, columns: u32) -> GridCell {
    if position < columns {
        GridCell::new(position, 0)
    } else {
        GridCell::new(position % columns, position / columns)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/grid.rs"]
mod tests;
