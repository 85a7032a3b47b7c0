use super::*;

#[test]
fn advance_walks_rows_then_sheets() {
    let mut c = SourceCursor::default();
    c.advance(2, 3);
    assert_eq!((c.image_index, c.grid_x, c.grid_y), (0, 2, 0));
    c.advance(1, 3);
    assert_eq!((c.image_index, c.grid_x, c.grid_y), (0, 0, 1));
    c.advance(3, 3);
    assert_eq!((c.image_index, c.grid_x, c.grid_y), (0, 0, 2));
    c.advance(3, 3);
    assert_eq!((c.image_index, c.grid_x, c.grid_y), (1, 0, 0));
}

#[test]
fn row_overflow_resets_column_instead_of_carrying() {
    let mut c = SourceCursor {
        image_index: 0,
        grid_x: 2,
        grid_y: 0,
    };
    c.advance(2, 3);
    assert_eq!((c.grid_x, c.grid_y), (0, 1));
}

#[test]
fn zero_run_leaves_cursor_in_place() {
    let mut c = SourceCursor {
        image_index: 1,
        grid_x: 1,
        grid_y: 1,
    };
    c.advance(0, 4);
    assert_eq!(
        c,
        SourceCursor {
            image_index: 1,
            grid_x: 1,
            grid_y: 1
        }
    );
}

#[test]
fn linear_position_is_monotonic_under_advance() {
    let grid = 4;
    let mut c = SourceCursor::default();
    let mut last = c.linear(grid);
    for run in [1, 3, 2, 2, 4, 1, 1, 2, 0, 4] {
        c.advance(run, grid);
        let now = c.linear(grid);
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn reset_rewinds() {
    let mut c = SourceCursor {
        image_index: 3,
        grid_x: 1,
        grid_y: 2,
    };
    c.reset();
    assert_eq!(c.linear(8), 0);
}
