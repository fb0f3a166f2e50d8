#![forbid(unsafe_code)]

//! Geometry calculator: target rectangles for both layout states.
//!
//! Cells are laid out row-major. Every function here is pure; painting and
//! padding compensation happen in the animation loop.
//!
//! # Invariants
//!
//! 1. [`GridShape::resolve`] never yields a zero axis and always satisfies
//!    `columns * rows >= count`.
//! 2. All cells in one column share their target `x`; all cells in one row
//!    share their target `y`.
//! 3. In the focused state the column widths sum to the container width and
//!    the row heights sum to the container height.

use crate::error::GridError;
use crate::geometry::{Rect, Size, div_round, round_half_up};

/// Share of the container left to folded cells when no folded size is configured.
pub const FOLDED_SHARE: f64 = 0.2;

/// Resolved grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

/// Largest track count a grid axis may have; pixel math runs in `i32`.
pub const MAX_TRACKS: usize = i32::MAX as usize;

impl GridShape {
    /// Resolve configured dimensions against the number of cells.
    ///
    /// - columns given, rows not: `rows = round(count / columns)`
    /// - rows given, columns not: `columns = count`
    /// - neither: both `round(sqrt(count))`
    ///
    /// Columns then grow until every cell has a slot. Axes beyond
    /// [`MAX_TRACKS`] are rejected as [`GridError::InvalidConfig`].
    pub fn resolve(columns: usize, rows: usize, count: usize) -> Result<Self, GridError> {
        if count == 0 {
            return Err(GridError::NoCells);
        }
        if columns > MAX_TRACKS || rows > MAX_TRACKS || count > MAX_TRACKS {
            return Err(GridError::InvalidConfig(format!(
                "grid of {columns} columns x {rows} rows for {count} cells exceeds {MAX_TRACKS} tracks"
            )));
        }

        let (columns, rows) = match (columns, rows) {
            (0, 0) => {
                let side = round_half_up((count as f64).sqrt()).max(0) as usize;
                (side, side)
            }
            (0, rows) => (count, rows),
            (columns, 0) => (columns, usize_div_round(count, columns)),
            given => given,
        };

        if columns + rows < 2 {
            return Err(GridError::DegenerateGrid { columns, rows });
        }

        let rows = rows.max(1);
        let columns = columns.max(1).max(count.div_ceil(rows));

        Ok(Self { columns, rows })
    }

    /// Column and row of the cell at `index`.
    #[inline]
    pub const fn locate(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }
}

/// `numerator / denominator` rounded half up, without intermediate overflow.
fn usize_div_round(numerator: usize, denominator: usize) -> usize {
    let (quotient, remainder) = (numerator / denominator, numerator % denominator);
    if remainder >= denominator - remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// Folded cell size that leaves about 80% of the container to the focused cell.
///
/// An axis with a single track has no folded cells and gets 0.
pub fn folded_size(shape: GridShape, container: Size) -> Size {
    let axis = |extent: i32, tracks: usize| {
        if tracks > 1 {
            round_half_up(f64::from(extent) * FOLDED_SHARE / (tracks - 1) as f64)
        } else {
            0
        }
    };
    Size::new(
        axis(container.width, shape.columns),
        axis(container.height, shape.rows),
    )
}

/// Targets for the uniform (restored) grid.
pub fn uniform_targets(shape: GridShape, container: Size, count: usize) -> Vec<Rect> {
    let width = div_round(container.width, shape.columns as i32);
    let height = div_round(container.height, shape.rows as i32);
    lay_out(shape, count, |_| width, |_| height)
}

/// Targets with the cell at `focus` enlarged and the others folded.
///
/// Returns `None` when `focus` is not a cell index.
pub fn focused_targets(
    shape: GridShape,
    container: Size,
    folded: Size,
    count: usize,
    focus: usize,
) -> Option<Vec<Rect>> {
    if focus >= count {
        return None;
    }
    let (focus_column, focus_row) = shape.locate(focus);
    let focused = Size::new(
        container
            .width
            .saturating_sub((shape.columns as i32 - 1).saturating_mul(folded.width)),
        container
            .height
            .saturating_sub((shape.rows as i32 - 1).saturating_mul(folded.height)),
    );

    Some(lay_out(
        shape,
        count,
        |column| {
            if column == focus_column {
                focused.width
            } else {
                folded.width
            }
        },
        |row| {
            if row == focus_row {
                focused.height
            } else {
                folded.height
            }
        },
    ))
}

fn lay_out(
    shape: GridShape,
    count: usize,
    column_width: impl Fn(usize) -> i32,
    row_height: impl Fn(usize) -> i32,
) -> Vec<Rect> {
    let mut targets = Vec::with_capacity(count);
    let (mut x, mut y) = (0, 0);
    for index in 0..count {
        let (column, row) = shape.locate(index);
        let (width, height) = (column_width(column), row_height(row));
        targets.push(Rect::new(x, y, width, height));
        x += width;
        if column + 1 >= shape.columns {
            x = 0;
            y += height;
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(columns: usize, rows: usize) -> GridShape {
        GridShape { columns, rows }
    }

    #[test]
    fn nine_cells_resolve_to_three_by_three() {
        assert_eq!(GridShape::resolve(0, 0, 9).unwrap(), shape(3, 3));
    }

    #[test]
    fn columns_given_derives_rows() {
        assert_eq!(GridShape::resolve(3, 0, 5).unwrap(), shape(3, 2));
    }

    #[test]
    fn rows_given_takes_every_cell_as_a_column() {
        assert_eq!(GridShape::resolve(0, 2, 6).unwrap(), shape(6, 2));
        assert_eq!(GridShape::resolve(0, 3, 1).unwrap(), shape(1, 3));
    }

    #[test]
    fn oversized_axes_are_rejected() {
        assert!(matches!(
            GridShape::resolve(usize::MAX, 0, 4),
            Err(GridError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridShape::resolve(usize::MAX / 2, 3, 4),
            Err(GridError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridShape::resolve(0, usize::MAX, 4),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn largest_axis_resolves_without_overflow() {
        assert_eq!(
            GridShape::resolve(MAX_TRACKS, 0, 4).unwrap(),
            shape(MAX_TRACKS, 1)
        );
        assert_eq!(
            GridShape::resolve(MAX_TRACKS, MAX_TRACKS, 4).unwrap(),
            shape(MAX_TRACKS, MAX_TRACKS)
        );
    }

    #[test]
    fn derived_rows_round_half_up() {
        assert_eq!(GridShape::resolve(2, 0, 3).unwrap(), shape(2, 2));
        assert_eq!(GridShape::resolve(4, 0, 9).unwrap(), shape(5, 2));
        assert_eq!(GridShape::resolve(3, 0, 7).unwrap(), shape(4, 2));
    }

    #[test]
    fn columns_grow_until_cells_fit() {
        // sqrt(7) rounds to 3 -> 3x3 fits; sqrt(3) rounds to 2 -> 2x2 fits.
        assert_eq!(GridShape::resolve(0, 0, 7).unwrap(), shape(3, 3));
        assert_eq!(GridShape::resolve(0, 0, 3).unwrap(), shape(2, 2));
        // sqrt(5) rounds to 2 -> 2x2 is too small -> 3x2.
        assert_eq!(GridShape::resolve(0, 0, 5).unwrap(), shape(3, 2));
        // Explicit values that are too small grow along columns.
        assert_eq!(GridShape::resolve(2, 2, 7).unwrap(), shape(4, 2));
    }

    #[test]
    fn derived_zero_rows_are_clamped() {
        // round(1 / 5) == 0 would leave no slot at all.
        assert_eq!(GridShape::resolve(5, 0, 1).unwrap(), shape(5, 1));
    }

    #[test]
    fn empty_cell_list_is_rejected() {
        assert_eq!(GridShape::resolve(0, 0, 0), Err(GridError::NoCells));
    }

    #[test]
    fn folded_size_reserves_a_fifth() {
        let folded = folded_size(shape(3, 3), Size::new(300, 300));
        assert_eq!(folded, Size::new(30, 30));
        let single_column = folded_size(shape(1, 4), Size::new(300, 400));
        assert_eq!(single_column, Size::new(0, 27));
    }

    #[test]
    fn uniform_targets_are_row_major() {
        let targets = uniform_targets(shape(3, 3), Size::new(300, 300), 9);
        assert_eq!(targets[0], Rect::new(0, 0, 100, 100));
        assert_eq!(targets[2], Rect::new(200, 0, 100, 100));
        assert_eq!(targets[3], Rect::new(0, 100, 100, 100));
        assert_eq!(targets[8], Rect::new(200, 200, 100, 100));
    }

    #[test]
    fn uniform_targets_for_short_last_row() {
        let targets = uniform_targets(shape(3, 2), Size::new(300, 200), 5);
        assert_eq!(targets.len(), 5);
        assert_eq!(targets[4], Rect::new(100, 100, 100, 100));
    }

    #[test]
    fn uniform_targets_empty_is_noop() {
        assert!(uniform_targets(shape(3, 3), Size::new(300, 300), 0).is_empty());
    }

    #[test]
    fn focused_center_cell() {
        let targets =
            focused_targets(shape(3, 3), Size::new(300, 300), Size::new(20, 20), 9, 4).unwrap();
        assert_eq!(targets[0], Rect::new(0, 0, 20, 20));
        assert_eq!(targets[1], Rect::new(20, 0, 260, 20));
        assert_eq!(targets[3], Rect::new(0, 20, 20, 260));
        assert_eq!(targets[4], Rect::new(20, 20, 260, 260));
        assert_eq!(targets[5], Rect::new(280, 20, 20, 260));
        assert_eq!(targets[8], Rect::new(280, 280, 20, 20));
    }

    #[test]
    fn focused_single_row_keeps_full_height() {
        let s = shape(3, 1);
        let folded = folded_size(s, Size::new(300, 100));
        assert_eq!(folded.height, 0);
        let targets = focused_targets(s, Size::new(300, 100), folded, 3, 0).unwrap();
        assert!(targets.iter().all(|t| t.height == 100));
        assert_eq!(targets[0].width, 300 - 2 * folded.width);
    }

    #[test]
    fn focused_targets_saturate_on_huge_shapes() {
        let s = shape(MAX_TRACKS, 1);
        let targets = focused_targets(s, Size::new(300, 100), Size::new(20, 0), 4, 0).unwrap();
        assert_eq!(targets[0].width, 300 - i32::MAX);
        assert_eq!(targets[1].width, 20);
    }

    #[test]
    fn focused_unknown_cell_is_none() {
        assert!(focused_targets(shape(3, 3), Size::new(300, 300), Size::new(20, 20), 9, 9).is_none());
    }
}
