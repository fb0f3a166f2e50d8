#![forbid(unsafe_code)]

//! Animation loop body: one tick of movement toward the installed targets.
//!
//! Columns move as a unit (every cell of a column shares `left`/`width`) and
//! rows move as a unit (`top`/`height`), so each tick reads one
//! representative cell per column and per row: the first cell of the column,
//! the first cell of the row.
//!
//! Distances are measured against the *live* rendered offsets, not the last
//! written values, so rounding or outside interference is absorbed.
//!
//! Sizes are never tracked separately. After positions move, each column's
//! width is the gap to the next column's live offset (the last column fills
//! the container), and likewise for rows. Cells therefore always abut, even
//! mid-animation.

use crate::geometry::Size;
use crate::grid::GridState;
use crate::host::{Host, LengthProperty, StyleProp};
use crate::step::step;

/// Move every column and row one step toward its target and re-derive sizes.
///
/// Returns `true` if anything is still in motion.
pub(crate) fn advance(state: &GridState, host: &mut dyn Host) -> bool {
    let mut touched = false;

    for column in 0..state.visible_columns() {
        let cell = &state.cells()[column];
        let target = cell.target().x;
        let current = host.offset(cell.element()).x;
        let distance = target - current;
        if distance != 0 {
            match step(distance) {
                0 => state.set_column(host, column, StyleProp::left(target)),
                delta => {
                    state.set_column(host, column, StyleProp::left(current + delta));
                    touched = true;
                }
            }
        }
    }

    for row in 0..state.visible_rows() {
        let cell = &state.cells()[row * state.columns()];
        let target = cell.target().y;
        let current = host.offset(cell.element()).y;
        let distance = target - current;
        if distance != 0 {
            match step(distance) {
                0 => state.set_row(host, row, StyleProp::top(target)),
                delta => {
                    state.set_row(host, row, StyleProp::top(current + delta));
                    touched = true;
                }
            }
        }
    }

    derive_sizes(state, host);
    touched
}

/// Write targets straight to the host, without animation.
pub(crate) fn paint_targets(state: &GridState, host: &mut dyn Host) {
    for column in 0..state.visible_columns() {
        let x = state.cells()[column].target().x;
        state.set_column(host, column, StyleProp::left(x));
    }
    for row in 0..state.visible_rows() {
        let y = state.cells()[row * state.columns()].target().y;
        state.set_row(host, row, StyleProp::top(y));
    }
    derive_sizes(state, host);
}

/// Size every column and row from the live offsets of its neighbor.
pub(crate) fn derive_sizes(state: &GridState, host: &mut dyn Host) {
    let container = host.offset_size(state.container());
    let padding: Size = state.padding_margin_border();
    let cells = state.cells();

    let columns = state.visible_columns();
    for column in 0..columns {
        let left = host.offset(cells[column].element()).x;
        let right = if column + 1 < columns {
            host.offset(cells[column + 1].element()).x
        } else {
            container.width
        };
        let width = (right - left - padding.width).max(0);
        state.set_column(host, column, StyleProp::Length(LengthProperty::Width, width));
    }

    let rows = state.visible_rows();
    for row in 0..rows {
        let top = host.offset(cells[row * state.columns()].element()).y;
        let bottom = if row + 1 < rows {
            host.offset(cells[(row + 1) * state.columns()].element()).y
        } else {
            container.height
        };
        let height = (bottom - top - padding.height).max(0);
        state.set_row(host, row, StyleProp::Length(LengthProperty::Height, height));
    }
}
