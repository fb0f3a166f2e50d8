#![forbid(unsafe_code)]

//! Step convergence: how far a cell moves toward its target in one tick.
//!
//! Each tick covers half of the remaining distance. Once half the distance
//! drops below [`SNAP_THRESHOLD`] the cell snaps onto its target, so the
//! number of ticks grows with `log2(distance)` rather than with the distance.

/// Steps shorter than this many pixels snap directly to the target.
pub const SNAP_THRESHOLD: i32 = 8;

/// Incremental step for a signed `distance` (`target - current`).
///
/// Returns `0` when the axis should snap onto its target (converged), the
/// signed number of pixels to move otherwise. Halves round toward positive
/// infinity.
#[inline]
pub fn step(distance: i32) -> i32 {
    let half = (i64::from(distance) + 1).div_euclid(2) as i32;
    if half.abs() < SNAP_THRESHOLD { 0 } else { half }
}

/// Number of [`step`] invocations needed before an axis `distance` pixels
/// away snaps onto its target.
pub fn invocations_to_converge(distance: i32) -> u32 {
    let mut remaining = distance;
    let mut invocations = 1;
    loop {
        match step(remaining) {
            0 => return invocations,
            s => {
                remaining -= s;
                invocations += 1;
            }
        }
    }
}
