#![forbid(unsafe_code)]

//! Step-based runner for a grid on a [`WebHost`].
//!
//! [`GridProgram`] owns a [`ZoomGrid`] and its host. Nothing runs on its own;
//! the embedding environment controls the loop:
//!
//! 1. Push pointer events via [`GridProgram::push_event`].
//! 2. Advance time via [`GridProgram::advance_time`].
//! 3. Call [`GridProgram::step`] to deliver queued events and every timer
//!    that has come due.
//!
//! # Example
//!
//! ```ignore
//! use zoomgrid_web::{GridProgram, WebHost};
//! use zoomgrid_core::{GridEvent, ZoomGridConfig};
//! use core::time::Duration;
//!
//! let (host, container, cells) = WebHost::with_grid(9, 300, 300);
//! let mut prog = GridProgram::new(host, container, &ZoomGridConfig::default())?;
//!
//! prog.push_event(GridEvent::CellEnter(cells[4]));
//! prog.step();
//! prog.advance_time(Duration::from_millis(50));
//! let result = prog.step();
//! assert_eq!(result.timers_fired, 1);
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use zoomgrid_core::{
    ElementId, Extension, ExtensionError, GridError, GridEvent, ZoomGrid, ZoomGridConfig,
};

use crate::WebHost;

/// Timers delivered by one [`GridProgram::step`] at most. Guards against a
/// zero-delay timer rescheduling itself forever.
const MAX_TIMERS_PER_STEP: u32 = 1024;

/// Result of a single [`GridProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Number of pushed events delivered during this step.
    pub events_processed: u32,
    /// Number of due timers delivered during this step.
    pub timers_fired: u32,
    /// Number of delivered events whose default action should be suppressed.
    pub prevented: u32,
    /// Whether a move tick is still pending after this step.
    pub moving: bool,
    /// Current step index (monotonically increasing).
    pub step_idx: u64,
}

/// Host-driven, non-blocking grid runner.
pub struct GridProgram {
    grid: ZoomGrid,
    host: WebHost,
    queue: VecDeque<GridEvent>,
    step_idx: u64,
}

impl GridProgram {
    /// Create the grid over `container` in `host`'s document.
    pub fn new(
        mut host: WebHost,
        container: ElementId,
        config: &ZoomGridConfig,
    ) -> Result<Self, GridError> {
        let grid = ZoomGrid::create(&mut host, container, config)?;
        Ok(Self::with_grid(grid, host))
    }

    /// Wrap an already created grid and the host it was created on.
    #[must_use]
    pub fn with_grid(grid: ZoomGrid, host: WebHost) -> Self {
        Self {
            grid,
            host,
            queue: VecDeque::new(),
            step_idx: 0,
        }
    }

    /// Register an extension on the grid.
    pub fn add_extension<E: Extension>(&mut self, extension: E) -> Result<(), ExtensionError> {
        self.grid.add_extension(&mut self.host, extension)
    }

    /// Queue an event; it is delivered on the next [`step`](Self::step).
    pub fn push_event(&mut self, event: GridEvent) {
        self.queue.push_back(event);
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.host.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.host.clock.set(now);
    }

    /// Deliver queued events, then every timer due at the current time.
    pub fn step(&mut self) -> StepResult {
        self.step_idx += 1;

        let mut events_processed: u32 = 0;
        let mut prevented: u32 = 0;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            if self.grid.handle_event(&mut self.host, event).prevent_default {
                prevented += 1;
            }
        }

        let mut timers_fired: u32 = 0;
        while timers_fired < MAX_TIMERS_PER_STEP {
            let Some(id) = self.host.pop_due() else {
                break;
            };
            timers_fired += 1;
            self.grid.handle_event(&mut self.host, GridEvent::Timer(id));
        }

        StepResult {
            events_processed,
            timers_fired,
            prevented,
            moving: self.grid.state().is_moving(),
            step_idx: self.step_idx,
        }
    }

    /// Jump the clock from timer to timer until no timer is pending or
    /// `max_steps` steps have run. Returns the number of steps taken.
    pub fn run_until_idle(&mut self, max_steps: u32) -> u32 {
        let mut steps = 0;
        if !self.queue.is_empty() {
            self.step();
            steps += 1;
        }
        while steps < max_steps {
            let Some(due) = self.host.timers.next_due() else {
                break;
            };
            if due > self.host.now() {
                self.set_time(due);
            }
            self.step();
            steps += 1;
        }
        steps
    }

    /// Number of events waiting for the next step.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Access the grid.
    pub fn grid(&self) -> &ZoomGrid {
        &self.grid
    }

    /// Mutably access the grid.
    pub fn grid_mut(&mut self) -> &mut ZoomGrid {
        &mut self.grid
    }

    /// Access the host.
    pub fn host(&self) -> &WebHost {
        &self.host
    }

    /// Mutably access the host.
    pub fn host_mut(&mut self) -> &mut WebHost {
        &mut self.host
    }

    /// Grid and host together, for direct calls such as [`ZoomGrid::zoom`].
    pub fn parts_mut(&mut self) -> (&mut ZoomGrid, &mut WebHost) {
        (&mut self.grid, &mut self.host)
    }

    /// Current monotonic time.
    pub fn now(&self) -> Duration {
        self.host.now()
    }

    /// Current step index.
    pub fn step_idx(&self) -> u64 {
        self.step_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zoomgrid_core::{CellId, HostDocument, Size, Trigger};

    fn program(count: usize) -> (GridProgram, Vec<ElementId>) {
        let (host, container, cells) = WebHost::with_grid(count, 300, 300);
        let config = ZoomGridConfig::default().folded_size(20, 20);
        (GridProgram::new(host, container, &config).unwrap(), cells)
    }

    #[test]
    fn creation_paints_uniform_grid() {
        let (prog, cells) = program(9);
        assert_eq!(prog.host().offset_size(cells[8]), Size::new(100, 100));
        assert_eq!(prog.host().timers.len(), 0);
        assert_eq!(prog.step_idx(), 0);
    }

    #[test]
    fn empty_container_is_rejected() {
        let (host, container, _) = WebHost::with_grid(0, 300, 300);
        let err = GridProgram::new(host, container, &ZoomGridConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, GridError::NoCells);
    }

    #[test]
    fn events_are_queued_until_step() {
        let (mut prog, cells) = program(9);
        prog.push_event(GridEvent::CellEnter(cells[4]));
        assert_eq!(prog.queued(), 1);
        assert_eq!(prog.grid().state().focused(), None);

        let result = prog.step();
        assert_eq!(result.events_processed, 1);
        assert_eq!(result.timers_fired, 0);
        assert!(result.moving);
        assert_eq!(prog.grid().state().focused(), Some(CellId(4)));
    }

    #[test]
    fn timers_wait_for_the_clock() {
        let (mut prog, cells) = program(9);
        prog.push_event(GridEvent::CellEnter(cells[4]));
        prog.step();

        let delay = prog.grid().state().timeout();
        prog.advance_time(delay - Duration::from_millis(1));
        assert_eq!(prog.step().timers_fired, 0);
        prog.advance_time(Duration::from_millis(1));
        assert_eq!(prog.step().timers_fired, 1);
        assert_eq!(prog.host().offset_size(cells[4]).width, 180);
    }

    #[test]
    fn run_until_idle_settles() {
        let (mut prog, cells) = program(9);
        prog.push_event(GridEvent::CellEnter(cells[4]));
        let steps = prog.run_until_idle(64);

        // One step for the event, four ticks to converge.
        assert_eq!(steps, 5);
        assert!(!prog.grid().state().is_moving());
        assert_eq!(prog.host().offset_size(cells[4]), Size::new(260, 260));
        assert_eq!(prog.now(), prog.grid().state().timeout() * 4);
    }

    #[test]
    fn prevented_events_are_counted() {
        let (mut prog, cells) = program(4);
        let link = prog.host_mut().document.append(cells[0], "A");
        prog.add_extension(zoomgrid_extras::DisableFoldedLinks::new())
            .unwrap();
        prog.push_event(GridEvent::Click(link));
        prog.push_event(GridEvent::Click(cells[1]));
        assert_eq!(prog.step().prevented, 1);
        assert_eq!(prog.grid().state().trigger(), Trigger::Hover);
    }

    #[test]
    fn identical_inputs_produce_identical_geometry() {
        fn run() -> Vec<Size> {
            let (mut prog, cells) = program(9);
            prog.push_event(GridEvent::CellEnter(cells[2]));
            prog.step();
            prog.advance_time(Duration::from_millis(120));
            prog.step();
            prog.push_event(GridEvent::CellEnter(cells[6]));
            prog.run_until_idle(64);
            cells.iter().map(|el| prog.host().offset_size(*el)).collect()
        }
        assert_eq!(run(), run());
    }
}
