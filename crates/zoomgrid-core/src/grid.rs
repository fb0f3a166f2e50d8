#![forbid(unsafe_code)]

//! Grid state controller.
//!
//! [`ZoomGrid`] owns the cells, the focus state and the single pending tick,
//! and orchestrates `restore` / `zoom` → targets → animation loop → hooks.
//!
//! # Lifecycle
//!
//! 1. [`ZoomGrid::create`] collects cells, resolves the grid shape and paints
//!    the uniform layout immediately.
//! 2. [`ZoomGrid::zoom`] / [`ZoomGrid::restore`] cancel any pending tick,
//!    fire [`Hook::StartMove`], install new targets and schedule a tick.
//! 3. Each tick moves cells, fires [`Hook::Moving`] and either reschedules
//!    or, when nothing moved, fires [`Hook::StopMove`].
//!
//! # Invariants
//!
//! 1. At most one tick is pending per grid. Starting a transition cancels the
//!    pending tick before new targets are installed.
//! 2. At most one cell is focused.
//! 3. Zooming onto the focused cell is a no-op.
//! 4. Timer notifications for a tick that is no longer pending are ignored.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{Trigger, ZoomGridConfig};
use crate::error::{ExtensionError, GridError};
use crate::event::{Command, Dispatch, GridEvent};
use crate::geometry::{Rect, Size};
use crate::hooks::{Extension, Hook, HookContext, HookRegistry};
use crate::host::{ElementId, Host, HostDocument, Overflow, Position, StyleProp, TimerId};
use crate::layout::{self, GridShape};
use crate::mover;
use crate::{debug, trace};

/// Index of a cell in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// How a direct child of the container takes part in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// A managed cell.
    Cell(CellId),
    /// A child with a different tag, left alone.
    Plain,
}

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Something moved; another tick is scheduled.
    Continue,
    /// Nothing moved; the loop stopped and [`Hook::StopMove`] fired.
    Settled,
}

/// Per-cell record.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    element: ElementId,
    target: Rect,
    opacity: Option<f32>,
    scroll_target: ElementId,
}

impl Cell {
    fn new(element: ElementId) -> Self {
        Self {
            element,
            target: Rect::default(),
            opacity: None,
            scroll_target: element,
        }
    }

    /// The host element backing this cell.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Target rectangle of the current transition (unpadded).
    #[must_use]
    pub fn target(&self) -> Rect {
        self.target
    }

    /// Last opacity written through [`GridState::set_opacity`].
    #[must_use]
    pub fn opacity(&self) -> Option<f32> {
        self.opacity
    }

    /// Element whose overflow and scroll position follow focus.
    ///
    /// The cell itself unless an extension wrapped the content.
    #[must_use]
    pub fn scroll_target(&self) -> ElementId {
        self.scroll_target
    }
}

/// Everything about a grid except its extensions.
///
/// Handed to extensions through [`HookContext`].
#[derive(Debug)]
pub struct GridState {
    container: ElementId,
    shape: GridShape,
    cells: Vec<Cell>,
    children: Vec<(ElementId, Membership)>,
    focused: Option<CellId>,
    trigger: Trigger,
    folded: Size,
    padding: Size,
    timeout: Duration,
    move_timer: Option<TimerId>,
    animating: bool,
}

impl GridState {
    /// The container element.
    #[must_use]
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Resolved grid shape.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.shape.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single cell.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    /// Cell ids in row-major order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cells.len()).map(CellId)
    }

    /// The focused cell, if any.
    #[must_use]
    pub fn focused(&self) -> Option<CellId> {
        self.focused
    }

    /// What makes a cell take focus.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Change the focus trigger. Registered extensions are notified through
    /// [`Hook::TriggerChanged`] once the current operation completes.
    pub fn set_trigger(&mut self, trigger: Trigger) {
        self.trigger = trigger;
    }

    /// Size of folded cells.
    #[must_use]
    pub fn folded_size(&self) -> Size {
        self.folded
    }

    /// Padding/margin/border compensation subtracted from painted sizes.
    #[must_use]
    pub fn padding_margin_border(&self) -> Size {
        self.padding
    }

    /// Delay between ticks.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a transition is in progress (a tick is pending or running).
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.animating
    }

    /// The pending tick's timer, if any.
    #[must_use]
    pub fn pending_tick(&self) -> Option<TimerId> {
        self.move_timer
    }

    /// How a direct child of the container participates.
    ///
    /// `None` if `el` is not a direct child.
    #[must_use]
    pub fn membership(&self, el: ElementId) -> Option<Membership> {
        self.children
            .iter()
            .find(|(child, _)| *child == el)
            .map(|(_, membership)| *membership)
    }

    /// The cell containing `el` (walking up the parent chain), if any.
    pub fn cell_of<H: HostDocument + ?Sized>(&self, host: &H, el: ElementId) -> Option<CellId> {
        let mut cursor = Some(el);
        while let Some(current) = cursor {
            if current == self.container {
                return None;
            }
            if let Some(index) = self.cells.iter().position(|c| c.element == current) {
                return Some(CellId(index));
            }
            cursor = host.parent(current);
        }
        None
    }

    /// Whether a pointer that went to `related` really left the container.
    ///
    /// Transitions into the container's own descendants do not count.
    pub fn leaves_container<H: HostDocument + ?Sized>(
        &self,
        host: &H,
        related: Option<ElementId>,
    ) -> bool {
        related.is_none_or(|el| !host.contains(self.container, el))
    }

    /// Live rendered size of the container.
    pub fn container_size<H: HostDocument + ?Sized>(&self, host: &H) -> Size {
        host.offset_size(self.container)
    }

    /// Write an opacity to a cell and remember it.
    pub fn set_opacity(&mut self, host: &mut dyn Host, id: CellId, opacity: f32) {
        let Some(cell) = self.cells.get_mut(id.0) else {
            return;
        };
        host.set_style(cell.element, StyleProp::Opacity(opacity));
        cell.opacity = Some(opacity);
    }

    /// Redirect a cell's overflow/scroll handling to an inner element.
    pub fn set_scroll_target(&mut self, id: CellId, el: ElementId) {
        if let Some(cell) = self.cells.get_mut(id.0) {
            cell.scroll_target = el;
        }
    }

    /// Columns that have at least one cell.
    pub(crate) fn visible_columns(&self) -> usize {
        self.shape.columns.min(self.cells.len())
    }

    /// Rows that have at least one cell.
    pub(crate) fn visible_rows(&self) -> usize {
        self.shape.rows.min(self.cells.len().div_ceil(self.shape.columns))
    }

    /// Apply a style to every cell of a column.
    pub(crate) fn set_column(&self, host: &mut dyn Host, column: usize, prop: StyleProp) {
        for cell in self.cells.iter().skip(column).step_by(self.shape.columns) {
            host.set_style(cell.element, prop.clone());
        }
    }

    /// Apply a style to every cell of a row.
    pub(crate) fn set_row(&self, host: &mut dyn Host, row: usize, prop: StyleProp) {
        let start = row * self.shape.columns;
        for cell in self.cells.iter().skip(start).take(self.shape.columns) {
            host.set_style(cell.element, prop.clone());
        }
    }

    fn install_targets(&mut self, host: &mut dyn Host, targets: Vec<Rect>) {
        for (cell, target) in self.cells.iter_mut().zip(targets) {
            cell.target = target;
            host.reset_scroll(cell.element);
        }
    }
}

/// A grid of cells that zooms one cell at a time.
#[derive(Debug)]
pub struct ZoomGrid {
    state: GridState,
    hooks: HookRegistry,
}

impl ZoomGrid {
    /// Build a grid from the children of `container` and paint the uniform
    /// layout immediately.
    ///
    /// Fails without touching the host if the container has no children with
    /// the configured tag or the resolved shape is degenerate.
    pub fn create(
        host: &mut dyn Host,
        container: ElementId,
        config: &ZoomGridConfig,
    ) -> Result<Self, GridError> {
        let _span = crate::debug_span!("zoomgrid.create").entered();

        let mut cells = Vec::new();
        let mut children = Vec::new();
        for child in host.children(container) {
            if child.has_tag(&config.tag_name) {
                children.push((child.id, Membership::Cell(CellId(cells.len()))));
                cells.push(Cell::new(child.id));
            } else {
                children.push((child.id, Membership::Plain));
            }
        }

        let shape = match GridShape::resolve(config.columns, config.rows, cells.len()) {
            Ok(shape) => shape,
            Err(err) => {
                debug!(error = %err, "grid setup aborted");
                return Err(err);
            }
        };

        if host.position(container) != Position::Absolute {
            host.set_style(container, StyleProp::Position(Position::Relative));
        }
        for cell in &cells {
            host.set_style(cell.element, StyleProp::Position(Position::Absolute));
            host.set_style(cell.element, StyleProp::Overflow(Overflow::Hidden));
        }

        let folded = if config.folded_size.width == 0 || config.folded_size.height == 0 {
            layout::folded_size(shape, host.offset_size(container))
        } else {
            config.folded_size
        };

        debug!(
            columns = shape.columns,
            rows = shape.rows,
            cells = cells.len(),
            "grid created"
        );

        let mut grid = Self {
            state: GridState {
                container,
                shape,
                cells,
                children,
                focused: None,
                trigger: config.trigger(),
                folded,
                padding: config.padding_margin_border,
                timeout: config.tick_delay(),
                move_timer: None,
                animating: false,
            },
            hooks: HookRegistry::new(),
        };
        grid.restore_inner(host, true);
        Ok(grid)
    }

    /// Grid state.
    #[must_use]
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Registered extensions.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// The registered extension of type `T`.
    #[must_use]
    pub fn extension<T: Extension>(&self) -> Option<&T> {
        self.hooks.get::<T>()
    }

    /// Mutable access to the registered extension of type `T`.
    pub fn extension_mut<T: Extension>(&mut self) -> Option<&mut T> {
        self.hooks.get_mut::<T>()
    }

    /// Register an extension after the ones already present.
    ///
    /// On error nothing is registered and nothing is mutated.
    pub fn add_extension<E: Extension>(
        &mut self,
        host: &mut dyn Host,
        mut extension: E,
    ) -> Result<(), ExtensionError> {
        let name = extension.name();
        if self.hooks.contains(name) {
            return Err(ExtensionError::AlreadyRegistered(name));
        }

        let before = self.state.trigger;
        {
            let mut ctx = HookContext::new(&mut self.state, &mut *host);
            if let Err(err) = extension.attach(&mut ctx, &self.hooks) {
                crate::warn!(extension = name, error = %err, "extension rejected");
                return Err(err);
            }
        }
        self.hooks.push(Box::new(extension));
        debug!(extension = name, "extension registered");
        self.notify_trigger_change(host, before);
        Ok(())
    }

    /// Change the focus trigger and notify extensions.
    pub fn set_trigger(&mut self, host: &mut dyn Host, trigger: Trigger) {
        let before = self.state.trigger;
        self.state.trigger = trigger;
        self.notify_trigger_change(host, before);
    }

    /// Animate back to the uniform grid.
    pub fn restore(&mut self, host: &mut dyn Host) {
        self.restore_inner(host, false);
    }

    /// Jump to the uniform grid without animating.
    ///
    /// Used at construction; also useful after the host resized the container.
    pub fn restore_immediately(&mut self, host: &mut dyn Host) {
        self.restore_inner(host, true);
    }

    /// Focus `cell`. Unknown cells restore the grid instead.
    pub fn zoom(&mut self, host: &mut dyn Host, cell: CellId) {
        if self.state.focused == Some(cell) {
            return;
        }

        let Some(targets) = layout::focused_targets(
            self.state.shape,
            self.state.container_size(&*host),
            self.state.folded,
            self.state.cells.len(),
            cell.0,
        ) else {
            debug!(cell = cell.0, "zoom target not found, restoring");
            self.restore(host);
            return;
        };

        self.cancel_tick(host);
        self.start_move(host);
        self.state.focused = None;
        self.state.install_targets(host, targets);
        self.state.focused = Some(cell);
        debug!(cell = cell.0, "zoom");
        self.schedule_tick(host);
    }

    /// Focus the cell containing `el`. Elements outside every cell restore.
    pub fn zoom_element(&mut self, host: &mut dyn Host, el: ElementId) {
        match self.state.cell_of(&*host, el) {
            Some(cell) => self.zoom(host, cell),
            None => self.restore(host),
        }
    }

    /// Run one animation tick now, cancelling the pending one.
    pub fn move_tick(&mut self, host: &mut dyn Host) -> TickOutcome {
        self.cancel_tick(host);
        self.run_tick(host)
    }

    /// Deliver a host notification.
    ///
    /// Extensions see the event first; the grid's own focus handling uses
    /// the trigger that was in effect when the event arrived.
    pub fn handle_event(&mut self, host: &mut dyn Host, event: GridEvent) -> Dispatch {
        if let GridEvent::Timer(id) = event {
            if self.state.move_timer == Some(id) {
                self.state.move_timer = None;
                self.run_tick(host);
            } else if !self.hooks.dispatch_timer(&mut self.state, host, id) {
                trace!(timer = id.0, "stale timer ignored");
            }
            return Dispatch::default();
        }

        let trigger = self.state.trigger;
        let (commands, prevent_default) =
            self.hooks.dispatch_event(&mut self.state, host, &event);
        self.notify_trigger_change(host, trigger);

        let own = match event {
            GridEvent::CellEnter(el) if trigger == Trigger::Hover => {
                self.state.cell_of(&*host, el).map(Command::Zoom)
            }
            GridEvent::Click(el) if trigger == Trigger::Click => {
                self.state.cell_of(&*host, el).map(Command::Zoom)
            }
            GridEvent::ContainerLeave { related }
                if trigger == Trigger::Hover && self.state.leaves_container(&*host, related) =>
            {
                Some(Command::Restore)
            }
            _ => None,
        };

        if let Some(command) = own {
            self.execute(host, command);
        }
        for command in commands {
            self.execute(host, command);
        }

        Dispatch { prevent_default }
    }

    /// Execute a command.
    pub fn execute(&mut self, host: &mut dyn Host, command: Command) {
        match command {
            Command::None => {}
            Command::Restore => self.restore(host),
            Command::Zoom(cell) => self.zoom(host, cell),
            Command::Batch(commands) => {
                for command in commands {
                    self.execute(host, command);
                }
            }
        }
    }

    /// Size the container so a focused cell would measure `width × height`.
    pub fn size_container_to_fit_around(&self, host: &mut dyn Host, width: i32, height: i32) {
        let folded = self.state.folded;
        let container = self.state.container;
        host.set_style(
            container,
            StyleProp::width(
                width.saturating_add(folded.width.saturating_mul(self.state.columns() as i32 - 1)),
            ),
        );
        host.set_style(
            container,
            StyleProp::height(
                height.saturating_add(folded.height.saturating_mul(self.state.rows() as i32 - 1)),
            ),
        );
    }

    // --- Private helpers ---

    fn restore_inner(&mut self, host: &mut dyn Host, setup: bool) {
        if !setup {
            let before = self.state.trigger;
            self.hooks.fire(Hook::Restoring, &mut self.state, host);
            self.notify_trigger_change(host, before);
        }
        self.cancel_tick(host);
        self.start_move(host);
        self.state.focused = None;
        self.restore_uniform(host, setup);
    }

    fn restore_uniform(&mut self, host: &mut dyn Host, setup: bool) {
        let targets = layout::uniform_targets(
            self.state.shape,
            self.state.container_size(&*host),
            self.state.cells.len(),
        );
        self.state.install_targets(host, targets);

        if setup {
            mover::paint_targets(&self.state, host);
            self.state.animating = false;
            return;
        }
        debug!("restore");
        self.schedule_tick(host);
    }

    fn run_tick(&mut self, host: &mut dyn Host) -> TickOutcome {
        let touched = mover::advance(&self.state, host);
        self.hooks.fire(Hook::Moving, &mut self.state, host);

        if !touched {
            self.cancel_tick(host);
            self.state.animating = false;
            self.stop_move(host);
            trace!("animation settled");
            return TickOutcome::Settled;
        }

        self.schedule_tick(host);
        TickOutcome::Continue
    }

    fn start_move(&mut self, host: &mut dyn Host) {
        if let Some(cell) = self.state.focused.and_then(|id| self.state.cell(id)) {
            let target = cell.scroll_target;
            host.reset_scroll(target);
            host.set_style(target, StyleProp::Overflow(Overflow::Hidden));
        }
        self.hooks.fire(Hook::StartMove, &mut self.state, host);
    }

    fn stop_move(&mut self, host: &mut dyn Host) {
        if let Some(cell) = self.state.focused.and_then(|id| self.state.cell(id)) {
            host.set_style(cell.scroll_target, StyleProp::Overflow(Overflow::Auto));
        }
        self.hooks.fire(Hook::StopMove, &mut self.state, host);
    }

    fn schedule_tick(&mut self, host: &mut dyn Host) {
        debug_assert!(self.state.move_timer.is_none(), "tick already pending");
        self.state.move_timer = Some(host.set_timeout(self.state.timeout));
        self.state.animating = true;
    }

    fn cancel_tick(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.state.move_timer.take() {
            host.clear_timeout(id);
        }
    }

    fn notify_trigger_change(&mut self, host: &mut dyn Host, before: Trigger) {
        if self.state.trigger != before {
            debug!(trigger = ?self.state.trigger, "focus trigger changed");
            self.hooks.fire(Hook::TriggerChanged, &mut self.state, host);
        }
    }
}
