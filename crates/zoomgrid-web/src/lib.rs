#![forbid(unsafe_code)]

//! `zoomgrid-web` provides a host-driven, deterministic host for ZoomGrid.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes pointer
//!   events and decides when timers fire.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate intentionally does not bind to `wasm-bindgen`. [`WebHost`]
//! mirrors the document as a [`MemoryDocument`] and keeps timers in a
//! [`TimerQueue`]; [`GridProgram`](grid_program::GridProgram) drives a grid
//! through push / advance / step cycles.

pub mod document;
pub mod grid_program;

use core::time::Duration;
use std::collections::BTreeMap;

use zoomgrid_core::{
    ElementId, ElementInfo, HostDocument, HostTimers, Point, Position, Size, StyleProp, TimerId,
};

pub use document::{ComputedStyle, MemoryDocument, Node};
pub use grid_program::{GridProgram, StepResult};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Counters kept by a [`TimerQueue`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerStats {
    pub scheduled: u64,
    pub cancelled: u64,
    pub fired: u64,
}

/// Single-shot timers ordered by due time, ties broken by creation order.
#[derive(Debug, Default, Clone)]
pub struct TimerQueue {
    next_id: u64,
    pending: BTreeMap<TimerId, Duration>,
    stats: TimerStats,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer due at `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, now.saturating_add(delay));
        self.stats.scheduled += 1;
        id
    }

    /// Cancel a pending timer. Returns `false` if it was not pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.pending.remove(&id).is_some();
        if removed {
            self.stats.cancelled += 1;
        }
        removed
    }

    /// Earliest pending due time.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerId> {
        let (&id, _) = self
            .pending
            .iter()
            .filter(|(_, due)| **due <= now)
            .min_by_key(|(id, due)| (**due, **id))?;
        self.pending.remove(&id);
        self.stats.fired += 1;
        Some(id)
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> TimerStats {
        self.stats
    }
}

/// Web host: a [`MemoryDocument`] plus host-driven clock and timers.
#[derive(Debug, Clone, Default)]
pub struct WebHost {
    pub document: MemoryDocument,
    pub clock: DeterministicClock,
    pub timers: TimerQueue,
}

impl WebHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host around an existing document.
    #[must_use]
    pub fn with_document(document: MemoryDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// A document with a `width × height` container holding `count` divisions.
    #[must_use]
    pub fn with_grid(count: usize, width: i32, height: i32) -> (Self, ElementId, Vec<ElementId>) {
        let mut document = MemoryDocument::new();
        let container = document.append(document.body(), "DIV");
        document.resize(container, width, height);
        let cells = (0..count)
            .map(|_| document.append(container, "DIV"))
            .collect();
        (Self::with_document(document), container, cells)
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest pending timer at or before the current time.
    pub fn pop_due(&mut self) -> Option<TimerId> {
        self.timers.pop_due(self.clock.now())
    }
}

impl HostDocument for WebHost {
    fn children(&self, parent: ElementId) -> Vec<ElementInfo> {
        self.document.children(parent)
    }

    fn descendants(&self, root: ElementId, tag: &str) -> Vec<ElementInfo> {
        self.document.descendants(root, tag)
    }

    fn info(&self, el: ElementId) -> Option<ElementInfo> {
        self.document.info(el)
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.document.parent(el)
    }

    fn offset(&self, el: ElementId) -> Point {
        self.document.offset(el)
    }

    fn offset_size(&self, el: ElementId) -> Size {
        self.document.offset_size(el)
    }

    fn position(&self, el: ElementId) -> Position {
        self.document.position(el)
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProp) {
        self.document.set_style(el, prop);
    }

    fn reset_scroll(&mut self, el: ElementId) {
        self.document.reset_scroll(el);
    }

    fn create_element(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        class: Option<&str>,
    ) -> ElementId {
        self.document.create_element(parent, tag, class)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.document.append_child(parent, child);
    }

    fn wrap_content(&mut self, el: ElementId, tag: &str, class: Option<&str>) -> ElementId {
        self.document.wrap_content(el, tag, class)
    }

    fn replace_child(&mut self, old: ElementId, new: ElementId) {
        self.document.replace_child(old, new);
    }

    fn set_class(&mut self, el: ElementId, class: &str) {
        self.document.set_class(el, class);
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        self.document.set_text(el, text);
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.document.attribute(el, name)
    }
}

impl HostTimers for WebHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.timers.schedule(self.clock.now(), delay)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }
}
