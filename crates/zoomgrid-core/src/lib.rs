#![forbid(unsafe_code)]

//! Core of the ZoomGrid widget.
//!
//! A container's children are arranged as an R×C grid. Focusing one cell
//! animates it to fill most of the container while the others fold to a small
//! fixed size; restoring animates back to uniform cells.
//!
//! # Role in ZoomGrid
//! `zoomgrid-core` owns the geometry, the convergence step, the animation
//! loop and the hook registry. It never touches a concrete document: every
//! read and write goes through the [`Host`] trait, so the same grid runs
//! against a browser binding, the in-memory document of `zoomgrid-web`, or
//! the recording host used in tests.
//!
//! # Primary responsibilities
//! - **Layout**: [`layout`] computes target rectangles for the uniform and
//!   focused states.
//! - **Convergence**: [`step`] halves distances and snaps below a threshold.
//! - **Lifecycle**: [`ZoomGrid`] drives restore/zoom transitions and fires
//!   [`Hook`]s on registered [`Extension`]s.

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod hooks;
pub mod host;
pub mod layout;
pub mod logging;
mod mover;
pub mod pattern;
pub mod step;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::{DEFAULT_TAG_NAME, DEFAULT_TIMEOUT, Trigger, ZoomGridConfig};
pub use error::{ExtensionError, GridError};
pub use event::{Command, Dispatch, GridEvent, Reaction};
pub use geometry::{Point, Rect, Size};
pub use grid::{Cell, CellId, GridState, Membership, TickOutcome, ZoomGrid};
pub use hooks::{Extension, Hook, HookContext, HookRegistry};
pub use host::{
    Display, ElementId, ElementInfo, Host, HostDocument, HostTimers, LengthProperty, Overflow,
    Position, StyleProp, TimerId, Visibility,
};
pub use layout::GridShape;
pub use pattern::{ElementPattern, parse_patterns};

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
