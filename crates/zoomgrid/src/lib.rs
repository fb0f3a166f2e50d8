#![forbid(unsafe_code)]

//! ZoomGrid public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! common types of the internal crates and offers a lightweight prelude.
//!
//! ```ignore
//! use zoomgrid::prelude::*;
//!
//! let (host, container, cells) = WebHost::with_grid(9, 300, 300);
//! let mut prog = GridProgram::new(host, container, &ZoomGridConfig::default())?;
//! prog.push_event(GridEvent::CellEnter(cells[4]));
//! prog.run_until_idle(64);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use zoomgrid_core::{
    Cell, CellId, Command, Dispatch, ElementId, Extension, ExtensionError, GridError, GridEvent,
    GridShape, GridState, Hook, HookContext, HookRegistry, Host, HostDocument, HostTimers, Point,
    Reaction, Rect, Size, StyleProp, TickOutcome, TimerId, Trigger, ZoomGrid, ZoomGridConfig,
};

// --- Extras re-exports -----------------------------------------------------

#[cfg(feature = "extras")]
pub use zoomgrid_extras::{
    ContainerFade, DisableFoldedLinks, Frame, Highlight, MaxChildWidth, RestoreButton,
    Transparency, UnfocusedHide, create_for_gallery,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use zoomgrid_web::{DeterministicClock, GridProgram, MemoryDocument, StepResult, WebHost};

// --- Errors ---------------------------------------------------------------

/// Any failure surfaced by ZoomGrid APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid creation failed.
    Grid(GridError),
    /// An extension refused to register.
    Extension(ExtensionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(err) => write!(f, "{err}"),
            Self::Extension(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            Self::Extension(err) => Some(err),
        }
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<ExtensionError> for Error {
    fn from(err: ExtensionError) -> Self {
        Self::Extension(err)
    }
}

/// Standard result type for ZoomGrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellId, Error, Extension, GridEvent, Host, HostDocument, Result, Trigger, ZoomGrid,
        ZoomGridConfig,
    };

    #[cfg(feature = "extras")]
    pub use crate::{Highlight, RestoreButton, Transparency};

    #[cfg(feature = "web")]
    pub use crate::{GridProgram, WebHost};

    pub use crate::core;
    #[cfg(feature = "extras")]
    pub use crate::extras;
    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use zoomgrid_core as core;
#[cfg(feature = "extras")]
pub use zoomgrid_extras as extras;
#[cfg(feature = "web")]
pub use zoomgrid_web as web;
