#![forbid(unsafe_code)]

//! Host notifications in, commands and dispatch results out.

use crate::grid::CellId;
use crate::host::{ElementId, TimerId};

/// A notification delivered by the host to [`ZoomGrid::handle_event`].
///
/// [`ZoomGrid::handle_event`]: crate::grid::ZoomGrid::handle_event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// Pointer entered `target` (a cell or one of its descendants).
    CellEnter(ElementId),
    /// Pointer left `target` for `related` (the element entered, if known).
    CellLeave {
        target: ElementId,
        related: Option<ElementId>,
    },
    /// Click on any element.
    Click(ElementId),
    /// Pointer left the container for `related` (the element entered, if known).
    ContainerLeave { related: Option<ElementId> },
    /// Click on the container's parent. `target` is the clicked element.
    OutsideClick { target: ElementId },
    /// Document-level pointer movement.
    PointerMove,
    /// A host timer fired.
    Timer(TimerId),
}

/// A grid operation requested by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Nothing to do.
    #[default]
    None,
    /// Animate back to the uniform grid.
    Restore,
    /// Focus a cell.
    Zoom(CellId),
    /// Several commands, executed in order.
    Batch(Vec<Command>),
}

impl Command {
    /// Whether this command does nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Batch(commands) => commands.iter().all(Command::is_none),
            _ => false,
        }
    }
}

/// How an extension responded to an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reaction {
    /// Operation to run once every extension has seen the event.
    pub command: Command,
    /// Ask the host to suppress the event's default action.
    pub prevent_default: bool,
}

impl Reaction {
    /// No reaction.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// React with a command.
    #[must_use]
    pub fn command(command: Command) -> Self {
        Self {
            command,
            prevent_default: false,
        }
    }

    /// Also suppress the host's default action (builder).
    #[must_use]
    pub fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// Result of [`ZoomGrid::handle_event`] for the host.
///
/// [`ZoomGrid::handle_event`]: crate::grid::ZoomGrid::handle_event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// The host should suppress the event's default action.
    pub prevent_default: bool,
}
