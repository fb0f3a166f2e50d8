#![forbid(unsafe_code)]

//! Lifecycle hooks: the extension points of the animation loop.
//!
//! Extensions implement [`Extension`] and are registered on a grid in order.
//! Every hook firing calls every registered extension exactly once, in
//! registration order, so no extension can silently cut off the ones
//! registered after it.
//!
//! # Hooks
//!
//! | Hook | Fired |
//! |------|-------|
//! | [`Hook::StartMove`] | before new targets are installed; focus is still the outgoing cell |
//! | [`Hook::Moving`] | after every animation tick has painted |
//! | [`Hook::StopMove`] | once, after the tick in which nothing moved |
//! | [`Hook::Restoring`] | at the start of an animated restore |
//! | [`Hook::TriggerChanged`] | after the focus trigger changed |
//!
//! # Invariants
//!
//! 1. Hooks never run re-entrantly: commands produced by extensions are
//!    executed by the grid after dispatch completes.
//! 2. Extension names are unique within one registry.
//! 3. The registry only grows; extensions are never removed.

use core::any::Any;
use core::fmt;

use crate::error::ExtensionError;
use crate::event::{Command, GridEvent, Reaction};
use crate::grid::GridState;
use crate::host::{Host, TimerId};

/// Lifecycle hook identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    StartMove,
    Moving,
    StopMove,
    Restoring,
    TriggerChanged,
}

/// What a hook sees: the grid state and the host.
pub struct HookContext<'a> {
    pub grid: &'a mut GridState,
    pub host: &'a mut dyn Host,
}

impl<'a> HookContext<'a> {
    /// Bundle grid state and host.
    pub fn new(grid: &'a mut GridState, host: &'a mut dyn Host) -> Self {
        Self { grid, host }
    }
}

/// An optional behavior participating in the grid lifecycle.
///
/// All methods default to doing nothing.
pub trait Extension: Any {
    /// Unique name, used for precondition checks and diagnostics.
    fn name(&self) -> &'static str;

    /// Called once before registration. `installed` holds the extensions
    /// registered so far. Returning an error aborts registration; an
    /// extension must not mutate anything before it knows it will succeed.
    fn attach(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        Ok(())
    }

    /// See [`Hook::StartMove`].
    fn start_move(&mut self, _ctx: &mut HookContext<'_>) {}

    /// See [`Hook::Moving`].
    fn moving(&mut self, _ctx: &mut HookContext<'_>) {}

    /// See [`Hook::StopMove`].
    fn stop_move(&mut self, _ctx: &mut HookContext<'_>) {}

    /// See [`Hook::Restoring`].
    fn restoring(&mut self, _ctx: &mut HookContext<'_>) {}

    /// See [`Hook::TriggerChanged`].
    fn trigger_changed(&mut self, _ctx: &mut HookContext<'_>) {}

    /// React to a host event. Runs before the grid's own handling.
    fn on_event(&mut self, _ctx: &mut HookContext<'_>, _event: &GridEvent) -> Reaction {
        Reaction::none()
    }

    /// Handle a timer this extension scheduled. Returns `true` if it was ours.
    fn on_timer(&mut self, _ctx: &mut HookContext<'_>, _id: TimerId) -> bool {
        false
    }
}

/// Ordered list of registered extensions.
#[derive(Default)]
pub struct HookRegistry {
    extensions: Vec<Box<dyn Extension>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("extensions", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether no extension is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extension names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().map(|ext| ext.name())
    }

    /// Whether an extension with `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// The registered extension of type `T`, if any.
    #[must_use]
    pub fn get<T: Extension>(&self) -> Option<&T> {
        self.extensions.iter().find_map(|ext| {
            let any: &dyn Any = &**ext;
            any.downcast_ref::<T>()
        })
    }

    /// Mutable access to the registered extension of type `T`, if any.
    pub fn get_mut<T: Extension>(&mut self) -> Option<&mut T> {
        self.extensions.iter_mut().find_map(|ext| {
            let any: &mut dyn Any = &mut **ext;
            any.downcast_mut::<T>()
        })
    }

    pub(crate) fn push(&mut self, extension: Box<dyn Extension>) {
        self.extensions.push(extension);
    }

    /// Fire `hook` on every extension in registration order.
    pub(crate) fn fire(&mut self, hook: Hook, grid: &mut GridState, host: &mut dyn Host) {
        for ext in &mut self.extensions {
            let mut ctx = HookContext::new(&mut *grid, &mut *host);
            match hook {
                Hook::StartMove => ext.start_move(&mut ctx),
                Hook::Moving => ext.moving(&mut ctx),
                Hook::StopMove => ext.stop_move(&mut ctx),
                Hook::Restoring => ext.restoring(&mut ctx),
                Hook::TriggerChanged => ext.trigger_changed(&mut ctx),
            }
        }
    }

    /// Offer an event to every extension; collect commands and the
    /// prevent-default vote.
    pub(crate) fn dispatch_event(
        &mut self,
        grid: &mut GridState,
        host: &mut dyn Host,
        event: &GridEvent,
    ) -> (Vec<Command>, bool) {
        let mut commands = Vec::new();
        let mut prevent_default = false;
        for ext in &mut self.extensions {
            let mut ctx = HookContext::new(&mut *grid, &mut *host);
            let reaction = ext.on_event(&mut ctx, event);
            prevent_default |= reaction.prevent_default;
            if !reaction.command.is_none() {
                commands.push(reaction.command);
            }
        }
        (commands, prevent_default)
    }

    /// Offer a timer to extensions until one claims it.
    pub(crate) fn dispatch_timer(
        &mut self,
        grid: &mut GridState,
        host: &mut dyn Host,
        id: TimerId,
    ) -> bool {
        self.extensions.iter_mut().any(|ext| {
            let mut ctx = HookContext::new(&mut *grid, &mut *host);
            ext.on_timer(&mut ctx, id)
        })
    }
}
