#![forbid(unsafe_code)]

//! Suppress link activation inside cells that are not focused.

use zoomgrid_core::{ElementId, Extension, GridEvent, HookContext, HostDocument, Reaction};

pub const NAME: &str = "disable-folded-links";

/// Disable-folded-links extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisableFoldedLinks;

impl DisableFoldedLinks {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// The nearest `A` element at or above `el`, stopping at `boundary`.
fn enclosing_link<H: HostDocument + ?Sized>(
    host: &H,
    el: ElementId,
    boundary: ElementId,
) -> Option<ElementId> {
    let mut cursor = Some(el);
    while let Some(current) = cursor {
        if current == boundary {
            return None;
        }
        if host.info(current).is_some_and(|info| info.has_tag("A")) {
            return Some(current);
        }
        cursor = host.parent(current);
    }
    None
}

impl Extension for DisableFoldedLinks {
    fn name(&self) -> &'static str {
        NAME
    }

    fn on_event(&mut self, ctx: &mut HookContext<'_>, event: &GridEvent) -> Reaction {
        let GridEvent::Click(target) = *event else {
            return Reaction::none();
        };
        let Some(cell) = ctx.grid.cell_of(&*ctx.host, target) else {
            return Reaction::none();
        };
        if ctx.grid.focused() == Some(cell) {
            return Reaction::none();
        }
        match enclosing_link(&*ctx.host, target, ctx.grid.container()) {
            Some(_) => Reaction::none().prevent_default(),
            None => Reaction::none(),
        }
    }
}
