#![forbid(unsafe_code)]

//! A "Close" link floating over the focused cell of a click-to-focus grid.
//!
//! The button is created on first use as an absolutely positioned division
//! appended to the document body. It is hidden whenever a transition starts
//! and shown over the focused cell when one ends.

use zoomgrid_core::{
    Command, ElementId, Extension, GridEvent, HookContext, Position, Reaction, StyleProp, Trigger,
    Visibility,
};

pub const NAME: &str = "restore-button";

/// Class of the generated link.
pub const LINK_CLASS: &str = "ZoomGridRestoreButton";

/// Text of the generated link.
pub const LINK_TEXT: &str = "Close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Button {
    division: ElementId,
    link: ElementId,
}

/// Restore button extension.
#[derive(Debug, Clone, Default)]
pub struct RestoreButton {
    button: Option<Button>,
}

impl RestoreButton {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The button's division, once created.
    #[must_use]
    pub fn division(&self) -> Option<ElementId> {
        self.button.map(|b| b.division)
    }

    /// The clickable link, once created.
    #[must_use]
    pub fn link(&self) -> Option<ElementId> {
        self.button.map(|b| b.link)
    }

    fn ensure(&mut self, ctx: &mut HookContext<'_>) -> Button {
        if let Some(button) = self.button {
            return button;
        }
        let host = &mut *ctx.host;
        let division = host.create_element(None, "DIV", None);
        host.set_style(division, StyleProp::Position(Position::Absolute));
        host.set_style(division, StyleProp::left(0));
        host.set_style(division, StyleProp::top(0));
        host.set_style(division, StyleProp::ZIndex(1));
        host.set_style(division, StyleProp::Visibility(Visibility::Hidden));
        let link = host.create_element(Some(division), "A", Some(LINK_CLASS));
        host.set_text(link, LINK_TEXT);

        let button = Button { division, link };
        self.button = Some(button);
        button
    }

    fn hide(&mut self, ctx: &mut HookContext<'_>) {
        let button = self.ensure(ctx);
        ctx.host
            .set_style(button.division, StyleProp::Visibility(Visibility::Hidden));
    }

    fn show(&mut self, ctx: &mut HookContext<'_>) {
        if ctx.grid.trigger() != Trigger::Click {
            return;
        }
        let Some(cell) = ctx.grid.focused().and_then(|id| ctx.grid.cell(id)) else {
            return;
        };
        let at = ctx.host.page_offset(cell.element());
        let button = self.ensure(ctx);
        ctx.host.set_style(button.division, StyleProp::left(at.x));
        ctx.host.set_style(button.division, StyleProp::top(at.y));
        ctx.host
            .set_style(button.division, StyleProp::Visibility(Visibility::Visible));
    }
}

impl Extension for RestoreButton {
    fn name(&self) -> &'static str {
        NAME
    }

    fn start_move(&mut self, ctx: &mut HookContext<'_>) {
        self.hide(ctx);
    }

    fn stop_move(&mut self, ctx: &mut HookContext<'_>) {
        self.show(ctx);
    }

    fn trigger_changed(&mut self, ctx: &mut HookContext<'_>) {
        self.show(ctx);
    }

    fn on_event(&mut self, ctx: &mut HookContext<'_>, event: &GridEvent) -> Reaction {
        match (*event, self.button) {
            (GridEvent::Click(target), Some(button)) if target == button.link => {
                self.hide(ctx);
                Reaction::command(Command::Restore).prevent_default()
            }
            _ => Reaction::none(),
        }
    }
}
