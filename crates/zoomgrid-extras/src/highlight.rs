#![forbid(unsafe_code)]

//! Hover highlighting for click-to-focus grids.
//!
//! With highlighting enabled, cells only take focus on click. Hovering an
//! unfocused cell raises its opacity to [`HighlightConfig::opacity_highlighted`];
//! leaving drops it back to the resting level. A click on the container's
//! parent outside the container restores the grid.
//!
//! [`HighlightMode::OnClick`] starts in hover mode and enables highlighting on
//! the first click on a cell; the next animated restore switches back.

use serde::{Deserialize, Serialize};
use zoomgrid_core::{
    Command, Extension, ExtensionError, GridEvent, HookContext, HookRegistry, Reaction, Trigger,
};

use crate::transparency::{self, Transparency, TransparencyConfig};

pub const NAME: &str = "highlight";

/// When highlighting is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightMode {
    /// From registration on.
    #[default]
    Always,
    /// From the first click on a cell until the next restore.
    OnClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    pub mode: HighlightMode,
    pub opacity_highlighted: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            mode: HighlightMode::Always,
            opacity_highlighted: 0.75,
        }
    }
}

/// Highlight extension. Requires [`Transparency`].
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    config: HighlightConfig,
    levels: TransparencyConfig,
    enabled: bool,
}

impl Highlight {
    /// Highlighting from registration on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighting armed by the first click on a cell.
    #[must_use]
    pub fn on_click() -> Self {
        Self::with_config(HighlightConfig {
            mode: HighlightMode::OnClick,
            ..HighlightConfig::default()
        })
    }

    #[must_use]
    pub fn with_config(config: HighlightConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Whether hover highlighting is currently active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self, ctx: &mut HookContext<'_>) {
        self.enabled = true;
        ctx.grid.set_trigger(Trigger::Click);
        zoomgrid_core::debug!("highlight enabled");
    }

    fn highlight(&self, ctx: &mut HookContext<'_>, target: zoomgrid_core::ElementId) {
        let Some(id) = ctx.grid.cell_of(&*ctx.host, target) else {
            return;
        };
        if ctx.grid.focused() == Some(id) || ctx.grid.is_moving() {
            return;
        }
        ctx.grid
            .set_opacity(&mut *ctx.host, id, self.config.opacity_highlighted);
    }

    fn dim(
        &self,
        ctx: &mut HookContext<'_>,
        target: zoomgrid_core::ElementId,
        related: Option<zoomgrid_core::ElementId>,
    ) {
        let Some(left) = ctx.grid.cell_of(&*ctx.host, target) else {
            return;
        };
        if ctx.grid.focused() == Some(left) || ctx.grid.is_moving() {
            return;
        }
        let entered = related.and_then(|el| ctx.grid.cell_of(&*ctx.host, el));
        if entered == Some(left) {
            return;
        }
        let resting = if ctx.grid.focused().is_some() {
            self.levels.opacity_folded
        } else {
            self.levels.opacity_unfocused
        };
        ctx.grid.set_opacity(&mut *ctx.host, left, resting);
    }
}

impl Extension for Highlight {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attach(
        &mut self,
        ctx: &mut HookContext<'_>,
        installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        let Some(transparency) = installed.get::<Transparency>() else {
            return Err(ExtensionError::Requires {
                extension: NAME,
                requires: transparency::NAME,
            });
        };
        match self.config.mode {
            HighlightMode::OnClick if ctx.grid.trigger() == Trigger::Click => {
                Err(ExtensionError::WrongTrigger)
            }
            HighlightMode::OnClick => {
                self.levels = *transparency.config();
                Ok(())
            }
            HighlightMode::Always => {
                self.levels = *transparency.config();
                self.enable(ctx);
                Ok(())
            }
        }
    }

    fn restoring(&mut self, ctx: &mut HookContext<'_>) {
        if self.config.mode == HighlightMode::OnClick && self.enabled {
            self.enabled = false;
            ctx.grid.set_trigger(Trigger::Hover);
        }
    }

    fn on_event(&mut self, ctx: &mut HookContext<'_>, event: &GridEvent) -> Reaction {
        if !self.enabled {
            if self.config.mode == HighlightMode::OnClick
                && let GridEvent::Click(el) = *event
                && ctx.grid.cell_of(&*ctx.host, el).is_some()
            {
                self.enable(ctx);
            }
            return Reaction::none();
        }

        match *event {
            GridEvent::CellEnter(target) => self.highlight(ctx, target),
            GridEvent::CellLeave { target, related } => self.dim(ctx, target, related),
            GridEvent::OutsideClick { target }
                if !ctx.host.contains(ctx.grid.container(), target) =>
            {
                return Reaction::command(Command::Restore);
            }
            _ => {}
        }
        Reaction::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomgrid_core::testing::{RecordingHost, settle_ticks};
    use zoomgrid_core::{CellId, ZoomGrid, ZoomGridConfig};

    fn setup(highlight: Highlight) -> (RecordingHost, ZoomGrid, Vec<zoomgrid_core::ElementId>) {
        let (mut host, container, cells) = RecordingHost::with_grid(4, 200, 200);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        grid.add_extension(&mut host, Transparency::new()).unwrap();
        grid.add_extension(&mut host, highlight).unwrap();
        (host, grid, cells)
    }

    #[test]
    fn requires_transparency() {
        let (mut host, container, _) = RecordingHost::with_grid(4, 200, 200);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        let err = grid.add_extension(&mut host, Highlight::new()).unwrap_err();
        assert_eq!(
            err,
            ExtensionError::Requires {
                extension: "highlight",
                requires: "transparency"
            }
        );
        assert_eq!(grid.state().trigger(), Trigger::Hover);
    }

    #[test]
    fn switches_to_click_trigger() {
        let (mut host, mut grid, cells) = setup(Highlight::new());
        assert_eq!(grid.state().trigger(), Trigger::Click);

        // Leaving the container no longer restores.
        grid.handle_event(&mut host, GridEvent::Click(cells[1]));
        assert_eq!(grid.state().focused(), Some(CellId(1)));
        grid.handle_event(&mut host, GridEvent::ContainerLeave { related: None });
        assert_eq!(grid.state().focused(), Some(CellId(1)));
    }

    #[test]
    fn hover_highlights_and_dims() {
        let (mut host, mut grid, cells) = setup(Highlight::new());
        grid.handle_event(&mut host, GridEvent::CellEnter(cells[2]));
        assert_eq!(host.element(cells[2]).opacity, Some(0.75));

        // Moving within the same cell keeps the highlight.
        let inner = host.add(cells[2], "SPAN");
        grid.handle_event(
            &mut host,
            GridEvent::CellLeave {
                target: cells[2],
                related: Some(inner),
            },
        );
        assert_eq!(host.element(cells[2]).opacity, Some(0.75));

        grid.handle_event(
            &mut host,
            GridEvent::CellLeave {
                target: cells[2],
                related: Some(cells[3]),
            },
        );
        assert_eq!(host.element(cells[2]).opacity, Some(0.5));
    }

    #[test]
    fn no_highlight_while_moving() {
        let (mut host, mut grid, cells) = setup(Highlight::new());
        grid.handle_event(&mut host, GridEvent::Click(cells[0]));
        assert!(grid.state().is_moving());
        let before = host.element(cells[3]).opacity;
        grid.handle_event(&mut host, GridEvent::CellEnter(cells[3]));
        assert_eq!(host.element(cells[3]).opacity, before);
    }

    #[test]
    fn outside_click_restores() {
        let (mut host, mut grid, cells) = setup(Highlight::new());
        grid.handle_event(&mut host, GridEvent::Click(cells[0]));
        settle_ticks(&mut grid, &mut host, 64);

        // A click bubbling up from a cell is not outside.
        grid.handle_event(&mut host, GridEvent::OutsideClick { target: cells[0] });
        assert_eq!(grid.state().focused(), Some(CellId(0)));

        let body = host.body();
        grid.handle_event(&mut host, GridEvent::OutsideClick { target: body });
        assert_eq!(grid.state().focused(), None);
    }

    #[test]
    fn on_click_mode_arms_and_reverts() {
        let (mut host, mut grid, cells) = setup(Highlight::on_click());
        assert_eq!(grid.state().trigger(), Trigger::Hover);

        grid.handle_event(&mut host, GridEvent::CellEnter(cells[1]));
        assert_eq!(grid.state().focused(), Some(CellId(1)));
        grid.handle_event(&mut host, GridEvent::Click(cells[1]));
        assert_eq!(grid.state().trigger(), Trigger::Click);
        assert!(grid.extension::<Highlight>().unwrap().is_enabled());

        grid.restore(&mut host);
        assert_eq!(grid.state().trigger(), Trigger::Hover);
        assert!(!grid.extension::<Highlight>().unwrap().is_enabled());
    }

    #[test]
    fn on_click_mode_rejects_click_grids() {
        let (mut host, container, _) = RecordingHost::with_grid(4, 200, 200);
        let config = ZoomGridConfig::default().zoom_on_click(true);
        let mut grid = ZoomGrid::create(&mut host, container, &config).unwrap();
        grid.add_extension(&mut host, Transparency::new()).unwrap();
        let err = grid.add_extension(&mut host, Highlight::on_click()).unwrap_err();
        assert_eq!(err, ExtensionError::WrongTrigger);
    }
}
