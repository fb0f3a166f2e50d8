#![forbid(unsafe_code)]

//! Fade the whole container out after pointer inactivity.
//!
//! Any pointer movement cancels a pending fade-out and, if the container is
//! dimmed, fades it back in. Otherwise movement arms the fade-out timer.
//! Fading runs in fixed opacity steps on a short timer.
//!
//! # Invariants
//!
//! 1. At most one fade-in and one fade-out timer are pending.
//! 2. The container never fades while a cell is focused; while the grid
//!    animates the fade-out is postponed by the long delay.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use zoomgrid_core::{
    Extension, ExtensionError, GridEvent, HookContext, HookRegistry, Reaction, StyleProp, TimerId,
};

use crate::transparency::{self, Transparency};

pub const NAME: &str = "container-fade";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerFadeConfig {
    /// Inactivity in milliseconds before fading out.
    pub fade_out_after: u64,
    /// Milliseconds between fade steps.
    pub fading_timeout: u64,
    /// Opacity change per fade step.
    pub step: f32,
}

impl Default for ContainerFadeConfig {
    fn default() -> Self {
        Self {
            fade_out_after: 1000,
            fading_timeout: 10,
            step: 0.25,
        }
    }
}

impl ContainerFadeConfig {
    #[must_use]
    pub fn fade_out_delay(&self) -> Duration {
        Duration::from_millis(self.fade_out_after)
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.fading_timeout)
    }
}

/// Container fade extension. Requires [`Transparency`].
#[derive(Debug, Clone)]
pub struct ContainerFade {
    config: ContainerFadeConfig,
    opacity: f32,
    fade_in_timer: Option<TimerId>,
    fade_out_timer: Option<TimerId>,
}

impl Default for ContainerFade {
    fn default() -> Self {
        Self::with_config(ContainerFadeConfig::default())
    }
}

impl ContainerFade {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ContainerFadeConfig) -> Self {
        Self {
            config,
            opacity: 1.0,
            fade_in_timer: None,
            fade_out_timer: None,
        }
    }

    /// Current container opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    fn paint(&self, ctx: &mut HookContext<'_>) {
        let container = ctx.grid.container();
        ctx.host.set_style(container, StyleProp::Opacity(self.opacity));
    }

    fn fade_in(&mut self, ctx: &mut HookContext<'_>) {
        if let Some(id) = self.fade_in_timer.take() {
            ctx.host.clear_timeout(id);
        }
        self.opacity = (self.opacity + self.config.step).min(1.0);
        self.paint(ctx);
        if self.opacity < 1.0 {
            self.fade_in_timer = Some(ctx.host.set_timeout(self.config.step_delay()));
        }
    }

    fn fade_out(&mut self, ctx: &mut HookContext<'_>) {
        self.opacity = (self.opacity - self.config.step).max(0.0);
        let focused = ctx.grid.focused().is_some();
        let moving = ctx.grid.is_moving();
        if focused || moving {
            self.opacity = 1.0;
        }
        self.paint(ctx);
        if focused || self.opacity <= 0.0 {
            return;
        }
        let delay = if moving {
            self.config.fade_out_delay()
        } else {
            self.config.step_delay()
        };
        self.fade_out_timer = Some(ctx.host.set_timeout(delay));
    }
}

impl Extension for ContainerFade {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attach(
        &mut self,
        _ctx: &mut HookContext<'_>,
        installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        if installed.get::<Transparency>().is_none() {
            return Err(ExtensionError::Requires {
                extension: NAME,
                requires: transparency::NAME,
            });
        }
        Ok(())
    }

    fn on_event(&mut self, ctx: &mut HookContext<'_>, event: &GridEvent) -> Reaction {
        if !matches!(event, GridEvent::PointerMove) {
            return Reaction::none();
        }
        if let Some(id) = self.fade_out_timer.take() {
            ctx.host.clear_timeout(id);
        }
        if self.opacity < 1.0 {
            self.fade_in(ctx);
        } else {
            self.fade_out_timer = Some(ctx.host.set_timeout(self.config.fade_out_delay()));
        }
        Reaction::none()
    }

    fn on_timer(&mut self, ctx: &mut HookContext<'_>, id: TimerId) -> bool {
        if self.fade_in_timer == Some(id) {
            self.fade_in_timer = None;
            self.fade_in(ctx);
            true
        } else if self.fade_out_timer == Some(id) {
            self.fade_out_timer = None;
            self.fade_out(ctx);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomgrid_core::testing::{RecordingHost, settle, settle_ticks};
    use zoomgrid_core::{CellId, ElementId, ZoomGrid, ZoomGridConfig};

    fn setup() -> (RecordingHost, ZoomGrid, ElementId) {
        let (mut host, container, _) = RecordingHost::with_grid(4, 200, 200);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        grid.add_extension(&mut host, Transparency::new()).unwrap();
        grid.add_extension(&mut host, ContainerFade::new()).unwrap();
        (host, grid, container)
    }

    fn fire(grid: &mut ZoomGrid, host: &mut RecordingHost) {
        let id = host.fire_next().unwrap();
        grid.handle_event(host, GridEvent::Timer(id));
    }

    #[test]
    fn requires_transparency() {
        let (mut host, container, _) = RecordingHost::with_grid(4, 200, 200);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        assert!(grid.add_extension(&mut host, ContainerFade::new()).is_err());
    }

    #[test]
    fn fades_out_after_inactivity() {
        let (mut host, mut grid, container) = setup();
        grid.handle_event(&mut host, GridEvent::PointerMove);
        assert_eq!(host.pending().len(), 1);

        fire(&mut grid, &mut host);
        assert_eq!(host.now(), Duration::from_millis(1000));
        assert_eq!(host.element(container).opacity, Some(0.75));

        settle(&mut grid, &mut host, 16);
        assert_eq!(host.element(container).opacity, Some(0.0));
        assert_eq!(host.now(), Duration::from_millis(1030));
        assert!(host.pending().is_empty());
    }

    #[test]
    fn movement_fades_back_in() {
        let (mut host, mut grid, container) = setup();
        grid.handle_event(&mut host, GridEvent::PointerMove);
        fire(&mut grid, &mut host);
        fire(&mut grid, &mut host);
        assert_eq!(grid.extension::<ContainerFade>().unwrap().opacity(), 0.5);

        grid.handle_event(&mut host, GridEvent::PointerMove);
        assert_eq!(host.element(container).opacity, Some(0.75));
        settle(&mut grid, &mut host, 16);
        assert_eq!(host.element(container).opacity, Some(1.0));
        assert!(host.pending().is_empty());
    }

    #[test]
    fn movement_restarts_the_inactivity_timer() {
        let (mut host, mut grid, _) = setup();
        grid.handle_event(&mut host, GridEvent::PointerMove);
        let first = host.pending()[0];
        grid.handle_event(&mut host, GridEvent::PointerMove);
        assert_eq!(host.cleared(), &[first]);
        assert_eq!(host.pending().len(), 1);
    }

    #[test]
    fn focused_grid_stays_opaque() {
        let (mut host, mut grid, container) = setup();
        grid.zoom(&mut host, CellId(0));
        settle_ticks(&mut grid, &mut host, 64);

        grid.handle_event(&mut host, GridEvent::PointerMove);
        fire(&mut grid, &mut host);
        assert_eq!(host.element(container).opacity, Some(1.0));
        assert!(host.pending().is_empty());
    }
}
