#![forbid(unsafe_code)]

//! Per-cell opacity that follows the animation.
//!
//! Opacity is not animated on its own clock. At the first tick of every
//! transition each cell records how far its size is from the target
//! (`max`), where its opacity starts (`offset`) and where it should end
//! (`target`). Every later tick maps the distance already covered onto the
//! opacity range, so opacity arrives exactly when geometry does.
//!
//! # Invariants
//!
//! 1. Ramps are rebuilt after every start-move and stop-move.
//! 2. A cell already at its target size keeps its opacity for the whole
//!    transition (`max == 0`).

use serde::{Deserialize, Serialize};
use zoomgrid_core::{CellId, Extension, ExtensionError, GridState, HookContext, HookRegistry};

/// Name under which the extension registers.
pub const NAME: &str = "transparency";

/// Opacity levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransparencyConfig {
    /// Opacity of the focused cell.
    pub opacity_focused: f32,
    /// Opacity of every cell while nothing is focused.
    pub opacity_unfocused: f32,
    /// Opacity of folded cells.
    pub opacity_folded: f32,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            opacity_focused: 0.98,
            opacity_unfocused: 0.5,
            opacity_folded: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ramp {
    max: i32,
    offset: f32,
    target: f32,
    factor: f32,
}

impl Ramp {
    fn at(&self, remaining: i32) -> f32 {
        let covered = (self.max - remaining) as f32 * self.factor;
        let opacity = if self.target > self.offset {
            self.offset + covered
        } else {
            self.offset - covered
        };
        opacity.clamp(0.0, 1.0)
    }
}

/// Opacity ramp extension.
#[derive(Debug, Clone, Default)]
pub struct Transparency {
    config: TransparencyConfig,
    ramps: Option<Vec<Ramp>>,
}

impl Transparency {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: TransparencyConfig) -> Self {
        Self {
            config,
            ramps: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TransparencyConfig {
        &self.config
    }

    /// Opacity a cell settles at in the grid's current focus state.
    #[must_use]
    pub fn target_for(&self, grid: &GridState, id: CellId) -> f32 {
        match grid.focused() {
            Some(focused) if focused == id => self.config.opacity_focused,
            Some(_) => self.config.opacity_folded,
            None => self.config.opacity_unfocused,
        }
    }

    /// Opacity a cell rests at when it is neither focused nor highlighted.
    #[must_use]
    pub fn resting_for(&self, grid: &GridState) -> f32 {
        if grid.focused().is_some() {
            self.config.opacity_folded
        } else {
            self.config.opacity_unfocused
        }
    }

    fn invalidate(&mut self) {
        self.ramps = None;
    }

    fn build_ramps(&self, ctx: &HookContext<'_>) -> Vec<Ramp> {
        ctx.grid
            .cell_ids()
            .map(|id| {
                let max = remaining(ctx, id);
                let offset = ctx
                    .grid
                    .cell(id)
                    .and_then(|cell| cell.opacity())
                    .filter(|opacity| *opacity > 0.0)
                    .unwrap_or(self.config.opacity_focused);
                let target = self.target_for(ctx.grid, id);
                let factor = if max > 0 {
                    (target - offset).abs() / max as f32
                } else {
                    1.0
                };
                Ramp {
                    max,
                    offset,
                    target,
                    factor,
                }
            })
            .collect()
    }
}

/// Manhattan distance between a cell's live size and its target size.
fn remaining(ctx: &HookContext<'_>, id: CellId) -> i32 {
    let Some(cell) = ctx.grid.cell(id) else {
        return 0;
    };
    let live = ctx.host.offset_size(cell.element());
    let target = cell.target();
    (live.width - target.width).abs() + (live.height - target.height).abs()
}

impl Extension for Transparency {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attach(
        &mut self,
        ctx: &mut HookContext<'_>,
        _installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        let ids: Vec<CellId> = ctx.grid.cell_ids().collect();
        for id in ids {
            ctx.grid
                .set_opacity(&mut *ctx.host, id, self.config.opacity_unfocused);
        }
        Ok(())
    }

    fn start_move(&mut self, _ctx: &mut HookContext<'_>) {
        self.invalidate();
    }

    fn stop_move(&mut self, _ctx: &mut HookContext<'_>) {
        self.invalidate();
    }

    fn moving(&mut self, ctx: &mut HookContext<'_>) {
        if ctx.grid.cells().is_empty() {
            return;
        }
        if self.ramps.is_none() {
            self.ramps = Some(self.build_ramps(ctx));
        }
        let Some(ramps) = &self.ramps else {
            return;
        };
        let opacities: Vec<(CellId, f32)> = ramps
            .iter()
            .enumerate()
            .map(|(index, ramp)| {
                let id = CellId(index);
                (id, ramp.at(remaining(ctx, id)))
            })
            .collect();
        for (id, opacity) in opacities {
            ctx.grid.set_opacity(&mut *ctx.host, id, opacity);
        }
    }
}
