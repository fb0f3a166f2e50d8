#![forbid(unsafe_code)]

//! Hide selected descendants unless their cell is focused and settled.

use zoomgrid_core::{
    CellId, Display, ElementId, Extension, ExtensionError, HookContext, HookRegistry, StyleProp,
    parse_patterns,
};

pub const NAME: &str = "unfocused-hide";

/// Unfocused-hide extension.
#[derive(Debug, Clone, Default)]
pub struct UnfocusedHide {
    patterns: Vec<String>,
    hidden: Vec<Vec<ElementId>>,
}

impl UnfocusedHide {
    /// Hide elements matching `patterns` (`tag`, `tag.class` or `tag#id`).
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            hidden: Vec::new(),
        }
    }

    /// Elements managed for a cell.
    #[must_use]
    pub fn elements(&self, id: CellId) -> &[ElementId] {
        self.hidden.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    fn apply(&self, ctx: &mut HookContext<'_>, id: CellId, display: Display) {
        for el in self.elements(id) {
            ctx.host.set_style(*el, StyleProp::Display(display));
        }
    }
}

impl Extension for UnfocusedHide {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attach(
        &mut self,
        ctx: &mut HookContext<'_>,
        _installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        if self.patterns.is_empty() {
            return Err(ExtensionError::EmptyPatterns);
        }
        let patterns = parse_patterns(&self.patterns);
        self.hidden = ctx
            .grid
            .cells()
            .iter()
            .map(|cell| {
                let mut elements = Vec::new();
                for pattern in &patterns {
                    for el in pattern.select(&*ctx.host, cell.element()) {
                        if !elements.contains(&el) {
                            elements.push(el);
                        }
                    }
                }
                elements
            })
            .collect();

        let ids: Vec<CellId> = ctx.grid.cell_ids().collect();
        for id in ids {
            self.apply(ctx, id, Display::None);
        }
        Ok(())
    }

    fn start_move(&mut self, ctx: &mut HookContext<'_>) {
        if let Some(id) = ctx.grid.focused() {
            self.apply(ctx, id, Display::None);
        }
    }

    fn stop_move(&mut self, ctx: &mut HookContext<'_>) {
        if let Some(id) = ctx.grid.focused() {
            self.apply(ctx, id, Display::Block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomgrid_core::testing::{RecordingHost, settle_ticks};
    use zoomgrid_core::{ZoomGrid, ZoomGridConfig};

    #[test]
    fn empty_patterns_are_rejected() {
        let (mut host, container, _) = RecordingHost::with_grid(4, 200, 200);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        let err = grid
            .add_extension(&mut host, UnfocusedHide::new(Vec::<String>::new()))
            .unwrap_err();
        assert_eq!(err, ExtensionError::EmptyPatterns);
        assert!(grid.hooks().is_empty());
    }

    #[test]
    fn shown_only_while_focused_and_settled() {
        let (mut host, container, cells) = RecordingHost::with_grid(4, 200, 200);
        let details = host.add_with(cells[1], "DIV", Some("details"), None);
        let note = host.add_with(cells[1], "P", None, Some("note"));
        let kept = host.add(cells[1], "SPAN");
        let other = host.add_with(cells[2], "DIV", Some("details"), None);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        grid.add_extension(&mut host, UnfocusedHide::new(["div.details", "p#note"]))
            .unwrap();

        for el in [details, note, other] {
            assert_eq!(host.element(el).display, Display::None);
        }
        assert_eq!(host.element(kept).display, Display::Block);

        grid.zoom(&mut host, CellId(1));
        assert_eq!(host.element(details).display, Display::None);
        settle_ticks(&mut grid, &mut host, 64);
        assert_eq!(host.element(details).display, Display::Block);
        assert_eq!(host.element(note).display, Display::Block);
        assert_eq!(host.element(other).display, Display::None);

        grid.zoom(&mut host, CellId(2));
        assert_eq!(host.element(details).display, Display::None);
        settle_ticks(&mut grid, &mut host, 64);
        assert_eq!(host.element(other).display, Display::Block);
    }
}
