#![forbid(unsafe_code)]

//! Ornament frames around cell content.
//!
//! Each cell gets an inner scroll division that holds its content. The
//! division is either located by class or generated together with the
//! ornament divisions:
//!
//! ```text
//! cell.Frame
//! ├── TopLeft
//! │   └── TopRight
//! ├── Left
//! │   └── Right
//! │       └── <cell class>       ← content, scroll target
//! └── BottomLeft
//!     └── BottomRight
//! ```
//!
//! The scroll division becomes the cell's scroll target, so focus toggles its
//! overflow instead of the cell's. Its height follows the cell height minus
//! the frame height on every tick.

use serde::{Deserialize, Serialize};
use zoomgrid_core::{
    CellId, ElementId, Extension, ExtensionError, HookContext, HookRegistry, Size, StyleProp,
};

pub const NAME: &str = "frame";

/// Class given to framed cells.
pub const FRAME_CLASS: &str = "Frame";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameConfig {
    /// Total frame size in each direction.
    pub frame_size: Size,
    /// Class of an existing inner scroll division. `None` generates ornaments.
    pub scroll_division: Option<String>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_size: Size::new(16, 16),
            scroll_division: None,
        }
    }
}

/// Frame extension.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    config: FrameConfig,
    divisions: Vec<ElementId>,
}

impl Frame {
    /// Generate ornament divisions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use each cell's existing division with class `class`.
    #[must_use]
    pub fn with_scroll_division(class: impl Into<String>) -> Self {
        Self::with_config(FrameConfig {
            scroll_division: Some(class.into()),
            ..FrameConfig::default()
        })
    }

    #[must_use]
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            config,
            divisions: Vec::new(),
        }
    }

    #[must_use]
    pub fn frame_size(&self) -> Size {
        self.config.frame_size
    }

    /// Inner scroll division of a cell.
    #[must_use]
    pub fn scroll_division(&self, id: CellId) -> Option<ElementId> {
        self.divisions.get(id.0).copied()
    }

    fn adjust(&self, ctx: &mut HookContext<'_>) {
        for (cell, division) in ctx.grid.cells().iter().zip(&self.divisions) {
            let height =
                ctx.host.offset_size(cell.element()).height - self.config.frame_size.height;
            ctx.host.set_style(*division, StyleProp::height(height));
        }
    }
}

fn locate(ctx: &HookContext<'_>, class: &str) -> Result<Vec<ElementId>, ExtensionError> {
    ctx.grid
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            ctx.host
                .descendants(cell.element(), "DIV")
                .into_iter()
                .rev()
                .find(|info| info.class.as_deref() == Some(class))
                .map(|info| info.id)
                .ok_or(ExtensionError::MissingScrollDivision { cell: index })
        })
        .collect()
}

fn append_chain(ctx: &mut HookContext<'_>, parent: ElementId, classes: &[&str]) -> ElementId {
    classes.iter().fold(parent, |parent, &class| {
        ctx.host.create_element(Some(parent), "DIV", Some(class))
    })
}

fn generate(ctx: &mut HookContext<'_>, cell: ElementId) -> ElementId {
    let class = ctx
        .host
        .info(cell)
        .and_then(|info| info.class)
        .filter(|class| !class.is_empty());
    let content = ctx.host.wrap_content(cell, "DIV", class.as_deref());

    append_chain(ctx, cell, &["TopLeft", "TopRight"]);
    let right = append_chain(ctx, cell, &["Left", "Right"]);
    ctx.host.append_child(right, content);
    append_chain(ctx, cell, &["BottomLeft", "BottomRight"]);
    ctx.host.set_class(cell, FRAME_CLASS);
    content
}

impl Extension for Frame {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attach(
        &mut self,
        ctx: &mut HookContext<'_>,
        _installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        let divisions = match self.config.scroll_division.as_deref() {
            Some(class) => locate(ctx, class)?,
            None => {
                let cells: Vec<ElementId> =
                    ctx.grid.cells().iter().map(|cell| cell.element()).collect();
                cells.into_iter().map(|cell| generate(ctx, cell)).collect()
            }
        };
        for (index, division) in divisions.iter().enumerate() {
            ctx.grid.set_scroll_target(CellId(index), *division);
        }
        self.divisions = divisions;
        self.adjust(ctx);
        Ok(())
    }

    fn moving(&mut self, ctx: &mut HookContext<'_>) {
        self.adjust(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomgrid_core::testing::{RecordingHost, settle_ticks};
    use zoomgrid_core::{HostDocument, Overflow, ZoomGrid, ZoomGridConfig};

    #[test]
    fn generates_ornaments_around_content() {
        let (mut host, container, cells) = RecordingHost::with_grid(4, 200, 200);
        host.set_class(cells[0], "Note");
        let text = host.add(cells[0], "P");
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        grid.add_extension(&mut host, Frame::new()).unwrap();

        let frame = grid.extension::<Frame>().unwrap();
        let inner = frame.scroll_division(CellId(0)).unwrap();
        let cell = host.element(cells[0]);
        assert_eq!(cell.class.as_deref(), Some(FRAME_CLASS));

        let classes: Vec<Option<String>> = cell
            .children
            .iter()
            .map(|el| host.element(*el).class.clone())
            .collect();
        assert_eq!(
            classes,
            vec![
                Some("TopLeft".to_string()),
                Some("Left".to_string()),
                Some("BottomLeft".to_string())
            ]
        );
        assert_eq!(host.element(inner).class.as_deref(), Some("Note"));
        assert_eq!(host.element(inner).children, vec![text]);
        let right = host.element(inner).parent.unwrap();
        assert_eq!(host.element(right).class.as_deref(), Some("Right"));
        assert_eq!(grid.state().cell(CellId(0)).unwrap().scroll_target(), inner);
        assert_eq!(host.element(inner).height, 100 - 16);
    }

    #[test]
    fn locates_existing_scroll_division() {
        let (mut host, container, cells) = RecordingHost::with_grid(2, 200, 100);
        let divisions: Vec<ElementId> = cells
            .iter()
            .map(|cell| host.add_with(*cell, "DIV", Some("Scroll"), None))
            .collect();
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        grid.add_extension(&mut host, Frame::with_scroll_division("Scroll"))
            .unwrap();

        let frame = grid.extension::<Frame>().unwrap();
        assert_eq!(frame.scroll_division(CellId(1)), Some(divisions[1]));
        assert_eq!(host.element(cells[1]).class, None);
    }

    #[test]
    fn missing_scroll_division_fails_without_mutation() {
        let (mut host, container, cells) = RecordingHost::with_grid(3, 300, 100);
        host.add_with(cells[0], "DIV", Some("Scroll"), None);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        host.clear_writes();

        let err = grid
            .add_extension(&mut host, Frame::with_scroll_division("Scroll"))
            .unwrap_err();
        assert_eq!(err, ExtensionError::MissingScrollDivision { cell: 1 });
        assert!(host.writes().is_empty());
        assert_eq!(grid.state().cell(CellId(0)).unwrap().scroll_target(), cells[0]);
    }

    #[test]
    fn scroll_division_tracks_focus() {
        let (mut host, container, cells) = RecordingHost::with_grid(4, 200, 200);
        let mut grid = ZoomGrid::create(&mut host, container, &ZoomGridConfig::default()).unwrap();
        grid.add_extension(&mut host, Frame::new()).unwrap();
        let inner = grid.extension::<Frame>().unwrap().scroll_division(CellId(2)).unwrap();

        grid.zoom(&mut host, CellId(2));
        settle_ticks(&mut grid, &mut host, 64);
        assert_eq!(host.element(inner).overflow, Overflow::Auto);
        assert_eq!(host.element(cells[2]).overflow, Overflow::Hidden);
        assert_eq!(
            host.element(inner).height,
            host.element(cells[2]).height - 16
        );

        grid.restore(&mut host);
        assert_eq!(host.element(inner).overflow, Overflow::Hidden);
    }
}
