#![forbid(unsafe_code)]

//! Fixed widths for selected descendants.
//!
//! Content inside a focused cell should not reflow while the cell grows, so
//! matching elements get the width the focused cell will finally offer:
//! `container − (columns − 1) · (padding + frame + folded) − margin`.

use serde::{Deserialize, Serialize};
use zoomgrid_core::{
    Extension, ExtensionError, GridState, HookContext, HookRegistry, HostDocument, LengthProperty,
    StyleProp, parse_patterns,
};

pub const NAME: &str = "max-child-width";

/// One length property applied to every element matching `patterns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWidthRule {
    pub property: LengthProperty,
    pub patterns: Vec<String>,
}

impl ChildWidthRule {
    pub fn new<I, S>(property: LengthProperty, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property,
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaxChildWidthConfig {
    pub rules: Vec<ChildWidthRule>,
    /// Extra pixels subtracted from the computed width.
    pub margin: i32,
}

/// Max-child-width extension.
#[derive(Debug, Clone, Default)]
pub struct MaxChildWidth {
    config: MaxChildWidthConfig,
    width: Option<i32>,
}

impl MaxChildWidth {
    #[must_use]
    pub fn new(rules: Vec<ChildWidthRule>, margin: i32) -> Self {
        Self::with_config(MaxChildWidthConfig { rules, margin })
    }

    #[must_use]
    pub fn with_config(config: MaxChildWidthConfig) -> Self {
        Self {
            config,
            width: None,
        }
    }

    /// Width written at registration.
    #[must_use]
    pub fn width(&self) -> Option<i32> {
        self.width
    }
}

#[cfg(feature = "frame")]
fn frame_width(installed: &HookRegistry) -> i32 {
    installed
        .get::<crate::frame::Frame>()
        .map_or(0, |frame| frame.frame_size().width)
}

#[cfg(not(feature = "frame"))]
fn frame_width(_installed: &HookRegistry) -> i32 {
    0
}

/// Width of the focused cell's content area.
pub fn focused_content_width<H: HostDocument + ?Sized>(
    grid: &GridState,
    host: &H,
    frame_width: i32,
    margin: i32,
) -> i32 {
    let folded_tracks = grid.columns() as i32 - 1;
    let per_track = grid.padding_margin_border().width + frame_width + grid.folded_size().width;
    grid.container_size(host)
        .width
        .saturating_sub(folded_tracks.saturating_mul(per_track))
        .saturating_sub(margin)
}

impl Extension for MaxChildWidth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attach(
        &mut self,
        ctx: &mut HookContext<'_>,
        installed: &HookRegistry,
    ) -> Result<(), ExtensionError> {
        let width = focused_content_width(
            ctx.grid,
            &*ctx.host,
            frame_width(installed),
            self.config.margin,
        );
        for rule in &self.config.rules {
            let patterns = parse_patterns(&rule.patterns);
            for cell in ctx.grid.cells() {
                for pattern in &patterns {
                    for el in pattern.select(&*ctx.host, cell.element()) {
                        ctx.host
                            .set_style(el, StyleProp::Length(rule.property, width));
                    }
                }
            }
        }
        zoomgrid_core::debug!(width, "child widths fixed");
        self.width = Some(width);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomgrid_core::testing::RecordingHost;
    use zoomgrid_core::{ZoomGrid, ZoomGridConfig};

    #[test]
    fn matching_descendants_get_focused_width() {
        let (mut host, container, cells) = RecordingHost::with_grid(9, 300, 300);
        let image = host.add(cells[4], "IMG");
        let lead = host.add_with(cells[0], "P", Some("lead"), None);
        let other = host.add(cells[0], "P");
        let config = ZoomGridConfig::default().folded_size(20, 20).padding_margin_border(2, 2);
        let mut grid = ZoomGrid::create(&mut host, container, &config).unwrap();

        let rules = vec![
            ChildWidthRule::new(LengthProperty::MaxWidth, ["img"]),
            ChildWidthRule::new(LengthProperty::Width, ["p.lead"]),
        ];
        grid.add_extension(&mut host, MaxChildWidth::new(rules, 4)).unwrap();

        // 300 - 2 * (2 + 0 + 20) - 4
        let expected = 252;
        assert_eq!(grid.extension::<MaxChildWidth>().unwrap().width(), Some(expected));
        assert_eq!(host.element(image).max_width, Some(expected));
        assert_eq!(host.element(lead).width, expected);
        assert_eq!(host.element(other).width, 0);
    }

    #[cfg(feature = "frame")]
    #[test]
    fn frame_width_is_reserved() {
        let (mut host, container, cells) = RecordingHost::with_grid(4, 200, 200);
        let image = host.add(cells[0], "IMG");
        let config = ZoomGridConfig::default().folded_size(10, 10);
        let mut grid = ZoomGrid::create(&mut host, container, &config).unwrap();
        grid.add_extension(&mut host, crate::frame::Frame::new()).unwrap();
        let rules = vec![ChildWidthRule::new(LengthProperty::MaxWidth, ["img"])];
        grid.add_extension(&mut host, MaxChildWidth::new(rules, 0)).unwrap();

        // 200 - 1 * (0 + 16 + 10)
        assert_eq!(host.element(image).max_width, Some(174));
    }
}
