#![forbid(unsafe_code)]

//! Construction options for a [`ZoomGrid`](crate::grid::ZoomGrid).
//!
//! Keys deserialize from camelCase JSON so existing property lists such as
//! `{"columns": 3, "zoomOnClick": true, "foldedSize": {"width": 20, "height": 20}}`
//! load unchanged.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::geometry::Size;

/// Default delay between animation ticks.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(50);

/// Default tag of children that become cells.
pub const DEFAULT_TAG_NAME: &str = "DIV";

/// What makes a cell take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// Entering a cell focuses it; leaving the container restores.
    #[default]
    Hover,
    /// Clicking a cell focuses it.
    Click,
}

/// Grid construction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomGridConfig {
    /// Number of columns (0 = derive).
    pub columns: usize,
    /// Number of rows (0 = derive).
    pub rows: usize,
    /// Focus on click instead of hover.
    pub zoom_on_click: bool,
    /// Size of folded cells. Either axis 0 means: derive both so folded
    /// cells share about 20% of the container.
    pub folded_size: Size,
    /// Sum of horizontal/vertical padding, margin and border per cell,
    /// subtracted from painted sizes.
    pub padding_margin_border: Size,
    /// Delay between animation ticks in milliseconds.
    pub timeout: u64,
    /// Tag of children that become cells.
    pub tag_name: String,
}

impl Default for ZoomGridConfig {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            zoom_on_click: false,
            folded_size: Size::default(),
            padding_margin_border: Size::default(),
            timeout: DEFAULT_TIMEOUT.as_millis() as u64,
            tag_name: DEFAULT_TAG_NAME.to_string(),
        }
    }
}

impl ZoomGridConfig {
    /// Parse a JSON property list. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        serde_json::from_str(json).map_err(|err| GridError::InvalidConfig(err.to_string()))
    }

    /// Set a fixed column count (builder).
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set a fixed row count (builder).
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Focus on click instead of hover (builder).
    #[must_use]
    pub fn zoom_on_click(mut self, enabled: bool) -> Self {
        self.zoom_on_click = enabled;
        self
    }

    /// Set an explicit folded cell size (builder).
    #[must_use]
    pub fn folded_size(mut self, width: i32, height: i32) -> Self {
        self.folded_size = Size::new(width, height);
        self
    }

    /// Set the padding/margin/border compensation (builder).
    #[must_use]
    pub fn padding_margin_border(mut self, width: i32, height: i32) -> Self {
        self.padding_margin_border = Size::new(width, height);
        self
    }

    /// Set the tick delay (builder).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Set the cell tag name (builder).
    #[must_use]
    pub fn tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    /// The focus trigger implied by `zoom_on_click`.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        if self.zoom_on_click {
            Trigger::Click
        } else {
            Trigger::Hover
        }
    }

    /// Tick delay as a [`Duration`].
    #[must_use]
    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_defaults() {
        let config = ZoomGridConfig::default();
        assert_eq!(config.columns, 0);
        assert_eq!(config.rows, 0);
        assert_eq!(config.trigger(), Trigger::Hover);
        assert_eq!(config.tick_delay(), Duration::from_millis(50));
        assert_eq!(config.tag_name, "DIV");
    }

    #[test]
    fn json_property_list_uses_camel_case_keys() {
        let config = ZoomGridConfig::from_json(
            r#"{
                "columns": 3,
                "zoomOnClick": true,
                "foldedSize": { "width": 20, "height": 24 },
                "paddingMarginBorder": { "width": 2, "height": 2 },
                "timeout": 30,
                "tagName": "LI",
                "somethingElse": 1
            }"#,
        )
        .unwrap();
        assert_eq!(config.columns, 3);
        assert_eq!(config.rows, 0);
        assert_eq!(config.trigger(), Trigger::Click);
        assert_eq!(config.folded_size, Size::new(20, 24));
        assert_eq!(config.padding_margin_border, Size::new(2, 2));
        assert_eq!(config.tick_delay(), Duration::from_millis(30));
        assert_eq!(config.tag_name, "LI");
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ZoomGridConfig::from_json("{\"columns\": -1}").unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
    }

    #[test]
    fn builder_chain() {
        let config = ZoomGridConfig::default()
            .columns(4)
            .rows(2)
            .zoom_on_click(true)
            .folded_size(10, 12)
            .timeout(Duration::from_millis(16))
            .tag_name("SECTION");
        assert_eq!((config.columns, config.rows), (4, 2));
        assert_eq!(config.folded_size, Size::new(10, 12));
        assert_eq!(config.timeout, 16);
        assert_eq!(config.tag_name, "SECTION");
    }
}
