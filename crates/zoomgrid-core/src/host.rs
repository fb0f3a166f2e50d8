#![forbid(unsafe_code)]

//! Host boundary: the document and timer services a grid consumes.
//!
//! The grid never touches a concrete DOM. It sees opaque [`ElementId`]
//! handles, reads their live rendered geometry, writes a closed set of style
//! properties ([`StyleProp`]) and schedules single-shot timers. The split
//! mirrors a backend divided into independent halves:
//!
//! - [`HostDocument`]: element queries, geometry reads, style writes.
//! - [`HostTimers`]: single-shot timer scheduling and cancellation.
//!
//! [`Host`] is the union, implemented automatically for anything providing both.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Opaque handle to a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Opaque handle to a scheduled host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Identity and selector-relevant attributes of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub id: ElementId,
    /// Tag name as reported by the host (compared case-insensitively).
    pub tag: String,
    /// `class` attribute, if any.
    pub class: Option<String>,
    /// `id` attribute, if any.
    pub dom_id: Option<String>,
}

impl ElementInfo {
    /// Whether the element's tag matches `tag`, ignoring ASCII case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// Length-valued style properties, always written in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthProperty {
    Left,
    Top,
    Width,
    Height,
    MaxWidth,
    MinWidth,
}

/// CSS `overflow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
}

/// CSS `display`, restricted to the values the widget writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// CSS `visibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// CSS `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

/// A single style write.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProp {
    Length(LengthProperty, i32),
    Opacity(f32),
    Overflow(Overflow),
    Display(Display),
    Visibility(Visibility),
    Position(Position),
    ZIndex(i32),
    /// `background-image: url(<value>)`.
    BackgroundImage(String),
}

impl StyleProp {
    #[inline]
    pub const fn left(px: i32) -> Self {
        Self::Length(LengthProperty::Left, px)
    }

    #[inline]
    pub const fn top(px: i32) -> Self {
        Self::Length(LengthProperty::Top, px)
    }

    #[inline]
    pub const fn width(px: i32) -> Self {
        Self::Length(LengthProperty::Width, px)
    }

    #[inline]
    pub const fn height(px: i32) -> Self {
        Self::Length(LengthProperty::Height, px)
    }
}

/// Element queries, live geometry and style writes.
pub trait HostDocument {
    /// Direct children of `parent` in document order.
    fn children(&self, parent: ElementId) -> Vec<ElementInfo>;

    /// All descendants of `root` with the given tag, in document order
    /// (`getElementsByTagName`).
    fn descendants(&self, root: ElementId, tag: &str) -> Vec<ElementInfo>;

    /// Identity and attributes of a single element.
    fn info(&self, el: ElementId) -> Option<ElementInfo>;

    /// Parent element, `None` for the document root or detached elements.
    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Live rendered position relative to the offset parent.
    fn offset(&self, el: ElementId) -> Point;

    /// Live rendered size (content plus padding and border).
    fn offset_size(&self, el: ElementId) -> Size;

    /// Position relative to the document: offsets summed up the parent chain.
    fn page_offset(&self, el: ElementId) -> Point {
        let mut total = Point::default();
        let mut cursor = Some(el);
        while let Some(current) = cursor {
            let offset = self.offset(current);
            total.x += offset.x;
            total.y += offset.y;
            cursor = self.parent(current);
        }
        total
    }

    /// Current CSS `position` of an element.
    fn position(&self, el: ElementId) -> Position;

    /// Apply one style write.
    fn set_style(&mut self, el: ElementId, prop: StyleProp);

    /// Scroll an element back to its origin.
    fn reset_scroll(&mut self, el: ElementId);

    /// Create an element appended to `parent` (`None` appends to the document body).
    fn create_element(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        class: Option<&str>,
    ) -> ElementId;

    /// Re-parent `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Move all content of `el` into a new `tag`/`class` element, which becomes
    /// the only child of `el`. Returns the new element.
    fn wrap_content(&mut self, el: ElementId, tag: &str, class: Option<&str>) -> ElementId;

    /// Replace `old` with `new` in `old`'s parent.
    fn replace_child(&mut self, old: ElementId, new: ElementId);

    /// Set the `class` attribute.
    fn set_class(&mut self, el: ElementId, class: &str);

    /// Replace the text content.
    fn set_text(&mut self, el: ElementId, text: &str);

    /// Read an attribute (for example `href`).
    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;
}

/// Single-shot timers.
pub trait HostTimers {
    /// Schedule a timer that fires once after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Cancelling an unknown or fired timer is a no-op.
    fn clear_timeout(&mut self, id: TimerId);
}

/// Everything a grid needs from its embedding environment.
pub trait Host: HostDocument + HostTimers {}

impl<T: HostDocument + HostTimers + ?Sized> Host for T {}
