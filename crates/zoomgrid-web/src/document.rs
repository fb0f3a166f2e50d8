#![forbid(unsafe_code)]

//! In-memory element tree with a minimal box model.
//!
//! [`MemoryDocument`] stands in for a browser DOM. Every element carries the
//! subset of computed style the grid writes, and rendered geometry follows
//! from it:
//!
//! - `offset` is the `left`/`top` pair last written.
//! - `offset_size` is the content size plus the element's box extra
//!   (padding, border and margin), or zero while `display: none`.
//!
//! Lookups on unknown handles answer with empty values and writes to them
//! are dropped, so a stale [`ElementId`] never panics.

use std::collections::BTreeMap;

use zoomgrid_core::{
    Display, ElementId, ElementInfo, HostDocument, LengthProperty, Overflow, Point, Position, Size,
    StyleProp, Visibility,
};

/// Style state of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub max_width: Option<i32>,
    pub min_width: Option<i32>,
    pub opacity: Option<f32>,
    pub overflow: Overflow,
    pub display: Display,
    pub visibility: Visibility,
    pub position: Position,
    pub z_index: Option<i32>,
    pub background_image: Option<String>,
}

impl ComputedStyle {
    fn apply(&mut self, prop: StyleProp) {
        match prop {
            StyleProp::Length(LengthProperty::Left, px) => self.left = px,
            StyleProp::Length(LengthProperty::Top, px) => self.top = px,
            StyleProp::Length(LengthProperty::Width, px) => self.width = px,
            StyleProp::Length(LengthProperty::Height, px) => self.height = px,
            StyleProp::Length(LengthProperty::MaxWidth, px) => self.max_width = Some(px),
            StyleProp::Length(LengthProperty::MinWidth, px) => self.min_width = Some(px),
            StyleProp::Opacity(value) => self.opacity = Some(value),
            StyleProp::Overflow(value) => self.overflow = value,
            StyleProp::Display(value) => self.display = value,
            StyleProp::Visibility(value) => self.visibility = value,
            StyleProp::Position(value) => self.position = value,
            StyleProp::ZIndex(value) => self.z_index = Some(value),
            StyleProp::BackgroundImage(url) => self.background_image = Some(url),
        }
    }
}

/// One element of the tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    tag: String,
    class: Option<String>,
    dom_id: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: String,
    attributes: BTreeMap<String, String>,
    style: ComputedStyle,
    box_extra: Size,
    scroll_resets: u32,
}

impl Node {
    fn new(tag: &str, class: Option<&str>, dom_id: Option<&str>) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            class: class.map(str::to_string),
            dom_id: dom_id.map(str::to_string),
            ..Self::default()
        }
    }

    /// Upper-cased tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &ComputedStyle {
        &self.style
    }

    /// Padding, border and margin added to the content size.
    pub fn box_extra(&self) -> Size {
        self.box_extra
    }

    /// How often the element was scrolled back to its origin.
    pub fn scroll_resets(&self) -> u32 {
        self.scroll_resets
    }
}

/// Host-side document: an element arena rooted at `BODY`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    body: ElementId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document holding only its body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("BODY", None, None)],
            body: ElementId(0),
        }
    }

    /// The document body.
    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Number of elements ever created, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new element to `parent`.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementId {
        self.append_with(parent, tag, None, None)
    }

    /// Append a new element with optional `class` and `id` attributes.
    pub fn append_with(
        &mut self,
        parent: ElementId,
        tag: &str,
        class: Option<&str>,
        dom_id: Option<&str>,
    ) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        let mut node = Node::new(tag, class, dom_id);
        if self.node(parent).is_some() {
            node.parent = Some(parent);
        }
        self.nodes.push(node);
        if let Some(parent) = self.node_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    pub fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0 as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0 as usize)
    }

    /// Computed style of an element, default for unknown handles.
    #[must_use]
    pub fn style(&self, el: ElementId) -> ComputedStyle {
        self.node(el).map(|node| node.style.clone()).unwrap_or_default()
    }

    /// Set content width and height, as a stylesheet would.
    pub fn resize(&mut self, el: ElementId, width: i32, height: i32) {
        if let Some(node) = self.node_mut(el) {
            node.style.width = width;
            node.style.height = height;
        }
    }

    /// Set padding + border + margin, added to the content size.
    pub fn set_box_extra(&mut self, el: ElementId, extra: Size) {
        if let Some(node) = self.node_mut(el) {
            node.box_extra = extra;
        }
    }

    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// First element whose `id` attribute equals `dom_id`.
    #[must_use]
    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|node| node.dom_id.as_deref() == Some(dom_id))
            .map(|index| ElementId(index as u32))
    }

    fn info_of(&self, el: ElementId, node: &Node) -> ElementInfo {
        ElementInfo {
            id: el,
            tag: node.tag.clone(),
            class: node.class.clone(),
            dom_id: node.dom_id.clone(),
        }
    }

    fn detach(&mut self, el: ElementId) {
        let Some(parent) = self.node(el).and_then(Node::parent) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|child| *child != el);
        }
        if let Some(node) = self.node_mut(el) {
            node.parent = None;
        }
    }

    fn walk(&self, root: ElementId, tag: &str, out: &mut Vec<ElementInfo>) {
        let Some(node) = self.node(root) else {
            return;
        };
        for &child in &node.children {
            if let Some(child_node) = self.node(child) {
                if child_node.tag.eq_ignore_ascii_case(tag) {
                    out.push(self.info_of(child, child_node));
                }
                self.walk(child, tag, out);
            }
        }
    }
}

impl HostDocument for MemoryDocument {
    fn children(&self, parent: ElementId) -> Vec<ElementInfo> {
        let Some(node) = self.node(parent) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|&child| self.node(child).map(|n| self.info_of(child, n)))
            .collect()
    }

    fn descendants(&self, root: ElementId, tag: &str) -> Vec<ElementInfo> {
        let mut out = Vec::new();
        self.walk(root, tag, &mut out);
        out
    }

    fn info(&self, el: ElementId) -> Option<ElementInfo> {
        self.node(el).map(|node| self.info_of(el, node))
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(Node::parent)
    }

    fn offset(&self, el: ElementId) -> Point {
        self.node(el)
            .map_or(Point::default(), |node| Point::new(node.style.left, node.style.top))
    }

    fn offset_size(&self, el: ElementId) -> Size {
        match self.node(el) {
            Some(node) if node.style.display != Display::None => Size::new(
                node.style.width + node.box_extra.width,
                node.style.height + node.box_extra.height,
            ),
            _ => Size::default(),
        }
    }

    fn position(&self, el: ElementId) -> Position {
        self.node(el).map_or(Position::Static, |node| node.style.position)
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProp) {
        if let Some(node) = self.node_mut(el) {
            node.style.apply(prop);
        }
    }

    fn reset_scroll(&mut self, el: ElementId) {
        if let Some(node) = self.node_mut(el) {
            node.scroll_resets += 1;
        }
    }

    fn create_element(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        class: Option<&str>,
    ) -> ElementId {
        let parent = parent.unwrap_or(self.body);
        self.append_with(parent, tag, class, None)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn wrap_content(&mut self, el: ElementId, tag: &str, class: Option<&str>) -> ElementId {
        let (content, text) = match self.node_mut(el) {
            Some(node) => (
                std::mem::take(&mut node.children),
                std::mem::take(&mut node.text),
            ),
            None => (Vec::new(), String::new()),
        };
        let wrapper = self.append_with(el, tag, class, None);
        for &child in &content {
            if let Some(node) = self.node_mut(child) {
                node.parent = Some(wrapper);
            }
        }
        if let Some(node) = self.node_mut(wrapper) {
            node.children = content;
            node.text = text;
        }
        wrapper
    }

    fn replace_child(&mut self, old: ElementId, new: ElementId) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        if self.node(new).is_none() {
            return;
        }
        self.detach(new);
        if let Some(node) = self.node_mut(parent)
            && let Some(slot) = node.children.iter_mut().find(|child| **child == old)
        {
            *slot = new;
        }
        if let Some(node) = self.node_mut(new) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(old) {
            node.parent = None;
        }
    }

    fn set_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.class = Some(class.to_string());
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_string();
        }
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el)
            .and_then(|node| node.attributes.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree() -> (MemoryDocument, ElementId, Vec<ElementId>) {
        let mut doc = MemoryDocument::new();
        let root = doc.append(doc.body(), "div");
        let a = doc.append_with(root, "p", Some("lead"), None);
        let b = doc.append(a, "span");
        let c = doc.append(root, "P");
        (doc, root, vec![a, b, c])
    }

    #[test]
    fn tags_are_upper_cased() {
        let (doc, root, _) = tree();
        assert_eq!(doc.info(root).unwrap().tag, "DIV");
        assert!(doc.info(root).unwrap().has_tag("div"));
    }

    #[test]
    fn descendants_in_document_order() {
        let (doc, root, nodes) = tree();
        let found: Vec<ElementId> = doc.descendants(root, "p").into_iter().map(|i| i.id).collect();
        assert_eq!(found, vec![nodes[0], nodes[2]]);
        assert_eq!(doc.children(root).len(), 2);
    }

    #[test]
    fn offset_size_adds_box_and_collapses_when_hidden() {
        let (mut doc, root, _) = tree();
        doc.resize(root, 94, 96);
        doc.set_box_extra(root, Size::new(6, 4));
        assert_eq!(doc.offset_size(root), Size::new(100, 100));

        doc.set_style(root, StyleProp::Display(Display::None));
        assert_eq!(doc.offset_size(root), Size::default());
    }

    #[test]
    fn page_offset_sums_ancestors() {
        let (mut doc, root, nodes) = tree();
        doc.set_style(root, StyleProp::left(10));
        doc.set_style(root, StyleProp::top(5));
        doc.set_style(nodes[0], StyleProp::left(3));
        assert_eq!(doc.page_offset(nodes[1]), Point::new(13, 5));
    }

    #[test]
    fn wrap_content_moves_children_and_text() {
        let (mut doc, root, nodes) = tree();
        doc.set_text(root, "hello");
        let wrapper = doc.wrap_content(root, "div", Some("Inner"));

        assert_eq!(doc.node(root).unwrap().children(), &[wrapper]);
        assert_eq!(doc.node(wrapper).unwrap().children(), &[nodes[0], nodes[2]]);
        assert_eq!(doc.node(wrapper).unwrap().text(), "hello");
        assert_eq!(doc.node(root).unwrap().text(), "");
        assert_eq!(doc.parent(nodes[2]), Some(wrapper));
    }

    #[test]
    fn replace_child_keeps_slot() {
        let (mut doc, root, nodes) = tree();
        let fresh = doc.create_element(None, "img", None);
        doc.replace_child(nodes[0], fresh);

        assert_eq!(doc.node(root).unwrap().children(), &[fresh, nodes[2]]);
        assert_eq!(doc.parent(nodes[0]), None);
        assert!(!doc.node(doc.body()).unwrap().children().contains(&fresh));
    }

    #[test]
    fn unknown_handles_are_inert() {
        let mut doc = MemoryDocument::new();
        let ghost = ElementId(99);
        doc.set_style(ghost, StyleProp::width(10));
        doc.append_child(doc.body(), ghost);
        assert_eq!(doc.info(ghost), None);
        assert_eq!(doc.offset_size(ghost), Size::default());
        assert!(doc.children(ghost).is_empty());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn dom_id_lookup() {
        let mut doc = MemoryDocument::new();
        let grid = doc.append_with(doc.body(), "div", None, Some("grid"));
        assert_eq!(doc.find_by_dom_id("grid"), Some(grid));
        assert_eq!(doc.find_by_dom_id("missing"), None);
    }
}
