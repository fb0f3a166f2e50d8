#![forbid(unsafe_code)]

//! Recording host for tests.
//!
//! [`RecordingHost`] keeps a small element tree whose rendered geometry is
//! exactly what was last written: `left`/`top` become the offset, `width`/
//! `height` become the size. Timers are queued against a virtual clock and
//! only fire when a test asks for them.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::event::GridEvent;
use crate::geometry::{Point, Size};
use crate::grid::ZoomGrid;
use crate::host::{
    Display, ElementId, ElementInfo, HostDocument, HostTimers, LengthProperty, Overflow, Position,
    StyleProp, TimerId, Visibility,
};

/// One element of the recorded tree.
#[derive(Debug, Clone, Default)]
pub struct RecordedElement {
    pub tag: String,
    pub class: Option<String>,
    pub dom_id: Option<String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub max_width: Option<i32>,
    pub min_width: Option<i32>,
    pub position: Position,
    pub overflow: Overflow,
    pub display: Display,
    pub visibility: Visibility,
    pub opacity: Option<f32>,
    pub z_index: Option<i32>,
    pub background: Option<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub scroll_resets: u32,
}

/// In-memory [`Host`](crate::host::Host) that records every interaction.
#[derive(Debug)]
pub struct RecordingHost {
    elements: Vec<RecordedElement>,
    body: ElementId,
    writes: Vec<(ElementId, StyleProp)>,
    now: Duration,
    next_timer: u64,
    pending: BTreeMap<TimerId, Duration>,
    scheduled: Vec<TimerId>,
    cleared: Vec<TimerId>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// A document holding only a `BODY` element.
    pub fn new() -> Self {
        Self {
            elements: vec![RecordedElement {
                tag: "BODY".to_string(),
                ..RecordedElement::default()
            }],
            body: ElementId(0),
            writes: Vec::new(),
            now: Duration::ZERO,
            next_timer: 1,
            pending: BTreeMap::new(),
            scheduled: Vec::new(),
            cleared: Vec::new(),
        }
    }

    /// A sized container with `count` `DIV` children, appended to the body.
    pub fn with_grid(count: usize, width: i32, height: i32) -> (Self, ElementId, Vec<ElementId>) {
        let mut host = Self::new();
        let container = host.add(host.body, "DIV");
        host.resize(container, width, height);
        let cells = (0..count).map(|_| host.add(container, "DIV")).collect();
        (host, container, cells)
    }

    /// The body element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Append a new element.
    pub fn add(&mut self, parent: ElementId, tag: &str) -> ElementId {
        self.add_with(parent, tag, None, None)
    }

    /// Append a new element with class and id attributes.
    pub fn add_with(
        &mut self,
        parent: ElementId,
        tag: &str,
        class: Option<&str>,
        dom_id: Option<&str>,
    ) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(RecordedElement {
            tag: tag.to_string(),
            class: class.map(str::to_string),
            dom_id: dom_id.map(str::to_string),
            parent: Some(parent),
            ..RecordedElement::default()
        });
        self.element_mut(parent).children.push(id);
        id
    }

    /// Set the rendered size directly, bypassing the write log.
    pub fn resize(&mut self, el: ElementId, width: i32, height: i32) {
        let element = self.element_mut(el);
        element.width = width;
        element.height = height;
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.element_mut(el)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Full record of an element.
    pub fn element(&self, el: ElementId) -> &RecordedElement {
        &self.elements[el.0 as usize]
    }

    fn element_mut(&mut self, el: ElementId) -> &mut RecordedElement {
        &mut self.elements[el.0 as usize]
    }

    /// Every style write, in order.
    pub fn writes(&self) -> &[(ElementId, StyleProp)] {
        &self.writes
    }

    /// Forget recorded style writes.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Style writes to a single element.
    pub fn writes_to(&self, el: ElementId) -> Vec<StyleProp> {
        self.writes
            .iter()
            .filter(|(target, _)| *target == el)
            .map(|(_, prop)| prop.clone())
            .collect()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Timers scheduled so far, in order.
    pub fn scheduled(&self) -> &[TimerId] {
        &self.scheduled
    }

    /// Timers cancelled so far, in order.
    pub fn cleared(&self) -> &[TimerId] {
        &self.cleared
    }

    /// Timers waiting to fire, ordered by id.
    pub fn pending(&self) -> Vec<TimerId> {
        self.pending.keys().copied().collect()
    }

    /// Remove the earliest-due pending timer and advance the clock to it.
    pub fn fire_next(&mut self) -> Option<TimerId> {
        let (&id, &due) = self.pending.iter().min_by_key(|(id, due)| (**due, **id))?;
        self.pending.remove(&id);
        self.now = self.now.max(due);
        Some(id)
    }

    fn detach(&mut self, el: ElementId) {
        if let Some(parent) = self.element(el).parent {
            self.element_mut(parent).children.retain(|child| *child != el);
        }
        self.element_mut(el).parent = None;
    }

    fn info_of(&self, el: ElementId) -> ElementInfo {
        let element = self.element(el);
        ElementInfo {
            id: el,
            tag: element.tag.clone(),
            class: element.class.clone(),
            dom_id: element.dom_id.clone(),
        }
    }

    fn collect_descendants(&self, root: ElementId, tag: &str, out: &mut Vec<ElementInfo>) {
        for &child in &self.element(root).children {
            let info = self.info_of(child);
            if info.has_tag(tag) {
                out.push(info);
            }
            self.collect_descendants(child, tag, out);
        }
    }
}

impl HostDocument for RecordingHost {
    fn children(&self, parent: ElementId) -> Vec<ElementInfo> {
        self.element(parent)
            .children
            .iter()
            .map(|child| self.info_of(*child))
            .collect()
    }

    fn descendants(&self, root: ElementId, tag: &str) -> Vec<ElementInfo> {
        let mut out = Vec::new();
        self.collect_descendants(root, tag, &mut out);
        out
    }

    fn info(&self, el: ElementId) -> Option<ElementInfo> {
        ((el.0 as usize) < self.elements.len()).then(|| self.info_of(el))
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.elements.get(el.0 as usize).and_then(|e| e.parent)
    }

    fn offset(&self, el: ElementId) -> Point {
        let element = self.element(el);
        Point::new(element.left, element.top)
    }

    fn offset_size(&self, el: ElementId) -> Size {
        let element = self.element(el);
        Size::new(element.width, element.height)
    }

    fn position(&self, el: ElementId) -> Position {
        self.element(el).position
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProp) {
        self.writes.push((el, prop.clone()));
        let element = self.element_mut(el);
        match prop {
            StyleProp::Length(LengthProperty::Left, px) => element.left = px,
            StyleProp::Length(LengthProperty::Top, px) => element.top = px,
            StyleProp::Length(LengthProperty::Width, px) => element.width = px,
            StyleProp::Length(LengthProperty::Height, px) => element.height = px,
            StyleProp::Length(LengthProperty::MaxWidth, px) => element.max_width = Some(px),
            StyleProp::Length(LengthProperty::MinWidth, px) => element.min_width = Some(px),
            StyleProp::Opacity(value) => element.opacity = Some(value),
            StyleProp::Overflow(value) => element.overflow = value,
            StyleProp::Display(value) => element.display = value,
            StyleProp::Visibility(value) => element.visibility = value,
            StyleProp::Position(value) => element.position = value,
            StyleProp::ZIndex(value) => element.z_index = Some(value),
            StyleProp::BackgroundImage(url) => element.background = Some(url),
        }
    }

    fn reset_scroll(&mut self, el: ElementId) {
        self.element_mut(el).scroll_resets += 1;
    }

    fn create_element(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        class: Option<&str>,
    ) -> ElementId {
        let parent = parent.unwrap_or(self.body);
        self.add_with(parent, tag, class, None)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }

    fn wrap_content(&mut self, el: ElementId, tag: &str, class: Option<&str>) -> ElementId {
        let content = std::mem::take(&mut self.element_mut(el).children);
        let text = std::mem::take(&mut self.element_mut(el).text);
        let wrapper = self.add_with(el, tag, class, None);
        for child in &content {
            self.element_mut(*child).parent = Some(wrapper);
        }
        let wrapper_element = self.element_mut(wrapper);
        wrapper_element.children = content;
        wrapper_element.text = text;
        wrapper
    }

    fn replace_child(&mut self, old: ElementId, new: ElementId) {
        let Some(parent) = self.element(old).parent else {
            return;
        };
        self.detach(new);
        if let Some(slot) = self
            .element_mut(parent)
            .children
            .iter_mut()
            .find(|child| **child == old)
        {
            *slot = new;
        }
        self.element_mut(new).parent = Some(parent);
        self.element_mut(old).parent = None;
    }

    fn set_class(&mut self, el: ElementId, class: &str) {
        self.element_mut(el).class = Some(class.to_string());
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        self.element_mut(el).text = text.to_string();
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.elements
            .get(el.0 as usize)
            .and_then(|element| element.attributes.get(name).cloned())
    }
}

impl HostTimers for RecordingHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.pending.insert(id, self.now + delay);
        self.scheduled.push(id);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if self.pending.remove(&id).is_some() {
            self.cleared.push(id);
        }
    }
}

/// Fire pending timers into `grid` until none remain or `limit` have fired.
///
/// Returns the number of timers fired.
pub fn settle(grid: &mut ZoomGrid, host: &mut RecordingHost, limit: usize) -> usize {
    let mut fired = 0;
    while fired < limit {
        let Some(id) = host.fire_next() else {
            break;
        };
        grid.handle_event(host, GridEvent::Timer(id));
        fired += 1;
    }
    fired
}

/// Fire only the grid's own tick timers until the animation stops.
///
/// Returns the number of ticks run.
pub fn settle_ticks(grid: &mut ZoomGrid, host: &mut RecordingHost, limit: usize) -> usize {
    let mut ticks = 0;
    while ticks < limit {
        let Some(id) = grid.state().pending_tick() else {
            break;
        };
        host.pending.remove(&id);
        grid.handle_event(host, GridEvent::Timer(id));
        ticks += 1;
    }
    ticks
}
