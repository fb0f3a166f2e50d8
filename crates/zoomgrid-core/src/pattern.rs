#![forbid(unsafe_code)]

//! Minimal element selectors: `tag`, `tag.class` or `tag#id`.

use crate::host::{ElementId, ElementInfo, HostDocument};

/// A parsed element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPattern {
    pub tag: String,
    pub class: Option<String>,
    pub dom_id: Option<String>,
}

impl ElementPattern {
    /// Parse `tag`, `tag.class` or `tag#id`. A `.` takes precedence over `#`.
    pub fn parse(pattern: &str) -> Self {
        if let Some((tag, class)) = pattern.split_once('.') {
            Self {
                tag: tag.to_string(),
                class: Some(class.to_string()),
                dom_id: None,
            }
        } else if let Some((tag, dom_id)) = pattern.split_once('#') {
            Self {
                tag: tag.to_string(),
                class: None,
                dom_id: Some(dom_id.to_string()),
            }
        } else {
            Self {
                tag: pattern.to_string(),
                class: None,
                dom_id: None,
            }
        }
    }

    /// Whether an element with the pattern's tag also passes the class/id filter.
    ///
    /// A pattern with neither class nor id matches every element of its tag;
    /// otherwise a matching class *or* a matching id is enough.
    pub fn matches(&self, info: &ElementInfo) -> bool {
        if !info.has_tag(&self.tag) {
            return false;
        }
        if self.class.is_none() && self.dom_id.is_none() {
            return true;
        }
        let class_match = self.class.is_some() && info.class == self.class;
        let id_match = self.dom_id.is_some() && info.dom_id == self.dom_id;
        class_match || id_match
    }

    /// All descendants of `root` matching this pattern.
    pub fn select<H: HostDocument + ?Sized>(&self, host: &H, root: ElementId) -> Vec<ElementId> {
        host.descendants(root, &self.tag)
            .into_iter()
            .filter(|info| self.matches(info))
            .map(|info| info.id)
            .collect()
    }
}

/// Parse a list of selector strings.
pub fn parse_patterns<I, S>(patterns: I) -> Vec<ElementPattern>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| ElementPattern::parse(pattern.as_ref()))
        .collect()
}
