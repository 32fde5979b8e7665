//! Route record data model.

use crate::routing::pattern::PathPattern;
use crate::view::ComponentLoader;

/// A path pattern mapped to a lazily loaded view, with optional children.
///
/// Child paths are relative to the parent unless they start with `/`.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub component: ComponentLoader,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>, component: ComponentLoader) -> Self {
        Self {
            path: path.into(),
            name: None,
            component,
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }

    /// True if the path is a catch-all pattern. Unparsable paths are not.
    pub fn is_catch_all(&self) -> bool {
        PathPattern::parse(&self.path)
            .map(|p| p.is_catch_all())
            .unwrap_or(false)
    }
}
