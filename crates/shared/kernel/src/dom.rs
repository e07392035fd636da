//! In-memory page document.
//!
//! The document is an arena of [`Element`]s addressed by [`NodeId`]. It keeps
//! exactly the state the page behaviors consume: marker classes, attributes,
//! text, form values, inline styles, layout boxes and the scroll position.
//! Every accessor is defensive: an unknown node reads as absent and writes to
//! it are ignored.

use fxhash::FxHashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Handle of an element inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Vertical layout box of an element, in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= y < top + height`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A recorded `scrollIntoView` call. The host decides how to animate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: FxHashMap<String, String>,
    text: String,
    value: String,
    default_value: String,
    style: FxHashMap<String, String>,
    rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: FxHashMap::default(),
            text: String::new(),
            value: String::new(),
            default_value: String::new(),
            style: FxHashMap::default(),
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets both the current and the reset value of a form field.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.default_value.clone_from(&self.value);
        self
    }

    #[must_use]
    pub const fn with_rect(mut self, top: f64, height: f64) -> Self {
        self.rect = Rect::new(top, height);
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Replaces the whole class list, the way assigning `className` does.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes.clear();
        for class in class_name.split_whitespace() {
            self.add_class(class);
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id();
        }
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_text(&mut self, c: char) {
        self.text.push(c);
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.insert(property.into(), value.into());
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// How a [`Query`] constrains an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeFilter {
    Present(String),
    Prefix(String, String),
}

/// The fixed-shape lookups the behaviors need, e.g.
/// `.navbar .nav-link[href^="#"]` or `section[id]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeFilter>,
    ancestor_class: Option<String>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into().to_ascii_lowercase());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn has_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttributeFilter::Present(name.into()));
        self
    }

    #[must_use]
    pub fn attribute_prefix(mut self, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.attributes.push(AttributeFilter::Prefix(name.into(), prefix.into()));
        self
    }

    /// Restricts matches to descendants of an element carrying `class`.
    #[must_use]
    pub fn within(mut self, class: impl Into<String>) -> Self {
        self.ancestor_class = Some(class.into());
        self
    }

    fn matches(&self, document: &Document, node: NodeId, element: &Element) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != element.tag()) {
            return false;
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        let attributes_match = self.attributes.iter().all(|filter| match filter {
            AttributeFilter::Present(name) => element.attribute(name).is_some(),
            AttributeFilter::Prefix(name, prefix) => {
                element.attribute(name).is_some_and(|value| value.starts_with(prefix.as_str()))
            },
        });
        if !attributes_match {
            return false;
        }
        self.ancestor_class.as_deref().is_none_or(|class| {
            document
                .get(node)
                .and_then(Element::parent)
                .and_then(|parent| document.closest_with_class(parent, class))
                .is_some()
        })
    }
}

/// The page: an element tree plus the viewport state.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    ids: FxHashMap<String, NodeId>,
    scroll_y: f64,
    viewport_height: f64,
    scroll_requests: Vec<ScrollRequest>,
}

impl Document {
    /// Creates an empty page whose root is a `body` element.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            nodes: vec![Element::new("body")],
            ids: FxHashMap::default(),
            scroll_y: 0.0,
            viewport_height: viewport_height.max(0.0),
            scroll_requests: Vec::new(),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends `element` as the last child of `parent` (the root if `parent` is unknown).
    ///
    /// As with `getElementById`, the first element registered under an id wins.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let parent = if parent.0 < self.nodes.len() { parent } else { self.root() };
        let node = NodeId(self.nodes.len());

        element.parent = Some(parent);
        if let Some(id) = element.id.clone() {
            self.ids.entry(id).or_insert(node);
        }
        self.nodes.push(element);
        self.nodes[parent.0].children.push(node);
        node
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Every element below `node`, in document order (excluding `node`).
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .get(node)
            .map(|element| element.children().iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(element) = self.get(next) {
                stack.extend(element.children().iter().rev().copied());
            }
        }
        out
    }

    /// All elements matching `query`, in document order.
    #[must_use]
    pub fn query_all(&self, query: &Query) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&node| self.get(node).is_some_and(|el| query.matches(self, node, el)))
            .collect()
    }

    #[must_use]
    pub fn query_first(&self, query: &Query) -> Option<NodeId> {
        self.query_all(query).into_iter().next()
    }

    /// The nearest inclusive ancestor of `node` carrying `class`.
    #[must_use]
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            let element = self.get(candidate)?;
            if element.has_class(class) {
                return Some(candidate);
            }
            current = element.parent();
        }
        None
    }

    /// The first descendant of `node` carrying `class`.
    #[must_use]
    pub fn descendant_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|&candidate| self.get(candidate).is_some_and(|el| el.has_class(class)))
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.remove_class(class);
        }
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(element) = self.get_mut(node) {
            element.toggle_class(class, on);
        }
    }

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attribute(name))
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(Element::text)
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(element) = self.get_mut(node) {
            element.set_text(text);
        }
    }

    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(Element::value)
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(element) = self.get_mut(node) {
            element.set_value(value);
        }
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(element) = self.get_mut(node) {
            element.set_style(property, value);
        }
    }

    /// Restores every field inside `form` to its initial value.
    pub fn reset_form(&mut self, form: NodeId) {
        for node in self.descendants(form) {
            if let Some(element) = self.get_mut(node) {
                element.value.clone_from(&element.default_value);
            }
        }
    }

    #[must_use]
    pub const fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    #[must_use]
    pub const fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Moves the viewport; negative offsets clamp to the top of the page.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = if y.is_finite() { y.max(0.0) } else { 0.0 };
    }

    /// Records a request to bring `node` to the top of the viewport.
    ///
    /// Returns the target offset, or `None` when the node is unknown.
    pub fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) -> Option<f64> {
        let top = self.get(node)?.rect().top;
        self.scroll_requests.push(ScrollRequest { target: node, top, behavior });
        Some(top)
    }

    #[must_use]
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Shared, lockable handle to the page document.
///
/// Guards are `!Send`; release them before awaiting.
#[derive(Debug, Clone)]
pub struct Dom(Arc<RwLock<Document>>);

impl Dom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self(Arc::new(RwLock::new(document)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Document> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Document> {
        self.0.write()
    }

    /// Copies the current text of `node`, if it exists.
    #[must_use]
    pub fn text_of(&self, node: NodeId) -> Option<String> {
        self.read().text(node).map(str::to_owned)
    }
}
