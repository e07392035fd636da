//! Serializable page layout, the input a host hands to [`Document::from_layout`].
//!
//! ```json
//! {
//!   "viewport_height": 800,
//!   "nodes": [
//!     { "tag": "section", "id": "about", "top": 700, "height": 800 }
//!   ]
//! }
//! ```

use crate::dom::{Document, Element, NodeId};
use crate::error::{PageError, PageErrorExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub viewport_height: f64,
    #[serde(default)]
    pub nodes: Vec<NodeLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeLayout {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub top: f64,
    pub height: f64,
    pub children: Vec<NodeLayout>,
}

impl PageLayout {
    /// Parses a layout from its JSON text.
    ///
    /// # Errors
    /// Returns [`PageError::Parse`] when the text is not a valid layout.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        serde_json::from_str(raw).context("Parsing page layout")
    }
}

/// Reads and parses the layout file at `path`.
///
/// # Errors
/// Returns [`PageError::Read`] if the file cannot be read and
/// [`PageError::Parse`] if it is not a valid layout.
pub fn load_layout(path: impl AsRef<Path>) -> Result<PageLayout, PageError> {
    let path = path.as_ref();
    info!("Loading page layout from {}", path.display());

    let raw = std::fs::read_to_string(path).context(path.display().to_string())?;
    PageLayout::from_json(&raw)
}

impl Document {
    /// Builds the element arena from a layout description.
    ///
    /// # Errors
    /// Returns [`PageError::InvalidLayout`] for a non-positive viewport, an
    /// empty tag, or a box with a negative or non-finite extent.
    pub fn from_layout(layout: &PageLayout) -> Result<Self, PageError> {
        if !layout.viewport_height.is_finite() || layout.viewport_height <= 0.0 {
            return Err(PageError::invalid(format!(
                "viewport height must be positive, got {}",
                layout.viewport_height
            )));
        }

        let mut document = Self::new(layout.viewport_height);
        let root = document.root();
        for node in &layout.nodes {
            append_node(&mut document, root, node)?;
        }

        debug!(elements = document.len(), "Built page document");
        Ok(document)
    }
}

fn append_node(document: &mut Document, parent: NodeId, node: &NodeLayout) -> Result<(), PageError> {
    if node.tag.trim().is_empty() {
        return Err(PageError::invalid("element without a tag"));
    }
    if !node.top.is_finite() || !node.height.is_finite() || node.height < 0.0 {
        return Err(PageError::invalid(format!(
            "<{}> has an invalid box (top {}, height {})",
            node.tag, node.top, node.height
        )));
    }

    let mut element = Element::new(node.tag.trim())
        .with_text(node.text.as_str())
        .with_value(node.value.as_str())
        .with_rect(node.top, node.height);
    if let Some(id) = node.id.as_deref().filter(|id| !id.is_empty()) {
        element = element.with_id(id);
    }
    for class in &node.classes {
        element = element.with_class(class.as_str());
    }
    for (name, value) in &node.attributes {
        element = element.with_attribute(name.as_str(), value.as_str());
    }

    let id = document.append(parent, element);
    for child in &node.children {
        append_node(document, id, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Query;
    use std::io::Write;

    const LAYOUT: &str = r##"{
        "viewport_height": 800,
        "nodes": [
            { "tag": "nav", "id": "mainNavbar", "classes": ["navbar"], "children": [
                { "tag": "a", "classes": ["nav-link"], "attributes": { "href": "#about" } }
            ]},
            { "tag": "section", "id": "about", "top": 0, "height": 900 },
            { "tag": "input", "id": "contactName", "value": "Ada" }
        ]
    }"##;

    #[test]
    fn test_layout_builds_document() {
        let layout = PageLayout::from_json(LAYOUT).unwrap();
        let doc = Document::from_layout(&layout).unwrap();

        assert!((doc.viewport_height() - 800.0).abs() < f64::EPSILON);
        let links = doc.query_all(&Query::new().class("nav-link").within("navbar"));
        assert_eq!(links.len(), 1);
        assert_eq!(doc.attribute(links[0], "href"), Some("#about"));

        let section = doc.by_id("about").unwrap();
        assert!((doc.get(section).unwrap().rect().height - 900.0).abs() < f64::EPSILON);

        let input = doc.by_id("contactName").unwrap();
        assert_eq!(doc.value(input), Some("Ada"));
    }

    #[test]
    fn test_invalid_viewport_is_rejected() {
        let layout = PageLayout { viewport_height: 0.0, nodes: Vec::new() };
        let err = Document::from_layout(&layout).unwrap_err();
        assert!(matches!(err, PageError::InvalidLayout { .. }));
    }

    #[test]
    fn test_negative_height_is_rejected() {
        let layout = PageLayout {
            viewport_height: 600.0,
            nodes: vec![NodeLayout { tag: "section".into(), height: -1.0, ..NodeLayout::default() }],
        };
        let err = Document::from_layout(&layout).unwrap_err();
        assert!(err.to_string().contains("invalid box"));
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let layout = PageLayout { viewport_height: 600.0, nodes: vec![NodeLayout::default()] };
        assert!(Document::from_layout(&layout).is_err());
    }

    #[test]
    fn test_load_layout_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LAYOUT.as_bytes()).unwrap();

        let layout = load_layout(file.path()).unwrap();
        assert_eq!(layout.nodes.len(), 3);
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let err = load_layout("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PageError::Read { context: Some(_), .. }));
    }

    #[test]
    fn test_garbage_reports_parse_error() {
        let err = PageLayout::from_json("{ nope").unwrap_err();
        assert!(matches!(err, PageError::Parse { .. }));
    }
}
