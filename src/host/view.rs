//! Rendered view tree and model-to-view mapping.

use std::collections::HashMap;

use super::model::NodeId;

/// Identifier of an element in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(usize);

/// Read access to the rendered tree.
pub trait ViewReader {
    fn name(&self, element: ViewId) -> Option<&str>;

    fn parent(&self, element: ViewId) -> Option<ViewId>;

    fn attribute(&self, element: ViewId, key: &str) -> Option<&str>;

    fn classes(&self, element: ViewId) -> &[String];

    fn has_class(&self, element: ViewId, class: &str) -> bool {
        self.classes(element).iter().any(|existing| existing == class)
    }
}

/// Class mutation on the rendered tree.
pub trait ViewWriter {
    /// Adds `class` to `element`. Adding a present class does nothing.
    fn add_class(&mut self, class: &str, element: ViewId);

    fn remove_class(&mut self, class: &str, element: ViewId);
}

#[derive(Debug, Clone)]
struct ViewElement {
    name: String,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
}

/// An in-memory rendered tree. Element `0` is the root.
#[derive(Debug, Clone)]
pub struct ViewTree {
    elements: Vec<ViewElement>,
}

impl ViewTree {
    pub const ROOT_NAME: &'static str = "$root";

    pub fn new() -> Self {
        Self {
            elements: vec![ViewElement {
                name: Self::ROOT_NAME.to_string(),
                parent: None,
                children: Vec::new(),
                attributes: Vec::new(),
                classes: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> ViewId {
        ViewId(0)
    }

    /// Appends a new element as the last child of `parent`.
    pub fn create_element(&mut self, name: &str, parent: ViewId) -> ViewId {
        let parent = if parent.0 < self.elements.len() {
            parent
        } else {
            self.root()
        };
        let element = ViewId(self.elements.len());
        self.elements.push(ViewElement {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: Vec::new(),
            classes: Vec::new(),
        });
        self.elements[parent.0].children.push(element);
        element
    }

    /// Sets a non-class attribute, replacing an existing value.
    pub fn set_attribute(&mut self, element: ViewId, key: &str, value: &str) {
        let Some(element) = self.elements.get_mut(element.0) else {
            return;
        };
        match element.attributes.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element
                .attributes
                .push((key.to_string(), value.to_string())),
        }
    }

    pub fn attributes(&self, element: ViewId) -> &[(String, String)] {
        self.elements
            .get(element.0)
            .map(|element| element.attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn children(&self, element: ViewId) -> &[ViewId] {
        self.elements
            .get(element.0)
            .map(|element| element.children.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewReader for ViewTree {
    fn name(&self, element: ViewId) -> Option<&str> {
        self.elements.get(element.0).map(|element| element.name.as_str())
    }

    fn parent(&self, element: ViewId) -> Option<ViewId> {
        self.elements.get(element.0).and_then(|element| element.parent)
    }

    fn attribute(&self, element: ViewId, key: &str) -> Option<&str> {
        self.elements.get(element.0).and_then(|element| {
            element
                .attributes
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        })
    }

    fn classes(&self, element: ViewId) -> &[String] {
        self.elements
            .get(element.0)
            .map(|element| element.classes.as_slice())
            .unwrap_or(&[])
    }
}

impl ViewWriter for ViewTree {
    fn add_class(&mut self, class: &str, element: ViewId) {
        if let Some(element) = self.elements.get_mut(element.0) {
            if !element.classes.iter().any(|existing| existing == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, class: &str, element: ViewId) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.classes.retain(|existing| existing != class);
        }
    }
}

/// Bidirectional lookup between model elements and the view elements rendering them.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    model_to_view: HashMap<NodeId, ViewId>,
    view_to_model: HashMap<ViewId, NodeId>,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, node: NodeId, element: ViewId) {
        self.model_to_view.insert(node, element);
        self.view_to_model.insert(element, node);
    }

    pub fn to_view_element(&self, node: NodeId) -> Option<ViewId> {
        self.model_to_view.get(&node).copied()
    }

    pub fn to_model_element(&self, element: ViewId) -> Option<NodeId> {
        self.view_to_model.get(&element).copied()
    }
}
