//! Document model, schema and the model mutation contract.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::trace;

/// Identifier of an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Read access to model elements and the selection.
pub trait ModelReader {
    /// Returns the element name (its kind), or `None` for an unknown node.
    fn name(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, key: &str) -> Option<&str>;

    /// Returns the element selected as a whole, if the selection is one element.
    fn selected_element(&self) -> Option<NodeId>;

    fn parent_name(&self, node: NodeId) -> Option<&str> {
        self.parent(node).and_then(|parent| self.name(parent))
    }

    fn has_attribute(&self, node: NodeId, key: &str) -> bool {
        self.attribute(node, key).is_some()
    }
}

/// Mutation access to the model, only available inside [`Document::change`].
pub trait ModelWriter: ModelReader {
    fn set_attribute(&mut self, key: &str, value: &str, node: NodeId);

    fn remove_attribute(&mut self, key: &str, node: NodeId);

    /// Appends a new element as the last child of `parent`.
    fn insert_element(&mut self, name: &str, parent: NodeId) -> NodeId;
}

/// Schema query used by converters before writing an attribute.
pub trait SchemaCheck {
    fn check_attribute(&self, element: &str, attribute: &str) -> bool;
}

/// A recorded attribute mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub item: NodeId,
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// A recorded model mutation, drained by the editor after each change block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChange {
    Insert { node: NodeId },
    Attribute(AttributeChange),
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
}

/// An in-memory document tree.
///
/// Element `0` is the root. Elements are never removed; replacing the content
/// means building a new document.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    selection: Option<NodeId>,
    pending: Vec<ModelChange>,
}

impl Document {
    pub const ROOT_NAME: &'static str = "$root";

    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                name: Self::ROOT_NAME.to_string(),
                parent: None,
                children: Vec::new(),
                attributes: BTreeMap::new(),
            }],
            selection: None,
            pending: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.elements.len()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.elements
            .get(node.0)
            .map(|element| element.children.as_slice())
            .unwrap_or(&[])
    }

    /// Returns every element with the given name in document order.
    pub fn elements_named(&self, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if self.name(node) == Some(name) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        found
    }

    /// Selects a single element, or clears the selection.
    ///
    /// Selecting an unknown node clears the selection.
    pub fn set_selection(&mut self, node: Option<NodeId>) {
        self.selection = node.filter(|node| self.contains(*node));
    }

    /// Runs a mutation block. Every mutation is recorded for conversion.
    pub fn change<R>(&mut self, f: impl FnOnce(&mut Writer<'_>) -> R) -> R {
        let mut writer = Writer { document: self };
        f(&mut writer)
    }

    /// Drains the mutations recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<ModelChange> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelReader for Document {
    fn name(&self, node: NodeId) -> Option<&str> {
        self.elements.get(node.0).map(|element| element.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.get(node.0).and_then(|element| element.parent)
    }

    fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.elements
            .get(node.0)
            .and_then(|element| element.attributes.get(key))
            .map(String::as_str)
    }

    fn selected_element(&self) -> Option<NodeId> {
        self.selection
    }
}

/// The writer handed to [`Document::change`] blocks.
#[derive(Debug)]
pub struct Writer<'a> {
    document: &'a mut Document,
}

impl Writer<'_> {
    fn record_attribute(&mut self, node: NodeId, key: &str, new_value: Option<&str>) {
        let Some(element) = self.document.elements.get_mut(node.0) else {
            trace!(target: "mediastyle", "ignoring attribute '{key}' on unknown node {node:?}");
            return;
        };

        let old_value = match new_value {
            Some(value) => element.attributes.insert(key.to_string(), value.to_string()),
            None => element.attributes.remove(key),
        };

        if old_value.as_deref() == new_value {
            return;
        }

        self.document
            .pending
            .push(ModelChange::Attribute(AttributeChange {
                item: node,
                key: key.to_string(),
                old_value,
                new_value: new_value.map(str::to_string),
            }));
    }
}

impl ModelReader for Writer<'_> {
    fn name(&self, node: NodeId) -> Option<&str> {
        self.document.name(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.document.parent(node)
    }

    fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.document.attribute(node, key)
    }

    fn selected_element(&self) -> Option<NodeId> {
        self.document.selected_element()
    }
}

impl ModelWriter for Writer<'_> {
    fn set_attribute(&mut self, key: &str, value: &str, node: NodeId) {
        self.record_attribute(node, key, Some(value));
    }

    fn remove_attribute(&mut self, key: &str, node: NodeId) {
        self.record_attribute(node, key, None);
    }

    fn insert_element(&mut self, name: &str, parent: NodeId) -> NodeId {
        let parent = if self.document.contains(parent) {
            parent
        } else {
            self.document.root()
        };
        let node = NodeId(self.document.elements.len());
        self.document.elements.push(Element {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: BTreeMap::new(),
        });
        self.document.elements[parent.0].children.push(node);
        self.document.pending.push(ModelChange::Insert { node });
        node
    }
}

/// Allowed attributes per element name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    allowed: HashMap<String, HashSet<String>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `attribute` on elements named `element`.
    pub fn extend(&mut self, element: &str, attribute: &str) {
        self.allowed
            .entry(element.to_string())
            .or_default()
            .insert(attribute.to_string());
    }
}

impl SchemaCheck for Schema {
    fn check_attribute(&self, element: &str, attribute: &str) -> bool {
        self.allowed
            .get(element)
            .is_some_and(|attributes| attributes.contains(attribute))
    }
}

/// The document together with its schema.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub document: Document,
    pub schema: Schema,
}
