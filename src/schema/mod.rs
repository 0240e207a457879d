//! Schema model - declarative nodes that drive card rendering.
//!
//! A schema is a tree of [`SchemaNode`]s. Each node carries a component tag
//! (the `x-component` string the slot classifier inspects), an optional
//! display title, an ordered map of child properties, and - for array
//! schemas - an item template in one of two forms:
//!
//! - a single shared template applied to every array position
//! - a positional list of templates, where overflow positions fall back
//!   to the first template
//!
//! Property order is preserved end to end (declaration order decides which
//! addition control wins), which is why `properties` is an [`IndexMap`]
//! rather than a plain `HashMap`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Schema Node
// =============================================================================

/// One declarative form element.
///
/// Deserializes from the conventional JSON shape:
///
/// ```json
/// {
///   "x-component": "CardList",
///   "title": "Contacts",
///   "items": {
///     "properties": {
///       "sort": { "x-component": "CardList.Index" },
///       "name": { "x-component": "Input" }
///     }
///   },
///   "properties": {
///     "add": { "x-component": "CardList.Addition" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Component tag, classified by substring predicates in [`crate::slot`].
    #[serde(rename = "x-component", default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Display title for this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Child properties in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,

    /// Item template(s) for array schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsSchema>,
}

/// Item template(s) of an array schema.
///
/// `Single` applies one template to every position. `Positional` applies
/// templates by position, reusing the first one for overflow positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemsSchema {
    /// One shared template for all positions.
    Single(Box<SchemaNode>),
    /// One template per position, first reused for overflow.
    Positional(Vec<SchemaNode>),
}

impl SchemaNode {
    /// Create an untagged node (classifies as content).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with the given component tag.
    pub fn component(tag: impl Into<String>) -> Self {
        Self {
            component: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a child property. Insertion order is declaration order.
    pub fn with_property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Set a single shared item template.
    pub fn with_items(mut self, items: SchemaNode) -> Self {
        self.items = Some(ItemsSchema::Single(Box::new(items)));
        self
    }

    /// Set positional item templates.
    pub fn with_positional_items(mut self, items: Vec<SchemaNode>) -> Self {
        self.items = Some(ItemsSchema::Positional(items));
        self
    }

    /// The component tag, or `None` for untagged nodes.
    pub fn component_tag(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Iterate child properties in declaration order.
    pub fn property_iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.properties.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// First property (in declaration order) matching the predicate.
    pub fn find_property(
        &self,
        matches: impl Fn(&SchemaNode) -> bool,
    ) -> Option<(&str, &SchemaNode)> {
        self.property_iter().find(|&(_, node)| matches(node))
    }

    /// Resolve the item schema governing `position`.
    ///
    /// A single template applies to every position. A positional list
    /// resolves `items[position]` when that position exists, falling back
    /// to `items[0]`. Returns `None` when no item schema is declared (the
    /// caller renders nothing for that position rather than erroring).
    pub fn item_schema(&self, position: usize) -> Option<&SchemaNode> {
        match self.items.as_ref()? {
            ItemsSchema::Single(node) => Some(node),
            ItemsSchema::Positional(nodes) => nodes.get(position).or_else(|| nodes.first()),
        }
    }
}
