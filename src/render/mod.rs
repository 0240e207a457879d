//! Render artifacts and the recursive renderer seam.
//!
//! A render pass produces a [`RenderTree`] - an ephemeral, plain-data
//! artifact recomputed on every pass and never persisted. The card and
//! list composers build the outer structure; the leaves under each slot
//! come from a [`SchemaRenderer`], the collaborator that turns a schema
//! node into a subtree.
//!
//! The renderer contract supports two property modes:
//!
//! - **suppress-filter**: a filter returning `false` drops that property,
//!   everything else renders normally under the node's own wrapper
//! - **only-matching**: output is restricted to the matching properties
//!   alone, with no wrapper and all siblings suppressed
//!
//! [`TreeRenderer`] is the default implementation. Custom hosts can
//! implement [`SchemaRenderer`] to produce the same tree shape from their
//! own widget layer; a failing implementation propagates its error
//! through the composers unmodified.

use crate::schema::SchemaNode;

// =============================================================================
// Render Tree
// =============================================================================

/// One rendered subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTree {
    /// Nothing rendered (absent item schema, empty slot).
    Nothing,
    /// Plain text content (card headings).
    Text(String),
    /// Sibling subtrees in order.
    Fragment(Vec<RenderTree>),
    /// A widget rendered from a schema node.
    Node {
        /// The schema node's component tag (empty for untagged nodes).
        component: String,
        /// Positional name: the element index, a property name, or `"addition"`.
        name: String,
        /// Rendered child properties in declaration order.
        children: Vec<RenderTree>,
    },
    /// One card panel.
    Card(Box<CardArtifact>),
    /// Empty-state placeholder shown inside the empty affordance.
    Placeholder,
    /// The list container establishing the mutation context for descendants.
    List {
        /// Resolved class namespace for the list.
        class_name: String,
        /// Cards (or the empty affordance) followed by the addition affordance.
        children: Vec<RenderTree>,
    },
}

impl RenderTree {
    /// Collapse a slot's parts: empty → [`RenderTree::Nothing`], one part
    /// → that part, several → [`RenderTree::Fragment`]. `Nothing` parts
    /// are dropped so repeated passes compare equal structurally.
    pub fn compose(parts: Vec<RenderTree>) -> RenderTree {
        let mut parts: Vec<RenderTree> = parts
            .into_iter()
            .filter(|part| !matches!(part, RenderTree::Nothing))
            .collect();
        match parts.len() {
            0 => RenderTree::Nothing,
            1 => parts.remove(0),
            _ => RenderTree::Fragment(parts),
        }
    }

    /// Number of element cards under this tree. The empty affordance is
    /// also a [`RenderTree::Card`] but carries no position and does not
    /// count.
    pub fn card_count(&self) -> usize {
        match self {
            RenderTree::Card(card) => usize::from(card.index.is_some()),
            RenderTree::Fragment(children) | RenderTree::List { children, .. } => {
                children.iter().map(RenderTree::card_count).sum()
            }
            _ => 0,
        }
    }
}

/// One card panel: position identity plus the three rendered slots.
#[derive(Debug, Clone, PartialEq)]
pub struct CardArtifact {
    /// Zero-based position in the live array. `None` for the empty
    /// affordance, which represents no element.
    pub index: Option<usize>,
    /// Resolved class names for the card.
    pub class_name: String,
    /// Title slot: index label render plus the heading text.
    pub title: RenderTree,
    /// Extra slot: operation control renders plus user extra content.
    pub extra: RenderTree,
    /// Body slot: everything not claimed by title or extra.
    pub content: RenderTree,
}

// =============================================================================
// Renderer Seam
// =============================================================================

/// Property filter: return `false` to suppress a property.
pub type PropertyFilter<'a> = &'a dyn Fn(&SchemaNode) -> bool;

/// The recursive schema renderer collaborator.
pub trait SchemaRenderer {
    /// Render `schema` under the positional `name`.
    ///
    /// With `only_matching` set, output is restricted to the properties
    /// the filter accepts, rendered without the node's own wrapper. With
    /// it clear, the node renders normally and the filter suppresses
    /// individual direct properties.
    fn render(
        &self,
        schema: &SchemaNode,
        name: &str,
        filter: Option<PropertyFilter<'_>>,
        only_matching: bool,
    ) -> Result<RenderTree, RenderError>;
}

/// Failure surfaced by a renderer implementation.
///
/// The composers raise nothing themselves; a renderer error passes
/// through them unmodified.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RenderError {
    /// Schema nesting exceeded the renderer's depth bound.
    #[error("schema nesting exceeds the renderer depth bound ({limit})")]
    DepthExceeded {
        /// The configured bound.
        limit: usize,
    },
    /// A custom renderer implementation failed.
    #[error("renderer failure: {0}")]
    Collaborator(String),
}

// =============================================================================
// Default Renderer
// =============================================================================

/// Default [`SchemaRenderer`]: renders schema nodes into plain
/// [`RenderTree::Node`] widgets.
///
/// Nesting is bounded; a schema deeper than the bound fails the render
/// pass rather than recursing without limit.
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    max_depth: usize,
}

impl TreeRenderer {
    /// Create a renderer with the default depth bound.
    pub fn new() -> Self {
        Self { max_depth: 64 }
    }

    /// Override the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn render_node(
        &self,
        schema: &SchemaNode,
        name: &str,
        filter: Option<PropertyFilter<'_>>,
        depth: usize,
    ) -> Result<RenderTree, RenderError> {
        if depth >= self.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let mut children = Vec::new();
        for (prop_name, prop) in schema.property_iter() {
            // The filter applies to direct properties only; accepted
            // subtrees render in full below it.
            if let Some(accepts) = filter {
                if !accepts(prop) {
                    continue;
                }
            }
            children.push(self.render_node(prop, prop_name, None, depth + 1)?);
        }
        Ok(RenderTree::Node {
            component: schema.component_tag().unwrap_or_default().to_string(),
            name: name.to_string(),
            children,
        })
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRenderer for TreeRenderer {
    fn render(
        &self,
        schema: &SchemaNode,
        name: &str,
        filter: Option<PropertyFilter<'_>>,
        only_matching: bool,
    ) -> Result<RenderTree, RenderError> {
        if only_matching {
            let mut matched = Vec::new();
            for (prop_name, prop) in schema.property_iter() {
                if let Some(accepts) = filter {
                    if !accepts(prop) {
                        continue;
                    }
                }
                matched.push(self.render_node(prop, prop_name, None, 1)?);
            }
            Ok(RenderTree::compose(matched))
        } else {
            self.render_node(schema, name, filter, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{is_index_component, is_operation_component};

    fn item_schema() -> SchemaNode {
        SchemaNode::new()
            .with_property("sort", SchemaNode::component("CardList.Index"))
            .with_property("name", SchemaNode::component("Input"))
            .with_property("drop", SchemaNode::component("CardList.Remove"))
    }

    #[test]
    fn test_full_render_preserves_structure() {
        let renderer = TreeRenderer::new();
        let tree = renderer
            .render(&item_schema(), "0", None, false)
            .expect("render should succeed");

        let RenderTree::Node { name, children, .. } = tree else {
            panic!("expected a node wrapper");
        };
        assert_eq!(name, "0");
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn test_only_matching_drops_wrapper_and_siblings() {
        let renderer = TreeRenderer::new();
        let filter = |node: &SchemaNode| is_index_component(node);
        let tree = renderer
            .render(&item_schema(), "0", Some(&filter), true)
            .expect("render should succeed");

        let RenderTree::Node { component, name, .. } = tree else {
            panic!("single match should render bare, got {tree:?}");
        };
        assert_eq!(component, "CardList.Index");
        assert_eq!(name, "sort");
    }

    #[test]
    fn test_suppress_filter_keeps_wrapper() {
        let renderer = TreeRenderer::new();
        let filter =
            |node: &SchemaNode| !is_index_component(node) && !is_operation_component(node);
        let tree = renderer
            .render(&item_schema(), "0", Some(&filter), false)
            .expect("render should succeed");

        let RenderTree::Node { children, .. } = tree else {
            panic!("expected a node wrapper");
        };
        assert_eq!(children.len(), 1, "index and remove suppressed");
        assert!(matches!(
            &children[0],
            RenderTree::Node { component, .. } if component == "Input"
        ));
    }

    #[test]
    fn test_no_matches_compose_to_nothing() {
        let renderer = TreeRenderer::new();
        let filter = |_: &SchemaNode| false;
        let tree = renderer
            .render(&item_schema(), "0", Some(&filter), true)
            .expect("render should succeed");
        assert_eq!(tree, RenderTree::Nothing);
    }

    #[test]
    fn test_depth_bound_fails_render() {
        let mut deep = SchemaNode::component("Leaf");
        for _ in 0..8 {
            deep = SchemaNode::new().with_property("child", deep);
        }
        let renderer = TreeRenderer::new().with_max_depth(4);

        let err = renderer
            .render(&deep, "0", None, false)
            .expect_err("nesting past the bound must fail");
        assert_eq!(err, RenderError::DepthExceeded { limit: 4 });
    }

    #[test]
    fn test_compose_collapses_nothing() {
        assert_eq!(RenderTree::compose(vec![]), RenderTree::Nothing);
        assert_eq!(
            RenderTree::compose(vec![RenderTree::Nothing, RenderTree::Text("x".into())]),
            RenderTree::Text("x".into())
        );
        assert!(matches!(
            RenderTree::compose(vec![
                RenderTree::Text("a".into()),
                RenderTree::Text("b".into())
            ]),
            RenderTree::Fragment(parts) if parts.len() == 2
        ));
    }
}
