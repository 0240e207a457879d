//! # schema-cards
//!
//! Schema-driven card list rendering for array form fields.
//!
//! Built on [spark-signals](https://crates.io/crates/spark-signals) for
//! fine-grained reactivity.
//!
//! Declare the per-item form schema once and every element of a bound
//! array renders as a visually distinct card, with add/remove/reorder
//! affordances derived purely from declarative markers on the schema.
//! Each card partitions its item schema into three disjoint visual slots:
//! an index label, operation controls, and body content.
//!
//! ## Architecture
//!
//! A render pass is a pure function of a value snapshot and a schema:
//!
//! ```text
//! ArrayField (Signal<Value>) ──┐
//!                              ├─ list composer → cards + addition/empty → RenderTree
//! SchemaNode (slot-classified) ┘
//! ```
//!
//! The slot classifier labels each schema node once per pass (Index,
//! Remove, MoveUp, MoveDown, Addition, or Content), and the card renderer
//! asks the recursive [`SchemaRenderer`] collaborator for each slot's
//! subtree. The list context provider supplies per-item positions so
//! operation controls can dispatch mutations back to the field's
//! primitives, and [`cards::bind`] re-runs the pass whenever the field
//! value or the schema changes.
//!
//! ## Modules
//!
//! - [`schema`] - Schema node model and positional item resolution
//! - [`slot`] - Slot classification predicates, flags, per-pass cache
//! - [`render`] - Render artifacts and the recursive renderer seam
//! - [`field`] - Bound array value holder and mutation primitives
//! - [`array_base`] - List/item context scopes and operation dispatch
//! - [`cards`] - Card renderer, list composer, reactive binding

pub mod array_base;
pub mod cards;
pub mod field;
pub mod render;
pub mod schema;
pub mod slot;

// Re-export commonly used items
pub use schema::{ItemsSchema, SchemaNode};

pub use slot::{
    classify, flags, is_addition_component, is_index_component, is_move_down_component,
    is_move_up_component, is_operation_component, is_remove_component, SlotCache, SlotFlags,
    SlotKind,
};

pub use render::{
    CardArtifact, PropertyFilter, RenderError, RenderTree, SchemaRenderer, TreeRenderer,
};

pub use field::ArrayField;

pub use array_base::{
    current_item_index, current_list, with_item_scope, with_list_scope, Control, DefaultItem,
    ListContext, ListControls, Operation, CONTROLS,
};

pub use cards::{bind, prefix_cls, render_list, CardList, CardListProps, Cleanup};
