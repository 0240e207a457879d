//! Slot classifier - labels schema nodes for card slot assignment.
//!
//! Classification is a pure function of a node's component tag. Five
//! independent substring predicates (case-sensitive, containment rather
//! than exact match, so `"Custom.Remove.Button"` still counts as a remove
//! control) feed a [`SlotFlags`] bitset, and [`SlotKind`] resolves that
//! set first-match-wins into a closed category:
//!
//! ```text
//! Index → Remove → MoveUp → MoveDown → Addition → Content
//! ```
//!
//! The predicates are not mutually exclusive - a tag containing two
//! keywords matches two flags. Well-formed schemas encode one intent per
//! tag; dual-tagged nodes are an unsupported configuration and keep
//! whatever the fixed resolution order yields.
//!
//! [`SlotCache`] memoizes flags per component tag for the duration of one
//! render pass, so classification is computed once per node instead of
//! re-running substring scans for every slot build.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::schema::SchemaNode;

// =============================================================================
// Slot Flags
// =============================================================================

bitflags::bitflags! {
    /// Raw predicate matches for one component tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SlotFlags: u8 {
        const NONE = 0;
        const INDEX = 1 << 0;
        const REMOVE = 1 << 1;
        const MOVE_UP = 1 << 2;
        const MOVE_DOWN = 1 << 3;
        const ADDITION = 1 << 4;
        /// Union of the four operation-control flags (extra-slot inclusion).
        const OPERATION = Self::REMOVE.bits()
            | Self::MOVE_UP.bits()
            | Self::MOVE_DOWN.bits()
            | Self::ADDITION.bits();
    }
}

/// Compute the predicate bitset for a component tag.
pub fn flags(tag: &str) -> SlotFlags {
    let mut flags = SlotFlags::NONE;
    if tag.contains("Index") {
        flags |= SlotFlags::INDEX;
    }
    if tag.contains("Remove") {
        flags |= SlotFlags::REMOVE;
    }
    if tag.contains("MoveUp") {
        flags |= SlotFlags::MOVE_UP;
    }
    if tag.contains("MoveDown") {
        flags |= SlotFlags::MOVE_DOWN;
    }
    if tag.contains("Addition") {
        flags |= SlotFlags::ADDITION;
    }
    flags
}

fn node_flags(node: &SchemaNode) -> SlotFlags {
    node.component_tag().map(flags).unwrap_or(SlotFlags::NONE)
}

// =============================================================================
// Slot Kind
// =============================================================================

/// Closed classification of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotKind {
    /// Index label, rendered into the card title slot.
    Index,
    /// Remove control, rendered into the card extra slot.
    Remove,
    /// Move-up control, rendered into the card extra slot.
    MoveUp,
    /// Move-down control, rendered into the card extra slot.
    MoveDown,
    /// Addition control, rendered once at the list level.
    Addition,
    /// Anything else - card body content.
    #[default]
    Content,
}

impl SlotKind {
    /// Resolve a flag set first-match-wins.
    pub fn from_flags(flags: SlotFlags) -> Self {
        if flags.contains(SlotFlags::INDEX) {
            Self::Index
        } else if flags.contains(SlotFlags::REMOVE) {
            Self::Remove
        } else if flags.contains(SlotFlags::MOVE_UP) {
            Self::MoveUp
        } else if flags.contains(SlotFlags::MOVE_DOWN) {
            Self::MoveDown
        } else if flags.contains(SlotFlags::ADDITION) {
            Self::Addition
        } else {
            Self::Content
        }
    }
}

/// Classify a schema node by its component tag.
pub fn classify(node: &SchemaNode) -> SlotKind {
    SlotKind::from_flags(node_flags(node))
}

// =============================================================================
// Predicates
// =============================================================================

/// Tag contains `Index`.
pub fn is_index_component(node: &SchemaNode) -> bool {
    node_flags(node).contains(SlotFlags::INDEX)
}

/// Tag contains `Remove`.
pub fn is_remove_component(node: &SchemaNode) -> bool {
    node_flags(node).contains(SlotFlags::REMOVE)
}

/// Tag contains `MoveUp`.
pub fn is_move_up_component(node: &SchemaNode) -> bool {
    node_flags(node).contains(SlotFlags::MOVE_UP)
}

/// Tag contains `MoveDown`.
pub fn is_move_down_component(node: &SchemaNode) -> bool {
    node_flags(node).contains(SlotFlags::MOVE_DOWN)
}

/// Tag contains `Addition`.
pub fn is_addition_component(node: &SchemaNode) -> bool {
    node_flags(node).contains(SlotFlags::ADDITION)
}

/// Any of the four operation controls (addition, remove, move up, move down).
pub fn is_operation_component(node: &SchemaNode) -> bool {
    node_flags(node).intersects(SlotFlags::OPERATION)
}

// =============================================================================
// Per-pass Cache
// =============================================================================

/// Classification memo for one render pass, keyed by component tag.
///
/// Create one at the top of a list render and share it across the slot
/// builds of every card in that pass. Classification is idempotent, so
/// caching only trades repeated substring scans for one map lookup.
#[derive(Debug, Default)]
pub struct SlotCache {
    memo: RefCell<HashMap<String, SlotFlags>>,
}

impl SlotCache {
    /// Create an empty cache for a fresh render pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized predicate bitset for a node.
    pub fn flags(&self, node: &SchemaNode) -> SlotFlags {
        let Some(tag) = node.component_tag() else {
            return SlotFlags::NONE;
        };
        if let Some(cached) = self.memo.borrow().get(tag) {
            return *cached;
        }
        let computed = flags(tag);
        self.memo.borrow_mut().insert(tag.to_string(), computed);
        computed
    }

    /// Memoized classification of a node.
    pub fn classify(&self, node: &SchemaNode) -> SlotKind {
        SlotKind::from_flags(self.flags(node))
    }

    /// Memoized index predicate.
    pub fn is_index(&self, node: &SchemaNode) -> bool {
        self.flags(node).contains(SlotFlags::INDEX)
    }

    /// Memoized addition predicate.
    pub fn is_addition(&self, node: &SchemaNode) -> bool {
        self.flags(node).contains(SlotFlags::ADDITION)
    }

    /// Memoized operation-union predicate.
    pub fn is_operation(&self, node: &SchemaNode) -> bool {
        self.flags(node).intersects(SlotFlags::OPERATION)
    }
}
