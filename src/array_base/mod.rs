//! Array base - list context provider and operation dispatch.
//!
//! The composers wrap every pass in a list scope, and each card's slot
//! renders run inside an item scope carrying that card's position. The
//! scopes are thread-local stacks, so nested card lists resolve their own
//! context and unwind correctly.
//!
//! Operation controls never mutate the value themselves. Activating one
//! resolves the ambient scopes and dispatches an [`Operation`] against
//! the [`ListContext`], which forwards the index to the field's mutation
//! primitives. Dispatches with no usable target are dropped with a
//! warning, never a panic.
//!
//! [`CONTROLS`] exposes the named sub-component handles (addition,
//! remove, move up, move down, index label) as plain data: canonical
//! component tags that classify correctly through the slot predicates,
//! plus the activation path described above.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::field::ArrayField;
use crate::schema::SchemaNode;

// =============================================================================
// Operations
// =============================================================================

/// A list mutation triggered by an operation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Append a new element at the end of the list.
    Addition,
    /// Remove the element at the target position.
    Remove,
    /// Move the target element one position up.
    MoveUp,
    /// Move the target element one position down.
    MoveDown,
}

/// Factory for the element an addition control appends.
pub type DefaultItem = Rc<dyn Fn() -> Value>;

// =============================================================================
// List Context
// =============================================================================

/// Per-list mutation context supplied to descendants of one card list.
pub struct ListContext {
    field: ArrayField,
    default_item: Option<DefaultItem>,
}

impl ListContext {
    /// Create a context over `field`.
    pub fn new(field: ArrayField) -> Rc<Self> {
        Rc::new(Self {
            field,
            default_item: None,
        })
    }

    /// Create a context whose addition control appends `default_item()`
    /// instead of JSON `null`.
    pub fn with_default_item(field: ArrayField, default_item: DefaultItem) -> Rc<Self> {
        Rc::new(Self {
            field,
            default_item: Some(default_item),
        })
    }

    /// The field this context mutates.
    pub fn field(&self) -> &ArrayField {
        &self.field
    }

    /// Apply `operation` against `index`.
    ///
    /// Addition needs no index; the other operations are dropped (with a
    /// warning) when no item scope supplied one.
    pub fn dispatch(&self, operation: Operation, index: Option<usize>) {
        match (operation, index) {
            (Operation::Addition, _) => {
                let element = self
                    .default_item
                    .as_ref()
                    .map(|factory| factory())
                    .unwrap_or(Value::Null);
                self.field.push(element);
            }
            (Operation::Remove, Some(index)) => self.field.remove(index),
            (Operation::MoveUp, Some(index)) => self.field.move_up(index),
            (Operation::MoveDown, Some(index)) => self.field.move_down(index),
            (_, None) => {
                tracing::warn!(?operation, "dropping operation with no item scope");
            }
        }
    }
}

// =============================================================================
// Context Scopes
// =============================================================================

thread_local! {
    /// Stack of active list contexts (outermost first).
    static LIST_STACK: RefCell<Vec<Rc<ListContext>>> = RefCell::new(Vec::new());

    /// Stack of active item positions for nested card lists.
    static ITEM_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());
}

/// Push a list context onto the scope stack.
pub fn enter_list(context: Rc<ListContext>) {
    LIST_STACK.with(|stack| stack.borrow_mut().push(context));
}

/// Pop the innermost list context.
pub fn exit_list() {
    LIST_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

/// The innermost active list context.
pub fn current_list() -> Option<Rc<ListContext>> {
    LIST_STACK.with(|stack| stack.borrow().last().cloned())
}

/// Push an item position onto the scope stack.
pub fn enter_item(index: usize) {
    ITEM_STACK.with(|stack| stack.borrow_mut().push(index));
}

/// Pop the innermost item position.
pub fn exit_item() {
    ITEM_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

/// The innermost active item position.
pub fn current_item_index() -> Option<usize> {
    ITEM_STACK.with(|stack| stack.borrow().last().copied())
}

/// Run `body` inside a list scope, unwinding it afterwards.
pub fn with_list_scope<R>(context: Rc<ListContext>, body: impl FnOnce() -> R) -> R {
    enter_list(context);
    let result = body();
    exit_list();
    result
}

/// Run `body` inside an item scope, unwinding it afterwards.
pub fn with_item_scope<R>(index: usize, body: impl FnOnce() -> R) -> R {
    enter_item(index);
    let result = body();
    exit_item();
    result
}

// =============================================================================
// Control Handles
// =============================================================================

/// A named list-control handle: the canonical component tag plus the
/// operation it triggers when activated.
#[derive(Clone, Copy)]
pub struct Control {
    /// Canonical component tag for schema authors.
    pub tag: &'static str,
    operation: Option<Operation>,
}

impl Control {
    /// A schema node carrying this control's tag.
    pub fn schema(&self) -> SchemaNode {
        SchemaNode::component(self.tag)
    }

    /// Trigger the control against the ambient list/item scopes.
    ///
    /// Index labels carry no operation and activate to nothing. Controls
    /// activated outside any list scope are dropped with a warning.
    pub fn activate(&self) {
        let Some(operation) = self.operation else {
            return;
        };
        let Some(list) = current_list() else {
            tracing::warn!(tag = self.tag, "dropping control activation outside a list scope");
            return;
        };
        list.dispatch(operation, current_item_index());
    }
}

/// The named sub-component handles attached to the composed card list.
pub struct ListControls {
    /// Appends a new element.
    pub addition: Control,
    /// Removes the ambient item.
    pub remove: Control,
    /// Moves the ambient item up.
    pub move_up: Control,
    /// Moves the ambient item down.
    pub move_down: Control,
    /// Index label for the card title slot; activates to nothing.
    pub index: Control,
}

/// Canonical control handles for card lists.
pub const CONTROLS: ListControls = ListControls {
    addition: Control {
        tag: "CardList.Addition",
        operation: Some(Operation::Addition),
    },
    remove: Control {
        tag: "CardList.Remove",
        operation: Some(Operation::Remove),
    },
    move_up: Control {
        tag: "CardList.MoveUp",
        operation: Some(Operation::MoveUp),
    },
    move_down: Control {
        tag: "CardList.MoveDown",
        operation: Some(Operation::MoveDown),
    },
    index: Control {
        tag: "CardList.Index",
        operation: None,
    },
};
