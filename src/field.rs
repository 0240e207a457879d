//! Array field - the bound value holder for a card list.
//!
//! An [`ArrayField`] owns a reactive JSON value plus a display title. The
//! composers never mutate the value during a render pass; they read it
//! through [`ArrayField::snapshot`], which makes the defensive copy the
//! render iterates over and coerces non-array values to an empty list.
//!
//! Mutation happens through the primitives (`insert`, `remove`,
//! `move_item`, ...) that the operation controls reach via the list
//! context. Each primitive rewrites the value signal, so renders bound
//! with [`crate::cards::bind`] re-run automatically.

use serde_json::Value;
use spark_signals::{Signal, signal};

/// The bound array value holder.
///
/// Cloning shares the underlying signal, so clones observe and apply the
/// same mutations.
#[derive(Clone)]
pub struct ArrayField {
    value: Signal<Value>,
    title: Option<String>,
}

impl ArrayField {
    /// Create a field holding `initial` (normally a JSON array).
    pub fn new(initial: Value) -> Self {
        Self {
            value: signal(initial),
            title: None,
        }
    }

    /// Create a field from element values.
    pub fn from_items(items: Vec<Value>) -> Self {
        Self::new(Value::Array(items))
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The display title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The underlying value signal (reads inside an effect are tracked).
    pub fn value_signal(&self) -> Signal<Value> {
        self.value.clone()
    }

    /// Replace the whole value.
    pub fn set_value(&self, value: Value) {
        self.value.set(value);
    }

    /// Defensive copy of the element list for one render pass.
    ///
    /// Non-array values coerce to an empty list; later positions in a
    /// pass always see the copy taken here, never a mid-pass mutation.
    pub fn snapshot(&self) -> Vec<Value> {
        match self.value.get() {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                tracing::debug!(value_kind = kind_name(&other), "coercing non-array value to empty list");
                Vec::new()
            }
        }
    }

    /// Current element count.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the element list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Mutation Primitives
    // =========================================================================

    fn update(&self, apply: impl FnOnce(&mut Vec<Value>)) {
        let mut items = self.snapshot();
        apply(&mut items);
        self.value.set(Value::Array(items));
    }

    /// Insert `value` at `index` (clamped to the end).
    pub fn insert(&self, index: usize, value: Value) {
        self.update(|items| {
            let index = index.min(items.len());
            items.insert(index, value);
        });
    }

    /// Append `value` at the end.
    pub fn push(&self, value: Value) {
        self.update(|items| items.push(value));
    }

    /// Remove the element at `index`. Out-of-range removals are dropped.
    pub fn remove(&self, index: usize) {
        self.update(|items| {
            if index < items.len() {
                items.remove(index);
            } else {
                tracing::warn!(index, len = items.len(), "dropping out-of-range remove");
            }
        });
    }

    /// Move the element at `from` to position `to`. Out-of-range sources
    /// are dropped; targets clamp to the end.
    pub fn move_item(&self, from: usize, to: usize) {
        self.update(|items| {
            if from >= items.len() {
                tracing::warn!(from, len = items.len(), "dropping out-of-range move");
                return;
            }
            let element = items.remove(from);
            let to = to.min(items.len());
            items.insert(to, element);
        });
    }

    /// Move the element at `index` one position up. No-op at the top.
    pub fn move_up(&self, index: usize) {
        if index == 0 {
            return;
        }
        self.move_item(index, index - 1);
    }

    /// Move the element at `index` one position down. No-op at the bottom.
    pub fn move_down(&self, index: usize) {
        if index + 1 >= self.len() {
            return;
        }
        self.move_item(index, index + 1);
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn field() -> ArrayField {
        ArrayField::from_items(vec![json!({"x": 1}), json!({"x": 2}), json!({"x": 3})])
    }

    #[test]
    fn test_snapshot_returns_elements_in_order() {
        let field = field();
        let items = field.snapshot();
        assert_eq!(items, vec![json!({"x": 1}), json!({"x": 2}), json!({"x": 3})]);
    }

    #[test]
    fn test_non_array_value_coerces_to_empty() {
        let field = ArrayField::new(json!("not an array"));
        assert!(field.snapshot().is_empty());
        assert!(field.is_empty());
    }

    #[test]
    fn test_insert_and_push() {
        let field = field();
        field.insert(1, json!({"x": 9}));
        assert_eq!(field.snapshot()[1], json!({"x": 9}));
        assert_eq!(field.len(), 4);

        field.push(json!({"x": 10}));
        assert_eq!(field.snapshot()[4], json!({"x": 10}));

        // Past-the-end inserts clamp to push semantics.
        field.insert(99, json!({"x": 11}));
        assert_eq!(field.snapshot()[5], json!({"x": 11}));
    }

    #[test]
    fn test_remove() {
        let field = field();
        field.remove(1);
        assert_eq!(field.snapshot(), vec![json!({"x": 1}), json!({"x": 3})]);

        // Out of range: dropped, not a panic.
        field.remove(10);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_move_item() {
        let field = field();
        field.move_item(0, 2);
        assert_eq!(field.snapshot(), vec![json!({"x": 2}), json!({"x": 3}), json!({"x": 1})]);
    }

    #[test]
    fn test_move_up_and_down_clamp_at_ends() {
        let field = field();
        field.move_up(0);
        field.move_down(2);
        assert_eq!(field.snapshot(), vec![json!({"x": 1}), json!({"x": 2}), json!({"x": 3})]);

        field.move_up(2);
        assert_eq!(field.snapshot(), vec![json!({"x": 1}), json!({"x": 3}), json!({"x": 2})]);
        field.move_down(0);
        assert_eq!(field.snapshot(), vec![json!({"x": 3}), json!({"x": 1}), json!({"x": 2})]);
    }

    #[test]
    fn test_mutations_are_observable() {
        let field = field();
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let observed = field.clone();

        let _effect_cleanup = effect(move || {
            let _ = observed.snapshot();
            runs_clone.set(runs_clone.get() + 1);
        });

        assert_eq!(runs.get(), 1, "effect runs once on creation");
        field.push(json!({"x": 4}));
        assert_eq!(runs.get(), 2, "push should re-run the effect");
        field.remove(0);
        assert_eq!(runs.get(), 3, "remove should re-run the effect");
    }

    #[test]
    fn test_clones_share_state() {
        let field = field();
        let clone = field.clone();
        clone.push(json!({"x": 4}));
        assert_eq!(field.len(), 4);
    }
}
