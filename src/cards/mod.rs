//! Card list - card renderer, list composer, and reactive binding.
//!
//! Each element of the bound array renders as one card with three slots:
//!
//! - **title**: the item schema rendered in only-matching mode through the
//!   index predicate, followed by the user title override or the field's
//!   own title
//! - **extra**: the item schema rendered in only-matching mode through the
//!   operation predicate, followed by user extra content
//! - **content**: a full render of the item schema with index- and
//!   operation-classified properties individually suppressed
//!
//! The composer snapshots the live value first, renders one card per
//! snapshot position (or the empty affordance when the snapshot is
//! empty), then renders the first addition-classified schema property.
//! Everything runs inside the list context scope so operation controls
//! can resolve their position and reach the mutation primitives.
//!
//! A render pass is a pure function of the field snapshot and schema.
//! [`bind`] layers reactivity on top: an effect re-runs the composition
//! whenever the field value or the schema signal changes and hands each
//! fresh tree to the host callback.

use std::rc::Rc;

use spark_signals::{Signal, effect, effect_scope};

use crate::array_base::{self, CONTROLS, DefaultItem, ListContext, ListControls, Operation};
use crate::field::ArrayField;
use crate::render::{CardArtifact, RenderError, RenderTree, SchemaRenderer};
use crate::schema::SchemaNode;
use crate::slot::SlotCache;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by [`bind`]. Call it to stop re-rendering.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Props
// =============================================================================

/// User props forwarded into the card list render.
#[derive(Clone, Default)]
pub struct CardListProps {
    /// Title override for card headings (falls back to the field title).
    pub title: Option<String>,
    /// Extra header content appended after the operation controls.
    pub extra: Option<RenderTree>,
    /// Additional class appended to each card's class list.
    pub class_name: Option<String>,
    /// Class namespace override.
    pub prefix_cls: Option<String>,
    /// Factory for the element the addition control appends (JSON `null`
    /// without one).
    pub default_item: Option<DefaultItem>,
    /// Change handler supplied by the host. Card containers swallow their
    /// own change events, so this is accepted but never wired into the
    /// artifact; mutation flows through the operation controls alone.
    pub on_change: Option<Rc<dyn Fn(&serde_json::Value)>>,
}

/// Resolve the class namespace for a list.
pub fn prefix_cls(props: &CardListProps) -> String {
    props
        .prefix_cls
        .clone()
        .unwrap_or_else(|| "schema-array-cards".to_string())
}

fn item_class(props: &CardListProps) -> String {
    let prefix = prefix_cls(props);
    match &props.class_name {
        Some(extra) => format!("{prefix}-item {extra}"),
        None => format!("{prefix}-item"),
    }
}

fn heading(field: &ArrayField, props: &CardListProps) -> RenderTree {
    props
        .title
        .clone()
        .or_else(|| field.title().map(String::from))
        .map(RenderTree::Text)
        .unwrap_or(RenderTree::Nothing)
}

// =============================================================================
// Card Renderer
// =============================================================================

fn render_card(
    renderer: &dyn SchemaRenderer,
    cache: &SlotCache,
    field: &ArrayField,
    item_schema: Option<&SchemaNode>,
    position: usize,
    props: &CardListProps,
) -> Result<RenderTree, RenderError> {
    let name = position.to_string();
    let (index_slot, operations_slot, body) = match item_schema {
        Some(item) => {
            let index_filter = |node: &SchemaNode| cache.is_index(node);
            let operation_filter = |node: &SchemaNode| cache.is_operation(node);
            let content_filter =
                |node: &SchemaNode| !cache.is_index(node) && !cache.is_operation(node);
            (
                renderer.render(item, &name, Some(&index_filter), true)?,
                renderer.render(item, &name, Some(&operation_filter), true)?,
                renderer.render(item, &name, Some(&content_filter), false)?,
            )
        }
        // No item schema declared for this position: the card renders
        // with empty slots rather than failing.
        None => (RenderTree::Nothing, RenderTree::Nothing, RenderTree::Nothing),
    };

    let title = RenderTree::compose(vec![index_slot, heading(field, props)]);
    let extra = RenderTree::compose(vec![
        operations_slot,
        props.extra.clone().unwrap_or(RenderTree::Nothing),
    ]);

    // The card container swallows its own change events: `props.on_change`
    // is deliberately not forwarded into the artifact.
    Ok(RenderTree::Card(Box::new(CardArtifact {
        index: Some(position),
        class_name: item_class(props),
        title,
        extra,
        content: body,
    })))
}

fn render_empty(field: &ArrayField, props: &CardListProps) -> RenderTree {
    RenderTree::Card(Box::new(CardArtifact {
        index: None,
        class_name: item_class(props),
        title: heading(field, props),
        extra: RenderTree::Nothing,
        content: RenderTree::Placeholder,
    }))
}

fn render_addition(
    renderer: &dyn SchemaRenderer,
    cache: &SlotCache,
    schema: &SchemaNode,
) -> Result<Option<RenderTree>, RenderError> {
    let mut addition = None;
    for (name, property) in schema.property_iter() {
        if !cache.is_addition(property) {
            continue;
        }
        if addition.is_some() {
            tracing::debug!(property = name, "skipping later addition control, first declared wins");
            continue;
        }
        addition = Some(renderer.render(property, "addition", None, false)?);
    }
    Ok(addition)
}

// =============================================================================
// List Composer
// =============================================================================

/// Compose one render pass over the field's current value.
///
/// Produces exactly one card per snapshot position in snapshot order, or
/// exactly one empty affordance for an empty snapshot; in both cases the
/// first addition-classified schema property (declaration order) renders
/// afterwards, or nothing when none exists. The caller is expected to
/// hold the list context scope open (see [`CardList::render`]).
pub fn render_list(
    renderer: &dyn SchemaRenderer,
    field: &ArrayField,
    schema: &SchemaNode,
    props: &CardListProps,
) -> Result<RenderTree, RenderError> {
    // Snapshot before rendering item 0; every later position sees this
    // copy even if the live value is mutated mid-pass.
    let items = field.snapshot();
    let cache = SlotCache::new();

    let mut children = Vec::new();
    if items.is_empty() {
        children.push(render_empty(field, props));
    } else {
        for position in 0..items.len() {
            let item_schema = schema.item_schema(position);
            let card = array_base::with_item_scope(position, || {
                render_card(renderer, &cache, field, item_schema, position, props)
            })?;
            children.push(card);
        }
    }

    if let Some(addition) = render_addition(renderer, &cache, schema)? {
        children.push(addition);
    }

    Ok(RenderTree::List {
        class_name: prefix_cls(props),
        children,
    })
}

// =============================================================================
// Composed Export
// =============================================================================

/// The composed card list: the primary render entry plus the named
/// control handles, carried as plain struct members.
pub struct CardList<R: SchemaRenderer> {
    renderer: R,
    props: CardListProps,
    /// Named sub-component handles for schema authors and hosts.
    pub controls: ListControls,
}

impl<R: SchemaRenderer> CardList<R> {
    /// Create a card list over the given recursive renderer.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            props: CardListProps::default(),
            controls: CONTROLS,
        }
    }

    /// Replace the user props.
    pub fn with_props(mut self, props: CardListProps) -> Self {
        self.props = props;
        self
    }

    /// The current user props.
    pub fn props(&self) -> &CardListProps {
        &self.props
    }

    fn context(&self, field: &ArrayField) -> Rc<ListContext> {
        match &self.props.default_item {
            Some(factory) => ListContext::with_default_item(field.clone(), factory.clone()),
            None => ListContext::new(field.clone()),
        }
    }

    /// One pure render pass over `field` and `schema`.
    pub fn render(
        &self,
        field: &ArrayField,
        schema: &SchemaNode,
    ) -> Result<RenderTree, RenderError> {
        array_base::with_list_scope(self.context(field), || {
            render_list(&self.renderer, field, schema, &self.props)
        })
    }

    /// Apply an operation against `field` outside a render pass - the
    /// host-side interaction path for artifact-carried positions.
    pub fn dispatch(&self, field: &ArrayField, operation: Operation, index: Option<usize>) {
        self.context(field).dispatch(operation, index);
    }
}

// =============================================================================
// Reactive Binding
// =============================================================================

/// Re-render `list` whenever the field value or the schema changes.
///
/// The effect reads both sources, so the first render happens immediately
/// and every later mutation hands a fresh tree (or a propagated renderer
/// error) to `on_render`. The returned [`Cleanup`] stops the binding.
pub fn bind<R: SchemaRenderer + 'static>(
    list: Rc<CardList<R>>,
    field: ArrayField,
    schema: Signal<SchemaNode>,
    on_render: impl Fn(Result<RenderTree, RenderError>) + 'static,
) -> Cleanup {
    let scope = effect_scope(false);
    scope.run(move || {
        let _effect_cleanup = effect(move || {
            // Reading the schema signal and (inside render) the field
            // snapshot establishes both reactive dependencies.
            let schema = schema.get();
            on_render(list.render(&field, &schema));
        });
    });
    Box::new(move || {
        scope.stop();
    })
}
