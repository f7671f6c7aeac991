//! Events and the data objects hooks resolve against.
//!
//! The host framework delivers events carrying a [`EventModel`] (the named
//! sub-objects bound to the firing element) and a propagation path of
//! ancestor models, outermost last. The core only reads events; it never
//! owns or mutates them. Hook dispatch clones the resolved [`HookData`]
//! entry, so an action receives its own (possibly prepare-annotated) copy,
//! never the live model entry.

use crate::instance::ComponentInstance;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// The business-logic callback of a hook target, invoked as
/// `action(hook_data, model, event)` with the resolved clone as calling
/// context.
pub type Action = Arc<dyn Fn(&mut HookData, &EventModel, &HookEvent) + Send + Sync>;

/// A named data object a hook resolves to: loose fields, an optional action
/// callable, and a transient veto flag a prepare step may raise to block
/// dispatch.
#[derive(Clone, Default)]
pub struct HookData {
    fields: Map<String, Value>,
    action: Option<Action>,
    error: bool,
}

impl HookData {
    /// An empty data object with no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a data object from pre-existing loose fields.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Add a field (builder form).
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Attach the action callable (builder form).
    pub fn action(
        mut self,
        action: impl Fn(&mut HookData, &EventModel, &HookEvent) + Send + Sync + 'static,
    ) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Attach an already-shared action handle (builder form).
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Read a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Write a field.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// All fields, in insertion order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Whether an action callable is attached.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// A shared handle on the action callable, if any.
    pub fn action_fn(&self) -> Option<Action> {
        self.action.clone()
    }

    /// Raise or clear the veto flag. A prepare step raises it to block the
    /// action for this dispatch only.
    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    /// Whether the veto flag is raised.
    pub fn error(&self) -> bool {
        self.error
    }
}

impl fmt::Debug for HookData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookData")
            .field("fields", &self.fields)
            .field("action", &self.action.is_some())
            .field("error", &self.error)
            .finish()
    }
}

/// One entry of an event model: either a plain loose value or a full data
/// object. Plain object values resolve to actionless [`HookData`]; scalars
/// fail resolution as non-objects.
#[derive(Clone, Debug)]
pub enum ModelEntry {
    /// A plain loose value.
    Value(Value),
    /// A data object, possibly carrying an action.
    Data(HookData),
}

impl From<Value> for ModelEntry {
    fn from(value: Value) -> Self {
        ModelEntry::Value(value)
    }
}

impl From<HookData> for ModelEntry {
    fn from(data: HookData) -> Self {
        ModelEntry::Data(data)
    }
}

/// The named sub-objects an event carries, plus an optional reference to
/// the component hosting the data (the root data host), used to locate a
/// prepare-step owner when no invoking instance is supplied.
#[derive(Clone, Default)]
pub struct EventModel {
    entries: IndexMap<String, ModelEntry>,
    root_host: Option<Arc<ComponentInstance>>,
}

impl EventModel {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named entry (builder form).
    pub fn entry(mut self, name: impl Into<String>, entry: impl Into<ModelEntry>) -> Self {
        self.entries.insert(name.into(), entry.into());
        self
    }

    /// Declare the component hosting this model's data (builder form).
    pub fn root_hosted_by(mut self, host: Arc<ComponentInstance>) -> Self {
        self.root_host = Some(host);
        self
    }

    /// Look up a named entry.
    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.get(name)
    }

    /// Whether a named entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The entry names, in insertion order. Used for diagnostics.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The component hosting this model's data, if declared.
    pub fn root_host(&self) -> Option<&Arc<ComponentInstance>> {
        self.root_host.as_ref()
    }
}

impl fmt::Debug for EventModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventModel")
            .field("entries", &self.entries)
            .field(
                "root_host",
                &self.root_host.as_ref().map(|h| h.identifier().to_owned()),
            )
            .finish()
    }
}

/// An event as delivered by the host framework: a name, the model bound to
/// the firing element, and the ordered ancestor models on the propagation
/// path.
#[derive(Clone, Debug, Default)]
pub struct HookEvent {
    name: String,
    model: EventModel,
    path: Vec<EventModel>,
}

impl HookEvent {
    /// A new event with an empty model and path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach the model (builder form).
    pub fn with_model(mut self, model: EventModel) -> Self {
        self.model = model;
        self
    }

    /// Push an ancestor model onto the propagation path (builder form).
    /// Entries are searched in push order during hook resolution.
    pub fn push_path(mut self, ancestor: EventModel) -> Self {
        self.path.push(ancestor);
        self
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model bound to the firing element.
    pub fn model(&self) -> &EventModel {
        &self.model
    }

    /// The ordered ancestor models on the propagation path.
    pub fn path(&self) -> &[EventModel] {
        &self.path
    }
}
