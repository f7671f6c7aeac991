//! The runtime component instance.
//!
//! An instance pairs a flattened [`ResolvedDefinition`] with a live field
//! store seeded from the declared property defaults. All work on an
//! instance is synchronous on the host framework's single callback queue;
//! the interior `Mutex` exists so instances stay `Send + Sync`, not because
//! writes ever race with reads.
//!
//! Two write paths exist: the generic [`set`](ComponentInstance::set),
//! which silently skips read-only properties, and the privileged
//! [`set_internal`](ComponentInstance::set_internal), the only way a
//! read-only property changes after construction. Both fire `{name}-changed`
//! through the listeners table for `notify` properties; listener faults are
//! fire-and-forget on the setter path, exactly like host-framework event
//! delivery.

use crate::definition::ResolvedDefinition;
use crate::error::{BoxError, HenceError, ProjectionError};
use crate::event::HookEvent;
use crate::registry::PropertyRegistry;
use crate::value::{is_truthy, type_name};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::{Arc, Mutex};

/// A dispatch closure registered for a hook event. Receives the invoking
/// instance, if any, and the event.
pub type HookHandler = Arc<dyn Fn(Option<&ComponentInstance>, &HookEvent) + Send + Sync>;

/// Normalize an event name into the `hook.`-prefixed key hook handlers are
/// registered under. Already-prefixed names pass through unchanged.
pub fn hook_key(event: &str) -> String {
    if event.starts_with("hook.") {
        event.to_owned()
    } else {
        format!("hook.{event}")
    }
}

/// A live component created from a resolved definition.
pub struct ComponentInstance {
    definition: Arc<ResolvedDefinition>,
    fields: Mutex<Map<String, Value>>,
    hook_handlers: Mutex<IndexMap<String, HookHandler>>,
}

impl ComponentInstance {
    /// Create an instance with fields seeded from the declared property
    /// defaults. Lifecycle callbacks are the caller's to run; creation
    /// itself performs no dispatch.
    pub fn new(definition: Arc<ResolvedDefinition>) -> Arc<Self> {
        let mut fields = Map::new();
        for (name, spec) in &definition.properties {
            fields.insert(name.clone(), spec.initial_value());
        }
        Arc::new(Self {
            definition,
            fields: Mutex::new(fields),
            hook_handlers: Mutex::new(IndexMap::new()),
        })
    }

    /// The flattened definition this instance was created from.
    pub fn definition(&self) -> &Arc<ResolvedDefinition> {
        &self.definition
    }

    /// The component's tag name.
    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    /// The property registry derived at composition time.
    pub fn prop_list(&self) -> &PropertyRegistry {
        &self.definition.registry
    }

    // ========================================================================
    // Field access
    // ========================================================================

    /// Read a field's current value.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.lock().unwrap().get(name).cloned()
    }

    /// Write a field through the generic path. Read-only properties are
    /// skipped silently and the write reports `false`; `notify` properties
    /// fire `{name}-changed` through the listeners table when the stored
    /// value changes.
    pub fn set(&self, name: &str, value: Value) -> bool {
        let Some(spec) = self.definition.properties.get(name) else {
            // Undeclared fields carry no flags; store as-is.
            self.fields.lock().unwrap().insert(name.to_owned(), value);
            return true;
        };
        if spec.is_read_only() {
            return false;
        }
        self.store(name, value, spec.is_notify());
        true
    }

    /// Write a field through the privileged path, bypassing the read-only
    /// guard. This is the only way a read-only property changes after
    /// construction.
    pub fn set_internal(&self, name: &str, value: Value) {
        let notify = self
            .definition
            .properties
            .get(name)
            .is_some_and(|spec| spec.is_notify());
        self.store(name, value, notify);
    }

    fn store(&self, name: &str, value: Value, notify: bool) {
        let changed = {
            let mut fields = self.fields.lock().unwrap();
            let changed = fields.get(name) != Some(&value);
            fields.insert(name.to_owned(), value.clone());
            changed
        };
        if notify && changed {
            // Fire-and-forget: a listener fault never affects the setter.
            let _ = self.fire(&format!("{name}-changed"), &json!({ "value": value }));
        }
    }

    // ========================================================================
    // Methods and listeners
    // ========================================================================

    /// Whether a named method is declared.
    pub fn has_method(&self, name: &str) -> bool {
        self.definition.methods.contains_key(name)
    }

    /// Invoke a named method with a loose argument slice. Faults raised by
    /// the method body are the caller's own logic and propagate normally.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, BoxError> {
        let method = self
            .definition
            .methods
            .get(name)
            .cloned()
            .ok_or_else(|| Box::new(HenceError::NoSuchMethod(name.to_owned())) as BoxError)?;
        method(self, args)
    }

    /// Route an event through the listeners table to its named method.
    /// Reports whether a route existed; method faults propagate.
    pub fn fire(&self, event: &str, detail: &Value) -> Result<bool, BoxError> {
        let Some(method) = self.definition.listeners.get(event).cloned() else {
            return Ok(false);
        };
        self.invoke(&method, std::slice::from_ref(detail))?;
        Ok(true)
    }

    // ========================================================================
    // Hook handlers
    // ========================================================================

    /// Register a hook dispatch closure under the normalized key for
    /// `event`. Later registrations for the same event replace earlier ones.
    pub fn register_hook_handler(&self, event: &str, handler: HookHandler) {
        self.hook_handlers
            .lock()
            .unwrap()
            .insert(hook_key(event), handler);
    }

    /// Deliver a hook event to its registered handler, if any. Reports
    /// whether a handler was found.
    pub fn deliver_hook(&self, event: &HookEvent) -> bool {
        let handler = self
            .hook_handlers
            .lock()
            .unwrap()
            .get(&hook_key(event.name()))
            .cloned();
        match handler {
            Some(handler) => {
                (*handler)(Some(self), event);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Construction-time projection. Stores the raw config snapshot into
    /// the reserved `_propConfig` property, then for every registry name
    /// with a truthy value in `config`, writes the field through the
    /// generic path. Falsy values are skipped, so falsy-but-intentional
    /// overrides cannot flow through this path.
    pub fn apply_config(&self, registry: &PropertyRegistry, config: &Value) {
        self.set_internal("_propConfig", config.clone());
        if let Value::Object(source) = config {
            self.project(registry, source);
        }
    }

    /// Attach-time projection. Reads the instance's `props` field and
    /// re-applies it per-name with the same truthy rule as construction.
    /// A falsy `props` is a no-op; a truthy non-object is an error for the
    /// caller to contain.
    pub fn project_props(&self) -> Result<usize, ProjectionError> {
        let Some(props) = self.get("props") else {
            return Ok(0);
        };
        if !is_truthy(&props) {
            return Ok(0);
        }
        let Value::Object(source) = &props else {
            return Err(ProjectionError::PropsNotAnObject {
                found: type_name(&props),
            });
        };
        Ok(self.project(self.prop_list(), source))
    }

    fn project(&self, registry: &PropertyRegistry, source: &Map<String, Value>) -> usize {
        let mut applied = 0;
        for name in registry.iter() {
            if let Some(value) = source.get(name) {
                if is_truthy(value) && self.set(name, value.clone()) {
                    applied += 1;
                }
            }
        }
        applied
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Run every `created` callback, in merge order.
    pub fn run_created(&self) {
        for f in &self.definition.created {
            f(self);
        }
    }

    /// Run every `ready` callback, in merge order.
    pub fn run_ready(&self) {
        for f in &self.definition.ready {
            f(self);
        }
    }

    /// Run every `attached` callback, in merge order.
    pub fn run_attached(&self) {
        for f in &self.definition.attached {
            f(self);
        }
    }

    /// Run every `detached` callback, in merge order.
    pub fn run_detached(&self) {
        for f in &self.definition.detached {
            f(self);
        }
    }

    /// Run every programmatic-construction callback with the caller's
    /// config. Never runs for declaratively placed instances.
    pub fn run_factory(&self, config: &Value) {
        for f in &self.definition.factories {
            f(self, config);
        }
    }

    // ========================================================================
    // Debugging
    // ========================================================================

    /// Snapshot every registered property's current value, in registry
    /// order.
    pub fn debug_this(&self) -> Map<String, Value> {
        let fields = self.fields.lock().unwrap();
        let mut snapshot = Map::new();
        for name in self.prop_list().iter() {
            snapshot.insert(
                name.to_owned(),
                fields.get(name).cloned().unwrap_or(Value::Null),
            );
        }
        snapshot
    }

    /// The [`debug_this`](Self::debug_this) snapshot, serialized.
    pub fn debug_this_json(&self) -> String {
        Value::Object(self.debug_this()).to_string()
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("identifier", &self.identifier())
            .field("fields", &self.fields.lock().unwrap())
            .finish()
    }
}
