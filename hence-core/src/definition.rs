//! Component definitions, behaviors, and the ordered merge pass.
//!
//! A [`ComponentDefinition`] is the configuration record describing a
//! component before it is handed to the host framework: declared properties,
//! event listeners, hook declarations, named methods, lifecycle callbacks,
//! and an ordered list of [`Behavior`] mixins. Definitions are assembled
//! with chainable builder methods and stay inert until composed.
//!
//! Behavior merging is an explicit ordered pass with documented precedence,
//! not an implicit prototype-chain lookup: behaviors fold left-to-right with
//! later entries overriding earlier ones per key, the definition's own
//! entries override all behaviors, and lifecycle callbacks accumulate
//! instead of replacing one another, so a behavior's participation in a
//! lifecycle stage is never silently removed by a later mixin.

use crate::error::BoxError;
use crate::event::{EventModel, HookData, HookEvent};
use crate::instance::ComponentInstance;
use crate::property::{PropertyKind, PropertySpec};
use crate::registry::PropertyRegistry;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A lifecycle callback: `created`, `ready`, `attached`, or `detached`.
pub type LifecycleFn = Arc<dyn Fn(&ComponentInstance) + Send + Sync>;

/// The programmatic-construction callback. Receives the caller's config
/// object; never runs for declaratively placed instances.
pub type FactoryFn = Arc<dyn Fn(&ComponentInstance, &Value) + Send + Sync>;

/// A named method: invoked with the instance and a loose argument slice.
/// Faults raised here are the caller's own logic and propagate normally.
pub type Method = Arc<dyn Fn(&ComponentInstance, &[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// A hook prepare step: invoked with the owning component as calling
/// context so it can read sibling state, the resolved data clone, the bound
/// model, and the event. May raise the data's veto flag to block dispatch.
pub type PrepareFn =
    Arc<dyn Fn(&ComponentInstance, &mut HookData, &EventModel, &HookEvent) + Send + Sync>;

/// A hook declaration: the named data target to resolve at dispatch time,
/// plus an optional prepare-method name. Resolution happens per event,
/// never at declaration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookSpec {
    /// Name of the model entry the hook mutates.
    pub target: String,
    /// Name of a prepare method on the owning component, if any.
    pub prepare: Option<String>,
}

impl HookSpec {
    /// A hook with no prepare step.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            prepare: None,
        }
    }

    /// A hook with a prepare step.
    pub fn prepared(target: impl Into<String>, prepare: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            prepare: Some(prepare.into()),
        }
    }
}

/// Per-stage lifecycle callbacks of a definition or behavior.
#[derive(Clone, Default)]
pub struct Lifecycle {
    /// Runs once when an instance is created.
    pub created: Option<LifecycleFn>,
    /// Runs once after the instance is configured.
    pub ready: Option<LifecycleFn>,
    /// Runs every time the instance is attached to a container.
    pub attached: Option<LifecycleFn>,
    /// Runs every time the instance is detached from a container.
    pub detached: Option<LifecycleFn>,
    /// Runs on programmatic construction only.
    pub factory_impl: Option<FactoryFn>,
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("created", &self.created.is_some())
            .field("ready", &self.ready.is_some())
            .field("attached", &self.attached.is_some())
            .field("detached", &self.detached.is_some())
            .field("factory_impl", &self.factory_impl.is_some())
            .finish()
    }
}

/// A reusable partial definition, merged into full definitions by the
/// ordered pass in [`ComponentDefinition::resolve`].
#[derive(Clone, Default)]
pub struct Behavior {
    /// Optional label, used only for diagnostics.
    pub name: Option<String>,
    /// Properties contributed by this behavior.
    pub properties: IndexMap<String, PropertySpec>,
    /// Event-selector → method-name routes contributed by this behavior.
    pub listeners: IndexMap<String, String>,
    /// Hook declarations contributed by this behavior.
    pub hooks: IndexMap<String, HookSpec>,
    /// Named methods contributed by this behavior.
    pub methods: IndexMap<String, Method>,
    /// Hook prepare steps contributed by this behavior.
    pub preparers: IndexMap<String, PrepareFn>,
    /// Lifecycle callbacks contributed by this behavior.
    pub lifecycle: Lifecycle,
}

impl Behavior {
    /// An empty behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty behavior with a diagnostic label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, spec: impl Into<PropertySpec>) -> Self {
        self.properties.insert(name.into(), spec.into());
        self
    }

    /// Route an event selector to a named method.
    pub fn listener(mut self, event: impl Into<String>, method: impl Into<String>) -> Self {
        self.listeners.insert(event.into(), method.into());
        self
    }

    /// Declare a hook from an event name to a data target.
    pub fn hook(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.hooks.insert(event.into(), HookSpec::new(target));
        self
    }

    /// Declare a hook with a prepare step.
    pub fn hook_prepared(
        mut self,
        event: impl Into<String>,
        target: impl Into<String>,
        prepare: impl Into<String>,
    ) -> Self {
        self.hooks
            .insert(event.into(), HookSpec::prepared(target, prepare));
        self
    }

    /// Declare a named method.
    pub fn method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&ComponentInstance, &[Value]) -> Result<Value, BoxError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Declare a hook prepare step.
    pub fn preparer(
        mut self,
        name: impl Into<String>,
        prepare: impl Fn(&ComponentInstance, &mut HookData, &EventModel, &HookEvent)
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.preparers.insert(name.into(), Arc::new(prepare));
        self
    }

    /// Set the `created` callback.
    pub fn created(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.created = Some(Arc::new(f));
        self
    }

    /// Set the `ready` callback.
    pub fn ready(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.ready = Some(Arc::new(f));
        self
    }

    /// Set the `attached` callback.
    pub fn attached(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.attached = Some(Arc::new(f));
        self
    }

    /// Set the `detached` callback.
    pub fn detached(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.detached = Some(Arc::new(f));
        self
    }

    /// Set the programmatic-construction callback.
    pub fn factory_impl(
        mut self,
        f: impl Fn(&ComponentInstance, &Value) + Send + Sync + 'static,
    ) -> Self {
        self.lifecycle.factory_impl = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("name", &self.name)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners)
            .field("hooks", &self.hooks)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("preparers", &self.preparers.keys().collect::<Vec<_>>())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

/// The full configuration record of a component, prior to composition.
#[derive(Clone, Default)]
pub struct ComponentDefinition {
    /// Unique tag-like name. Must contain an ASCII dash to be registrable.
    pub identifier: String,
    /// Declared properties, in declaration order.
    pub properties: IndexMap<String, PropertySpec>,
    /// Event-selector → method-name routes.
    pub listeners: IndexMap<String, String>,
    /// Hook declarations, event name → spec.
    pub hooks: IndexMap<String, HookSpec>,
    /// Named methods.
    pub methods: IndexMap<String, Method>,
    /// Hook prepare steps.
    pub preparers: IndexMap<String, PrepareFn>,
    /// The definition's own lifecycle callbacks. Run after all behaviors'.
    pub lifecycle: Lifecycle,
    /// Ordered behavior mixins. Later entries merge over earlier ones.
    pub behaviors: Vec<Behavior>,
}

impl ComponentDefinition {
    /// A new, empty definition for the given tag name.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, spec: impl Into<PropertySpec>) -> Self {
        self.properties.insert(name.into(), spec.into());
        self
    }

    /// Declare a bare-kind property, normalized at composition.
    pub fn bare_property(self, name: impl Into<String>, kind: PropertyKind) -> Self {
        self.property(name, PropertySpec::new(kind))
    }

    /// Route an event selector to a named method.
    pub fn listener(mut self, event: impl Into<String>, method: impl Into<String>) -> Self {
        self.listeners.insert(event.into(), method.into());
        self
    }

    /// Declare a hook from an event name to a data target.
    pub fn hook(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.hooks.insert(event.into(), HookSpec::new(target));
        self
    }

    /// Declare a hook with a prepare step.
    pub fn hook_prepared(
        mut self,
        event: impl Into<String>,
        target: impl Into<String>,
        prepare: impl Into<String>,
    ) -> Self {
        self.hooks
            .insert(event.into(), HookSpec::prepared(target, prepare));
        self
    }

    /// Declare a named method.
    pub fn method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&ComponentInstance, &[Value]) -> Result<Value, BoxError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Declare a hook prepare step.
    pub fn preparer(
        mut self,
        name: impl Into<String>,
        prepare: impl Fn(&ComponentInstance, &mut HookData, &EventModel, &HookEvent)
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.preparers.insert(name.into(), Arc::new(prepare));
        self
    }

    /// Append a behavior mixin. Appending never replaces earlier entries.
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Set the `created` callback.
    pub fn created(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.created = Some(Arc::new(f));
        self
    }

    /// Set the `ready` callback.
    pub fn ready(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.ready = Some(Arc::new(f));
        self
    }

    /// Set the `attached` callback.
    pub fn attached(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.attached = Some(Arc::new(f));
        self
    }

    /// Set the `detached` callback.
    pub fn detached(mut self, f: impl Fn(&ComponentInstance) + Send + Sync + 'static) -> Self {
        self.lifecycle.detached = Some(Arc::new(f));
        self
    }

    /// Set the programmatic-construction callback.
    pub fn factory_impl(
        mut self,
        f: impl Fn(&ComponentInstance, &Value) + Send + Sync + 'static,
    ) -> Self {
        self.lifecycle.factory_impl = Some(Arc::new(f));
        self
    }

    /// The property names the merged definition would expose, behaviors
    /// first (left-to-right), then the definition's own, duplicates at their
    /// first occurrence. This is the sequence the property registry is
    /// derived from at composition time.
    pub fn merged_property_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_owned());
            }
        };
        for behavior in &self.behaviors {
            for name in behavior.properties.keys() {
                push(name);
            }
        }
        for name in self.properties.keys() {
            push(name);
        }
        names
    }

    /// Flatten the definition into the shape the host framework consumes,
    /// applying the documented merge precedence.
    pub fn resolve(&self, registry: PropertyRegistry) -> ResolvedDefinition {
        let mut resolved = ResolvedDefinition {
            identifier: self.identifier.clone(),
            registry,
            ..ResolvedDefinition::default()
        };

        for behavior in &self.behaviors {
            resolved.absorb(
                &behavior.properties,
                &behavior.listeners,
                &behavior.hooks,
                &behavior.methods,
                &behavior.preparers,
                &behavior.lifecycle,
            );
        }
        resolved.absorb(
            &self.properties,
            &self.listeners,
            &self.hooks,
            &self.methods,
            &self.preparers,
            &self.lifecycle,
        );

        resolved
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("identifier", &self.identifier)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners)
            .field("hooks", &self.hooks)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("preparers", &self.preparers.keys().collect::<Vec<_>>())
            .field("lifecycle", &self.lifecycle)
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

/// The flattened form of a definition after the ordered behavior merge:
/// what the host framework instantiates. Keyed entries hold the merge
/// winners; lifecycle stages hold every contributed callback in run order
/// (behaviors left-to-right, then the definition's own).
#[derive(Clone, Default)]
pub struct ResolvedDefinition {
    /// The component's tag name.
    pub identifier: String,
    /// Merged properties.
    pub properties: IndexMap<String, PropertySpec>,
    /// Merged listener routes.
    pub listeners: IndexMap<String, String>,
    /// Merged hook declarations.
    pub hooks: IndexMap<String, HookSpec>,
    /// Merged named methods.
    pub methods: IndexMap<String, Method>,
    /// Merged prepare steps.
    pub preparers: IndexMap<String, PrepareFn>,
    /// `created` callbacks, in run order.
    pub created: Vec<LifecycleFn>,
    /// `ready` callbacks, in run order.
    pub ready: Vec<LifecycleFn>,
    /// `attached` callbacks, in run order.
    pub attached: Vec<LifecycleFn>,
    /// `detached` callbacks, in run order.
    pub detached: Vec<LifecycleFn>,
    /// Programmatic-construction callbacks, in run order.
    pub factories: Vec<FactoryFn>,
    /// The property registry derived at composition time.
    pub registry: PropertyRegistry,
}

impl ResolvedDefinition {
    fn absorb(
        &mut self,
        properties: &IndexMap<String, PropertySpec>,
        listeners: &IndexMap<String, String>,
        hooks: &IndexMap<String, HookSpec>,
        methods: &IndexMap<String, Method>,
        preparers: &IndexMap<String, PrepareFn>,
        lifecycle: &Lifecycle,
    ) {
        for (name, spec) in properties {
            self.properties.insert(name.clone(), spec.clone());
        }
        for (event, method) in listeners {
            self.listeners.insert(event.clone(), method.clone());
        }
        for (event, spec) in hooks {
            self.hooks.insert(event.clone(), spec.clone());
        }
        for (name, method) in methods {
            self.methods.insert(name.clone(), method.clone());
        }
        for (name, prepare) in preparers {
            self.preparers.insert(name.clone(), prepare.clone());
        }
        if let Some(f) = &lifecycle.created {
            self.created.push(f.clone());
        }
        if let Some(f) = &lifecycle.ready {
            self.ready.push(f.clone());
        }
        if let Some(f) = &lifecycle.attached {
            self.attached.push(f.clone());
        }
        if let Some(f) = &lifecycle.detached {
            self.detached.push(f.clone());
        }
        if let Some(f) = &lifecycle.factory_impl {
            self.factories.push(f.clone());
        }
    }
}

impl fmt::Debug for ResolvedDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedDefinition")
            .field("identifier", &self.identifier)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners)
            .field("hooks", &self.hooks)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("preparers", &self.preparers.keys().collect::<Vec<_>>())
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merged_property_names_order_behaviors_first() {
        let def = ComponentDefinition::new("x-card")
            .behavior(Behavior::new().property("shared", PropertyKind::String))
            .property("title", PropertyKind::String)
            .property("shared", PropertyKind::Object);
        assert_eq!(def.merged_property_names(), ["shared", "title"]);
    }

    #[test]
    fn later_behaviors_override_earlier_without_removing() {
        let def = ComponentDefinition::new("x-card")
            .behavior(
                Behavior::new()
                    .listener("tap", "first")
                    .method("helper", |_, _| Ok(json!(1))),
            )
            .behavior(Behavior::new().listener("tap", "second"));
        let resolved = def.resolve(PropertyRegistry::empty());
        assert_eq!(resolved.listeners["tap"], "second");
        // The earlier behavior's method survives the later merge.
        assert!(resolved.methods.contains_key("helper"));
    }

    #[test]
    fn own_entries_win_over_behaviors() {
        let def = ComponentDefinition::new("x-card")
            .behavior(Behavior::new().property("title", PropertySpec::with_value(
                PropertyKind::String,
                json!("from behavior"),
            )))
            .property(
                "title",
                PropertySpec::with_value(PropertyKind::String, json!("own")),
            );
        let resolved = def.resolve(PropertyRegistry::empty());
        assert_eq!(resolved.properties["title"].value, Some(json!("own")));
        // Overriding keeps the first-declared position.
        assert_eq!(resolved.properties.get_index_of("title"), Some(0));
    }

    #[test]
    fn lifecycle_accumulates_in_merge_order() {
        use std::sync::{Arc as StdArc, Mutex};
        let order = StdArc::new(Mutex::new(Vec::new()));
        let (a, b) = (order.clone(), order.clone());
        let def = ComponentDefinition::new("x-card")
            .behavior(Behavior::new().attached(move |_| a.lock().unwrap().push("behavior")))
            .attached(move |_| b.lock().unwrap().push("own"));
        let resolved = def.resolve(PropertyRegistry::empty());
        assert_eq!(resolved.attached.len(), 2);
    }

    #[test]
    fn hook_specs_carry_prepare_names() {
        let def = ComponentDefinition::new("x-card")
            .hook("tap", "cta")
            .hook_prepared("hover", "cta", "_sanitize");
        assert_eq!(def.hooks["tap"], HookSpec::new("cta"));
        assert_eq!(def.hooks["hover"], HookSpec::prepared("cta", "_sanitize"));
    }
}
