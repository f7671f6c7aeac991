//! The composition engine.
//!
//! [`compose`] is the factory every component goes through: it clones the
//! caller's definition, normalizes declared properties, derives the
//! property registry from the behavior-merged property set, appends the two
//! reserved metadata properties, appends the initialization behaviour, and
//! audits the final merged shape against the host framework's reserved
//! names. The caller's definition object is never mutated, and name
//! conflicts never block composition — they are logged and development
//! proceeds with the warning visible.
//!
//! The returned [`Component`] is the constructor surface handed outward:
//! registration with the host framework, programmatic and declarative
//! instantiation, and container appends.

use crate::host::{Container, HostFramework, process_host};
use crate::initialization::initialization_behaviour;
use hence_core::{
    ComponentDefinition, ComponentInstance, HostError, PropertyKind, PropertyRegistry,
    PropertySpec, ResolvedDefinition, integrity,
};
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Reserved metadata property holding the property registry, for runtime
/// introspection.
pub const PROP_LIST: &str = "_propList";

/// Reserved metadata property holding the construction-time config
/// snapshot.
pub const PROP_CONFIG: &str = "_propConfig";

/// A composed component: the finished definition plus the constructor and
/// registration surface bound to a host framework.
pub struct Component {
    definition: ComponentDefinition,
    resolved: Arc<ResolvedDefinition>,
    registry: PropertyRegistry,
    host: Arc<dyn HostFramework>,
    registered: OnceLock<bool>,
}

/// Compose a definition against the process-wide host.
pub fn compose(original: &ComponentDefinition) -> Component {
    compose_with_host(original, process_host())
}

/// Compose a definition against a caller-supplied host. Tests use this to
/// stay isolated from the process-wide registration state.
pub fn compose_with_host(
    original: &ComponentDefinition,
    host: Arc<dyn HostFramework>,
) -> Component {
    // The caller keeps their object untouched; everything below works on
    // the clone.
    let mut definition = original.clone();

    for spec in definition.properties.values_mut() {
        spec.normalize();
    }

    // Derived before the metadata properties exist, so neither ever
    // appears in the registry.
    let registry = PropertyRegistry::derive(definition.merged_property_names());

    definition.properties.insert(
        PROP_LIST.to_owned(),
        PropertySpec::with_value(PropertyKind::Array, registry.as_value()).read_only(),
    );
    definition.properties.insert(
        PROP_CONFIG.to_owned(),
        PropertySpec::new(PropertyKind::Object).read_only(),
    );

    definition
        .behaviors
        .push(initialization_behaviour(registry.clone()));

    let resolved = Arc::new(definition.resolve(registry.clone()));

    let report = integrity::check_resolved(&resolved);
    if !report.conflicting_properties.is_empty() {
        warn!(
            component = %resolved.identifier,
            properties = ?report.conflicting_properties,
            "reserved property names in use; rename them to avoid clobbering host internals"
        );
    }
    if !report.conflicting_methods.is_empty() {
        warn!(
            component = %resolved.identifier,
            methods = ?report.conflicting_methods,
            "reserved method names in use; rename them to avoid clobbering host internals"
        );
    }

    Component {
        definition,
        resolved,
        registry,
        host,
        registered: OnceLock::new(),
    }
}

impl Component {
    /// The component's tag name.
    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    /// The composed definition, including the appended metadata properties
    /// and the initialization behaviour.
    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    /// The flattened definition instances are created from.
    pub fn resolved(&self) -> &Arc<ResolvedDefinition> {
        &self.resolved
    }

    /// The property registry derived at composition time.
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// The host framework this component is bound to.
    pub fn host(&self) -> &Arc<dyn HostFramework> {
        &self.host
    }

    /// Claim this component's tag name with the host framework. The claim
    /// is attempted once; the outcome is cached and re-served on every
    /// later call. Returns whether registration is active.
    pub fn register_element(&self) -> bool {
        *self.registered.get_or_init(|| {
            match self.host.register(&self.definition.identifier) {
                Ok(()) => {
                    debug!(component = %self.definition.identifier, "element registered");
                    true
                }
                Err(HostError::AlreadyRegistered(_)) => {
                    // Another definition owns the tag; this one can never
                    // instantiate.
                    warn!(
                        component = %self.definition.identifier,
                        "tag name already claimed by another definition"
                    );
                    false
                }
                Err(err) => {
                    warn!(component = %self.definition.identifier, %err, "registration failed");
                    false
                }
            }
        })
    }

    /// Create an instance through the programmatic construction path:
    /// `created`, then the factory callbacks with `opts`, then `ready`.
    /// Returns `None` when registration failed.
    pub fn create_element(&self, opts: Value) -> Option<Arc<ComponentInstance>> {
        if !self.register_element() {
            return None;
        }
        let instance = ComponentInstance::new(self.resolved.clone());
        instance.run_created();
        instance.run_factory(&opts);
        instance.run_ready();
        Some(instance)
    }

    /// Create an instance the way a declarative placement would: the
    /// factory callbacks are skipped, so no config snapshot or projection
    /// happens at construction. Returns `None` when registration failed.
    pub fn stamp_declared(&self) -> Option<Arc<ComponentInstance>> {
        if !self.register_element() {
            return None;
        }
        let instance = ComponentInstance::new(self.resolved.clone());
        instance.run_created();
        instance.run_ready();
        Some(instance)
    }

    /// Create an instance and append it to `target`, defaulting to the
    /// host's document body. Append failures are logged and swallowed; the
    /// created (but unattached) element is still returned, and its
    /// `attached` lifecycle only runs on a successful append.
    pub fn append_element_to(
        &self,
        opts: Value,
        target: Option<&Arc<Container>>,
    ) -> Option<Arc<ComponentInstance>> {
        let element = self.create_element(opts)?;
        let container = target.cloned().unwrap_or_else(|| self.host.body());
        match container.append(element.clone()) {
            Ok(()) => element.run_attached(),
            Err(err) => warn!(
                component = %self.definition.identifier,
                container = container.label(),
                %err,
                "failed to append element"
            ),
        }
        Some(element)
    }
}
