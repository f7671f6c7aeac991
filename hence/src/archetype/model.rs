//! The model archetype.
//!
//! Model components couple raw state pulled from a schema component to the
//! friendly option set a UI component renders. The coupling itself lives in
//! `_transformState`, which implementers override per component; the
//! archetype supplies the surrounding render pass and result collapsing.

use crate::compose::{Component, compose_with_host};
use crate::host::{HostFramework, process_host};
use hence_core::{ComponentDefinition, PropertyKind, PropertySpec, is_truthy};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Compose a definition as a model component against the process host.
pub fn model(original: &ComponentDefinition) -> Component {
    model_with_host(original, process_host())
}

/// Compose a definition as a model component against a caller-supplied
/// host.
pub fn model_with_host(original: &ComponentDefinition, host: Arc<dyn HostFramework>) -> Component {
    let mut comp = original
        .clone()
        .property("query", PropertySpec::with_value(PropertyKind::Object, Value::Null))
        .property(
            "processedState",
            PropertySpec::with_value(PropertyKind::Object, Value::Null).read_only(),
        )
        .property("state", PropertySpec::with_value(PropertyKind::Array, Value::Null))
        .method("renderState", |instance, _| instance.invoke("_processState", &[]))
        .method("_processState", |instance, _| {
            let state = instance.get("state").unwrap_or(Value::Null);
            let mut results = Vec::new();
            if let Value::Array(entries) = state {
                for entry in entries {
                    let transform = instance.invoke("_transformState", std::slice::from_ref(&entry))?;
                    if is_truthy(&transform) {
                        results.push(transform);
                    }
                }
            }
            // One or none collapses to a scalar/null instead of an array.
            let processed = if results.len() <= 1 {
                results.into_iter().next().unwrap_or(Value::Null)
            } else {
                Value::Array(results)
            };
            instance.set_internal("processedState", processed.clone());
            Ok(processed)
        });

    if !comp.methods.contains_key("_transformState") {
        comp = comp.method("_transformState", |instance, args| {
            warn!(
                component = instance.identifier(),
                "default state transform running! it's unlikely your data is rendering \
                 correctly; please override `_transformState`"
            );
            Ok(args.first().cloned().unwrap_or(Value::Null))
        });
    }

    compose_with_host(&comp, host)
}
