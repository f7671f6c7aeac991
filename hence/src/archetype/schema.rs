//! The schema archetype.
//!
//! Schema components define and help data adhere to a strict format for
//! transport and validation. All API interaction occurs through them; they
//! have no UI consideration at all and exist to feed model components.

use crate::compose::{Component, compose_with_host};
use crate::host::{HostFramework, process_host};
use hence_core::{ComponentDefinition, PropertyKind, PropertySpec, is_truthy};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::error;

/// Compose a definition as a schema component against the process host.
pub fn schema(original: &ComponentDefinition) -> Component {
    schema_with_host(original, process_host())
}

/// Compose a definition as a schema component against a caller-supplied
/// host.
pub fn schema_with_host(
    original: &ComponentDefinition,
    host: Arc<dyn HostFramework>,
) -> Component {
    let mut comp = original
        .clone()
        .property(
            "executeOnLoad",
            PropertySpec::with_value(PropertyKind::Boolean, json!(true)),
        )
        .property("action", PropertyKind::String)
        .property(
            "query",
            PropertySpec::with_factory(PropertyKind::Object, || json!({})),
        )
        .property(
            "results",
            PropertySpec::new(PropertyKind::Array).read_only().notify(),
        )
        .ready(|instance| {
            let auto = instance
                .get("executeOnLoad")
                .is_some_and(|v| is_truthy(&v));
            if auto {
                // executeQuery contains its own failures.
                let _ = instance.invoke("executeQuery", &[]);
            }
        })
        .method("executeQuery", |instance, _args| {
            match instance.invoke("_executeQuery", &[]) {
                Ok(results) => {
                    let results = if results.is_array() {
                        results
                    } else {
                        json!([results])
                    };
                    instance.set_internal("results", results);
                }
                Err(err) => {
                    error!(component = instance.identifier(), %err, "query execution failed");
                }
            }
            Ok(Value::Null)
        });

    if !comp.methods.contains_key("_executeQuery") {
        comp = comp.method("_executeQuery", |_, _| {
            Err("default query handler running! please override `_executeQuery`".into())
        });
    }

    compose_with_host(&comp, host)
}
