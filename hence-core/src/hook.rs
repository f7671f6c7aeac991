//! Hook-target resolution.
//!
//! Resolution is a pure function of an event, an optional invoking
//! instance, and a target name. It implements the two-phase lookup the
//! dispatch layer builds on: direct lookup in the event's model first, then
//! a walk of the propagation path for the first ancestor model carrying the
//! target, re-binding the bound model and owning component to that entry.
//! The resolved data is always a clone; actions never see the live model
//! entry.
//!
//! The path-walk fallback exists because repeated and templated structures
//! often place the relevant data on an ancestor context rather than on the
//! firing element's own model.

use crate::error::HookError;
use crate::event::{EventModel, HookData, HookEvent, ModelEntry};
use crate::instance::ComponentInstance;
use serde_json::Value;
use std::sync::Arc;

/// The outcome of a successful resolution: the cloned data object, the
/// model it was found in, and the component owning that model (the invoking
/// instance, or the bound model's root data host).
#[derive(Debug)]
pub struct Resolved<'e> {
    /// Clone of the matched model entry.
    pub data: HookData,
    /// The model the entry was found in: the event's own, or the matched
    /// ancestor from the path walk.
    pub model: &'e EventModel,
    /// The component owning the bound model, if one can be located.
    pub component: Option<&'e ComponentInstance>,
}

/// Resolve `target` against an event, walking the propagation path when the
/// event's own model has no such entry.
///
/// Errors are configuration mistakes in the calling component, scoped to
/// this one event: [`HookError::TargetMissing`] when no object entry can be
/// located at all, [`HookError::ActionMissing`] when the entry exists but
/// carries no callable action.
pub fn resolve_hook<'e>(
    event: &'e HookEvent,
    instance: Option<&'e ComponentInstance>,
    target: &str,
) -> Result<Resolved<'e>, HookError> {
    let mut model = event.model();
    let mut component = instance.or_else(|| model.root_host().map(Arc::as_ref));
    let mut entry = model.get(target);

    if entry.is_none() {
        for ancestor in event.path() {
            if ancestor.contains(target) {
                model = ancestor;
                component = ancestor.root_host().map(Arc::as_ref).or(instance);
                entry = model.get(target);
                break;
            }
        }
    }

    let data = match entry {
        Some(ModelEntry::Data(data)) => data.clone(),
        Some(ModelEntry::Value(Value::Object(fields))) => HookData::from_fields(fields.clone()),
        _ => {
            return Err(HookError::TargetMissing {
                target: target.to_owned(),
            });
        }
    };

    if !data.has_action() {
        return Err(HookError::ActionMissing {
            target: target.to_owned(),
        });
    }

    Ok(Resolved {
        data,
        model,
        component,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actionable() -> HookData {
        HookData::new()
            .field("label", json!("Go"))
            .action(|_, _, _| {})
    }

    #[test]
    fn resolves_directly_from_the_model() {
        let event =
            HookEvent::new("tap").with_model(EventModel::new().entry("cta", actionable()));
        let resolved = resolve_hook(&event, None, "cta").unwrap();
        assert_eq!(resolved.data.get("label"), Some(&json!("Go")));
        assert!(resolved.model.contains("cta"));
    }

    #[test]
    fn falls_back_to_the_propagation_path() {
        let event = HookEvent::new("tap")
            .with_model(EventModel::new())
            .push_path(EventModel::new().entry("other", json!({})))
            .push_path(EventModel::new().entry("cta", actionable()));
        let resolved = resolve_hook(&event, None, "cta").unwrap();
        assert!(resolved.model.contains("cta"));
        assert!(!resolved.model.contains("other"));
    }

    #[test]
    fn missing_target_is_a_configuration_error() {
        let event = HookEvent::new("tap").with_model(EventModel::new());
        let err = resolve_hook(&event, None, "cta").unwrap_err();
        assert_eq!(
            err,
            HookError::TargetMissing {
                target: "cta".into()
            }
        );
    }

    #[test]
    fn scalar_entries_are_not_objects() {
        let event = HookEvent::new("tap")
            .with_model(EventModel::new().entry("cta", json!("not an object")));
        let err = resolve_hook(&event, None, "cta").unwrap_err();
        assert!(matches!(err, HookError::TargetMissing { .. }));
    }

    #[test]
    fn actionless_objects_are_a_distinct_error() {
        let event = HookEvent::new("tap")
            .with_model(EventModel::new().entry("cta", json!({ "label": "Go" })));
        let err = resolve_hook(&event, None, "cta").unwrap_err();
        assert!(matches!(err, HookError::ActionMissing { .. }));
    }

    #[test]
    fn resolution_clones_the_entry() {
        let event =
            HookEvent::new("tap").with_model(EventModel::new().entry("cta", actionable()));
        let mut resolved = resolve_hook(&event, None, "cta").unwrap();
        resolved.data.set("label", json!("changed"));
        // The live entry is untouched.
        match event.model().get("cta") {
            Some(ModelEntry::Data(data)) => assert_eq!(data.get("label"), Some(&json!("Go"))),
            _ => unreachable!(),
        }
    }
}
