//! Hook dispatch.
//!
//! A hook lets a presentation component stay ignorant of the business logic
//! a bound action performs: the component only knows "this event relates to
//! entry X of the data I was given". Dispatch resolves the named target
//! from the event at fire time, validates it, gives the owning component's
//! prepare step a chance to sanitize or veto, then invokes the target's
//! action on the resolved clone.
//!
//! Configuration mistakes — a missing target, an actionless target — are
//! logged with full context and abort that single dispatch; nothing
//! propagates into the host framework's event machinery.

use hence_core::{ComponentInstance, HookError, HookEvent, HookHandler, resolve_hook};
use std::sync::Arc;
use tracing::{error, trace};

/// Build a dispatch closure bound to a data target name.
///
/// The closure is registered as an event handler and invoked once per
/// matching event; each invocation resolves the target freshly, so nothing
/// is shared between events beyond the captured name.
///
/// ```rust,ignore
/// let handler = make_hook("cta");
/// handler(Some(&instance), &event); // resolves `cta`, runs its action
/// ```
pub fn make_hook(target: impl Into<String>) -> HookHandler {
    let target = target.into();
    Arc::new(move |instance, event| dispatch(&target, None, instance, event))
}

/// Build a dispatch closure with a prepare step, named after a method the
/// owning component declares as a preparer. The prepare step runs before
/// the action with the component as calling context and may annotate the
/// resolved data or raise its veto flag to block the action.
pub fn make_hook_prepared(target: impl Into<String>, prepare: impl Into<String>) -> HookHandler {
    let target = target.into();
    let prepare = prepare.into();
    Arc::new(move |instance, event| dispatch(&target, Some(&prepare), instance, event))
}

fn dispatch(
    target: &str,
    prepare: Option<&str>,
    instance: Option<&ComponentInstance>,
    event: &HookEvent,
) {
    let resolved = match resolve_hook(event, instance, target) {
        Ok(resolved) => resolved,
        Err(err) => {
            log_configuration_error(&err, target, instance, event);
            return;
        }
    };
    let (mut data, model, component) = (resolved.data, resolved.model, resolved.component);

    data.set_error(false);

    if let Some(name) = prepare {
        if let Some(component) = component {
            if let Some(prepare_fn) = component.definition().preparers.get(name).cloned() {
                prepare_fn(component, &mut data, model, event);
            }
        }
    }

    if !data.error() {
        if let Some(action) = data.action_fn() {
            action(&mut data, model, event);
        }
    }

    trace!(hook = target, event = event.name(), "hook dispatched");
}

fn log_configuration_error(
    err: &HookError,
    target: &str,
    instance: Option<&ComponentInstance>,
    event: &HookEvent,
) {
    let model_keys: Vec<&str> = event.model().keys().collect();
    let component = instance.map(ComponentInstance::identifier);
    match err {
        HookError::TargetMissing { .. } => error!(
            hook = target,
            event = event.name(),
            ?model_keys,
            path_depth = event.path().len(),
            component,
            "hook target is not a valid entry of the event model or a repeated ancestor; \
             nothing will be dispatched"
        ),
        HookError::ActionMissing { .. } => error!(
            hook = target,
            event = event.name(),
            ?model_keys,
            component,
            "hook target carries no callable action; check the data object wired to this hook"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hence_core::{EventModel, HookData};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn action_runs_once_with_the_resolved_clone() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_action = seen.clone();
        let event = HookEvent::new("tap").with_model(EventModel::new().entry(
            "cta",
            HookData::new()
                .field("label", json!("Go"))
                .action(move |data, _, _| {
                    seen_in_action
                        .lock()
                        .unwrap()
                        .push(data.get("label").cloned());
                }),
        ));

        let handler = make_hook("cta");
        (*handler)(None, &event);

        assert_eq!(*seen.lock().unwrap(), [Some(json!("Go"))]);
    }

    #[test]
    fn missing_target_logs_and_does_not_panic() {
        let event = HookEvent::new("tap").with_model(EventModel::new());
        let handler = make_hook("cta");
        (*handler)(None, &event);
    }

    #[test]
    fn prepare_without_component_is_skipped_but_action_runs() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_in_action = count.clone();
        let event = HookEvent::new("tap").with_model(EventModel::new().entry(
            "cta",
            HookData::new().action(move |_, _, _| {
                count_in_action.fetch_add(1, Ordering::SeqCst);
            }),
        ));

        let handler = make_hook_prepared("cta", "_sanitize");
        (*handler)(None, &event);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
