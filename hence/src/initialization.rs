//! The initialization behaviour.
//!
//! A core behaviour every composed component receives, covering the two
//! property-projection entry points and the wiring of declared hooks:
//!
//! - construction: the factory callback snapshots the caller's config into
//!   the reserved `_propConfig` property and projects truthy values onto
//!   registered fields. Only the programmatic construction path runs this;
//!   instances placed declaratively never do.
//! - attachment: the `props` bag, if present, is projected the same way on
//!   every attach. This lets one object-valued binding bulk-configure a
//!   component:
//!
//!   ```html
//!   <api-comp url="...endpoint.json" results="{{customProps}}"></api-comp>
//!   <my-ui props={{customProps}}></my-ui>
//!   ```
//!
//! - creation: every entry of the definition's `hooks` map is bound to a
//!   dispatch closure under its `hook.{event}` key.
//!
//! The behaviour captures the property registry as an explicit immutable
//! value at composition time; the instance's own registry is not consulted
//! until attach, where it is guaranteed to be available.

use crate::hook::{make_hook, make_hook_prepared};
use hence_core::{Behavior, PropertyKind, PropertyRegistry, PropertySpec};
use tracing::error;

/// Diagnostic label of the behaviour, visible in a composed definition's
/// behavior list.
pub const INITIALIZATION_BEHAVIOUR: &str = "initialization";

/// Build the initialization behaviour over a derived property registry.
pub fn initialization_behaviour(registry: PropertyRegistry) -> Behavior {
    Behavior::named(INITIALIZATION_BEHAVIOUR)
        .property("props", PropertySpec::new(PropertyKind::Object))
        .created(|instance| {
            for (event, spec) in &instance.definition().hooks {
                let handler = match &spec.prepare {
                    Some(prepare) => make_hook_prepared(&spec.target, prepare),
                    None => make_hook(&spec.target),
                };
                instance.register_hook_handler(event, handler);
            }
        })
        .factory_impl(move |instance, config| {
            instance.apply_config(&registry, config);
        })
        .attached(|instance| {
            // Attachment must never fail over a malformed props bag.
            if let Err(err) = instance.project_props() {
                error!(
                    component = instance.identifier(),
                    %err,
                    "failed to project `props` onto instance fields"
                );
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hence_core::integrity;

    #[test]
    fn behaviour_has_integrity() {
        let report = integrity::check_behavior(&initialization_behaviour(
            PropertyRegistry::derive(["title"]),
        ));
        assert!(report.ok());
    }
}
