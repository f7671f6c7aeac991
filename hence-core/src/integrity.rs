//! Name-collision checks against the host framework.
//!
//! The host framework's base element object carries a large surface of
//! methods and bookkeeping properties. A component that declares a property
//! or method with one of those names silently clobbers host internals, and
//! the host performs no checking of its own. The checker here computes the
//! intersections and reports them; it never blocks composition, so
//! development proceeds with the warning visible.
//!
//! Lifecycle and structural names that components legitimately provide
//! (`created`, `ready`, `attached`, `detached`, `is`, `properties`, ...) are
//! excluded from the reserved-method set via [`ALLOWED_OVERRIDES`].

use crate::definition::{Behavior, ResolvedDefinition};
use phf::phf_set;

/// Host base-object property and bookkeeping field names a component must
/// not re-declare as properties.
pub static RESERVED_PROPERTIES: phf::Set<&'static str> = phf_set! {
    "root", "isAttached", "_aboveConfig", "_config", "id", "_nativePrototypes",
    "_factoryArgs", "_aggregatedAttributes", "_serializing", "_debouncers",
    "_template", "dataHost", "_clients", "_clientsReadied", "_readied",
    "_attachedPending", "event", "node", "_classList", "domApi", "_userContent",
    "shadyRoot", "textContent", "_composedChildren", "_notes", "$", "$$",
    "gestures", "info", "_twiddle", "_callbacks", "context", "boundComplete",
    "finish", "callback", "__data__", "_handlers", "_boundPaths", "ruleTypes",
    "_encapsulateStyle", "_styles", "_scopeStyle", "cache", "_properties",
    "_ownStylePropertyNames", "customStyle", "_styleProperties",
    "_ownStyleProperties", "_scopeSelector", "_appliesToDocument",
    "_templatizerId", "ctor", "_templatizerStatic", "_parentProps",
    "_rootDataHost", "_children", "userArray", "store", "omap", "pmap",
    "_instances", "_instanceProps", "_sortFn", "_needFullRefresh",
    "_observePaths", "collection", "_splices", "_keyToInstIdx", "selected",
    "toggle", "_lastIf", "_instance", "_ready", "_setupConfigure",
};

/// Host base-object method names a component must not re-declare, with the
/// allow-listed lifecycle/structural names already removed.
pub static RESERVED_METHODS: phf::Set<&'static str> = phf_set! {
    "registered", "beforeRegister", "fire", "async", "cancelAsync", "debounce",
    "cancelDebounce", "flushDebouncer", "isDebouncerActive", "get", "set",
    "getPropertyInfo", "notifyPath", "linkPaths", "unlinkPaths", "push", "pop",
    "splice", "shift", "unshift", "serialize", "deserialize", "reflectPropertyToAttribute",
    "serializeValueToAttribute", "listen", "unlisten", "setScrollDirection",
    "toggleClass", "toggleAttribute", "classFollows", "attributeFollows",
    "getContentChildNodes", "getContentChildren", "getEffectiveChildNodes",
    "getEffectiveChildren", "getEffectiveText", "getEffectiveTextContent",
    "queryEffectiveChildren", "queryAllEffectiveChildren", "domHost",
    "importHref", "resolveUrl", "scopeSubtree", "elementMatches",
    "distributeContent", "instanceTemplate", "stamp", "templatize",
    "modelForElement", "translate3d", "transform", "extend", "mixin",
    "copyOwnProperty",
};

/// Lifecycle and structural names components may legitimately provide.
/// These are carved out of [`RESERVED_METHODS`] and documented here so the
/// carve-out itself is auditable.
pub static ALLOWED_OVERRIDES: phf::Set<&'static str> = phf_set! {
    "created", "ready", "attached", "detached", "properties", "behaviors",
    "listeners", "observers", "is", "attributeChanged", "factoryImpl",
    "hostAttributes",
};

/// The outcome of an integrity check. Purely advisory: composition proceeds
/// regardless, with the conflicts logged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Declared property names that collide with [`RESERVED_PROPERTIES`].
    pub conflicting_properties: Vec<String>,
    /// Declared method/preparer names that collide with [`RESERVED_METHODS`].
    pub conflicting_methods: Vec<String>,
}

impl IntegrityReport {
    /// Whether no conflicts were found.
    pub fn ok(&self) -> bool {
        self.conflicting_properties.is_empty() && self.conflicting_methods.is_empty()
    }
}

/// Check declared property names and member (method/preparer) names against
/// the reserved sets. Pure; emits nothing.
pub fn check<'a>(
    properties: impl IntoIterator<Item = &'a str>,
    members: impl IntoIterator<Item = &'a str>,
) -> IntegrityReport {
    IntegrityReport {
        conflicting_properties: properties
            .into_iter()
            .filter(|name| RESERVED_PROPERTIES.contains(*name))
            .map(str::to_owned)
            .collect(),
        conflicting_methods: members
            .into_iter()
            .filter(|name| RESERVED_METHODS.contains(*name))
            .map(str::to_owned)
            .collect(),
    }
}

/// Check the fully merged shape of a definition, the form the host framework
/// will actually see. Runs as the last step of composition.
pub fn check_resolved(definition: &ResolvedDefinition) -> IntegrityReport {
    check(
        definition.properties.keys().map(String::as_str),
        definition
            .methods
            .keys()
            .chain(definition.preparers.keys())
            .map(String::as_str),
    )
}

/// Check a single behavior in isolation, for behaviors authored outside a
/// full definition.
pub fn check_behavior(behavior: &Behavior) -> IntegrityReport {
    check(
        behavior.properties.keys().map(String::as_str),
        behavior
            .methods
            .keys()
            .chain(behavior.preparers.keys())
            .map(String::as_str),
    )
}
