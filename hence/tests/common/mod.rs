use hence::{
    Component, ComponentDefinition, ElementHost, PropertyKind, PropertySpec, compose_with_host,
};
use serde_json::json;

/// A small card definition with one read-only property, used across the
/// suite.
pub fn card_definition() -> ComponentDefinition {
    ComponentDefinition::new("x-card")
        .bare_property("title", PropertyKind::String)
        .bare_property("image", PropertyKind::String)
        .property(
            "secret",
            PropertySpec::with_value(PropertyKind::String, json!("classified")).read_only(),
        )
}

/// Compose against a fresh host so tests never share registration state.
pub fn compose_isolated(definition: &ComponentDefinition) -> Component {
    compose_with_host(definition, ElementHost::new())
}
