//! Registration, creation, and append surface.

use hence::testing::LifecycleProbe;
use hence::{Container, ElementHost, HostFramework, compose_with_host};
use serde_json::json;

mod common;
use common::{card_definition, compose_isolated};

#[test]
fn registration_is_idempotent() {
    let component = compose_isolated(&card_definition());
    assert_eq!(component.identifier(), "x-card");
    assert!(component.register_element());
    assert!(component.register_element());
    assert!(component.host().is_registered("x-card"));
}

#[test]
fn malformed_identifiers_never_register() {
    let bad = compose_isolated(&hence::ComponentDefinition::new("card"));

    assert!(!bad.register_element());
    assert!(bad.create_element(json!({})).is_none());
    assert!(bad.append_element_to(json!({}), None).is_none());
}

#[test]
fn a_tag_name_is_claimed_once_per_host() {
    let host = ElementHost::new();
    let first = compose_with_host(&card_definition(), host.clone());
    let second = compose_with_host(&card_definition(), host);

    assert!(first.register_element());
    assert!(!second.register_element());
    assert!(second.create_element(json!({})).is_none());
    // The first component keeps working.
    assert!(first.create_element(json!({})).is_some());
}

#[test]
fn programmatic_creation_runs_the_full_lifecycle_in_order() {
    let probe = LifecycleProbe::new();
    let created_mark = probe.mark("created");
    let factory_mark = probe.mark("factory");
    let definition = card_definition()
        .created(created_mark)
        .factory_impl(move |instance, _config| factory_mark(instance))
        .ready(probe.mark("ready"))
        .attached(probe.mark("attached"));
    let component = compose_isolated(&definition);

    let element = component.append_element_to(json!({ "title": "t" }), None);

    assert!(element.is_some());
    assert_eq!(probe.stages(), ["created", "factory", "ready", "attached"]);
}

#[test]
fn appending_defaults_to_the_host_body() {
    let host = ElementHost::new();
    let component = compose_with_host(&card_definition(), host.clone());

    let element = component.append_element_to(json!({}), None).unwrap();

    let body = host.body();
    assert_eq!(body.len(), 1);
    assert!(std::sync::Arc::ptr_eq(&body.children()[0], &element));
}

#[test]
fn append_failures_still_return_the_unattached_element() {
    let probe = LifecycleProbe::new();
    let component = compose_isolated(&card_definition().attached(probe.mark("attached")));

    let sidebar = Container::new("sidebar");
    sidebar.seal();
    let element = component.append_element_to(json!({}), Some(&sidebar));

    // Logged and swallowed; the element exists but never attached.
    assert!(element.is_some());
    assert!(sidebar.is_empty());
    assert!(probe.stages().is_empty());
}

#[test]
fn detaching_runs_the_detached_lifecycle() {
    let probe = LifecycleProbe::new();
    let component = compose_isolated(&card_definition().detached(probe.mark("detached")));

    let element = component.append_element_to(json!({}), None).unwrap();
    let body = component.host().body();
    assert!(body.detach(&element));

    assert!(body.is_empty());
    assert_eq!(probe.stages(), ["detached"]);
    assert!(!body.detach(&element), "second detach finds nothing");
}

#[test]
fn debug_snapshots_track_current_values() {
    let component = compose_isolated(&card_definition());
    let instance = component.create_element(json!({ "title": "hello" })).unwrap();
    instance.set("image", json!("logo.png"));

    let snapshot = instance.debug_this();
    assert_eq!(snapshot["title"], json!("hello"));
    assert_eq!(snapshot["image"], json!("logo.png"));
    assert_eq!(snapshot["secret"], json!("classified"));
    assert!(instance.debug_this_json().contains(r#""image":"logo.png""#));
}
