//! Property projection at construction and attach time.

use hence::PROP_CONFIG;
use serde_json::{Value, json};

mod common;
use common::{card_definition, compose_isolated};

#[test]
fn construction_projects_truthy_config_values() {
    let component = compose_isolated(&card_definition());
    let instance = component.create_element(json!({ "title": "x" })).unwrap();

    assert_eq!(instance.get("title"), Some(json!("x")));
    // Unnamed properties keep their defaults.
    assert_eq!(instance.get("image"), Some(json!("")));
}

#[test]
fn construction_snapshots_the_raw_config() {
    let component = compose_isolated(&card_definition());
    let config = json!({ "title": "x", "unrelated": true });
    let instance = component.create_element(config.clone()).unwrap();

    assert_eq!(instance.get(PROP_CONFIG), Some(config));
}

#[test]
fn construction_skips_falsy_config_values() {
    // The generic projection paths skip falsy values; `0`, `false`, and ""
    // cannot flow through them. Asserted as current behaviour.
    let component = compose_isolated(&card_definition());
    let instance = component.create_element(json!({ "title": 0 })).unwrap();

    assert_eq!(instance.get("title"), Some(json!("")));
}

#[test]
fn declarative_stamping_skips_the_factory_path() {
    let component = compose_isolated(&card_definition());
    let instance = component.stamp_declared().unwrap();

    assert_eq!(instance.get(PROP_CONFIG), Some(Value::Null));
    assert_eq!(instance.get("title"), Some(json!("")));
}

#[test]
fn attach_projects_the_props_bag() {
    let component = compose_isolated(&card_definition());
    let instance = component.stamp_declared().unwrap();

    assert!(instance.set("props", json!({ "title": "y" })));
    instance.run_attached();

    assert_eq!(instance.get("title"), Some(json!("y")));
}

#[test]
fn attach_without_props_is_a_no_op() {
    let component = compose_isolated(&card_definition());
    let instance = component.stamp_declared().unwrap();

    instance.run_attached();

    assert_eq!(instance.get("title"), Some(json!("")));
}

#[test]
fn attach_with_malformed_props_is_contained() {
    let component = compose_isolated(&card_definition());
    let instance = component.stamp_declared().unwrap();

    instance.set("props", json!("not an object"));
    // Logged and swallowed; attachment must never fail.
    instance.run_attached();

    assert_eq!(instance.get("title"), Some(json!("")));
}

#[test]
fn projection_skips_read_only_properties_per_field() {
    let component = compose_isolated(&card_definition());
    let instance = component
        .create_element(json!({ "secret": "overwritten", "title": "kept" }))
        .unwrap();

    // The read-only field is skipped silently; the rest still project.
    assert_eq!(instance.get("secret"), Some(json!("classified")));
    assert_eq!(instance.get("title"), Some(json!("kept")));

    instance.set("props", json!({ "secret": "overwritten" }));
    instance.run_attached();
    assert_eq!(instance.get("secret"), Some(json!("classified")));
}

#[test]
fn repeated_attachment_re_applies_without_accumulating() {
    let component = compose_isolated(&card_definition());
    let instance = component.stamp_declared().unwrap();

    instance.set("props", json!({ "title": "y" }));
    instance.run_attached();
    instance.run_attached();

    assert_eq!(instance.get("title"), Some(json!("y")));
}

#[test]
fn construction_projection_is_per_instance() {
    let component = compose_isolated(&card_definition());
    let first = component.create_element(json!({ "title": "a" })).unwrap();
    let second = component.create_element(json!({ "title": "b" })).unwrap();

    assert_eq!(first.get("title"), Some(json!("a")));
    assert_eq!(second.get("title"), Some(json!("b")));
}
