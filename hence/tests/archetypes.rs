//! Schema, model, and ui archetype behaviour.

use hence::{
    ComponentDefinition, ElementHost, PropertyKind, model_with_host, schema_with_host,
    ui_with_host,
};
use serde_json::{Value, json};

mod common;
use common::card_definition;

fn feed_definition() -> ComponentDefinition {
    ComponentDefinition::new("x-feed")
}

// ============================================================================
// Schema
// ============================================================================

#[test]
fn schema_layers_its_default_properties() {
    let component = schema_with_host(&feed_definition(), ElementHost::new());
    let properties = &component.definition().properties;

    assert_eq!(properties["executeOnLoad"].value, Some(json!(true)));
    assert!(properties["results"].is_read_only());
    assert!(properties["results"].is_notify());
    assert_eq!(properties["query"].initial_value(), json!({}));
}

#[test]
fn schema_default_query_handler_reports_misuse() {
    let component = schema_with_host(&feed_definition(), ElementHost::new());
    // ready auto-runs executeQuery; the default handler fails, the failure
    // is logged, and results stay unset.
    let instance = component.create_element(json!({})).unwrap();

    assert_eq!(instance.get("results"), Some(Value::Null));
}

#[test]
fn schema_executes_an_overridden_query_on_ready() {
    let definition = feed_definition()
        .method("_executeQuery", |_, _| Ok(json!([{ "id": 1 }, { "id": 2 }])));
    let component = schema_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    assert_eq!(instance.get("results"), Some(json!([{ "id": 1 }, { "id": 2 }])));
}

#[test]
fn schema_wraps_scalar_query_results_into_an_array() {
    let definition = feed_definition().method("_executeQuery", |_, _| Ok(json!({ "id": 1 })));
    let component = schema_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    assert_eq!(instance.get("results"), Some(json!([{ "id": 1 }])));
}

#[test]
fn schema_queries_can_be_re_triggered_manually() {
    let definition = feed_definition().method("_executeQuery", |instance, _| {
        let query = instance.get("query").unwrap_or_default();
        Ok(json!([query]))
    });
    let component = schema_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    instance.set("query", json!({ "page": 2 }));
    instance.invoke("executeQuery", &[]).unwrap();

    assert_eq!(instance.get("results"), Some(json!([{ "page": 2 }])));
}

#[test]
fn schema_results_are_read_only_through_the_generic_path() {
    let component = schema_with_host(&feed_definition(), ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    assert!(!instance.set("results", json!([1])));
}

#[test]
fn schema_results_notify_through_the_listeners_table() {
    let definition = feed_definition()
        .bare_property("lastSeen", PropertyKind::Object)
        .listener("results-changed", "onResults")
        .method("onResults", |instance, args| {
            instance.set("lastSeen", args[0].clone());
            Ok(Value::Null)
        })
        .method("_executeQuery", |_, _| Ok(json!([3])));
    let component = schema_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    assert_eq!(instance.get("lastSeen"), Some(json!({ "value": [3] })));
}

// ============================================================================
// Model
// ============================================================================

#[test]
fn model_layers_its_default_properties() {
    let component = model_with_host(&feed_definition(), ElementHost::new());
    let properties = &component.definition().properties;

    assert!(properties["processedState"].is_read_only());
    assert_eq!(properties["state"].value, Some(Value::Null));
    assert_eq!(properties["query"].value, Some(Value::Null));
}

#[test]
fn model_renders_state_through_the_transform() {
    let definition = feed_definition().method("_transformState", |_, args| {
        let entry = &args[0];
        Ok(json!({ "label": entry["name"] }))
    });
    let component = model_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    instance.set("state", json!([{ "name": "a" }, { "name": "b" }]));
    let processed = instance.invoke("renderState", &[]).unwrap();

    assert_eq!(processed, json!([{ "label": "a" }, { "label": "b" }]));
    assert_eq!(instance.get("processedState"), Some(processed));
}

#[test]
fn model_collapses_single_and_empty_results() {
    let definition = feed_definition().method("_transformState", |_, args| Ok(args[0].clone()));
    let component = model_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    instance.set("state", json!([{ "only": true }]));
    assert_eq!(
        instance.invoke("renderState", &[]).unwrap(),
        json!({ "only": true })
    );

    instance.set("state", json!([]));
    assert_eq!(instance.invoke("renderState", &[]).unwrap(), Value::Null);
}

#[test]
fn model_drops_falsy_transforms() {
    let definition = feed_definition().method("_transformState", |_, args| {
        let entry = args[0].clone();
        if entry["keep"] == json!(true) {
            Ok(entry)
        } else {
            Ok(Value::Null)
        }
    });
    let component = model_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    instance.set(
        "state",
        json!([{ "keep": true }, { "keep": false }, { "keep": true }]),
    );
    assert_eq!(
        instance.invoke("renderState", &[]).unwrap(),
        json!([{ "keep": true }, { "keep": true }])
    );
}

#[test]
fn model_default_transform_passes_entries_through() {
    // The default transform warns about its own use but keeps data flowing.
    let component = model_with_host(&feed_definition(), ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    instance.set("state", json!(["x", "y"]));
    assert_eq!(
        instance.invoke("renderState", &[]).unwrap(),
        json!(["x", "y"])
    );
}

#[test]
fn model_transform_faults_propagate_to_the_caller() {
    let definition =
        feed_definition().method("_transformState", |_, _| Err("bad entry".into()));
    let component = model_with_host(&definition, ElementHost::new());
    let instance = component.create_element(json!({})).unwrap();

    instance.set("state", json!([1]));
    assert!(instance.invoke("renderState", &[]).is_err());
}

// ============================================================================
// Ui
// ============================================================================

#[test]
fn ui_adds_no_members_beyond_composition() {
    let original = card_definition();
    let component = ui_with_host(&original, ElementHost::new());

    assert_eq!(component.registry().names(), ["title", "image", "secret"]);
    assert_eq!(
        component.definition().methods.len(),
        original.methods.len()
    );
}

#[test]
fn ui_components_stay_data_agnostic_via_hooks() {
    use hence::testing::ActionProbe;
    use hence::{EventModel, HookData, HookEvent};

    let probe = ActionProbe::new();
    let component = ui_with_host(&card_definition().hook("tap", "cta"), ElementHost::new());
    let instance = component.create_element(json!({ "title": "Buy" })).unwrap();

    let event = HookEvent::new("tap").with_model(
        EventModel::new().entry("cta", HookData::new().with_action(probe.action())),
    );
    instance.deliver_hook(&event);

    assert_eq!(probe.count(), 1);
}
