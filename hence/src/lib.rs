//! # hence - Composition Conventions for Data-Driven Components
//!
//! `hence` layers a small set of conventions over a component host
//! framework: component definitions are plain configuration records,
//! composed through a single factory that derives a property registry,
//! appends an initialization behaviour, and audits the result against the
//! host's reserved names. Declarative hooks decouple presentation
//! components from the business logic bound to their data, and a `props`
//! bag bulk-configures a component from a single object-valued binding.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hence::{ComponentDefinition, PropertyKind, ui};
//! use serde_json::json;
//!
//! let card = ComponentDefinition::new("my-card")
//!     .bare_property("title", PropertyKind::String)
//!     .bare_property("image", PropertyKind::String)
//!     .hook("tap", "cta");
//!
//! let card = ui(&card);
//! let el = card.append_element_to(json!({ "title": "Hello" }), None);
//! ```
//!
//! ## Component roles
//!
//! Three archetypes preset a definition for its role on the page:
//! [`schema`] components own data and queries, [`model`] components
//! transform raw state into render-ready options, and [`ui`] components
//! present whatever they are configured with. The composition engine
//! underneath is the same [`compose`] for all three.
//!
//! The core data model and algorithms live in `hence-core`; this crate
//! adds the composition factory, dispatch logging, the host adapter, the
//! archetypes, and testing utilities.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod archetype;
mod compose;
mod hook;
mod host;
mod initialization;

pub mod testing;

pub use hence_core::{
    // Runtime callbacks
    Action,
    // Definition layer
    Behavior,
    // Errors
    BoxError,
    ComponentDefinition,
    // Runtime
    ComponentInstance,
    EventModel,
    FactoryFn,
    HenceError,
    HookData,
    HookError,
    HookEvent,
    HookHandler,
    HookSpec,
    HostError,
    Lifecycle,
    LifecycleFn,
    Method,
    ModelEntry,
    PrepareFn,
    ProjectionError,
    // Properties
    PropertyFlags,
    PropertyKind,
    PropertyRegistry,
    PropertySpec,
    Resolved,
    ResolvedDefinition,
    ValueFactory,
    hook_key,
    integrity,
    is_truthy,
    resolve_hook,
};

pub use archetype::{model, model_with_host, schema, schema_with_host, ui, ui_with_host};
pub use compose::{Component, PROP_CONFIG, PROP_LIST, compose, compose_with_host};
pub use hook::{make_hook, make_hook_prepared};
pub use host::{Container, ElementHost, HostFramework, process_host, valid_identifier};
pub use initialization::{INITIALIZATION_BEHAVIOUR, initialization_behaviour};
