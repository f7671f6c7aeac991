//! Archetype presets.
//!
//! Three preset compositions layer domain defaults over the composition
//! engine, one per component role:
//!
//! - [`schema`] — data and query: owns API interaction, produces `results`
//! - [`model`] — data transform: turns raw state into render-ready options
//! - [`ui`] — presentation: data-agnostic, configured entirely from outside
//!
//! A typical page wires them in sequence: a schema component queries and
//! publishes results, a model component transforms them, and a ui component
//! renders the transformed options, firing hooks back at the data it was
//! given.

mod model;
mod schema;
mod ui;

pub use model::{model, model_with_host};
pub use schema::{schema, schema_with_host};
pub use ui::{ui, ui_with_host};
