//! # hence-core
//!
//! Core types and algorithms for the Hence component framework.
//!
//! This crate has minimal dependencies and no logging of its own; every
//! operation here is a pure computation or a synchronous state change on a
//! single instance. The `hence` crate layers composition, dispatch logging,
//! and the host-framework adapter on top.
//!
//! # Architecture
//!
//! The crate is organised around the lifetime of a component definition:
//!
//! ## Definition ([`ComponentDefinition`], [`Behavior`])
//!
//! Plain configuration records assembled with builder methods: declared
//! properties, listener routes, hook declarations, named methods, and
//! lifecycle callbacks. Behaviors are partial definitions merged by an
//! explicit ordered pass with documented precedence.
//!
//! ## Composition support ([`PropertyRegistry`], [`integrity`])
//!
//! The registry is the ordered set of declared property names, derived once
//! from the merged property set and immutable thereafter. The integrity
//! module computes name collisions against the host framework's reserved
//! surface; purely advisory, it never blocks anything.
//!
//! ## Runtime ([`ComponentInstance`], [`HookEvent`], [`resolve_hook`])
//!
//! Instances hold the live field store and run lifecycle callbacks the host
//! invokes. Events carry a model of named data objects and a propagation
//! path; hook resolution locates the data object a dispatch targets,
//! cloning it so actions never touch the live entry.
//!
//! # Error Types
//!
//! - [`HenceError`] - Top-level error type
//! - [`HookError`] - Hook resolution (configuration) errors
//! - [`ProjectionError`] - `props`-bag projection errors
//! - [`HostError`] - Registration and append errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod definition;
mod error;
mod event;
mod hook;
mod instance;
mod property;
mod registry;
mod value;

pub mod integrity;

// Re-exports
pub use definition::{
    Behavior, ComponentDefinition, FactoryFn, HookSpec, Lifecycle, LifecycleFn, Method, PrepareFn,
    ResolvedDefinition,
};
pub use error::{BoxError, HenceError, HookError, HostError, ProjectionError};
pub use event::{Action, EventModel, HookData, HookEvent, ModelEntry};
pub use hook::{Resolved, resolve_hook};
pub use instance::{ComponentInstance, HookHandler, hook_key};
pub use property::{PropertyFlags, PropertyKind, PropertySpec, ValueFactory};
pub use registry::PropertyRegistry;
pub use value::{is_truthy, type_name};
