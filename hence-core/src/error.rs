//! Error types for Hence.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HenceError`] - Top-level error type for all Hence operations
//! - [`HookError`] - Hook resolution failures (configuration errors)
//! - [`ProjectionError`] - Failures while projecting a `props` bag onto fields
//! - [`HostError`] - Registration and append failures from the host framework
//!
//! Hook and projection errors never escape a lifecycle or event-dispatch call
//! path; the framework crate logs them and degrades to a no-op. They surface
//! here as values so callers outside those paths can still match on them.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Hence operations.
#[derive(Error, Debug)]
pub enum HenceError {
    /// A hook could not be resolved against an event.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// The host framework rejected a registration or append.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// A `props` bag could not be projected onto instance fields.
    #[error("projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// A method was invoked by name but is not declared on the component.
    #[error("no method named `{0}` is declared on the component")]
    NoSuchMethod(String),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Configuration errors raised while resolving a hook target against an
/// event. These abort the dispatch of that single event only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The named target is not an object entry of the event model, nor of
    /// any ancestor model on the event's propagation path.
    #[error(
        "hook target `{target}` is not an entry of the event model or of any ancestor on its path"
    )]
    TargetMissing {
        /// The target name the hook was declared with.
        target: String,
    },

    /// The resolved target carries no callable action.
    #[error("hook target `{target}` has no callable action")]
    ActionMissing {
        /// The target name the hook was declared with.
        target: String,
    },
}

impl HookError {
    /// The target name the failing hook was declared with.
    pub fn target(&self) -> &str {
        match self {
            HookError::TargetMissing { target } | HookError::ActionMissing { target } => target,
        }
    }
}

/// Errors raised while projecting a `props` bag onto instance fields at
/// attach time. Caught at the attach boundary and logged; attachment itself
/// never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The `props` field held a truthy value that is not an object.
    #[error("`props` must be an object, found {found}")]
    PropsNotAnObject {
        /// Loose type name of the offending value.
        found: &'static str,
    },
}

/// Errors reported by the host framework adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The identifier does not satisfy the custom-element naming rule
    /// (lowercase ASCII, starts with a letter, contains a dash).
    #[error("`{0}` is not a valid element identifier")]
    InvalidIdentifier(String),

    /// Another definition already claimed this tag name. Registration is
    /// process-wide and never undone, so the first claim wins.
    #[error("an element named `{0}` is already registered")]
    AlreadyRegistered(String),

    /// The target container has been sealed and no longer accepts children.
    #[error("container `{0}` is sealed and does not accept children")]
    Sealed(String),
}

impl From<BoxError> for HenceError {
    fn from(err: BoxError) -> Self {
        HenceError::Custom(err)
    }
}
