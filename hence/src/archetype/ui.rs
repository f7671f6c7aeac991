//! The ui archetype.
//!
//! UI components are the most diverse role and are designed to be data
//! agnostic: every piece of text, image, or link they render is
//! configurable from outside, and events dealing with data fire hooks back
//! at the component that supplied it. The host framework's native surface
//! already provides everything else they need, so the preset adds no
//! members of its own beyond composition.

use crate::compose::{Component, compose_with_host};
use crate::host::{HostFramework, process_host};
use hence_core::ComponentDefinition;
use std::sync::Arc;

/// Compose a definition as a ui component against the process host.
pub fn ui(original: &ComponentDefinition) -> Component {
    ui_with_host(original, process_host())
}

/// Compose a definition as a ui component against a caller-supplied host.
pub fn ui_with_host(original: &ComponentDefinition, host: Arc<dyn HostFramework>) -> Component {
    compose_with_host(original, host)
}
