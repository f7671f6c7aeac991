//! Testing utilities.
//!
//! Probes for asserting on hook dispatch and lifecycle flow without wiring
//! real business logic:
//!
//! - [`ActionProbe`]: an action that records every call it receives
//! - [`CountingAction`]: an action that only counts invocations
//! - [`LifecycleProbe`]: labelled lifecycle callbacks recording run order

use hence_core::{Action, ComponentInstance, HookData};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Action Probe
// ============================================================================

/// One recorded action invocation: a snapshot of the data clone as the
/// action saw it, the bound model's entry names, and the event name.
#[derive(Clone, Debug)]
pub struct ProbedCall {
    /// Fields of the data clone at invocation time.
    pub fields: Map<String, Value>,
    /// Whether the veto flag was raised (it never is when the action runs).
    pub error: bool,
    /// Entry names of the model the data was resolved from.
    pub model_keys: Vec<String>,
    /// Name of the dispatched event.
    pub event: String,
}

/// An action that records all calls it receives.
///
/// ```rust,ignore
/// let probe = ActionProbe::new();
/// let data = HookData::new()
///     .field("label", json!("Go"))
///     .with_action(probe.action());
///
/// // ...dispatch...
///
/// assert_eq!(probe.count(), 1);
/// assert_eq!(probe.calls()[0].fields["label"], json!("Go"));
/// ```
#[derive(Clone, Default)]
pub struct ActionProbe {
    calls: Arc<Mutex<Vec<ProbedCall>>>,
}

impl ActionProbe {
    /// A new probe with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// The probe as an [`Action`] to attach to a [`HookData`].
    pub fn action(&self) -> Action {
        let calls = self.calls.clone();
        Arc::new(move |data: &mut HookData, model, event| {
            calls.lock().unwrap().push(ProbedCall {
                fields: data.fields().clone(),
                error: data.error(),
                model_keys: model.keys().map(str::to_owned).collect(),
                event: event.name().to_owned(),
            });
        })
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of the recorded calls, in order.
    pub fn calls(&self) -> Vec<ProbedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

// ============================================================================
// Counting Action
// ============================================================================

/// An action that counts invocations and nothing else.
#[derive(Clone, Default)]
pub struct CountingAction {
    count: Arc<AtomicUsize>,
}

impl CountingAction {
    /// A new counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The counter as an [`Action`] to attach to a [`HookData`].
    pub fn action(&self) -> Action {
        let count = self.count.clone();
        Arc::new(move |_, _, _| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    /// The current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Lifecycle Probe
// ============================================================================

/// Records the order lifecycle stages run in across an instance's life.
///
/// ```rust,ignore
/// let probe = LifecycleProbe::new();
/// let def = ComponentDefinition::new("x-card")
///     .created(probe.mark("created"))
///     .attached(probe.mark("attached"));
///
/// // ...create and attach...
///
/// assert_eq!(probe.stages(), ["created", "attached"]);
/// ```
#[derive(Clone, Default)]
pub struct LifecycleProbe {
    stages: Arc<Mutex<Vec<String>>>,
}

impl LifecycleProbe {
    /// A new probe with no recorded stages.
    pub fn new() -> Self {
        Self::default()
    }

    /// A lifecycle callback recording `label` each time it runs.
    pub fn mark(
        &self,
        label: impl Into<String>,
    ) -> impl Fn(&ComponentInstance) + Send + Sync + 'static {
        let stages = self.stages.clone();
        let label = label.into();
        move |_| stages.lock().unwrap().push(label.clone())
    }

    /// The recorded stage labels, in run order.
    pub fn stages(&self) -> Vec<String> {
        self.stages.lock().unwrap().clone()
    }
}
