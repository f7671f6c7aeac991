//! The host-framework adapter.
//!
//! Registration state is process-wide and grows monotonically: a tag name
//! is registered once and never unregistered for the lifetime of the
//! process. That state lives behind the [`HostFramework`] trait so tests
//! can substitute an isolated host instead of sharing the process
//! singleton.
//!
//! [`Container`] is the append target for created elements, standing in
//! for a document node: it holds attached children in order and can be
//! sealed, after which appends fail. Sealing is the adapter's rendering of
//! a container that has gone away underneath the caller.

use hence_core::{ComponentInstance, HostError};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

/// What the composition layer requires from the surrounding framework:
/// tag registration and a default append target.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot host Hence components",
    label = "missing `HostFramework` implementation",
    note = "Implement `register`, `is_registered`, and `body` to serve as a component host."
)]
pub trait HostFramework: Send + Sync {
    /// Claim a tag name. Fails if the identifier is malformed or the name
    /// is already claimed; a successful claim is permanent.
    fn register(&self, identifier: &str) -> Result<(), HostError>;

    /// Whether a tag name has been claimed.
    fn is_registered(&self, identifier: &str) -> bool;

    /// The top-level document container, the default append target.
    fn body(&self) -> Arc<Container>;
}

/// An append target for created elements.
pub struct Container {
    label: String,
    children: Mutex<Vec<Arc<ComponentInstance>>>,
    sealed: AtomicBool,
}

impl Container {
    /// A new, open container.
    pub fn new(label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            children: Mutex::new(Vec::new()),
            sealed: AtomicBool::new(false),
        })
    }

    /// The container's diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Append an element. Fails once the container is sealed.
    pub fn append(&self, element: Arc<ComponentInstance>) -> Result<(), HostError> {
        if self.sealed.load(Ordering::SeqCst) {
            return Err(HostError::Sealed(self.label.clone()));
        }
        self.children.lock().unwrap().push(element);
        Ok(())
    }

    /// Detach an element. Reports whether it was attached here; the
    /// element's `detached` lifecycle runs on removal.
    pub fn detach(&self, element: &Arc<ComponentInstance>) -> bool {
        let removed = {
            let mut children = self.children.lock().unwrap();
            match children.iter().position(|c| Arc::ptr_eq(c, element)) {
                Some(index) => {
                    children.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            element.run_detached();
        }
        removed
    }

    /// Seal the container; subsequent appends fail.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::SeqCst);
    }

    /// Number of attached children.
    pub fn len(&self) -> usize {
        self.children.lock().unwrap().len()
    }

    /// Whether no children are attached.
    pub fn is_empty(&self) -> bool {
        self.children.lock().unwrap().is_empty()
    }

    /// Snapshot of the attached children, in append order.
    pub fn children(&self) -> Vec<Arc<ComponentInstance>> {
        self.children.lock().unwrap().clone()
    }
}

/// The in-process host: a claimed-tag set and a document body container.
pub struct ElementHost {
    tags: Mutex<BTreeSet<String>>,
    body: Arc<Container>,
}

impl ElementHost {
    /// A fresh host with an empty tag registry. Tests use this for
    /// isolation from the process-wide host.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tags: Mutex::new(BTreeSet::new()),
            body: Container::new("body"),
        })
    }
}

impl HostFramework for ElementHost {
    fn register(&self, identifier: &str) -> Result<(), HostError> {
        if !valid_identifier(identifier) {
            return Err(HostError::InvalidIdentifier(identifier.to_owned()));
        }
        let mut tags = self.tags.lock().unwrap();
        if !tags.insert(identifier.to_owned()) {
            return Err(HostError::AlreadyRegistered(identifier.to_owned()));
        }
        Ok(())
    }

    fn is_registered(&self, identifier: &str) -> bool {
        self.tags.lock().unwrap().contains(identifier)
    }

    fn body(&self) -> Arc<Container> {
        self.body.clone()
    }
}

/// The process-wide host. Claims made here last for the process lifetime.
pub fn process_host() -> Arc<ElementHost> {
    static HOST: OnceLock<Arc<ElementHost>> = OnceLock::new();
    HOST.get_or_init(ElementHost::new).clone()
}

/// The custom-element naming rule: lowercase ASCII letters, digits, and
/// dashes, starting with a letter and containing at least one dash.
pub fn valid_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_with_letter
        && identifier.contains('-')
        && identifier
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
