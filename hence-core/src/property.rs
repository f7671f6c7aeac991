//! Property specifications.
//!
//! A [`PropertySpec`] describes one declared property of a component: its
//! loose kind, an optional default value (or a factory producing one per
//! instance), and flags. Bare-kind declarations are supported and are
//! normalized to a full spec with a kind-appropriate default during
//! composition.

use bitflags::bitflags;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// Produces a fresh default value per instance, for kinds whose defaults
/// must not be shared (arrays, objects).
pub type ValueFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// The loose kind of a declared property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// A boolean flag. Defaults to `false`.
    Boolean,
    /// A numeric value. Defaults to `0`.
    Number,
    /// A text value. Defaults to `""`.
    String,
    /// An ordered sequence. Defaults to `null` unless a factory is given.
    Array,
    /// A keyed mapping. Defaults to `null` unless a factory is given.
    Object,
}

bitflags! {
    /// Behavioural flags on a declared property.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PropertyFlags: u8 {
        /// Only mutable through the privileged setter path. The generic
        /// projection mechanisms skip read-only targets silently per-field.
        const READ_ONLY = 1 << 0;
        /// Fires a `{name}-changed` event through the listeners table when
        /// the stored value changes.
        const NOTIFY = 1 << 1;
    }
}

/// The full specification of one declared property.
#[derive(Clone)]
pub struct PropertySpec {
    /// The loose kind of the property.
    pub kind: PropertyKind,
    /// The declared default value, if any.
    pub value: Option<Value>,
    /// A per-instance default factory; takes precedence over `value`.
    pub value_factory: Option<ValueFactory>,
    /// Behavioural flags.
    pub flags: PropertyFlags,
}

impl PropertySpec {
    /// A bare-kind declaration with no explicit default.
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            value: None,
            value_factory: None,
            flags: PropertyFlags::empty(),
        }
    }

    /// A declaration with an explicit default value.
    pub fn with_value(kind: PropertyKind, value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::new(kind)
        }
    }

    /// A declaration whose default is produced fresh per instance.
    pub fn with_factory(
        kind: PropertyKind,
        factory: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            value_factory: Some(Arc::new(factory)),
            ..Self::new(kind)
        }
    }

    /// Mark the property read-only.
    pub fn read_only(mut self) -> Self {
        self.flags |= PropertyFlags::READ_ONLY;
        self
    }

    /// Mark the property as notifying on change.
    pub fn notify(mut self) -> Self {
        self.flags |= PropertyFlags::NOTIFY;
        self
    }

    /// Whether the property may only be written through the privileged path.
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(PropertyFlags::READ_ONLY)
    }

    /// Whether writes fire a `{name}-changed` event.
    pub fn is_notify(&self) -> bool {
        self.flags.contains(PropertyFlags::NOTIFY)
    }

    /// The kind-appropriate default used when neither a value nor a factory
    /// was declared.
    pub fn kind_default(kind: PropertyKind) -> Value {
        match kind {
            PropertyKind::Boolean => json!(false),
            PropertyKind::Number => json!(0),
            PropertyKind::String => json!(""),
            PropertyKind::Array | PropertyKind::Object => Value::Null,
        }
    }

    /// Fill in the kind-appropriate default where no value was declared.
    /// Declared values and factories are left untouched.
    pub fn normalize(&mut self) {
        if self.value.is_none() && self.value_factory.is_none() {
            self.value = Some(Self::kind_default(self.kind));
        }
    }

    /// The initial field value for a new instance: the factory's product if
    /// one was declared, else the declared value, else the kind default.
    pub fn initial_value(&self) -> Value {
        if let Some(factory) = &self.value_factory {
            return factory();
        }
        self.value
            .clone()
            .unwrap_or_else(|| Self::kind_default(self.kind))
    }
}

impl From<PropertyKind> for PropertySpec {
    fn from(kind: PropertyKind) -> Self {
        PropertySpec::new(kind)
    }
}

impl fmt::Debug for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySpec")
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("value_factory", &self.value_factory.is_some())
            .field("flags", &self.flags)
            .finish()
    }
}
