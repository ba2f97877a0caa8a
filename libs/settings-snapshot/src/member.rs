//! Member descriptors and the [`Settings`] introspection trait
//!
//! A [`MemberDescriptor`] is the static metadata of one member of a settings
//! type together with its accessor pair. Descriptors are normally produced by
//! `#[derive(Settings)]`, computed once per type and shared read-only by every
//! handle scanned from an instance of that type.

use crate::error::WriteError;
use crate::value::{SettingField, SettingValue, ValueType};
use settings_snapshot_macros::Settings;
use std::fmt;
use std::sync::Arc;

type Getter<T> = Arc<dyn Fn(&T) -> Option<SettingValue> + Send + Sync>;
type Setter<T> = Arc<dyn Fn(&mut T, Option<SettingValue>) -> Result<(), WriteError> + Send + Sync>;

/// Visibility of a member to code outside its declaring type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Whether a member can be written through its descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    ReadOnly,
}

/// Whether a member belongs to an instance or to the type itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Instance,
    Static,
}

/// Introspectable settings type
///
/// Implemented by `#[derive(Settings)]`. Hand-written implementations must
/// return the same slice, in the same order, on every call.
pub trait Settings: Sized + 'static {
    /// Fully qualified type name, used as the declaring type of own members
    const TYPE_NAME: &'static str;

    /// All members of the type in declaration order, eligible or not
    fn members() -> &'static [MemberDescriptor<Self>];
}

/// Static metadata and accessors for one member of `T`
pub struct MemberDescriptor<T> {
    name: &'static str,
    declaring_type: Option<&'static str>,
    value_type: ValueType,
    visibility: Visibility,
    scope: Scope,
    getter: Getter<T>,
    setter: Option<Setter<T>>,
}

impl<T> Clone for MemberDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            declaring_type: self.declaring_type,
            value_type: self.value_type,
            visibility: self.visibility,
            scope: self.scope,
            getter: Arc::clone(&self.getter),
            setter: self.setter.clone(),
        }
    }
}

impl<T> fmt::Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("declaring_type", &self.declaring_type)
            .field("value_type", &self.value_type)
            .field("visibility", &self.visibility)
            .field("access", &self.access())
            .field("scope", &self.scope)
            .finish()
    }
}

impl<T: 'static> MemberDescriptor<T> {
    /// Start a descriptor for a member read by `getter`
    ///
    /// The member starts public, instance-level and read-only with no
    /// declaring type; use the builder methods to refine it.
    pub fn builder<F, G>(name: &'static str, getter: G) -> MemberDescriptorBuilder<T>
    where
        F: SettingField + 'static,
        G: Fn(&T) -> &F + Send + Sync + 'static,
    {
        MemberDescriptorBuilder {
            inner: MemberDescriptor {
                name,
                declaring_type: None,
                value_type: F::VALUE_TYPE,
                visibility: Visibility::Public,
                scope: Scope::Instance,
                getter: Arc::new(move |target: &T| getter(target).to_setting()),
                setter: None,
            },
        }
    }

    /// Re-target this descriptor onto an outer type embedding `T`
    ///
    /// Name, declaring type and flags are kept, so members of an embedded
    /// type still report the type that declared them.
    pub fn project<U: 'static>(&self, outer: fn(&U) -> &T, outer_mut: fn(&mut U) -> &mut T) -> MemberDescriptor<U> {
        let getter = Arc::clone(&self.getter);
        let setter = self.setter.clone().map(|setter| -> Setter<U> {
            Arc::new(move |target: &mut U, value: Option<SettingValue>| setter(outer_mut(target), value))
        });

        MemberDescriptor {
            name: self.name,
            declaring_type: self.declaring_type,
            value_type: self.value_type,
            visibility: self.visibility,
            scope: self.scope,
            getter: Arc::new(move |target: &U| getter(outer(target))),
            setter,
        }
    }
}

impl<T> MemberDescriptor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declaring_type(&self) -> Option<&'static str> {
        self.declaring_type
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn access(&self) -> Access {
        if self.setter.is_some() {
            Access::ReadWrite
        } else {
            Access::ReadOnly
        }
    }

    /// Whether this member is surfaced as a setting
    ///
    /// Eligible members are instance-level, public, writable, and not declared
    /// on [`SettingsBase`].
    pub fn is_eligible(&self) -> bool {
        self.scope == Scope::Instance
            && self.visibility == Visibility::Public
            && self.access() == Access::ReadWrite
            && self.declaring_type != Some(SettingsBase::TYPE_NAME)
    }

    /// Read the member's current value from `target`
    pub fn read(&self, target: &T) -> Option<SettingValue> {
        (self.getter)(target)
    }

    /// Write `value` into `target`
    ///
    /// The value is handed to the member's write path as-is; coercion to the
    /// declared type happens in the field bridge or the target's own setter.
    pub fn write(&self, target: &mut T, value: Option<SettingValue>) -> Result<(), WriteError> {
        match &self.setter {
            Some(setter) => setter(target, value),
            None => Err(WriteError::ReadOnly(self.name)),
        }
    }
}

/// Builder returned by [`MemberDescriptor::builder`]
pub struct MemberDescriptorBuilder<T> {
    inner: MemberDescriptor<T>,
}

impl<T: 'static> MemberDescriptorBuilder<T> {
    pub fn declared_by(mut self, type_name: &'static str) -> Self {
        self.inner.declaring_type = Some(type_name);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.inner.visibility = visibility;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.inner.scope = scope;
        self
    }

    /// Make the member writable by assigning the field directly
    pub fn writable<F, S>(self, field: S) -> Self
    where
        F: SettingField + 'static,
        S: Fn(&mut T) -> &mut F + Send + Sync + 'static,
    {
        self.with_setter(move |target: &mut T, value: F| {
            *field(target) = value;
            Ok(())
        })
    }

    /// Make the member writable through a target-owned setter
    ///
    /// Errors returned by `setter` surface as [`WriteError::Rejected`].
    pub fn with_setter<F, S>(mut self, setter: S) -> Self
    where
        F: SettingField + 'static,
        S: Fn(&mut T, F) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.inner.setter = Some(Arc::new(move |target: &mut T, value: Option<SettingValue>| -> Result<(), WriteError> {
            let value = F::from_setting(value)?;
            setter(target, value).map_err(WriteError::Rejected)
        }));
        self
    }

    pub fn build(self) -> MemberDescriptor<T> {
        self.inner
    }
}

/// Marker base type for settings structs
///
/// Settings types embed it with `#[setting(flatten)]` to carry registry
/// scaffolding. Members declared here are never surfaced as settings.
#[derive(Debug, Clone, PartialEq, Eq, Settings)]
pub struct SettingsBase {
    /// Storage section the host files this settings object under
    pub section: String,
    /// Whether the host persists changes without an explicit save
    pub autosave: bool,
}

impl Default for SettingsBase {
    fn default() -> Self {
        Self {
            section: "settings".to_string(),
            autosave: true,
        }
    }
}

impl SettingsBase {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            ..Self::default()
        }
    }
}
