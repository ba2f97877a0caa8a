//! Setting handle - live view of one member plus its baseline

use crate::config::{FloatComparison, SnapshotConfig};
use crate::convert::convert;
use crate::error::WriteError;
use crate::member::{MemberDescriptor, Settings};
use crate::sink::WriteFailureSink;
use crate::value::{SettingValue, ValueType};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// One eligible member of a target object
///
/// The current value is always read live from the target; only the baseline
/// (`default`) is stored in the handle. Writes are best effort: failures are
/// reported to the sink and never returned to the caller.
pub struct Setting<'a, T: Settings> {
    target: &'a RefCell<T>,
    member: &'static MemberDescriptor<T>,
    default: Option<SettingValue>,
    config: SnapshotConfig,
    sink: Arc<dyn WriteFailureSink>,
}

impl<'a, T: Settings> Setting<'a, T> {
    /// Create a handle, capturing the member's current value as its default
    pub fn new(
        target: &'a RefCell<T>,
        member: &'static MemberDescriptor<T>,
        config: SnapshotConfig,
        sink: Arc<dyn WriteFailureSink>,
    ) -> Self {
        let default = member.read(&target.borrow());
        Self {
            target,
            member,
            default,
            config,
            sink,
        }
    }

    // ===== Descriptor projections =====

    pub fn name(&self) -> &'static str {
        self.member.name()
    }

    /// Type that declared the member, empty when unknown
    pub fn declaring_type(&self) -> &'static str {
        self.member.declaring_type().unwrap_or("")
    }

    pub fn value_type(&self) -> ValueType {
        self.member.value_type()
    }

    pub fn member(&self) -> &'static MemberDescriptor<T> {
        self.member
    }

    // ===== Values =====

    /// Current value, read from the target
    pub fn value(&self) -> Option<SettingValue> {
        self.member.read(&self.target.borrow())
    }

    /// Write a new value, coercing it to the declared type when needed
    pub fn set_value(&self, value: impl Into<SettingValue>) {
        self.assign(Some(value.into()));
    }

    /// Write a value that may be absent
    ///
    /// Failures are reported once to the sink and swallowed. The member keeps
    /// whatever state the failed write left behind.
    pub fn assign(&self, value: Option<SettingValue>) {
        if let Err(error) = self.write(value.clone()) {
            let attempted = value.map(|v| v.to_string()).unwrap_or_default();
            let message = format!("Unable to set new value '{attempted}' for '{self}': {error}");
            self.sink.warn(&message, &error);
        }
    }

    fn write(&self, value: Option<SettingValue>) -> Result<(), WriteError> {
        let value_type = self.member.value_type();
        let value = match value {
            Some(v) if v.kind() != value_type.kind => Some(convert(v, value_type.kind)?),
            Some(v) => Some(v),
            None if !value_type.nullable => {
                return Err(WriteError::MissingValue {
                    member: self.member.name(),
                    expected: value_type,
                });
            }
            None => None,
        };

        let mut target = self
            .target
            .try_borrow_mut()
            .map_err(|_| WriteError::TargetBusy)?;
        self.member.write(&mut target, value)?;

        tracing::trace!(setting = self.member.name(), "setting written");
        Ok(())
    }

    /// Baseline the current value is compared against
    pub fn default(&self) -> Option<&SettingValue> {
        self.default.as_ref()
    }

    pub fn set_default(&mut self, value: Option<SettingValue>) {
        self.default = value;
    }

    // ===== Baseline operations =====

    /// Whether the current value differs from the default
    ///
    /// Floating point values are compared with an epsilon tolerance, see
    /// [`FloatComparison`]; everything else by equality.
    pub fn changed(&self) -> bool {
        let value = self.value();
        match &value {
            Some(current) if current.is_float() => {
                float_changed(current, self.default.as_ref(), self.config.float_comparison)
            }
            _ => value != self.default,
        }
    }

    /// Make the current value the new default
    pub fn reload(&mut self) {
        self.default = self.value();
    }

    /// Write the default back into the target
    ///
    /// Goes through the same coercion and failure reporting as [`Self::assign`].
    pub fn reset(&self) {
        self.assign(self.default.clone());
    }
}

fn float_changed(current: &SettingValue, default: Option<&SettingValue>, mode: FloatComparison) -> bool {
    let Some(baseline) = default.and_then(SettingValue::as_f64) else {
        return true;
    };
    let Some(current_f64) = current.as_f64() else {
        return true;
    };

    match (mode, current) {
        (FloatComparison::DoublePrecision, SettingValue::F64(_)) => {
            (current_f64 - baseline).abs() > f64::EPSILON
        }
        _ => ((current_f64 as f32) - (baseline as f32)).abs() > f32::EPSILON,
    }
}

impl<T: Settings> fmt::Display for Setting<'_, T> {
    /// `<Type> <DeclaringType>.<Name>[*] = <Value>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declaring_type = self.config.type_names.render(self.declaring_type());
        // Rendered while a write holds the target, e.g. when reporting TargetBusy
        if self.target.try_borrow().is_err() {
            return write!(f, "{} {}.{} = <borrowed>", self.value_type(), declaring_type, self.name());
        }

        let marker = if self.changed() { "*" } else { "" };
        let value = self.value().map(|v| v.to_string()).unwrap_or_default();
        write!(
            f,
            "{} {}.{}{} = {}",
            self.value_type(),
            declaring_type,
            self.name(),
            marker,
            value
        )
    }
}

impl<T: Settings> fmt::Debug for Setting<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("member", self.member)
            .field("default", &self.default)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
