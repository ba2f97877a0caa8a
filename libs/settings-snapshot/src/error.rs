//! Error types for the settings snapshot registry
//!
//! Only [`SnapshotError`] ever reaches a caller. [`WriteError`] and
//! [`ConversionError`] are reported to a [`crate::WriteFailureSink`] and
//! swallowed by the setting handle.

use crate::value::{SettingType, ValueType};

/// Errors propagated to callers of the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A required argument was absent
    #[error("Invalid argument: {name} must not be absent")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
    },
}

/// Failure to coerce a value into a member's declared type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The value's text form is not valid for the target type
    #[error("'{value}' is not a valid {target}")]
    Format {
        /// Rendered source value
        value: String,
        /// Declared target type
        target: SettingType,
    },
    /// The value is outside the target type's range
    #[error("'{value}' is out of range for {target}")]
    Overflow {
        /// Rendered source value
        value: String,
        /// Declared target type
        target: SettingType,
    },
    /// The input has no scalar representation (JSON arrays, objects, null)
    #[error("unsupported input: {0}")]
    Unsupported(String),
}

/// Failure while writing a value into the target object
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("member '{member}' of type {expected} cannot hold an absent value")]
    MissingValue {
        member: &'static str,
        expected: ValueType,
    },

    #[error("member '{0}' is read-only")]
    ReadOnly(&'static str),

    #[error("target object is already borrowed")]
    TargetBusy,

    #[error("rejected by target: {0}")]
    Rejected(#[source] anyhow::Error),
}
