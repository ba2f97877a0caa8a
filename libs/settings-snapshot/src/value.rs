//! Declared member types and loosely typed setting values

use crate::convert::convert;
use crate::error::ConversionError;
use serde::Serialize;
use std::fmt;

/// Scalar kind of a settings member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    String,
}

impl SettingType {
    /// Rust spelling of the type
    pub fn as_str(self) -> &'static str {
        match self {
            SettingType::Bool => "bool",
            SettingType::I32 => "i32",
            SettingType::I64 => "i64",
            SettingType::U32 => "u32",
            SettingType::U64 => "u64",
            SettingType::F32 => "f32",
            SettingType::F64 => "f64",
            SettingType::String => "String",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, SettingType::F32 | SettingType::F64)
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared value type of a member: a scalar kind, optionally nullable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    pub kind: SettingType,
    /// Member is an `Option<_>` and accepts absence
    pub nullable: bool,
}

impl ValueType {
    pub const fn new(kind: SettingType) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(kind: SettingType) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// A runtime-typed setting value
///
/// Absence is expressed as `Option::<SettingValue>::None` by every API that
/// reads or writes members.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
}

impl SettingValue {
    /// Runtime type of this value
    pub fn kind(&self) -> SettingType {
        match self {
            SettingValue::Bool(_) => SettingType::Bool,
            SettingValue::I32(_) => SettingType::I32,
            SettingValue::I64(_) => SettingType::I64,
            SettingValue::U32(_) => SettingType::U32,
            SettingValue::U64(_) => SettingType::U64,
            SettingValue::F32(_) => SettingType::F32,
            SettingValue::F64(_) => SettingType::F64,
            SettingValue::String(_) => SettingType::String,
        }
    }

    pub fn is_float(&self) -> bool {
        self.kind().is_float()
    }

    /// Numeric view used by change detection; `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            SettingValue::I32(v) => Some(f64::from(*v)),
            SettingValue::I64(v) => Some(*v as f64),
            SettingValue::U32(v) => Some(f64::from(*v)),
            SettingValue::U64(v) => Some(*v as f64),
            SettingValue::F32(v) => Some(f64::from(*v)),
            SettingValue::F64(v) => Some(*v),
            SettingValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::I32(v) => write!(f, "{v}"),
            SettingValue::I64(v) => write!(f, "{v}"),
            SettingValue::U32(v) => write!(f, "{v}"),
            SettingValue::U64(v) => write!(f, "{v}"),
            SettingValue::F32(v) => write!(f, "{v}"),
            SettingValue::F64(v) => write!(f, "{v}"),
            SettingValue::String(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SettingValue {
                fn from(v: $ty) -> Self {
                    SettingValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::String(v.to_string())
    }
}

impl TryFrom<&serde_json::Value> for SettingValue {
    type Error = ConversionError;

    /// Maps a JSON scalar onto the narrowest matching value.
    ///
    /// Integers become `I64` (or `U64` above `i64::MAX`), other numbers `F64`.
    /// `null` is rejected; callers that accept absence check for it first.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Bool(v) => Ok(SettingValue::Bool(*v)),
            Value::String(v) => Ok(SettingValue::String(v.clone())),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(SettingValue::I64(v))
                } else if let Some(v) = n.as_u64() {
                    Ok(SettingValue::U64(v))
                } else if let Some(v) = n.as_f64() {
                    Ok(SettingValue::F64(v))
                } else {
                    Err(ConversionError::Unsupported(n.to_string()))
                }
            }
            other => Err(ConversionError::Unsupported(other.to_string())),
        }
    }
}

/// Bridge between a concrete field type and [`SettingValue`]
///
/// Implemented for the supported scalars and `Option<T>` of them; generated
/// member descriptors go through this trait for every read and write.
pub trait SettingField: Sized {
    /// Declared value type of a field of this type
    const VALUE_TYPE: ValueType;

    /// Read the field as a setting value
    fn to_setting(&self) -> Option<SettingValue>;

    /// Build a field value, coercing to the declared kind when needed
    fn from_setting(value: Option<SettingValue>) -> Result<Self, ConversionError>;
}

macro_rules! impl_setting_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SettingField for $ty {
                const VALUE_TYPE: ValueType = ValueType::new(SettingType::$variant);

                fn to_setting(&self) -> Option<SettingValue> {
                    Some(SettingValue::$variant(self.clone()))
                }

                fn from_setting(value: Option<SettingValue>) -> Result<Self, ConversionError> {
                    let value = value.ok_or_else(|| {
                        ConversionError::Unsupported(format!("absent value for {}", SettingType::$variant))
                    })?;
                    match convert(value, SettingType::$variant)? {
                        SettingValue::$variant(v) => Ok(v),
                        other => Err(ConversionError::Format {
                            value: other.to_string(),
                            target: SettingType::$variant,
                        }),
                    }
                }
            }
        )*
    };
}

impl_setting_field! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<T: SettingField> SettingField for Option<T> {
    const VALUE_TYPE: ValueType = ValueType::nullable(T::VALUE_TYPE.kind);

    fn to_setting(&self) -> Option<SettingValue> {
        self.as_ref().and_then(SettingField::to_setting)
    }

    fn from_setting(value: Option<SettingValue>) -> Result<Self, ConversionError> {
        value.map(|v| T::from_setting(Some(v))).transpose()
    }
}
