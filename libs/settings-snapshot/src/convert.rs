//! Type coercion for incoming setting values
//!
//! [`convert`] is total: every input yields either the coerced value or a
//! [`ConversionError`], so the write path can log and continue without
//! unwinding.

use crate::error::ConversionError;
use crate::value::{SettingType, SettingValue};

/// Coerce `value` into `target`
///
/// Rules:
/// - same kind: returned unchanged
/// - anything to `String`: its display form
/// - `String` to a number: the trimmed text parsed as the target type
/// - `String` to `Bool`: case-insensitive `true` / `false`
/// - `Bool` to a number: `1` / `0`, a number to `Bool`: non-zero
/// - integer to integer: range checked
/// - float to integer: rounded half to even, then range checked
/// - any number to a float: numeric cast
pub fn convert(value: SettingValue, target: SettingType) -> Result<SettingValue, ConversionError> {
    if value.kind() == target {
        return Ok(value);
    }

    match (value, target) {
        (value, SettingType::String) => Ok(SettingValue::String(value.to_string())),
        (SettingValue::String(text), target) => parse_text(&text, target),
        (SettingValue::Bool(v), target) => from_integer(i128::from(v), target),
        (value, SettingType::Bool) => Ok(SettingValue::Bool(
            value.as_f64().is_some_and(|v| v != 0.0),
        )),
        (SettingValue::F32(v), target) => from_float(f64::from(v), target),
        (SettingValue::F64(v), target) => from_float(v, target),
        (SettingValue::I32(v), target) => from_integer(i128::from(v), target),
        (SettingValue::I64(v), target) => from_integer(i128::from(v), target),
        (SettingValue::U32(v), target) => from_integer(i128::from(v), target),
        (SettingValue::U64(v), target) => from_integer(i128::from(v), target),
    }
}

fn parse_text(text: &str, target: SettingType) -> Result<SettingValue, ConversionError> {
    let trimmed = text.trim();
    let format_error = || ConversionError::Format {
        value: text.to_string(),
        target,
    };

    let parsed = match target {
        SettingType::Bool => {
            if trimmed.eq_ignore_ascii_case("true") {
                SettingValue::Bool(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                SettingValue::Bool(false)
            } else {
                return Err(format_error());
            }
        }
        SettingType::I32 => SettingValue::I32(parse_int(trimmed, text, target)?),
        SettingType::I64 => SettingValue::I64(parse_int(trimmed, text, target)?),
        SettingType::U32 => SettingValue::U32(parse_int(trimmed, text, target)?),
        SettingType::U64 => SettingValue::U64(parse_int(trimmed, text, target)?),
        SettingType::F32 => SettingValue::F32(trimmed.parse().map_err(|_| format_error())?),
        SettingType::F64 => SettingValue::F64(trimmed.parse().map_err(|_| format_error())?),
        SettingType::String => SettingValue::String(text.to_string()),
    };
    Ok(parsed)
}

/// Parse an integer, telling overflow apart from malformed text
fn parse_int<T>(trimmed: &str, original: &str, target: SettingType) -> Result<T, ConversionError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    use std::num::IntErrorKind;

    trimmed.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConversionError::Overflow {
            value: original.to_string(),
            target,
        },
        _ => ConversionError::Format {
            value: original.to_string(),
            target,
        },
    })
}

fn from_integer(v: i128, target: SettingType) -> Result<SettingValue, ConversionError> {
    let overflow = || ConversionError::Overflow {
        value: v.to_string(),
        target,
    };

    let converted = match target {
        SettingType::Bool => SettingValue::Bool(v != 0),
        SettingType::I32 => SettingValue::I32(i32::try_from(v).map_err(|_| overflow())?),
        SettingType::I64 => SettingValue::I64(i64::try_from(v).map_err(|_| overflow())?),
        SettingType::U32 => SettingValue::U32(u32::try_from(v).map_err(|_| overflow())?),
        SettingType::U64 => SettingValue::U64(u64::try_from(v).map_err(|_| overflow())?),
        SettingType::F32 => SettingValue::F32(v as f32),
        SettingType::F64 => SettingValue::F64(v as f64),
        SettingType::String => SettingValue::String(v.to_string()),
    };
    Ok(converted)
}

fn from_float(v: f64, target: SettingType) -> Result<SettingValue, ConversionError> {
    match target {
        SettingType::F32 => Ok(SettingValue::F32(v as f32)),
        SettingType::F64 => Ok(SettingValue::F64(v)),
        SettingType::Bool => Ok(SettingValue::Bool(v != 0.0)),
        SettingType::String => Ok(SettingValue::String(v.to_string())),
        integer => {
            let rounded = v.round_ties_even();
            // i128 covers every integer target; anything outside it overflows below
            if !rounded.is_finite() || rounded.abs() >= 1.0e38 {
                return Err(ConversionError::Overflow {
                    value: v.to_string(),
                    target: integer,
                });
            }
            from_integer(rounded as i128, integer).map_err(|_| ConversionError::Overflow {
                value: v.to_string(),
                target: integer,
            })
        }
    }
}
