//! Lenient conversions used by the typed getters.
//!
//! Each target type has exactly one total coercion function. Every function
//! returns `None` instead of failing when the input cannot be represented, and
//! the typed getters on [`crate::Store`] and [`crate::Snapshot`] turn that
//! `None` into their documented default.
//!
//! | target   | accepts                                                     |
//! |----------|-------------------------------------------------------------|
//! | `i32`    | `Int` in range, finite `Float` (truncated) in range, integer text |
//! | `i64`    | `Int`, finite `Float` (truncated) in range, integer text    |
//! | `f64`    | `Int`, `Float`, float text                                  |
//! | `bool`   | `Bool`, `"true"`/`"false"` text (ASCII case-insensitive)    |
//! | `String` | `Text`                                                      |

use super::Value;
use crate::snapshot::SnapshotValue;

/// Borrowed view of a value as seen by the coercion functions.
///
/// Both live [`Value`]s and frozen [`SnapshotValue`]s convert into this view,
/// so the same coercion rules apply to the store and to its snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
    /// A list or a section; never coerces to a scalar target
    Composite,
}

impl<'a> From<&'a Value> for Scalar<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Int(n) => Scalar::Int(*n),
            Value::Float(f) => Scalar::Float(*f),
            Value::Text(s) => Scalar::Text(s),
            Value::List(_) | Value::Section(_) => Scalar::Composite,
        }
    }
}

impl<'a> From<&'a SnapshotValue> for Scalar<'a> {
    fn from(value: &'a SnapshotValue) -> Self {
        match value {
            SnapshotValue::Null => Scalar::Null,
            SnapshotValue::Bool(b) => Scalar::Bool(*b),
            SnapshotValue::Int(n) => Scalar::Int(*n),
            SnapshotValue::Float(f) => Scalar::Float(*f),
            SnapshotValue::Text(s) => Scalar::Text(s),
            SnapshotValue::List(_) | SnapshotValue::Section(_) => Scalar::Composite,
        }
    }
}

// 2^63 is exactly representable; every finite f64 below it truncates into i64
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn truncate_to_long(f: f64) -> Option<i64> {
    if f.is_finite() && f >= -I64_UPPER && f < I64_UPPER {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Coerces to a 32-bit integer.
pub fn to_int<'a>(value: impl Into<Scalar<'a>>) -> Option<i32> {
    match value.into() {
        Scalar::Int(n) => i32::try_from(n).ok(),
        Scalar::Float(f) => truncate_to_long(f).and_then(|n| i32::try_from(n).ok()),
        Scalar::Text(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerces to a 64-bit integer.
pub fn to_long<'a>(value: impl Into<Scalar<'a>>) -> Option<i64> {
    match value.into() {
        Scalar::Int(n) => Some(n),
        Scalar::Float(f) => truncate_to_long(f),
        Scalar::Text(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerces to a double.
pub fn to_double<'a>(value: impl Into<Scalar<'a>>) -> Option<f64> {
    match value.into() {
        Scalar::Int(n) => Some(n as f64),
        Scalar::Float(f) => Some(f),
        Scalar::Text(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerces to a boolean.
pub fn to_bool<'a>(value: impl Into<Scalar<'a>>) -> Option<bool> {
    match value.into() {
        Scalar::Bool(b) => Some(b),
        Scalar::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Scalar::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Coerces to an owned string. Only text qualifies.
pub fn to_string<'a>(value: impl Into<Scalar<'a>>) -> Option<String> {
    match value.into() {
        Scalar::Text(s) => Some(s.to_string()),
        _ => None,
    }
}

/// Types that the lenient list and scalar getters can produce.
pub trait Coerce: Sized {
    /// Converts the view, or returns `None` if it does not fit.
    fn coerce(value: Scalar<'_>) -> Option<Self>;
}

impl Coerce for i32 {
    fn coerce(value: Scalar<'_>) -> Option<Self> {
        to_int(value)
    }
}

impl Coerce for i64 {
    fn coerce(value: Scalar<'_>) -> Option<Self> {
        to_long(value)
    }
}

impl Coerce for f64 {
    fn coerce(value: Scalar<'_>) -> Option<Self> {
        to_double(value)
    }
}

impl Coerce for bool {
    fn coerce(value: Scalar<'_>) -> Option<Self> {
        to_bool(value)
    }
}

impl Coerce for String {
    fn coerce(value: Scalar<'_>) -> Option<Self> {
        to_string(value)
    }
}
