//! Typed property values shared by the schema registry, builder and validator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Shape tag carried by every schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// Integer or floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Free text, or one of an enumerated option list.
    String,
    /// `{ "min": n, "max": n }` (a bare number is accepted as an exact range).
    Range,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

/// Error returned when a value kind tag is not one this build knows about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value kind '{0}'")]
pub struct UnknownValueKind(pub String);

impl ValueKind {
    /// All kinds, in declaration order.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Number,
        ValueKind::Boolean,
        ValueKind::String,
        ValueKind::Range,
        ValueKind::Array,
        ValueKind::Object,
    ];

    /// Lowercase tag used in schema packs and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Range => "range",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    /// Whether a raw JSON value has the runtime shape of this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::Number => value.is_number(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::String => value.is_string(),
            ValueKind::Range => match value {
                Value::Number(_) => true,
                Value::Object(map) => {
                    map.get("min").is_some_and(Value::is_number)
                        && map.get("max").is_some_and(Value::is_number)
                }
                _ => false,
            },
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = UnknownValueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownValueKind(s.to_string()))
    }
}

impl Serialize for ValueKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValueKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Numeric `{min, max}` pair used by range-typed properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRange {
    /// Lower bound (inclusive).
    pub min: Number,
    /// Upper bound (inclusive).
    pub max: Number,
}

impl ValueRange {
    /// Construct a range from any integer-like bounds.
    pub fn new(min: impl Into<Number>, max: impl Into<Number>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Construct a range from float bounds (e.g. damage fractions).
    pub fn fractional(min: f64, max: f64) -> Self {
        Self {
            min: number_from_f64(min),
            max: number_from_f64(max),
        }
    }

    /// True when `min <= max`.
    pub fn is_ordered(&self) -> bool {
        match (self.min.as_f64(), self.max.as_f64()) {
            (Some(min), Some(max)) => min <= max,
            _ => false,
        }
    }
}

/// Integer `{min, max}` pair used for rolls and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
}

impl IntRange {
    /// Construct a range.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// A range with `min == max == value`.
    pub const fn exact(value: i64) -> Self {
        Self::new(value, value)
    }

    /// True when `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// JSON form: `{"min": .., "max": ..}`.
    pub fn to_json(self) -> Value {
        let mut map = Map::new();
        map.insert("min".into(), Value::from(self.min));
        map.insert("max".into(), Value::from(self.max));
        Value::Object(map)
    }
}

/// A concrete, typed property value.
///
/// Deserialization tries the variants in declaration order, so a
/// `{min, max}` object with no other keys becomes a [`PropertyValue::Range`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Boolean(bool),
    /// String value.
    String(String),
    /// Numeric range.
    Range(ValueRange),
    /// Array of arbitrary JSON values.
    Array(Vec<Value>),
    /// Object of arbitrary JSON values.
    Object(Map<String, Value>),
}

impl PropertyValue {
    /// The kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Number(_) => ValueKind::Number,
            PropertyValue::Boolean(_) => ValueKind::Boolean,
            PropertyValue::String(_) => ValueKind::String,
            PropertyValue::Range(_) => ValueKind::Range,
            PropertyValue::Array(_) => ValueKind::Array,
            PropertyValue::Object(_) => ValueKind::Object,
        }
    }

    /// Number value from a float; integral floats become JSON integers.
    pub fn number(value: f64) -> Self {
        PropertyValue::Number(number_from_f64(value))
    }

    /// Convert to a raw JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Number(n) => Value::Number(n.clone()),
            PropertyValue::Boolean(b) => Value::Bool(*b),
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::Range(range) => {
                let mut map = Map::new();
                map.insert("min".into(), Value::Number(range.min.clone()));
                map.insert("max".into(), Value::Number(range.max.clone()));
                Value::Object(map)
            }
            PropertyValue::Array(items) => Value::Array(items.clone()),
            PropertyValue::Object(map) => Value::Object(map.clone()),
        }
    }

    /// Interpret a raw JSON value as the given kind.
    ///
    /// Returns `None` when the value does not have that kind's shape.
    pub fn from_json(value: &Value, kind: ValueKind) -> Option<Self> {
        if !kind.matches(value) {
            return None;
        }
        Some(match (kind, value) {
            (ValueKind::Number, Value::Number(n)) => PropertyValue::Number(n.clone()),
            (ValueKind::Boolean, Value::Bool(b)) => PropertyValue::Boolean(*b),
            (ValueKind::String, Value::String(s)) => PropertyValue::String(s.clone()),
            (ValueKind::Range, Value::Number(n)) => {
                PropertyValue::Range(ValueRange::new(n.clone(), n.clone()))
            }
            (ValueKind::Range, Value::Object(map)) => PropertyValue::Range(ValueRange {
                min: map.get("min")?.as_number()?.clone(),
                max: map.get("max")?.as_number()?.clone(),
            }),
            (ValueKind::Array, Value::Array(items)) => PropertyValue::Array(items.clone()),
            (ValueKind::Object, Value::Object(map)) => PropertyValue::Object(map.clone()),
            _ => return None,
        })
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value.into())
    }
}

impl From<ValueRange> for PropertyValue {
    fn from(value: ValueRange) -> Self {
        PropertyValue::Range(value)
    }
}

/// Convert a float to a JSON number, keeping whole values integral.
///
/// Non-finite input maps to `0`.
pub fn number_from_f64(value: f64) -> Number {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Number::from(value as i64)
    } else {
        Number::from_f64(value).unwrap_or_else(|| Number::from(0))
    }
}
