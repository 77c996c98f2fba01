use addonforge_core::{PropertyValue, ValueKind};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One configurable property of a schema entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaField {
    /// Property key, unique within its entry.
    pub name: String,
    /// Expected value shape.
    #[serde(rename = "value_kind")]
    pub kind: ValueKind,
    /// Declared default, used verbatim when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertyValue>,
    /// Example value, the fallback when no default exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<PropertyValue>,
    /// Allowed values for string fields (empty = free text).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Inclusive lower bound for numbers and range ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound for numbers and range ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Whether documents must provide this property.
    pub required: bool,
    /// Whether using this property earns a deprecation warning.
    pub deprecated: bool,
    /// One-line human description.
    pub description: String,
}

/// Why a single value failed its field's checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldViolation {
    /// Runtime shape does not match the declared kind.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Declared kind.
        expected: ValueKind,
        /// JSON type actually present.
        found: &'static str,
    },
    /// Number (or range end) below the declared minimum.
    #[error("{value} is below the minimum of {min}")]
    BelowMinimum {
        /// Offending value.
        value: f64,
        /// Declared bound.
        min: f64,
    },
    /// Number (or range end) above the declared maximum.
    #[error("{value} is above the maximum of {max}")]
    AboveMaximum {
        /// Offending value.
        value: f64,
        /// Declared bound.
        max: f64,
    },
    /// Range whose `min` exceeds its `max`.
    #[error("range min {min} is greater than max {max}")]
    RangeOutOfOrder {
        /// Range lower end.
        min: f64,
        /// Range upper end.
        max: f64,
    },
    /// String not among the enumerated options.
    #[error("'{value}' is not one of: {}", .options.join(", "))]
    NotAnOption {
        /// Offending value.
        value: String,
        /// Allowed values.
        options: Vec<String>,
    },
}

impl SchemaField {
    /// Create a field of the given kind with no default, bounds or options.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            example: None,
            options: Vec::new(),
            min: None,
            max: None,
            required: false,
            deprecated: false,
            description: String::new(),
        }
    }

    /// Shorthand for a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Number)
    }

    /// Shorthand for a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Boolean)
    }

    /// Shorthand for a string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::String)
    }

    /// Shorthand for a range field.
    pub fn range(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Range)
    }

    /// Shorthand for an array field.
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Array)
    }

    /// Shorthand for an object field.
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Object)
    }

    /// Set the declared default.
    pub fn default_value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set a float default (whole numbers stay integral).
    pub fn default_number(self, value: f64) -> Self {
        self.default_value(PropertyValue::number(value))
    }

    /// Set the example value.
    pub fn example(mut self, value: impl Into<PropertyValue>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Restrict a string field to the given options.
    pub fn options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|opt| opt.to_string()).collect();
        self
    }

    /// Set the inclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set both bounds.
    pub fn bounds(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check a raw JSON value against kind, bounds and options.
    ///
    /// Only the first violation is reported.
    pub fn check(&self, value: &Value) -> Result<(), FieldViolation> {
        if !self.kind.matches(value) {
            return Err(FieldViolation::TypeMismatch {
                expected: self.kind,
                found: json_type_name(value),
            });
        }

        match self.kind {
            ValueKind::Number => {
                if let Some(n) = value.as_f64() {
                    self.check_bounds(n)?;
                }
            }
            ValueKind::Range => {
                let (min, max) = match value {
                    Value::Object(map) => (
                        map.get("min").and_then(Value::as_f64),
                        map.get("max").and_then(Value::as_f64),
                    ),
                    other => (other.as_f64(), other.as_f64()),
                };
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(FieldViolation::RangeOutOfOrder { min, max });
                    }
                    self.check_bounds(min)?;
                    self.check_bounds(max)?;
                }
            }
            ValueKind::String => {
                if let Some(s) = value.as_str() {
                    if !self.options.is_empty() && !self.options.iter().any(|opt| opt == s) {
                        return Err(FieldViolation::NotAnOption {
                            value: s.to_string(),
                            options: self.options.clone(),
                        });
                    }
                }
            }
            ValueKind::Boolean | ValueKind::Array | ValueKind::Object => {}
        }
        Ok(())
    }

    /// Check a typed value; see [`SchemaField::check`].
    pub fn check_value(&self, value: &PropertyValue) -> Result<(), FieldViolation> {
        self.check(&value.to_json())
    }

    fn check_bounds(&self, value: f64) -> Result<(), FieldViolation> {
        if let Some(min) = self.min {
            if value < min {
                return Err(FieldViolation::BelowMinimum { value, min });
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(FieldViolation::AboveMaximum { value, max });
            }
        }
        Ok(())
    }
}

/// JSON type name used in diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
