//! Checks shared by every document kind.

use std::cmp::Ordering;

use addonforge_core::{Identifier, DEFAULT_NAMESPACE};
use addonforge_schema::{json_type_name, SchemaEntry, SchemaKind, SchemaRegistry};
use serde_json::{Map, Value};

use crate::report::{index, join, Report};

/// Object view of `value`, or a type error.
pub(crate) fn expect_object<'a>(
    report: &mut Report,
    path: &str,
    value: &'a Value,
) -> Option<&'a Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        other => {
            type_error(report, path, "object", other);
            None
        }
    }
}

/// Array view of `value`, or a type error.
pub(crate) fn expect_array<'a>(
    report: &mut Report,
    path: &str,
    value: &'a Value,
) -> Option<&'a Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        other => {
            type_error(report, path, "array", other);
            None
        }
    }
}

/// Required key lookup; records a missing-field error.
pub(crate) fn require<'a>(
    report: &mut Report,
    path: &str,
    object: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Value> {
    let value = object.get(key);
    if value.is_none() {
        report.missing(path, key);
    }
    value
}

pub(crate) fn type_error(report: &mut Report, path: &str, expected: &str, found: &Value) {
    report.error(
        path,
        format!("expected {expected}, found {}", json_type_name(found)),
    );
}

/// `namespace:name` with exactly one `:`.
pub(crate) fn check_identifier(report: &mut Report, path: &str, value: &Value) {
    match value.as_str() {
        Some(text) => {
            if let Err(err) = Identifier::parse(text) {
                report.error(path, err.to_string());
            }
        }
        None => type_error(report, path, "string", value),
    }
}

/// Item reference; a bare name is read in the `minecraft` namespace.
pub(crate) fn check_item_name(report: &mut Report, path: &str, value: &Value) {
    match value.as_str() {
        Some(text) => {
            if let Err(err) = Identifier::parse_with_default_namespace(text, DEFAULT_NAMESPACE) {
                report.error(path, err.to_string());
            }
        }
        None => type_error(report, path, "string", value),
    }
}

/// A whole number or `{min, max}` of whole numbers with `0 <= min <= max`.
pub(crate) fn check_int_range(report: &mut Report, path: &str, value: &Value) {
    match value {
        Value::Number(_) => {
            if integer(report, path, value).is_some_and(|v| v < 0) {
                report.error(path, "cannot be negative");
            }
        }
        Value::Object(map) => {
            let min = require(report, path, map, "min")
                .and_then(|v| integer(report, &join(path, "min"), v));
            let max = require(report, path, map, "max")
                .and_then(|v| integer(report, &join(path, "max"), v));
            if let (Some(min), Some(max)) = (min, max) {
                if min < 0 || max < 0 {
                    report.error(path, "cannot be negative");
                }
                if min > max {
                    report.error(path, format!("min {min} is greater than max {max}"));
                }
            }
        }
        other => type_error(report, path, "integer or {min, max}", other),
    }
}

/// Whole number check; returns the value when it is one.
pub(crate) fn integer(report: &mut Report, path: &str, value: &Value) -> Option<i64> {
    match value.as_i64() {
        Some(n) => Some(n),
        None => {
            type_error(report, path, "integer", value);
            None
        }
    }
}

/// Order two dotted versions numerically; `None` if either is malformed.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let parse = |text: &str| -> Option<Vec<u32>> {
        text.split('.').map(|part| part.parse().ok()).collect()
    };
    let (mut a, mut b) = (parse(a)?, parse(b)?);
    let len = a.len().max(b.len());
    a.resize(len, 0);
    b.resize(len, 0);
    Some(a.cmp(&b))
}

/// Required string `format_version`, warned when below `recommended`.
pub(crate) fn check_format_version(
    report: &mut Report,
    root: &Map<String, Value>,
    recommended: &str,
) {
    let Some(value) = require(report, "", root, "format_version") else {
        return;
    };
    let Some(text) = value.as_str() else {
        type_error(report, "format_version", "string", value);
        return;
    };
    match compare_versions(text, recommended) {
        None => report.error(
            "format_version",
            format!("'{text}' is not a dotted version such as 1.21.0"),
        ),
        Some(Ordering::Less) => report.warn(
            "format_version",
            format!("{text} is older than the recommended {recommended}"),
        ),
        Some(_) => {}
    }
}

/// Check an object against a schema entry's fields.
pub(crate) fn check_properties(
    report: &mut Report,
    path: &str,
    entry: &SchemaEntry,
    body: &Map<String, Value>,
) {
    for field in &entry.properties {
        let field_path = join(path, &field.name);
        match body.get(&field.name) {
            None if field.required => report.missing(path, &field.name),
            None => {}
            Some(value) => {
                if let Err(violation) = field.check(value) {
                    report.error(&field_path, violation.to_string());
                }
                if field.deprecated {
                    let hint = if field.description.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", field.description)
                    };
                    report.warn(&field_path, format!("'{}' is deprecated{hint}", field.name));
                }
            }
        }
    }
}

/// A `functions` or `conditions` array of loot modifiers.
pub(crate) fn check_modifier_list(
    report: &mut Report,
    path: &str,
    value: &Value,
    kind: SchemaKind,
    registry: &SchemaRegistry,
) {
    let discriminator = match kind {
        SchemaKind::LootCondition => "condition",
        _ => "function",
    };
    let Some(items) = expect_array(report, path, value) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let item_path = index(path, i);
        let Some(body) = expect_object(report, &item_path, item) else {
            continue;
        };
        let Some(name) = require(report, &item_path, body, discriminator) else {
            continue;
        };
        let Some(name) = name.as_str() else {
            type_error(report, &join(&item_path, discriminator), "string", name);
            continue;
        };
        match registry.lookup(kind, name) {
            Ok(entry) => check_properties(report, &item_path, entry, body),
            Err(_) => report.warn(
                &item_path,
                format!("unknown {kind} '{name}'; it may be newer than this registry"),
            ),
        }
    }
}
