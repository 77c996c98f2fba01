//! Default-value synthesis for freshly attached functions, conditions and
//! components.
//!
//! Precedence, first match wins:
//!
//! 1. the field's declared `default`;
//! 2. per kind:
//!    - number: `min`, then `example`, then `0`
//!    - boolean: `example`, then `false`
//!    - string: first option, then `example`, then `""`
//!    - range: `example`, then `{min: 1, max: 3}`
//!    - array: `example`, then `[]`
//!    - object: `example`, then `{}`

use std::collections::BTreeMap;

use addonforge_core::{PropertyValue, ValueKind, ValueRange};
use serde_json::Map;

use crate::{SchemaEntry, SchemaField};

/// Where a synthesized value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    /// The field's declared default.
    Declared,
    /// The field's lower bound.
    Minimum,
    /// The first enumerated option.
    FirstOption,
    /// The field's example value.
    Example,
    /// The kind's built-in fallback.
    Fallback,
}

/// Produce a default value for `field`.
pub fn synthesize_default(field: &SchemaField) -> PropertyValue {
    synthesize_with_source(field).0
}

/// Produce a default value for `field` along with the rule that chose it.
pub fn synthesize_with_source(field: &SchemaField) -> (PropertyValue, DefaultSource) {
    if let Some(default) = &field.default {
        return (default.clone(), DefaultSource::Declared);
    }
    let example = field
        .example
        .clone()
        .map(|value| (value, DefaultSource::Example));

    match field.kind {
        ValueKind::Number => field
            .min
            .map(|min| (PropertyValue::number(min), DefaultSource::Minimum))
            .or(example)
            .unwrap_or((PropertyValue::from(0_i64), DefaultSource::Fallback)),
        ValueKind::Boolean => {
            example.unwrap_or((PropertyValue::Boolean(false), DefaultSource::Fallback))
        }
        ValueKind::String => field
            .options
            .first()
            .map(|opt| (PropertyValue::String(opt.clone()), DefaultSource::FirstOption))
            .or(example)
            .unwrap_or((PropertyValue::String(String::new()), DefaultSource::Fallback)),
        ValueKind::Range => example.unwrap_or((
            PropertyValue::Range(ValueRange::new(1, 3)),
            DefaultSource::Fallback,
        )),
        ValueKind::Array => {
            example.unwrap_or((PropertyValue::Array(Vec::new()), DefaultSource::Fallback))
        }
        ValueKind::Object => {
            example.unwrap_or((PropertyValue::Object(Map::new()), DefaultSource::Fallback))
        }
    }
}

/// Initial property map for a newly attached instance of `entry`.
///
/// Deprecated optional fields are left out so new content does not start
/// with warnings.
pub fn default_properties(entry: &SchemaEntry) -> BTreeMap<String, PropertyValue> {
    entry
        .properties
        .iter()
        .filter(|field| field.required || !field.deprecated)
        .map(|field| (field.name.clone(), synthesize_default(field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SchemaKind, SchemaRegistry};
    use serde_json::json;

    #[test]
    fn declared_default_wins_over_everything() {
        let field = SchemaField::number("value")
            .min(1.0)
            .example(PropertyValue::from(5_i64))
            .default_number(20.0);
        assert_eq!(
            synthesize_with_source(&field),
            (PropertyValue::from(20_i64), DefaultSource::Declared)
        );
    }

    #[test]
    fn number_prefers_min_then_example_then_zero() {
        let with_min = SchemaField::number("n")
            .min(2.0)
            .example(PropertyValue::from(9_i64));
        assert_eq!(synthesize_default(&with_min), PropertyValue::from(2_i64));

        let with_example = SchemaField::number("n").example(PropertyValue::from(9_i64));
        assert_eq!(synthesize_default(&with_example), PropertyValue::from(9_i64));

        assert_eq!(
            synthesize_with_source(&SchemaField::number("n")),
            (PropertyValue::from(0_i64), DefaultSource::Fallback)
        );
    }

    #[test]
    fn string_prefers_first_option() {
        let field = SchemaField::string("entity")
            .options(&["this", "killer"])
            .example("killer");
        assert_eq!(
            synthesize_with_source(&field),
            (PropertyValue::from("this"), DefaultSource::FirstOption)
        );
        assert_eq!(
            synthesize_default(&SchemaField::string("name").example("Relic")),
            PropertyValue::from("Relic")
        );
        assert_eq!(
            synthesize_default(&SchemaField::string("name")),
            PropertyValue::from("")
        );
    }

    #[test]
    fn kind_fallbacks() {
        assert_eq!(
            synthesize_default(&SchemaField::boolean("b")),
            PropertyValue::Boolean(false)
        );
        assert_eq!(
            synthesize_default(&SchemaField::range("r")).to_json(),
            json!({"min": 1, "max": 3})
        );
        assert_eq!(synthesize_default(&SchemaField::array("a")).to_json(), json!([]));
        assert_eq!(synthesize_default(&SchemaField::object("o")).to_json(), json!({}));
    }

    #[test]
    fn every_registered_field_synthesizes_its_own_kind() {
        let registry = SchemaRegistry::builtin();
        for entry in registry.all() {
            for field in &entry.properties {
                let value = synthesize_default(field);
                assert_eq!(
                    value.kind(),
                    field.kind,
                    "{}.{} synthesized the wrong kind",
                    entry.name,
                    field.name
                );
            }
        }
    }

    #[test]
    fn every_registered_default_passes_its_own_checks() {
        let registry = SchemaRegistry::builtin();
        for entry in registry.all() {
            for (name, value) in default_properties(entry) {
                let field = entry.field_named(&name).unwrap();
                assert!(
                    field.check_value(&value).is_ok(),
                    "{}.{name} default {value:?} fails its own field",
                    entry.name
                );
            }
        }
    }

    #[test]
    fn fully_defaulted_entry_uses_only_declared_values() {
        let registry = SchemaRegistry::builtin();
        let entry = registry
            .lookup(SchemaKind::LootCondition, "random_chance_with_looting")
            .unwrap();
        assert!(entry.properties.iter().all(|f| f.default.is_some()));
        for field in &entry.properties {
            let (value, source) = synthesize_with_source(field);
            assert_eq!(source, DefaultSource::Declared);
            assert_eq!(Some(value), field.default);
        }
    }

    #[test]
    fn deprecated_optional_fields_are_not_synthesized() {
        let entry = SchemaEntry::new(SchemaKind::ItemComponent, "minecraft:icon", "Visual")
            .field(SchemaField::string("texture").deprecated())
            .field(SchemaField::object("textures"));
        let props = default_properties(&entry);
        assert!(!props.contains_key("texture"));
        assert!(props.contains_key("textures"));
    }
}
