use std::fs;
use std::path::Path;

use addonforge_core::{PropertyValue, ValueKind};
use serde::Deserialize;

use crate::{Difficulty, SchemaEntry, SchemaField, SchemaKind, SchemaPackError, SchemaRegistry};

/// Schema pack entry as written on disk.
#[derive(Debug, Deserialize)]
struct EntryDefinition {
    name: String,
    kind: SchemaKind,
    category: String,
    #[serde(default)]
    subcategory: Option<String>,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    description: String,
    #[serde(default)]
    shorthand: bool,
    #[serde(default)]
    properties: Vec<FieldDefinition>,
}

/// Schema pack field as written on disk.
///
/// `value_kind` stays a string here so an unknown tag surfaces as
/// [`SchemaPackError::UnknownValueKind`] instead of a generic parse error.
#[derive(Debug, Deserialize)]
struct FieldDefinition {
    name: String,
    value_kind: String,
    #[serde(default)]
    default: Option<PropertyValue>,
    #[serde(default)]
    example: Option<PropertyValue>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    description: String,
}

/// Parse a schema pack (a JSON array of entries).
pub fn entries_from_str(input: &str) -> Result<Vec<SchemaEntry>, SchemaPackError> {
    let defs: Vec<EntryDefinition> = serde_json::from_str(input)?;
    defs.into_iter().map(entry_from_definition).collect()
}

/// Read and parse a schema pack from disk.
pub fn entries_from_file(path: &Path) -> Result<Vec<SchemaEntry>, SchemaPackError> {
    let data = fs::read_to_string(path)?;
    entries_from_str(&data)
}

/// Load schema packs on top of the built-in catalog.
pub fn registry_with_packs<P: AsRef<Path>>(
    packs: &[P],
) -> Result<SchemaRegistry, SchemaPackError> {
    let mut registry = SchemaRegistry::builtin();
    for pack in packs {
        let entries = entries_from_file(pack.as_ref())?;
        tracing::info!(
            path = %pack.as_ref().display(),
            entries = entries.len(),
            "loaded schema pack"
        );
        registry.extend(entries)?;
    }
    Ok(registry)
}

fn entry_from_definition(def: EntryDefinition) -> Result<SchemaEntry, SchemaPackError> {
    let properties = def
        .properties
        .into_iter()
        .map(|field| field_from_definition(&def.name, field))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SchemaEntry {
        name: def.name,
        kind: def.kind,
        category: def.category,
        subcategory: def.subcategory,
        difficulty: def.difficulty,
        description: def.description,
        shorthand: def.shorthand,
        properties,
    })
}

fn field_from_definition(
    entry: &str,
    def: FieldDefinition,
) -> Result<SchemaField, SchemaPackError> {
    let kind: ValueKind = def
        .value_kind
        .parse()
        .map_err(|_| SchemaPackError::UnknownValueKind {
            entry: entry.to_string(),
            field: def.name.clone(),
            value_kind: def.value_kind.clone(),
        })?;
    // Packs may write an exact range as a bare number; store it typed.
    let coerce = |value: Option<PropertyValue>| {
        value.map(|v| PropertyValue::from_json(&v.to_json(), kind).unwrap_or(v))
    };
    Ok(SchemaField {
        name: def.name,
        kind,
        default: coerce(def.default),
        example: coerce(def.example),
        options: def.options,
        min: def.min,
        max: def.max,
        required: def.required,
        deprecated: def.deprecated,
        description: def.description,
    })
}
