use std::collections::BTreeMap;

use addonforge_core::PropertyValue;
use addonforge_schema::{default_properties, SchemaEntry, SchemaKind, SchemaRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::EditError;

/// A schema entry instantiated with concrete property values.
///
/// Disabled instances stay in the tree so they can be re-enabled, but are
/// skipped by the projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configured {
    /// Registry name of the function, condition or component.
    pub schema_name: String,
    /// Typed property values keyed by field name.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    /// Keys carried through verbatim (e.g. from imported JSON).
    ///
    /// Typed properties win when a key appears in both maps.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
    /// Whether the projector emits this instance.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Emit the lone `value` property bare (components only).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shorthand: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// A loot function or loot condition.
pub type ConfiguredFunction = Configured;
/// A loot condition.
pub type ConfiguredCondition = Configured;

impl Configured {
    /// Instantiate `entry` with synthesized defaults.
    pub fn from_schema(entry: &SchemaEntry) -> Self {
        Self {
            schema_name: entry.name.clone(),
            properties: default_properties(entry),
            extra: Map::new(),
            enabled: true,
            shorthand: entry.shorthand,
        }
    }

    /// Replace one property after checking it against `entry`.
    pub fn set_property(
        &mut self,
        entry: &SchemaEntry,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), EditError> {
        let field = entry
            .field_named(property)
            .ok_or_else(|| EditError::UnknownProperty {
                schema: entry.name.clone(),
                property: property.to_string(),
            })?;
        // Coerce e.g. a bare number into an exact range before checking.
        let value = PropertyValue::from_json(&value.to_json(), field.kind).unwrap_or(value);
        field
            .check_value(&value)
            .map_err(|violation| EditError::InvalidProperty {
                schema: entry.name.clone(),
                property: property.to_string(),
                violation,
            })?;
        self.properties.insert(property.to_string(), value);
        Ok(())
    }

    /// Remove an optional property.
    pub fn clear_property(&mut self, entry: &SchemaEntry, property: &str) -> Result<(), EditError> {
        match entry.field_named(property) {
            Some(field) if field.required => Err(EditError::RequiredProperty {
                schema: entry.name.clone(),
                property: property.to_string(),
            }),
            Some(_) => {
                self.properties.remove(property);
                Ok(())
            }
            None => Err(EditError::UnknownProperty {
                schema: entry.name.clone(),
                property: property.to_string(),
            }),
        }
    }

    /// Flatten into `{discriminator: schema_name, ..extra, ..properties}`.
    pub fn flatten(&self, discriminator: &str) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in &self.extra {
            out.insert(key.clone(), value.clone());
        }
        for (key, value) in &self.properties {
            out.insert(key.clone(), value.to_json());
        }
        out.insert(discriminator.to_string(), Value::String(self.schema_name.clone()));
        out
    }

    /// Component body: the bare value for shorthand components, else the
    /// property object.
    pub fn component_body(&self) -> Value {
        if self.shorthand && self.extra.is_empty() && self.properties.len() == 1 {
            if let Some(value) = self.properties.values().next() {
                return value.to_json();
            }
        }
        let mut body = self.extra.clone();
        for (key, value) in &self.properties {
            body.insert(key.clone(), value.to_json());
        }
        Value::Object(body)
    }
}

/// Which modifier list of a pool or entry an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    /// `functions[]`.
    Function,
    /// `conditions[]`.
    Condition,
}

impl ModifierKind {
    /// Registry catalog the list draws from.
    pub fn schema_kind(self) -> SchemaKind {
        match self {
            ModifierKind::Function => SchemaKind::LootFunction,
            ModifierKind::Condition => SchemaKind::LootCondition,
        }
    }

    /// Key naming the schema entry inside each projected member.
    pub fn discriminator(self) -> &'static str {
        match self {
            ModifierKind::Function => "function",
            ModifierKind::Condition => "condition",
        }
    }

    /// Key of the projected array.
    pub fn list_key(self) -> &'static str {
        match self {
            ModifierKind::Function => "functions",
            ModifierKind::Condition => "conditions",
        }
    }
}

/// Anything that owns `functions` and `conditions` lists.
pub trait ModifierHost {
    /// Read one list.
    fn modifiers(&self, kind: ModifierKind) -> &[Configured];

    /// Mutate one list.
    fn modifiers_mut(&mut self, kind: ModifierKind) -> &mut Vec<Configured>;

    /// Attach a new instance with synthesized defaults; returns its index.
    fn attach(
        &mut self,
        registry: &SchemaRegistry,
        kind: ModifierKind,
        name: &str,
    ) -> Result<usize, EditError> {
        let entry = registry.lookup(kind.schema_kind(), name)?;
        let list = self.modifiers_mut(kind);
        list.push(Configured::from_schema(entry));
        Ok(list.len() - 1)
    }

    /// Remove and return an instance.
    fn detach(&mut self, kind: ModifierKind, index: usize) -> Result<Configured, EditError> {
        let list = self.modifiers_mut(kind);
        if index >= list.len() {
            return Err(no_such(kind, index));
        }
        Ok(list.remove(index))
    }

    /// Enable or disable an instance without removing it.
    fn set_enabled(
        &mut self,
        kind: ModifierKind,
        index: usize,
        enabled: bool,
    ) -> Result<(), EditError> {
        let item = self
            .modifiers_mut(kind)
            .get_mut(index)
            .ok_or_else(|| no_such(kind, index))?;
        item.enabled = enabled;
        Ok(())
    }

    /// Set one property of an instance, checked against its schema entry.
    fn set_modifier_property(
        &mut self,
        registry: &SchemaRegistry,
        kind: ModifierKind,
        index: usize,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), EditError> {
        let item = self
            .modifiers_mut(kind)
            .get_mut(index)
            .ok_or_else(|| no_such(kind, index))?;
        let entry = registry.lookup(kind.schema_kind(), &item.schema_name)?;
        item.set_property(entry, property, value)
    }

    /// Remove an optional property of an instance.
    fn clear_modifier_property(
        &mut self,
        registry: &SchemaRegistry,
        kind: ModifierKind,
        index: usize,
        property: &str,
    ) -> Result<(), EditError> {
        let item = self
            .modifiers_mut(kind)
            .get_mut(index)
            .ok_or_else(|| no_such(kind, index))?;
        let entry = registry.lookup(kind.schema_kind(), &item.schema_name)?;
        item.clear_property(entry, property)
    }

    /// Projected array of enabled members, or `None` when there are none.
    fn project_modifiers(&self, kind: ModifierKind) -> Option<Value> {
        let members: Vec<Value> = self
            .modifiers(kind)
            .iter()
            .filter(|item| item.enabled)
            .map(|item| Value::Object(item.flatten(kind.discriminator())))
            .collect();
        if members.is_empty() {
            None
        } else {
            Some(Value::Array(members))
        }
    }
}

fn no_such(kind: ModifierKind, index: usize) -> EditError {
    EditError::NoSuchModifier {
        kind: kind.discriminator(),
        index,
    }
}
