use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SchemaField;

/// Which catalog an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Component inside `minecraft:entity.components`.
    EntityComponent,
    /// Component inside `minecraft:block.components`.
    BlockComponent,
    /// Component inside `minecraft:item.components`.
    ItemComponent,
    /// Loot table `functions[]` member.
    LootFunction,
    /// Loot table `conditions[]` member.
    LootCondition,
}

impl SchemaKind {
    /// All kinds, in catalog order.
    pub const ALL: [SchemaKind; 5] = [
        SchemaKind::EntityComponent,
        SchemaKind::BlockComponent,
        SchemaKind::ItemComponent,
        SchemaKind::LootFunction,
        SchemaKind::LootCondition,
    ];

    /// Snake-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::EntityComponent => "entity_component",
            SchemaKind::BlockComponent => "block_component",
            SchemaKind::ItemComponent => "item_component",
            SchemaKind::LootFunction => "loot_function",
            SchemaKind::LootCondition => "loot_condition",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown schema kind '{s}'"))
    }
}

/// Presentation hint only; has no effect on synthesis or validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Safe to use without reading docs.
    #[default]
    Beginner,
    /// Needs some familiarity with the format.
    Intermediate,
    /// Interacts with other components in non-obvious ways.
    Advanced,
}

/// A loot function, loot condition or component definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEntry {
    /// Unique (per kind) identifier, e.g. `set_count` or `minecraft:health`.
    pub name: String,
    /// Catalog this entry belongs to.
    pub kind: SchemaKind,
    /// Coarse grouping.
    pub category: String,
    /// Finer grouping, preferred for display when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Presentation hint.
    pub difficulty: Difficulty,
    /// One-line human description.
    pub description: String,
    /// Emit the lone `value` property bare instead of as `{"value": ..}`.
    pub shorthand: bool,
    /// Properties in declaration order.
    pub properties: Vec<SchemaField>,
}

impl SchemaEntry {
    /// Create an entry with no properties.
    pub fn new(kind: SchemaKind, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            category: category.into(),
            subcategory: None,
            difficulty: Difficulty::Beginner,
            description: String::new(),
            shorthand: false,
            properties: Vec::new(),
        }
    }

    /// Set the subcategory.
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Set the difficulty hint.
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the entry as accepting a bare value in place of `{"value": ..}`.
    pub fn shorthand(mut self) -> Self {
        self.shorthand = true;
        self
    }

    /// Append a property.
    pub fn field(mut self, field: SchemaField) -> Self {
        self.properties.push(field);
        self
    }

    /// Find a property by name.
    pub fn field_named(&self, name: &str) -> Option<&SchemaField> {
        self.properties.iter().find(|field| field.name == name)
    }

    /// Key used for display grouping: `subcategory`, else `category`.
    pub fn group_key(&self) -> &str {
        self.subcategory.as_deref().unwrap_or(&self.category)
    }

    /// The property a shorthand value maps onto.
    ///
    /// # Panics
    ///
    /// Panics when called on a shorthand entry without properties; the
    /// registry refuses to build such entries.
    pub fn shorthand_field(&self) -> Option<&SchemaField> {
        if !self.shorthand {
            return None;
        }
        match self.properties.first() {
            Some(field) => Some(field),
            None => panic!(
                "shorthand schema entry '{}' has no properties",
                self.name
            ),
        }
    }
}
