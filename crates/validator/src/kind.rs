use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Document kinds the validator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// `{"format_version", "pools": [...]}`.
    LootTable,
    /// `minecraft:entity` behavior document.
    Entity,
    /// `minecraft:block` document.
    Block,
    /// `minecraft:item` document.
    Item,
    /// Shaped, shapeless or furnace recipe.
    Recipe,
    /// Pack `manifest.json`.
    Manifest,
}

impl ContentKind {
    /// All kinds.
    pub const ALL: [ContentKind; 6] = [
        ContentKind::LootTable,
        ContentKind::Entity,
        ContentKind::Block,
        ContentKind::Item,
        ContentKind::Recipe,
        ContentKind::Manifest,
    ];

    /// Snake-case tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::LootTable => "loot_table",
            ContentKind::Entity => "entity",
            ContentKind::Block => "block",
            ContentKind::Item => "item",
            ContentKind::Recipe => "recipe",
            ContentKind::Manifest => "manifest",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown content kind '{s}'"))
    }
}

/// Either detect the kind from the document's shape or force one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindSelector {
    /// Use [`detect_kind`].
    #[default]
    Auto,
    /// Validate as this kind regardless of shape.
    Explicit(ContentKind),
}

impl fmt::Display for KindSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindSelector::Auto => f.write_str("auto"),
            KindSelector::Explicit(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

impl FromStr for KindSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            Ok(KindSelector::Auto)
        } else {
            s.parse().map(KindSelector::Explicit)
        }
    }
}

/// Root keys that mark a recipe document.
pub const RECIPE_KEYS: [&str; 3] = [
    "minecraft:recipe_shaped",
    "minecraft:recipe_shapeless",
    "minecraft:recipe_furnace",
];

/// Guess a document's kind from its root keys.
///
/// Checked in order: entity, block, item, recipe, manifest (`header` plus
/// `modules`), then loot table (a `pools` array with no `minecraft:*` key).
pub fn detect_kind(document: &Value) -> Option<ContentKind> {
    let root = document.as_object()?;
    if root.contains_key("minecraft:entity") {
        return Some(ContentKind::Entity);
    }
    if root.contains_key("minecraft:block") {
        return Some(ContentKind::Block);
    }
    if root.contains_key("minecraft:item") {
        return Some(ContentKind::Item);
    }
    if RECIPE_KEYS.iter().any(|key| root.contains_key(*key)) {
        return Some(ContentKind::Recipe);
    }
    if root.contains_key("header") && root.contains_key("modules") {
        return Some(ContentKind::Manifest);
    }
    let namespaced = root.keys().any(|key| key.starts_with("minecraft:"));
    if !namespaced && root.get("pools").is_some_and(Value::is_array) {
        return Some(ContentKind::LootTable);
    }
    None
}
