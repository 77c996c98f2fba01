//! Loot-table configuration tree and its mutation operations.
//!
//! Every mutator validates before touching state, so a rejected edit leaves
//! the tree exactly as it was.

use addonforge_core::{Identifier, IntRange, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};

use crate::configured::{Configured, ModifierHost, ModifierKind};
use crate::{EditError, FORMAT_VERSION};

/// Root of a loot-table tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootTable {
    /// Emitted verbatim as `format_version`.
    pub format_version: String,
    /// Pools rolled independently.
    pub pools: Vec<LootPool>,
}

impl Default for LootTable {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            pools: vec![LootPool::default()],
        }
    }
}

impl LootTable {
    /// The built-in starting tree with a custom format version.
    pub fn with_format_version(format_version: impl Into<String>) -> Self {
        Self {
            format_version: format_version.into(),
            ..Self::default()
        }
    }

    /// Append a default pool; returns its index.
    pub fn add_pool(&mut self) -> usize {
        self.pools.push(LootPool::default());
        self.pools.len() - 1
    }

    /// Remove a pool. The last remaining pool cannot be removed.
    pub fn remove_pool(&mut self, index: usize) -> Result<LootPool, EditError> {
        if index >= self.pools.len() {
            return Err(EditError::NoSuchPool(index));
        }
        if self.pools.len() == 1 {
            return Err(EditError::LastPool);
        }
        Ok(self.pools.remove(index))
    }

    /// Borrow a pool.
    pub fn pool(&self, index: usize) -> Result<&LootPool, EditError> {
        self.pools.get(index).ok_or(EditError::NoSuchPool(index))
    }

    /// Mutably borrow a pool.
    pub fn pool_mut(&mut self, index: usize) -> Result<&mut LootPool, EditError> {
        self.pools.get_mut(index).ok_or(EditError::NoSuchPool(index))
    }
}

/// One pool: a roll count plus weighted entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootPool {
    /// How many times the pool is rolled.
    pub rolls: IntRange,
    /// Extra rolls scaled by luck.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_rolls: Option<IntRange>,
    /// Weighted candidates.
    pub entries: Vec<LootEntry>,
    /// Pool-level functions.
    pub functions: Vec<Configured>,
    /// Pool-level conditions.
    pub conditions: Vec<Configured>,
}

impl Default for LootPool {
    fn default() -> Self {
        Self {
            rolls: IntRange::exact(1),
            bonus_rolls: None,
            entries: vec![LootEntry::default()],
            functions: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl LootPool {
    /// Set `rolls`; requires `0 <= min <= max`.
    pub fn set_rolls(&mut self, rolls: IntRange) -> Result<(), EditError> {
        check_range("rolls", rolls)?;
        self.rolls = rolls;
        Ok(())
    }

    /// Set or clear `bonus_rolls`.
    pub fn set_bonus_rolls(&mut self, bonus_rolls: Option<IntRange>) -> Result<(), EditError> {
        if let Some(range) = bonus_rolls {
            check_range("bonus_rolls", range)?;
        }
        self.bonus_rolls = bonus_rolls;
        Ok(())
    }

    /// Append an entry of weight 1; returns its index.
    pub fn add_entry(&mut self, entry_type: EntryType, name: &str) -> Result<usize, EditError> {
        check_name(entry_type, name)?;
        self.entries.push(LootEntry {
            entry_type,
            name: name.to_string(),
            ..LootEntry::default()
        });
        Ok(self.entries.len() - 1)
    }

    /// Remove an entry. The last remaining entry cannot be removed.
    pub fn remove_entry(&mut self, index: usize) -> Result<LootEntry, EditError> {
        if index >= self.entries.len() {
            return Err(EditError::NoSuchEntry(index));
        }
        if self.entries.len() == 1 {
            return Err(EditError::LastEntry);
        }
        Ok(self.entries.remove(index))
    }

    /// Borrow an entry.
    pub fn entry(&self, index: usize) -> Result<&LootEntry, EditError> {
        self.entries.get(index).ok_or(EditError::NoSuchEntry(index))
    }

    /// Mutably borrow an entry.
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut LootEntry, EditError> {
        self.entries.get_mut(index).ok_or(EditError::NoSuchEntry(index))
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.weight)).sum()
    }
}

impl ModifierHost for LootPool {
    fn modifiers(&self, kind: ModifierKind) -> &[Configured] {
        match kind {
            ModifierKind::Function => &self.functions,
            ModifierKind::Condition => &self.conditions,
        }
    }

    fn modifiers_mut(&mut self, kind: ModifierKind) -> &mut Vec<Configured> {
        match kind {
            ModifierKind::Function => &mut self.functions,
            ModifierKind::Condition => &mut self.conditions,
        }
    }
}

/// What a loot entry produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// A single item stack.
    #[default]
    Item,
    /// Rolls another loot table.
    LootTable,
    /// Produces nothing; weights the chance of no drop.
    Empty,
    /// Groups child entries.
    Group,
}

impl EntryType {
    /// All entry types.
    pub const ALL: [EntryType; 4] = [
        EntryType::Item,
        EntryType::LootTable,
        EntryType::Empty,
        EntryType::Group,
    ];

    /// JSON tag.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Item => "item",
            EntryType::LootTable => "loot_table",
            EntryType::Empty => "empty",
            EntryType::Group => "group",
        }
    }

    /// Parse a JSON tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

/// One weighted candidate in a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootEntry {
    /// Entry type.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Item identifier or loot table path.
    pub name: String,
    /// Relative weight, at least 1.
    pub weight: u32,
    /// Luck-scaled weight adjustment; `Some(0)` is kept and emitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<i32>,
    /// Stack size range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<IntRange>,
    /// Entry-level functions.
    pub functions: Vec<Configured>,
    /// Entry-level conditions.
    pub conditions: Vec<Configured>,
}

impl Default for LootEntry {
    fn default() -> Self {
        Self {
            entry_type: EntryType::Item,
            name: "minecraft:stone".to_string(),
            weight: 1,
            quality: None,
            count: None,
            functions: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl LootEntry {
    /// An item entry of weight 1.
    pub fn item(name: &str) -> Result<Self, EditError> {
        check_name(EntryType::Item, name)?;
        Ok(Self {
            name: name.to_string(),
            ..Self::default()
        })
    }

    /// Set the weight; zero is rejected.
    pub fn set_weight(&mut self, weight: u32) -> Result<(), EditError> {
        if weight == 0 {
            return Err(EditError::ZeroWeight);
        }
        self.weight = weight;
        Ok(())
    }

    /// Set or clear the quality.
    pub fn set_quality(&mut self, quality: Option<i32>) {
        self.quality = quality;
    }

    /// Set or clear the stack count; requires `0 <= min <= max`.
    pub fn set_count(&mut self, count: Option<IntRange>) -> Result<(), EditError> {
        if let Some(range) = count {
            check_range("count", range)?;
        }
        self.count = count;
        Ok(())
    }

    /// Rename the entry, checked against its type.
    pub fn set_name(&mut self, name: &str) -> Result<(), EditError> {
        check_name(self.entry_type, name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Change the type; the current name must suit the new type.
    pub fn set_type(&mut self, entry_type: EntryType) -> Result<(), EditError> {
        check_name(entry_type, &self.name)?;
        self.entry_type = entry_type;
        Ok(())
    }
}

impl ModifierHost for LootEntry {
    fn modifiers(&self, kind: ModifierKind) -> &[Configured] {
        match kind {
            ModifierKind::Function => &self.functions,
            ModifierKind::Condition => &self.conditions,
        }
    }

    fn modifiers_mut(&mut self, kind: ModifierKind) -> &mut Vec<Configured> {
        match kind {
            ModifierKind::Function => &mut self.functions,
            ModifierKind::Condition => &mut self.conditions,
        }
    }
}

fn check_range(what: &'static str, range: IntRange) -> Result<(), EditError> {
    if range.min < 0 || range.max < 0 {
        return Err(EditError::Negative { what });
    }
    if !range.is_ordered() {
        return Err(EditError::RangeOutOfOrder {
            what,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

fn check_name(entry_type: EntryType, name: &str) -> Result<(), EditError> {
    match entry_type {
        EntryType::Item => {
            Identifier::parse_with_default_namespace(name, DEFAULT_NAMESPACE)?;
        }
        EntryType::LootTable if name.trim().is_empty() => {
            return Err(EditError::EmptyName("loot_table"));
        }
        EntryType::LootTable | EntryType::Empty | EntryType::Group => {}
    }
    Ok(())
}
