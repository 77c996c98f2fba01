//! Tree to document projection.
//!
//! Projection is a pure function of the tree: no caching, no mutation, and
//! the same tree always yields the same document.

use serde_json::{Map, Value};
use tracing::debug;

use crate::configured::{ModifierHost, ModifierKind};
use crate::loot::{LootEntry, LootPool, LootTable};

/// Project a loot-table tree into the document the game reads.
pub fn project(table: &LootTable) -> Value {
    let pools: Vec<Value> = table.pools.iter().map(project_pool).collect();
    debug!(pools = pools.len(), "projected loot table");

    let mut out = Map::new();
    out.insert(
        "format_version".into(),
        Value::String(table.format_version.clone()),
    );
    out.insert("pools".into(), Value::Array(pools));
    Value::Object(out)
}

fn project_pool(pool: &LootPool) -> Value {
    let mut out = Map::new();
    out.insert("rolls".into(), pool.rolls.to_json());
    if let Some(bonus) = pool.bonus_rolls {
        out.insert("bonus_rolls".into(), bonus.to_json());
    }
    out.insert(
        "entries".into(),
        Value::Array(pool.entries.iter().map(project_entry).collect()),
    );
    insert_modifiers(&mut out, pool);
    Value::Object(out)
}

fn project_entry(entry: &LootEntry) -> Value {
    let mut out = Map::new();
    out.insert("type".into(), Value::String(entry.entry_type.as_str().into()));
    out.insert("name".into(), Value::String(entry.name.clone()));
    out.insert("weight".into(), Value::from(entry.weight));
    if let Some(quality) = entry.quality {
        out.insert("quality".into(), Value::from(quality));
    }
    if let Some(count) = entry.count {
        out.insert("count".into(), count.to_json());
    }
    insert_modifiers(&mut out, entry);
    Value::Object(out)
}

fn insert_modifiers(out: &mut Map<String, Value>, host: &impl ModifierHost) {
    for kind in [ModifierKind::Function, ModifierKind::Condition] {
        if let Some(list) = host.project_modifiers(kind) {
            out.insert(kind.list_key().into(), list);
        }
    }
}

/// Two-space pretty JSON, as handed to export collaborators.
pub fn to_pretty_json(document: &Value) -> String {
    // Serializing a `Value` cannot fail: every map key is already a string.
    serde_json::to_string_pretty(document).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loot::EntryType;
    use addonforge_core::IntRange;
    use addonforge_schema::SchemaRegistry;
    use serde_json::json;

    fn iron_table() -> LootTable {
        let mut table = LootTable::default();
        table.pools[0].entries[0].set_name("minecraft:iron_ingot").unwrap();
        table
    }

    #[test]
    fn bare_entry_has_only_type_name_weight() {
        let document = project(&iron_table());
        assert_eq!(
            document,
            json!({
                "format_version": "1.21.0",
                "pools": [{
                    "rolls": {"min": 1, "max": 1},
                    "entries": [{"type": "item", "name": "minecraft:iron_ingot", "weight": 1}]
                }]
            })
        );
    }

    #[test]
    fn disabled_modifiers_drop_the_key() {
        let registry = SchemaRegistry::builtin();
        let mut table = iron_table();
        let entry = table.pools[0].entry_mut(0).unwrap();
        entry
            .attach(&registry, ModifierKind::Function, "set_count")
            .unwrap();
        entry
            .set_enabled(ModifierKind::Function, 0, false)
            .unwrap();
        assert!(project(&table)["pools"][0]["entries"][0]
            .get("functions")
            .is_none());

        table.pools[0]
            .entry_mut(0)
            .unwrap()
            .set_enabled(ModifierKind::Function, 0, true)
            .unwrap();
        let document = project(&table);
        assert_eq!(
            document["pools"][0]["entries"][0]["functions"],
            json!([{"function": "set_count", "count": {"min": 1, "max": 3}}])
        );
    }

    #[test]
    fn optional_fields_appear_when_set() {
        let mut table = iron_table();
        let pool = table.pool_mut(0).unwrap();
        pool.set_bonus_rolls(Some(IntRange::new(0, 1))).unwrap();
        pool.add_entry(EntryType::Empty, "").unwrap();
        let entry = pool.entry_mut(0).unwrap();
        entry.set_quality(Some(0));
        entry.set_count(Some(IntRange::new(1, 2))).unwrap();

        let document = project(&table);
        let pool = &document["pools"][0];
        assert_eq!(pool["bonus_rolls"], json!({"min": 0, "max": 1}));
        assert_eq!(pool["entries"][0]["quality"], json!(0));
        assert_eq!(pool["entries"][0]["count"], json!({"min": 1, "max": 2}));
        assert_eq!(
            pool["entries"][1],
            json!({"type": "empty", "name": "", "weight": 1})
        );
    }

    #[test]
    fn empty_table_still_projects() {
        let table = LootTable {
            pools: Vec::new(),
            ..LootTable::default()
        };
        assert_eq!(
            project(&table),
            json!({"format_version": "1.21.0", "pools": []})
        );
    }

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let text = to_pretty_json(&project(&iron_table()));
        assert!(text.starts_with("{\n  \"format_version\""));
    }
}
