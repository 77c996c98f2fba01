use addonforge_schema::{SchemaKind, SchemaRegistry};
use serde_json::{Map, Value};

use crate::report::{index, join, Report};
use crate::rules::{
    check_int_range, check_item_name, check_modifier_list, expect_array, expect_object, integer,
    require, type_error,
};

const ENTRY_TYPES: [&str; 4] = ["item", "loot_table", "empty", "group"];

pub(crate) fn check_loot_table(
    report: &mut Report,
    root: &Map<String, Value>,
    registry: &SchemaRegistry,
) {
    match root.get("format_version") {
        None => report.warn(
            "format_version",
            "missing; the game falls back to the oldest loot table format",
        ),
        Some(Value::String(_)) => {}
        Some(other) => type_error(report, "format_version", "string", other),
    }

    let Some(pools) = require(report, "", root, "pools") else {
        return;
    };
    let Some(pools) = expect_array(report, "pools", pools) else {
        return;
    };
    if pools.is_empty() {
        report.error("pools", "a loot table needs at least one pool");
    }
    for (i, pool) in pools.iter().enumerate() {
        let path = index("pools", i);
        if let Some(pool) = expect_object(report, &path, pool) {
            check_pool(report, &path, pool, registry);
        }
    }
}

fn check_pool(
    report: &mut Report,
    path: &str,
    pool: &Map<String, Value>,
    registry: &SchemaRegistry,
) {
    if let Some(rolls) = require(report, path, pool, "rolls") {
        check_int_range(report, &join(path, "rolls"), rolls);
    }
    if let Some(bonus) = pool.get("bonus_rolls") {
        check_int_range(report, &join(path, "bonus_rolls"), bonus);
    }

    let entries_path = join(path, "entries");
    if let Some(entries) = require(report, path, pool, "entries") {
        if let Some(entries) = expect_array(report, &entries_path, entries) {
            if entries.is_empty() {
                report.warn(&entries_path, "pool has no entries and never drops anything");
            }
            for (i, entry) in entries.iter().enumerate() {
                let entry_path = index(&entries_path, i);
                if let Some(entry) = expect_object(report, &entry_path, entry) {
                    check_entry(report, &entry_path, entry, registry);
                }
            }
        }
    }

    check_modifiers(report, path, pool, registry);
}

fn check_entry(
    report: &mut Report,
    path: &str,
    entry: &Map<String, Value>,
    registry: &SchemaRegistry,
) {
    let entry_type = match require(report, path, entry, "type") {
        Some(Value::String(tag)) if ENTRY_TYPES.contains(&tag.as_str()) => Some(tag.as_str()),
        Some(Value::String(tag)) => {
            report.error(
                &join(path, "type"),
                format!("'{tag}' is not one of: {}", ENTRY_TYPES.join(", ")),
            );
            None
        }
        Some(other) => {
            type_error(report, &join(path, "type"), "string", other);
            None
        }
        None => None,
    };

    let name_path = join(path, "name");
    match entry_type {
        Some("item") => {
            if let Some(name) = require(report, path, entry, "name") {
                check_item_name(report, &name_path, name);
            }
        }
        Some("loot_table") => match require(report, path, entry, "name") {
            Some(Value::String(name)) if name.trim().is_empty() => {
                report.error(&name_path, "loot_table entries need a table path")
            }
            Some(Value::String(_)) | None => {}
            Some(other) => type_error(report, &name_path, "string", other),
        },
        _ => {
            if let Some(name) = entry.get("name").filter(|name| !name.is_string()) {
                type_error(report, &name_path, "string", name);
            }
        }
    }

    if let Some(weight) = require(report, path, entry, "weight") {
        if let Some(weight) = integer(report, &join(path, "weight"), weight) {
            if weight < 1 {
                report.error(
                    &join(path, "weight"),
                    format!("must be at least 1, got {weight}"),
                );
            }
        }
    }
    if let Some(quality) = entry.get("quality") {
        integer(report, &join(path, "quality"), quality);
    }
    if let Some(count) = entry.get("count") {
        check_int_range(report, &join(path, "count"), count);
    }

    check_modifiers(report, path, entry, registry);
}

fn check_modifiers(
    report: &mut Report,
    path: &str,
    host: &Map<String, Value>,
    registry: &SchemaRegistry,
) {
    if let Some(functions) = host.get("functions") {
        check_modifier_list(
            report,
            &join(path, "functions"),
            functions,
            SchemaKind::LootFunction,
            registry,
        );
    }
    if let Some(conditions) = host.get("conditions") {
        check_modifier_list(
            report,
            &join(path, "conditions"),
            conditions,
            SchemaKind::LootCondition,
            registry,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(document: Value) -> (Vec<String>, Vec<String>) {
        let registry = SchemaRegistry::builtin();
        let mut report = Report::default();
        check_loot_table(&mut report, document.as_object().unwrap(), &registry);
        let result = report.finish(None);
        (result.errors, result.warnings)
    }

    #[test]
    fn minimal_table_is_clean() {
        let (errors, warnings) = check(json!({
            "format_version": "1.21.0",
            "pools": [{
                "rolls": {"min": 0, "max": 0},
                "entries": [{"type": "item", "name": "minecraft:iron_ingot", "weight": 1}]
            }]
        }));
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn errors_accumulate_in_walk_order() {
        let (errors, warnings) = check(json!({
            "pools": [
                {
                    "rolls": {"min": 5, "max": 2},
                    "entries": [
                        {"type": "item", "name": "minecraft:a:b", "weight": 0},
                        {"type": "chest", "weight": 1}
                    ]
                },
                {"entries": []}
            ]
        }));
        assert_eq!(
            errors,
            vec![
                "pools[0].rolls: min 5 is greater than max 2",
                "pools[0].entries[0].name: identifier 'minecraft:a:b' must contain exactly one ':'",
                "pools[0].entries[0].weight: must be at least 1, got 0",
                "pools[0].entries[1].type: 'chest' is not one of: item, loot_table, empty, group",
                "pools[1]: missing required field 'rolls'",
            ]
        );
        assert_eq!(
            warnings,
            vec![
                "format_version: missing; the game falls back to the oldest loot table format",
                "pools[1].entries: pool has no entries and never drops anything",
            ]
        );
    }

    #[test]
    fn empty_pools_array_is_an_error() {
        let (errors, _) = check(json!({"format_version": "1.21.0", "pools": []}));
        assert_eq!(errors, vec!["pools: a loot table needs at least one pool"]);
    }

    #[test]
    fn modifier_properties_are_checked_against_the_registry() {
        let (errors, warnings) = check(json!({
            "format_version": "1.21.0",
            "pools": [{
                "rolls": 1,
                "entries": [{
                    "type": "item",
                    "name": "minecraft:bone",
                    "weight": 1,
                    "functions": [{"function": "set_count", "count": {"min": 0, "max": 99}}]
                }],
                "conditions": [{"condition": "random_chance"}, {"condition": "is_raining"}]
            }]
        }));
        assert_eq!(
            errors,
            vec![
                "pools[0].entries[0].functions[0].count: 99 is above the maximum of 64",
                "pools[0].conditions[0]: missing required field 'chance'",
            ]
        );
        assert_eq!(
            warnings,
            vec!["pools[0].conditions[1]: unknown loot_condition 'is_raining'; it may be newer than this registry"]
        );
    }
}
