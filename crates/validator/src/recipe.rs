use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::kind::RECIPE_KEYS;
use crate::report::{index, join, Report};
use crate::rules::{
    check_format_version, check_identifier, check_item_name, expect_array, expect_object, integer,
    require, type_error,
};

const MAX_GRID: usize = 3;
const MAX_SHAPELESS_INGREDIENTS: usize = 9;

pub(crate) fn check_recipe(report: &mut Report, root: &Map<String, Value>, min_format_version: &str) {
    check_format_version(report, root, min_format_version);

    let present: Vec<&str> = RECIPE_KEYS
        .iter()
        .copied()
        .filter(|key| root.contains_key(*key))
        .collect();
    let key = match present.as_slice() {
        [] => {
            report.error(
                "",
                format!("missing recipe body; expected one of: {}", RECIPE_KEYS.join(", ")),
            );
            return;
        }
        [key] => *key,
        [first, ..] => {
            report.error("", "a recipe file may only hold one recipe body");
            *first
        }
    };
    let Some(body) = root.get(key).and_then(|body| expect_object(report, key, body)) else {
        return;
    };

    let description_path = join(key, "description");
    if let Some(description) = require(report, key, body, "description") {
        if let Some(description) = expect_object(report, &description_path, description) {
            if let Some(identifier) = require(report, &description_path, description, "identifier")
            {
                check_identifier(report, &join(&description_path, "identifier"), identifier);
            }
        }
    }

    let tags_path = join(key, "tags");
    if let Some(tags) = require(report, key, body, "tags") {
        if let Some(tags) = expect_array(report, &tags_path, tags) {
            if tags.is_empty() {
                report.error(&tags_path, "needs at least one crafting station tag");
            }
            for (i, tag) in tags.iter().enumerate() {
                if !tag.is_string() {
                    type_error(report, &index(&tags_path, i), "string", tag);
                }
            }
        }
    }

    match key {
        "minecraft:recipe_shaped" => check_shaped(report, key, body),
        "minecraft:recipe_shapeless" => check_shapeless(report, key, body),
        _ => check_furnace(report, key, body),
    }
}

fn check_shaped(report: &mut Report, path: &str, body: &Map<String, Value>) {
    let pattern_path = join(path, "pattern");
    let mut symbols = BTreeSet::new();
    if let Some(pattern) = require(report, path, body, "pattern") {
        if let Some(rows) = expect_array(report, &pattern_path, pattern) {
            if rows.is_empty() || rows.len() > MAX_GRID {
                report.error(&pattern_path, format!("needs 1 to {MAX_GRID} rows"));
            }
            let mut width = None;
            for (i, row) in rows.iter().enumerate() {
                let row_path = index(&pattern_path, i);
                let Some(row) = row.as_str() else {
                    type_error(report, &row_path, "string", row);
                    continue;
                };
                let len = row.chars().count();
                if len == 0 || len > MAX_GRID {
                    report.error(&row_path, format!("needs 1 to {MAX_GRID} columns"));
                }
                match width {
                    None => width = Some(len),
                    Some(width) if width != len => {
                        report.error(&row_path, "all rows must have the same width")
                    }
                    Some(_) => {}
                }
                symbols.extend(row.chars().filter(|c| *c != ' '));
            }
        }
    }

    let key_path = join(path, "key");
    if let Some(key) = require(report, path, body, "key") {
        if let Some(key) = expect_object(report, &key_path, key) {
            for (symbol, descriptor) in key {
                let symbol_path = join(&key_path, symbol);
                if symbol.chars().count() != 1 {
                    report.error(&symbol_path, "keys must be a single character");
                }
                check_descriptor(report, &symbol_path, descriptor);
                let mut chars = symbol.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if !symbols.contains(&c) {
                        report.warn(&symbol_path, "key is never used in the pattern");
                    }
                }
            }
            for symbol in &symbols {
                if !key.contains_key(&symbol.to_string()) {
                    report.error(
                        &pattern_path,
                        format!("symbol '{symbol}' has no entry in 'key'"),
                    );
                }
            }
        }
    }

    check_result(report, path, body);
}

fn check_shapeless(report: &mut Report, path: &str, body: &Map<String, Value>) {
    let ingredients_path = join(path, "ingredients");
    if let Some(ingredients) = require(report, path, body, "ingredients") {
        if let Some(ingredients) = expect_array(report, &ingredients_path, ingredients) {
            if ingredients.is_empty() || ingredients.len() > MAX_SHAPELESS_INGREDIENTS {
                report.error(
                    &ingredients_path,
                    format!("needs 1 to {MAX_SHAPELESS_INGREDIENTS} ingredients"),
                );
            }
            for (i, ingredient) in ingredients.iter().enumerate() {
                check_descriptor(report, &index(&ingredients_path, i), ingredient);
            }
        }
    }
    check_result(report, path, body);
}

fn check_furnace(report: &mut Report, path: &str, body: &Map<String, Value>) {
    for key in ["input", "output"] {
        if let Some(value) = require(report, path, body, key) {
            check_descriptor(report, &join(path, key), value);
        }
    }
}

fn check_result(report: &mut Report, path: &str, body: &Map<String, Value>) {
    if let Some(result) = require(report, path, body, "result") {
        check_descriptor(report, &join(path, "result"), result);
    }
}

/// `"namespace:item"` or `{"item": .., "count"?: n}` / `{"tag": ..}`.
fn check_descriptor(report: &mut Report, path: &str, value: &Value) {
    match value {
        Value::String(_) => check_item_name(report, path, value),
        Value::Object(map) => {
            match (map.get("item"), map.get("tag")) {
                (Some(item), _) => check_item_name(report, &join(path, "item"), item),
                (None, Some(Value::String(_))) => {}
                (None, Some(tag)) => type_error(report, &join(path, "tag"), "string", tag),
                (None, None) => report.error(path, "needs an 'item' or a 'tag'"),
            }
            if let Some(count) = map.get("count") {
                if let Some(count) = integer(report, &join(path, "count"), count) {
                    if count < 1 {
                        report.error(&join(path, "count"), "must be at least 1");
                    }
                }
            }
        }
        other => type_error(report, path, "item name or descriptor object", other),
    }
}
