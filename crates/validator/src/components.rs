use addonforge_schema::{SchemaEntry, SchemaField, SchemaKind, SchemaRegistry};
use serde_json::{Map, Value};

use crate::report::{join, Report};
use crate::rules::{
    check_format_version, check_identifier, check_properties, expect_object, require, type_error,
};
use crate::ContentKind;

/// Checks for `minecraft:entity`, `minecraft:block` and `minecraft:item`.
pub(crate) fn check_component_document(
    report: &mut Report,
    root: &Map<String, Value>,
    kind: ContentKind,
    registry: &SchemaRegistry,
    min_format_version: &str,
) {
    let (root_key, schema_kind) = match kind {
        ContentKind::Entity => ("minecraft:entity", SchemaKind::EntityComponent),
        ContentKind::Block => ("minecraft:block", SchemaKind::BlockComponent),
        _ => ("minecraft:item", SchemaKind::ItemComponent),
    };

    check_format_version(report, root, min_format_version);

    let Some(body) = require(report, "", root, root_key) else {
        return;
    };
    let Some(body) = expect_object(report, root_key, body) else {
        return;
    };

    let description_path = join(root_key, "description");
    if let Some(description) = require(report, root_key, body, "description") {
        if let Some(description) = expect_object(report, &description_path, description) {
            check_description(report, &description_path, description, kind);
        }
    }

    let components_path = join(root_key, "components");
    match body.get("components") {
        None => report.warn(&components_path, "no components; the content has no behavior"),
        Some(components) => {
            if let Some(components) = expect_object(report, &components_path, components) {
                if components.is_empty() {
                    report.warn(&components_path, "no components; the content has no behavior");
                }
                for (name, value) in components {
                    let path = join(&components_path, name);
                    match registry.lookup(schema_kind, name) {
                        Ok(entry) => check_component(report, &path, entry, value),
                        Err(_) => report.warn(
                            &path,
                            format!(
                                "unknown {schema_kind} '{name}'; it may be newer than this registry"
                            ),
                        ),
                    }
                }
            }
        }
    }
}

fn check_description(
    report: &mut Report,
    path: &str,
    description: &Map<String, Value>,
    kind: ContentKind,
) {
    if let Some(identifier) = require(report, path, description, "identifier") {
        check_identifier(report, &join(path, "identifier"), identifier);
    }

    if kind == ContentKind::Entity {
        for flag in ["is_spawnable", "is_summonable"] {
            match description.get(flag) {
                None => report.warn(
                    &join(path, flag),
                    "missing; set it explicitly so spawn eggs and /summon behave predictably",
                ),
                Some(Value::Bool(_)) => {}
                Some(other) => type_error(report, &join(path, flag), "boolean", other),
            }
        }
        return;
    }

    let menu_path = join(path, "menu_category");
    match description.get("menu_category") {
        None => report.warn(
            &menu_path,
            "missing; the content will not appear in the creative inventory",
        ),
        Some(menu) => {
            if let Some(menu) = expect_object(report, &menu_path, menu) {
                match require(report, &menu_path, menu, "category") {
                    Some(Value::String(_)) | None => {}
                    Some(other) => {
                        type_error(report, &join(&menu_path, "category"), "string", other)
                    }
                }
            }
        }
    }
}

/// Field a non-object component value stands for, if any.
fn short_form_field(entry: &SchemaEntry) -> Option<&SchemaField> {
    if entry.shorthand || entry.properties.len() == 1 {
        return entry.properties.first();
    }
    let mut required = entry.properties.iter().filter(|field| field.required);
    match (required.next(), required.next()) {
        (Some(field), None) => Some(field),
        _ => None,
    }
}

fn check_component(report: &mut Report, path: &str, entry: &SchemaEntry, value: &Value) {
    if let Value::Object(body) = value {
        // A single object-kind field may itself be written without a wrapper.
        let wraps_itself = entry.properties.len() == 1
            && !body.contains_key(&entry.properties[0].name)
            && entry.properties[0].check(value).is_ok();
        if !wraps_itself {
            check_properties(report, path, entry, body);
        }
        return;
    }
    match short_form_field(entry) {
        Some(field) => {
            if let Err(violation) = field.check(value) {
                report.error(path, violation.to_string());
            }
        }
        None => type_error(report, path, "object", value),
    }
}
