use std::collections::HashSet;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::report::{index, join, Report};
use crate::rules::{expect_array, expect_object, require, type_error};

const MODULE_TYPES: [&str; 7] = [
    "resources",
    "data",
    "client_data",
    "interface",
    "world_template",
    "script",
    "skin_pack",
];

pub(crate) fn check_manifest(report: &mut Report, root: &Map<String, Value>) {
    if let Some(version) = require(report, "", root, "format_version") {
        match version.as_i64() {
            Some(1 | 2) => {}
            Some(other) => report.error("format_version", format!("{other} is not 1 or 2")),
            None => type_error(report, "format_version", "integer", version),
        }
    }

    let mut seen = HashSet::new();

    if let Some(header) = require(report, "", root, "header") {
        if let Some(header) = expect_object(report, "header", header) {
            check_header(report, header, &mut seen);
        }
    }

    if let Some(modules) = require(report, "", root, "modules") {
        if let Some(modules) = expect_array(report, "modules", modules) {
            if modules.is_empty() {
                report.error("modules", "a pack needs at least one module");
            }
            for (i, module) in modules.iter().enumerate() {
                let path = index("modules", i);
                if let Some(module) = expect_object(report, &path, module) {
                    check_module(report, &path, module, &mut seen);
                }
            }
        }
    }

    if let Some(dependencies) = root.get("dependencies") {
        if let Some(dependencies) = expect_array(report, "dependencies", dependencies) {
            for (i, dependency) in dependencies.iter().enumerate() {
                let path = index("dependencies", i);
                let Some(dependency) = expect_object(report, &path, dependency) else {
                    continue;
                };
                match (dependency.get("uuid"), dependency.get("module_name")) {
                    (Some(uuid), _) => {
                        check_uuid(report, &join(&path, "uuid"), uuid);
                    }
                    (None, Some(Value::String(_))) => {}
                    (None, Some(other)) => {
                        type_error(report, &join(&path, "module_name"), "string", other)
                    }
                    (None, None) => report.error(&path, "needs a 'uuid' or a 'module_name'"),
                }
                if let Some(version) = dependency.get("version") {
                    check_version(report, &join(&path, "version"), version, true);
                }
            }
        }
    }
}

fn check_header(report: &mut Report, header: &Map<String, Value>, seen: &mut HashSet<Uuid>) {
    match require(report, "header", header, "name") {
        Some(Value::String(_)) | None => {}
        Some(other) => type_error(report, "header.name", "string", other),
    }
    if !header.contains_key("description") {
        report.warn("header.description", "missing; the pack list shows an empty line");
    }
    if let Some(uuid) = require(report, "header", header, "uuid") {
        if let Some(uuid) = check_uuid(report, "header.uuid", uuid) {
            seen.insert(uuid);
        }
    }
    if let Some(version) = require(report, "header", header, "version") {
        check_version(report, "header.version", version, true);
    }
    match header.get("min_engine_version") {
        None => report.warn(
            "header.min_engine_version",
            "missing; the pack may load on engines that lack its features",
        ),
        Some(version) => check_version(report, "header.min_engine_version", version, false),
    }
}

fn check_module(
    report: &mut Report,
    path: &str,
    module: &Map<String, Value>,
    seen: &mut HashSet<Uuid>,
) {
    match require(report, path, module, "type") {
        Some(Value::String(kind)) if MODULE_TYPES.contains(&kind.as_str()) => {}
        Some(Value::String(kind)) => report.error(
            &join(path, "type"),
            format!("'{kind}' is not one of: {}", MODULE_TYPES.join(", ")),
        ),
        Some(other) => type_error(report, &join(path, "type"), "string", other),
        None => {}
    }
    if let Some(uuid) = require(report, path, module, "uuid") {
        let uuid_path = join(path, "uuid");
        if let Some(uuid) = check_uuid(report, &uuid_path, uuid) {
            if !seen.insert(uuid) {
                report.error(&uuid_path, format!("{uuid} is already used in this manifest"));
            }
        }
    }
    if let Some(version) = require(report, path, module, "version") {
        check_version(report, &join(path, "version"), version, true);
    }
}

fn check_uuid(report: &mut Report, path: &str, value: &Value) -> Option<Uuid> {
    let Some(text) = value.as_str() else {
        type_error(report, path, "string", value);
        return None;
    };
    match Uuid::parse_str(text) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            report.error(path, format!("'{text}' is not a valid UUID"));
            None
        }
    }
}

/// `[major, minor, patch]`, or `"major.minor.patch"` where allowed.
fn check_version(report: &mut Report, path: &str, value: &Value, allow_string: bool) {
    match value {
        Value::Array(parts) => {
            let whole = parts.iter().all(|part| part.as_u64().is_some());
            if parts.len() != 3 || !whole {
                report.error(path, "expected three non-negative integers");
            }
        }
        Value::String(text) if allow_string => {
            let parts: Vec<&str> = text.split('.').collect();
            let numeric = parts
                .iter()
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
            if parts.len() != 3 || !numeric {
                report.error(path, format!("'{text}' is not a major.minor.patch version"));
            }
        }
        other => type_error(report, path, "version array", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HEADER_UUID: &str = "5c6b1c42-3f4e-4a43-9a0b-1f6a7b2e9c01";

    fn check(document: Value) -> (Vec<String>, Vec<String>) {
        let mut report = Report::default();
        check_manifest(&mut report, document.as_object().unwrap());
        let result = report.finish(None);
        (result.errors, result.warnings)
    }

    #[test]
    fn module_uuids_must_be_unique() {
        let (errors, warnings) = check(json!({
            "format_version": 2,
            "header": {"name": "p", "description": "d", "uuid": HEADER_UUID,
                       "version": "1.0.0", "min_engine_version": [1, 21, 0]},
            "modules": [{"type": "data", "uuid": HEADER_UUID, "version": [1, 0, 0]}]
        }));
        assert_eq!(
            errors,
            vec![format!("modules[0].uuid: {HEADER_UUID} is already used in this manifest")]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn header_problems_are_reported() {
        let (errors, warnings) = check(json!({
            "format_version": 3,
            "header": {"uuid": "not-a-uuid", "version": [1, 0]},
            "modules": [{"type": "behavior", "uuid": "0f1e2d3c-4b5a-4697-8877-665544332211",
                         "version": [1, 0, 0]}]
        }));
        assert_eq!(
            errors,
            vec![
                "format_version: 3 is not 1 or 2",
                "header: missing required field 'name'",
                "header.uuid: 'not-a-uuid' is not a valid UUID",
                "header.version: expected three non-negative integers",
                "modules[0].type: 'behavior' is not one of: resources, data, client_data, interface, world_template, script, skin_pack",
            ]
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn empty_module_list_is_an_error() {
        let (errors, _) = check(json!({
            "format_version": 2,
            "header": {"name": "p", "description": "d", "uuid": HEADER_UUID,
                       "version": [1, 0, 0], "min_engine_version": [1, 21, 0]},
            "modules": [],
            "dependencies": [{"module_name": "@minecraft/server", "version": "1.8.0"}, {}]
        }));
        assert_eq!(
            errors,
            vec![
                "modules: a pack needs at least one module",
                "dependencies[1]: needs a 'uuid' or a 'module_name'",
            ]
        );
    }
}
