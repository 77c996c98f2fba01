//! Golden-file snapshots for projected documents.
//!
//! Documents are stored as canonical JSON: keys sorted at every depth,
//! two-space indentation, trailing newline. Set
//! `ADDONFORGE_UPDATE_SNAPSHOTS=1` to rewrite goldens from the current output.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "ADDONFORGE_UPDATE_SNAPSHOTS";

/// `<manifest_dir>/tests/snapshots/<name>`; pass `env!("CARGO_MANIFEST_DIR")`.
pub fn snapshot_path(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("snapshots").join(name)
}

/// Compare `value` with the golden at `path`, or rewrite it in update mode.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if update_requested() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating snapshot directory {}", parent.display()))?;
        }
        return fs::write(path, &actual)
            .with_context(|| format!("writing snapshot {}", path.display()));
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "snapshot missing at {} (rerun with {UPDATE_SNAPSHOTS_ENV}=1)",
            path.display()
        )
    })?;
    // Goldens checked out on Windows may carry CRLF.
    let expected = expected.replace("\r\n", "\n");

    if let Some((line, want, got)) = first_difference(&expected, &actual) {
        bail!(
            "snapshot {} differs at line {line}:\n  expected: {want}\n  actual:   {got}\n(rerun with {UPDATE_SNAPSHOTS_ENV}=1 to accept)",
            path.display()
        );
    }
    Ok(())
}

/// Canonical text form used for goldens.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("serializing snapshot value")?;
    let mut text =
        serde_json::to_string_pretty(&sort_keys(value)).context("formatting snapshot")?;
    text.push('\n');
    Ok(text)
}

fn update_requested() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<(String, Value)> = map.into_iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, child) in pairs {
                sorted.insert(key, sort_keys(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn first_difference(expected: &str, actual: &str) -> Option<(usize, String, String)> {
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (want.next(), got.next()) {
            (None, None) => return None,
            (a, b) if a == b => line += 1,
            (a, b) => {
                return Some((
                    line,
                    a.unwrap_or("<end of file>").to_string(),
                    b.unwrap_or("<end of file>").to_string(),
                ))
            }
        }
    }
}
