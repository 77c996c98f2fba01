use std::collections::HashMap;

use tracing::debug;

use crate::{catalog, SchemaEntry, SchemaError, SchemaKind};

/// Entries sharing a display group.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaGroup<'a> {
    /// `subcategory ?? category` of every member.
    pub key: &'a str,
    /// Members in declaration order.
    pub entries: Vec<&'a SchemaEntry>,
}

/// Immutable catalog of schema entries, addressable by `(kind, name)`.
///
/// Component names repeat across catalogs (`minecraft:loot` exists for both
/// entities and blocks), so uniqueness is enforced per kind.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entries: Vec<SchemaEntry>,
    index: HashMap<(SchemaKind, String), usize>,
}

impl SchemaRegistry {
    /// Build a registry, rejecting duplicate names and inconsistent fields.
    pub fn new(entries: Vec<SchemaEntry>) -> Result<Self, SchemaError> {
        let mut registry = Self {
            entries: Vec::with_capacity(entries.len()),
            index: HashMap::new(),
        };
        registry.extend(entries)?;
        Ok(registry)
    }

    /// The catalog compiled into this build.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in catalog is internally inconsistent.
    pub fn builtin() -> Self {
        match Self::new(catalog::builtin_entries()) {
            Ok(registry) => registry,
            Err(err) => panic!("built-in schema catalog is inconsistent: {err}"),
        }
    }

    /// Append entries (e.g. from a schema pack).
    ///
    /// Either every entry is added or, on error, none are.
    pub fn extend(&mut self, entries: Vec<SchemaEntry>) -> Result<(), SchemaError> {
        let mut staged: HashMap<(SchemaKind, String), usize> = HashMap::new();
        for (offset, entry) in entries.iter().enumerate() {
            validate_entry(entry)?;
            let key = (entry.kind, entry.name.clone());
            if self.index.contains_key(&key) || staged.contains_key(&key) {
                return Err(SchemaError::DuplicateEntry {
                    kind: entry.kind,
                    name: entry.name.clone(),
                });
            }
            staged.insert(key, self.entries.len() + offset);
        }
        debug!(added = entries.len(), "extending schema registry");
        self.index.extend(staged);
        self.entries.extend(entries);
        Ok(())
    }

    /// Exact lookup within one catalog.
    pub fn lookup(&self, kind: SchemaKind, name: &str) -> Result<&SchemaEntry, SchemaError> {
        self.index
            .get(&(kind, name.to_string()))
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| SchemaError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    /// Exact lookup across every catalog; the first declared match wins.
    pub fn lookup_any(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries of one kind, in declaration order.
    pub fn entries(&self, kind: SchemaKind) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Every entry, in declaration order.
    pub fn all(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Entries of one kind grouped by `subcategory ?? category`.
    ///
    /// Groups appear in the order their first member was declared.
    pub fn grouped(&self, kind: SchemaKind) -> Vec<SchemaGroup<'_>> {
        let mut groups: Vec<SchemaGroup<'_>> = Vec::new();
        for entry in self.entries(kind) {
            let key = entry.group_key();
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.entries.push(entry),
                None => groups.push(SchemaGroup {
                    key,
                    entries: vec![entry],
                }),
            }
        }
        groups
    }

    /// Number of entries across every catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entry(entry: &SchemaEntry) -> Result<(), SchemaError> {
    if entry.name.trim().is_empty() {
        return Err(SchemaError::InvalidEntry {
            name: entry.name.clone(),
            reason: "name cannot be empty".into(),
        });
    }
    if entry.shorthand && entry.properties.len() != 1 {
        return Err(SchemaError::InvalidEntry {
            name: entry.name.clone(),
            reason: "shorthand entries need exactly one property".into(),
        });
    }

    for (idx, field) in entry.properties.iter().enumerate() {
        if entry.properties[..idx]
            .iter()
            .any(|prior| prior.name == field.name)
        {
            return Err(SchemaError::DuplicateField {
                entry: entry.name.clone(),
                field: field.name.clone(),
            });
        }
        for (label, value) in [("default", &field.default), ("example", &field.example)] {
            let Some(value) = value else { continue };
            if value.kind() != field.kind {
                return Err(SchemaError::InvalidField {
                    entry: entry.name.clone(),
                    field: field.name.clone(),
                    reason: format!("{label} is a {}, expected {}", value.kind(), field.kind),
                });
            }
            if let Err(violation) = field.check_value(value) {
                return Err(SchemaError::InvalidField {
                    entry: entry.name.clone(),
                    field: field.name.clone(),
                    reason: format!("{label} {violation}"),
                });
            }
        }
    }
    Ok(())
}
