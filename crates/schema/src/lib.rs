#![warn(missing_docs)]
//! Schema registry for add-on content: components, loot functions and loot
//! conditions, plus default-value synthesis and per-field checks.

pub mod catalog;
mod defaults;
mod entry;
mod field;
mod loader;
mod registry;

pub use defaults::{default_properties, synthesize_default, synthesize_with_source, DefaultSource};
pub use entry::{Difficulty, SchemaEntry, SchemaKind};
pub use field::{json_type_name, FieldViolation, SchemaField};
pub use loader::{entries_from_file, entries_from_str, registry_with_packs};
pub use registry::{SchemaGroup, SchemaRegistry};

use thiserror::Error;

/// Errors raised while building or querying a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No entry with that name exists in the requested catalog.
    #[error("no {kind} named '{name}'")]
    NotFound {
        /// Catalog searched.
        kind: SchemaKind,
        /// Requested name.
        name: String,
    },
    /// Two entries in one catalog share a name.
    #[error("duplicate {kind} '{name}'")]
    DuplicateEntry {
        /// Catalog of the collision.
        kind: SchemaKind,
        /// Colliding name.
        name: String,
    },
    /// Two fields in one entry share a name.
    #[error("'{entry}' declares field '{field}' twice")]
    DuplicateField {
        /// Owning entry.
        entry: String,
        /// Colliding field.
        field: String,
    },
    /// The entry itself is malformed.
    #[error("invalid schema entry '{name}': {reason}")]
    InvalidEntry {
        /// Entry name.
        name: String,
        /// What is wrong.
        reason: String,
    },
    /// A field's default or example fails the field's own checks.
    #[error("invalid field '{entry}.{field}': {reason}")]
    InvalidField {
        /// Owning entry.
        entry: String,
        /// Field name.
        field: String,
        /// What is wrong.
        reason: String,
    },
}

/// Errors emitted while loading schema packs.
#[derive(Debug, Error)]
pub enum SchemaPackError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read schema pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse schema pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field names a value kind this build cannot synthesize or check.
    #[error("'{entry}.{field}' uses unknown value kind '{value_kind}'")]
    UnknownValueKind {
        /// Owning entry.
        entry: String,
        /// Field name.
        field: String,
        /// Tag found in the pack.
        value_kind: String,
    },
    /// The pack's entries do not fit into the registry.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
