use addonforge_core::IdentifierError;
use addonforge_schema::{FieldViolation, SchemaError};
use thiserror::Error;

/// A rejected builder mutation. The tree is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The named function, condition or component is not in the registry.
    #[error(transparent)]
    UnknownSchema(#[from] SchemaError),
    /// No pool at that index.
    #[error("no pool at index {0}")]
    NoSuchPool(usize),
    /// No entry at that index.
    #[error("no entry at index {0}")]
    NoSuchEntry(usize),
    /// No function, condition or component at that index.
    #[error("no {kind} at index {index}")]
    NoSuchModifier {
        /// `function`, `condition` or `component`.
        kind: &'static str,
        /// Requested index.
        index: usize,
    },
    /// Tables must keep at least one pool.
    #[error("a loot table must keep at least one pool")]
    LastPool,
    /// Pools must keep at least one entry.
    #[error("a pool must keep at least one entry")]
    LastEntry,
    /// `min` exceeds `max`.
    #[error("{what} min {min} is greater than max {max}")]
    RangeOutOfOrder {
        /// Which range.
        what: &'static str,
        /// Lower end.
        min: i64,
        /// Upper end.
        max: i64,
    },
    /// A negative bound where only `>= 0` makes sense.
    #[error("{what} cannot be negative")]
    Negative {
        /// Which value.
        what: &'static str,
    },
    /// Entry weights start at 1.
    #[error("weight must be at least 1")]
    ZeroWeight,
    /// Item and loot_table entries need a name.
    #[error("{0} entries need a name")]
    EmptyName(&'static str),
    /// Malformed namespaced identifier.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    /// The schema entry has no such property.
    #[error("'{schema}' has no property '{property}'")]
    UnknownProperty {
        /// Schema entry name.
        schema: String,
        /// Requested property.
        property: String,
    },
    /// The value fails the property's checks.
    #[error("'{schema}.{property}': {violation}")]
    InvalidProperty {
        /// Schema entry name.
        schema: String,
        /// Property name.
        property: String,
        /// Failed check.
        violation: FieldViolation,
    },
    /// Required properties cannot be removed.
    #[error("'{schema}.{property}' is required")]
    RequiredProperty {
        /// Schema entry name.
        schema: String,
        /// Property name.
        property: String,
    },
    /// A component may only appear once per document.
    #[error("component '{0}' is already attached")]
    DuplicateComponent(String),
}
