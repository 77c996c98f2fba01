//! Namespaced content identifiers.
//!
//! Identifiers are the `namespace:name` strings that add-on documents use to
//! name entities, blocks, items and recipes (e.g. `minecraft:zombie`,
//! `demo:ruby_block`). Exactly one `:` separates the two halves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Namespace assumed when a loot entry references a bare item name.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The input was empty or whitespace.
    #[error("identifier cannot be empty")]
    Empty,
    /// No `:` separator was present.
    #[error("identifier '{0}' is missing a namespace (expected namespace:name)")]
    MissingNamespace(String),
    /// More than one `:` separator was present.
    #[error("identifier '{0}' must contain exactly one ':'")]
    TooManySeparators(String),
    /// One side of the separator was empty.
    #[error("identifier '{0}' has an empty namespace or name")]
    EmptyPart(String),
    /// A character outside the allowed set was found.
    #[error("identifier '{input}' contains invalid character '{ch}'")]
    InvalidCharacter {
        /// Offending identifier.
        input: String,
        /// First invalid character.
        ch: char,
    },
}

/// A namespaced identifier of the form `namespace:name`.
///
/// Ordering is lexical by `(namespace, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: String,
    name: String,
}

impl Identifier {
    /// Parse an identifier that must carry an explicit namespace.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(IdentifierError::Empty);
        }
        let separators = input.matches(':').count();
        if separators == 0 {
            return Err(IdentifierError::MissingNamespace(input.to_string()));
        }
        if separators > 1 {
            return Err(IdentifierError::TooManySeparators(input.to_string()));
        }
        let (namespace, name) = input
            .split_once(':')
            .ok_or_else(|| IdentifierError::MissingNamespace(input.to_string()))?;
        Self::from_parts(input, namespace, name)
    }

    /// Parse an identifier, filling in `default_namespace` for bare names.
    pub fn parse_with_default_namespace(
        input: &str,
        default_namespace: &str,
    ) -> Result<Self, IdentifierError> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && !trimmed.contains(':') {
            return Self::from_parts(trimmed, default_namespace, trimmed);
        }
        Self::parse(trimmed)
    }

    fn from_parts(input: &str, namespace: &str, name: &str) -> Result<Self, IdentifierError> {
        if namespace.is_empty() || name.is_empty() {
            return Err(IdentifierError::EmptyPart(input.to_string()));
        }
        validate_chars(input, namespace)?;
        validate_chars(input, name)?;
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Identifier namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Identifier name (the part after `:`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the identifier lives in the vanilla namespace.
    pub fn is_vanilla(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }
}

fn validate_chars(input: &str, part: &str) -> Result<(), IdentifierError> {
    // Bedrock accepts mixed case, but never whitespace or path separators.
    match part
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')))
    {
        Some(ch) => Err(IdentifierError::InvalidCharacter {
            input: input.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
