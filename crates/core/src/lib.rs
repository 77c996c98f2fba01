#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod identifier;
pub mod value;

// Re-export commonly used types
pub use identifier::{Identifier, IdentifierError, DEFAULT_NAMESPACE};
pub use value::{number_from_f64, IntRange, PropertyValue, UnknownValueKind, ValueKind, ValueRange};
