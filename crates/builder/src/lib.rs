#![warn(missing_docs)]
//! Configuration trees for loot tables and component documents, the builder
//! operations that edit them, and their projection to add-on JSON.

mod component;
mod configured;
mod error;
mod loot;
mod probability;
mod project;
mod store;

pub use component::{ComponentDocument, ComponentKind, MenuCategory};
pub use configured::{
    Configured, ConfiguredCondition, ConfiguredFunction, ModifierHost, ModifierKind,
};
pub use error::EditError;
pub use loot::{EntryType, LootEntry, LootPool, LootTable};
pub use probability::entry_probabilities;
pub use project::{project, to_pretty_json};
pub use store::{load_tree, save_tree, FileStore, MemoryStore, StoreError, TreeStore, STORE_VERSION};

/// Format version written into new documents.
pub const FORMAT_VERSION: &str = "1.21.0";
