//! Catalogs compiled into the binary.
//!
//! Declaration order is significant: it is the enumeration order for
//! pickers and the order of groups returned by
//! [`SchemaRegistry::grouped`](crate::SchemaRegistry::grouped).

mod block;
mod entity;
mod item;
mod loot_conditions;
mod loot_functions;

use crate::SchemaEntry;

pub use block::block_components;
pub use entity::entity_components;
pub use item::item_components;
pub use loot_conditions::loot_conditions;
pub use loot_functions::loot_functions;

/// Every built-in entry, catalog by catalog.
pub fn builtin_entries() -> Vec<SchemaEntry> {
    let mut entries = Vec::new();
    entries.extend(entity_components());
    entries.extend(block_components());
    entries.extend(item_components());
    entries.extend(loot_functions());
    entries.extend(loot_conditions());
    entries
}
