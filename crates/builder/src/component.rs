//! Entity, block and item documents built from registry components.

use addonforge_core::{Identifier, PropertyValue};
use addonforge_schema::{SchemaKind, SchemaRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::configured::Configured;
use crate::{EditError, FORMAT_VERSION};

/// Which document family a component tree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// `minecraft:entity` behavior document.
    Entity,
    /// `minecraft:block` document.
    Block,
    /// `minecraft:item` document.
    Item,
}

impl ComponentKind {
    /// Root key of the projected document.
    pub fn root_key(self) -> &'static str {
        match self {
            ComponentKind::Entity => "minecraft:entity",
            ComponentKind::Block => "minecraft:block",
            ComponentKind::Item => "minecraft:item",
        }
    }

    /// Registry catalog the components come from.
    pub fn schema_kind(self) -> SchemaKind {
        match self {
            ComponentKind::Entity => SchemaKind::EntityComponent,
            ComponentKind::Block => SchemaKind::BlockComponent,
            ComponentKind::Item => SchemaKind::ItemComponent,
        }
    }
}

/// Creative-inventory placement for blocks and items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    /// `construction`, `nature`, `equipment`, `items` or `none`.
    pub category: String,
    /// Optional group such as `itemGroup.name.planks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// An entity, block or item document under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    /// Document family.
    pub kind: ComponentKind,
    /// Emitted as `format_version`.
    #[serde(default = "default_format_version")]
    pub format_version: String,
    /// Namespaced identifier in `description`.
    pub identifier: String,
    /// Entities only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_spawnable: Option<bool>,
    /// Entities only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_summonable: Option<bool>,
    /// Blocks and items only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_category: Option<MenuCategory>,
    /// Components in attach order.
    #[serde(default)]
    pub components: Vec<Configured>,
}

fn default_format_version() -> String {
    FORMAT_VERSION.to_string()
}

impl ComponentDocument {
    /// Empty document with a checked identifier.
    ///
    /// Entities start spawnable and summonable; blocks and items start in the
    /// `construction` and `items` menu categories.
    pub fn new(kind: ComponentKind, identifier: &str) -> Result<Self, EditError> {
        let identifier = Identifier::parse(identifier)?;
        let (spawn_flags, menu_category) = match kind {
            ComponentKind::Entity => (Some(true), None),
            ComponentKind::Block => (None, Some("construction")),
            ComponentKind::Item => (None, Some("items")),
        };
        Ok(Self {
            kind,
            format_version: default_format_version(),
            identifier: identifier.to_string(),
            is_spawnable: spawn_flags,
            is_summonable: spawn_flags,
            menu_category: menu_category.map(|category| MenuCategory {
                category: category.to_string(),
                group: None,
            }),
            components: Vec::new(),
        })
    }

    /// Replace the identifier.
    pub fn set_identifier(&mut self, identifier: &str) -> Result<(), EditError> {
        self.identifier = Identifier::parse(identifier)?.to_string();
        Ok(())
    }

    /// Index of an attached component.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|component| component.schema_name == name)
    }

    /// Attach a registry component with synthesized defaults.
    pub fn attach(&mut self, registry: &SchemaRegistry, name: &str) -> Result<usize, EditError> {
        let entry = registry.lookup(self.kind.schema_kind(), name)?;
        if self.position(name).is_some() {
            return Err(EditError::DuplicateComponent(name.to_string()));
        }
        self.components.push(Configured::from_schema(entry));
        Ok(self.components.len() - 1)
    }

    /// Remove a component.
    pub fn detach(&mut self, index: usize) -> Result<Configured, EditError> {
        if index >= self.components.len() {
            return Err(no_such_component(index));
        }
        Ok(self.components.remove(index))
    }

    /// Enable or disable a component without removing it.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), EditError> {
        self.components
            .get_mut(index)
            .ok_or_else(|| no_such_component(index))?
            .enabled = enabled;
        Ok(())
    }

    /// Set one component property, checked against the registry.
    pub fn set_property(
        &mut self,
        registry: &SchemaRegistry,
        index: usize,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), EditError> {
        let kind = self.kind.schema_kind();
        let component = self
            .components
            .get_mut(index)
            .ok_or_else(|| no_such_component(index))?;
        let entry = registry.lookup(kind, &component.schema_name)?;
        component.set_property(entry, property, value)
    }

    /// Remove an optional component property.
    pub fn clear_property(
        &mut self,
        registry: &SchemaRegistry,
        index: usize,
        property: &str,
    ) -> Result<(), EditError> {
        let kind = self.kind.schema_kind();
        let component = self
            .components
            .get_mut(index)
            .ok_or_else(|| no_such_component(index))?;
        let entry = registry.lookup(kind, &component.schema_name)?;
        component.clear_property(entry, property)
    }

    /// Project into `{"format_version", "minecraft:<kind>": {..}}`.
    pub fn project(&self) -> Value {
        let mut description = Map::new();
        description.insert("identifier".into(), Value::String(self.identifier.clone()));
        if let Some(spawnable) = self.is_spawnable {
            description.insert("is_spawnable".into(), Value::Bool(spawnable));
        }
        if let Some(summonable) = self.is_summonable {
            description.insert("is_summonable".into(), Value::Bool(summonable));
        }
        if let Some(menu) = &self.menu_category {
            let mut category = Map::new();
            category.insert("category".into(), Value::String(menu.category.clone()));
            if let Some(group) = &menu.group {
                category.insert("group".into(), Value::String(group.clone()));
            }
            description.insert("menu_category".into(), Value::Object(category));
        }

        let components: Map<String, Value> = self
            .components
            .iter()
            .filter(|component| component.enabled)
            .map(|component| (component.schema_name.clone(), component.component_body()))
            .collect();
        debug!(
            kind = self.kind.root_key(),
            components = components.len(),
            "projected component document"
        );

        let mut body = Map::new();
        body.insert("description".into(), Value::Object(description));
        if !components.is_empty() {
            body.insert("components".into(), Value::Object(components));
        }

        let mut out = Map::new();
        out.insert(
            "format_version".into(),
            Value::String(self.format_version.clone()),
        );
        out.insert(self.kind.root_key().into(), Value::Object(body));
        Value::Object(out)
    }
}

fn no_such_component(index: usize) -> EditError {
    EditError::NoSuchModifier {
        kind: "component",
        index,
    }
}
