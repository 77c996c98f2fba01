use addonforge_core::PropertyValue;
use serde_json::{json, Map};

use crate::{Difficulty, SchemaEntry, SchemaField, SchemaKind};

fn component(name: &str, category: &str) -> SchemaEntry {
    SchemaEntry::new(SchemaKind::BlockComponent, name, category)
}

fn vec3(x: i64, y: i64, z: i64) -> PropertyValue {
    PropertyValue::Array(vec![json!(x), json!(y), json!(z)])
}

/// Components valid under `minecraft:block.components`.
pub fn block_components() -> Vec<SchemaEntry> {
    let mut material = Map::new();
    material.insert("texture".into(), json!("custom_block"));
    material.insert("render_method".into(), json!("opaque"));

    vec![
        component("minecraft:destructible_by_mining", "Durability")
            .field(
                SchemaField::number("seconds_to_destroy")
                    .default_number(1.0)
                    .min(0.0),
            ),
        component("minecraft:destructible_by_explosion", "Durability")
            .field(
                SchemaField::number("explosion_resistance")
                    .default_number(3.0)
                    .min(0.0),
            ),
        component("minecraft:flammable", "Durability")
            .subcategory("Fire")
            .field(
                SchemaField::number("catch_chance_modifier")
                    .default_number(5.0)
                    .min(0.0),
            )
            .field(
                SchemaField::number("destroy_chance_modifier")
                    .default_number(20.0)
                    .min(0.0),
            ),
        component("minecraft:friction", "Physics")
            .shorthand()
            .describe("0.0 is ice-slick, 0.9 is soul-sand sticky.")
            .field(SchemaField::number("value").default_number(0.4).bounds(0.0, 0.9)),
        component("minecraft:collision_box", "Physics")
            .subcategory("Shape")
            .difficulty(Difficulty::Intermediate)
            .field(SchemaField::array("origin").example(vec3(-8, 0, -8)))
            .field(SchemaField::array("size").example(vec3(16, 16, 16))),
        component("minecraft:selection_box", "Physics")
            .subcategory("Shape")
            .difficulty(Difficulty::Intermediate)
            .field(SchemaField::array("origin").example(vec3(-8, 0, -8)))
            .field(SchemaField::array("size").example(vec3(16, 16, 16))),
        component("minecraft:light_emission", "Lighting")
            .shorthand()
            .field(SchemaField::number("value").default_number(0.0).bounds(0.0, 15.0)),
        component("minecraft:light_dampening", "Lighting")
            .shorthand()
            .field(SchemaField::number("value").default_number(15.0).bounds(0.0, 15.0)),
        component("minecraft:map_color", "Appearance")
            .shorthand()
            .field(SchemaField::string("value").example("#7f7f7f")),
        component("minecraft:display_name", "Appearance")
            .shorthand()
            .field(SchemaField::string("value").example("tile.demo:custom_block.name")),
        component("minecraft:geometry", "Appearance")
            .subcategory("Model")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::string("identifier")
                    .default_value("minecraft:geometry.full_block")
                    .required(),
            )
            .field(
                SchemaField::object("bone_visibility")
                    .describe("Bone name to visibility flag or Molang expression."),
            ),
        component("minecraft:material_instances", "Appearance")
            .subcategory("Model")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::object("*")
                    .example(PropertyValue::Object(material))
                    .describe("Material applied to every face without an override."),
            ),
        component("minecraft:loot", "Drops")
            .shorthand()
            .field(
                SchemaField::string("value")
                    .example("loot_tables/blocks/custom_block.json")
                    .required(),
            ),
        component("minecraft:placement_filter", "Placement")
            .difficulty(Difficulty::Advanced)
            .field(
                SchemaField::array("conditions")
                    .example(PropertyValue::Array(vec![json!({
                        "allowed_faces": ["up"],
                        "block_filter": ["minecraft:grass_block"]
                    })]))
                    .required(),
            ),
        component("minecraft:crafting_table", "Interaction")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::array("crafting_tags")
                    .default_value(PropertyValue::Array(vec![json!("crafting_table")]))
                    .required(),
            )
            .field(SchemaField::string("table_name").example("Workbench")),
    ]
}
