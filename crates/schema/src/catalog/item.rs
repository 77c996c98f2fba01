use addonforge_core::{PropertyValue, ValueRange};
use serde_json::{json, Map};

use crate::{Difficulty, SchemaEntry, SchemaField, SchemaKind};

fn component(name: &str, category: &str) -> SchemaEntry {
    SchemaEntry::new(SchemaKind::ItemComponent, name, category)
}

const SLOTS: &[&str] = &[
    "slot.armor.head",
    "slot.armor.chest",
    "slot.armor.legs",
    "slot.armor.feet",
    "slot.weapon.offhand",
];

/// Components valid under `minecraft:item.components`.
pub fn item_components() -> Vec<SchemaEntry> {
    let mut icon_textures = Map::new();
    icon_textures.insert("default".into(), json!("custom_item"));

    vec![
        component("minecraft:max_stack_size", "Basics")
            .field(
                SchemaField::number("value")
                    .default_number(64.0)
                    .bounds(1.0, 64.0)
                    .required(),
            ),
        component("minecraft:display_name", "Basics")
            .field(
                SchemaField::string("value")
                    .example("item.demo:custom_item.name")
                    .required(),
            ),
        component("minecraft:icon", "Appearance")
            .describe("Inventory icon from item_texture.json.")
            .field(
                SchemaField::string("texture")
                    .deprecated()
                    .describe("Pre-1.20.80 form; use 'textures'."),
            )
            .field(SchemaField::object("textures").example(PropertyValue::Object(icon_textures))),
        component("minecraft:glint", "Appearance")
            .shorthand()
            .field(SchemaField::boolean("value").default_value(true)),
        component("minecraft:hand_equipped", "Appearance")
            .field(SchemaField::boolean("value").default_value(false)),
        component("minecraft:durability", "Tools")
            .field(
                SchemaField::number("max_durability")
                    .default_number(100.0)
                    .min(1.0)
                    .required(),
            )
            .field(
                SchemaField::range("damage_chance")
                    .default_value(ValueRange::new(100, 100))
                    .bounds(0.0, 100.0),
            ),
        component("minecraft:damage", "Tools")
            .field(SchemaField::number("value").default_number(1.0).min(0.0)),
        component("minecraft:enchantable", "Tools")
            .subcategory("Enchanting")
            .field(
                SchemaField::string("slot")
                    .options(&[
                        "sword", "bow", "pickaxe", "axe", "shovel", "hoe", "armor_head",
                        "armor_torso", "armor_legs", "armor_feet", "fishing_rod", "all",
                    ])
                    .required(),
            )
            .field(SchemaField::number("value").default_number(10.0).min(0.0)),
        component("minecraft:repairable", "Tools")
            .subcategory("Enchanting")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::array("repair_items")
                    .example(PropertyValue::Array(vec![json!({
                        "items": ["minecraft:iron_ingot"],
                        "repair_amount": 25
                    })]))
                    .required(),
            ),
        component("minecraft:food", "Consumables")
            .field(SchemaField::number("nutrition").default_number(4.0).min(0.0).required())
            .field(
                SchemaField::string("saturation_modifier")
                    .options(&["poor", "low", "normal", "good", "max", "supernatural"])
                    .default_value("normal"),
            )
            .field(SchemaField::boolean("can_always_eat").default_value(false))
            .field(SchemaField::string("using_converts_to").example("minecraft:bowl")),
        component("minecraft:use_animation", "Consumables")
            .shorthand()
            .field(SchemaField::string("value").options(&[
                "eat", "drink", "bow", "block", "camera", "crossbow", "none", "brush", "spear",
                "spyglass",
            ])),
        component("minecraft:use_modifiers", "Consumables")
            .field(
                SchemaField::number("use_duration")
                    .default_number(1.6)
                    .min(0.0),
            )
            .field(
                SchemaField::number("movement_modifier")
                    .default_number(0.35)
                    .bounds(0.0, 1.0),
            ),
        component("minecraft:fuel", "Consumables")
            .field(
                SchemaField::number("duration")
                    .default_number(10.0)
                    .min(0.05)
                    .required(),
            ),
        component("minecraft:wearable", "Equipment")
            .difficulty(Difficulty::Intermediate)
            .field(SchemaField::string("slot").options(SLOTS).required())
            .field(SchemaField::number("protection").default_number(0.0).min(0.0)),
        component("minecraft:allow_off_hand", "Equipment")
            .field(SchemaField::boolean("value").default_value(false)),
        component("minecraft:cooldown", "Equipment")
            .difficulty(Difficulty::Intermediate)
            .field(SchemaField::string("category").example("attack").required())
            .field(
                SchemaField::number("duration")
                    .default_number(1.0)
                    .min(0.0)
                    .required(),
            ),
    ]
}
