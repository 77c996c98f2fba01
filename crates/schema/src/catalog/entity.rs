use addonforge_core::PropertyValue;
use serde_json::{json, Map};

use crate::{Difficulty, SchemaEntry, SchemaField, SchemaKind};

fn component(name: &str, category: &str) -> SchemaEntry {
    SchemaEntry::new(SchemaKind::EntityComponent, name, category)
}

fn priority(default: f64) -> SchemaField {
    SchemaField::number("priority")
        .default_number(default)
        .min(0.0)
        .describe("Lower runs first.")
}

/// Components valid under `minecraft:entity.components`.
pub fn entity_components() -> Vec<SchemaEntry> {
    let mut despawn_distance = Map::new();
    despawn_distance.insert("min_distance".into(), json!(32));
    despawn_distance.insert("max_distance".into(), json!(128));

    vec![
        component("minecraft:health", "Attributes")
            .subcategory("Vitals")
            .describe("Starting and maximum health.")
            .field(SchemaField::number("value").default_number(20.0).min(1.0).required())
            .field(SchemaField::number("max").default_number(20.0).min(1.0)),
        component("minecraft:breathable", "Attributes")
            .subcategory("Vitals")
            .difficulty(Difficulty::Intermediate)
            .field(SchemaField::number("total_supply").default_number(15.0).min(0.0))
            .field(SchemaField::number("suffocate_time").default_number(-20.0))
            .field(SchemaField::boolean("breathes_air").default_value(true))
            .field(SchemaField::boolean("breathes_water").default_value(false)),
        component("minecraft:movement", "Attributes")
            .subcategory("Movement")
            .describe("Base movement speed.")
            .field(SchemaField::number("value").default_number(0.25).min(0.0).required()),
        component("minecraft:attack", "Combat")
            .describe("Melee damage dealt by the entity.")
            .field(SchemaField::number("damage").default_number(3.0).min(0.0).required())
            .field(SchemaField::string("effect_name").example("poison"))
            .field(SchemaField::number("effect_duration").min(0.0)),
        component("minecraft:type_family", "Identity")
            .describe("Families other components filter on (e.g. 'monster').")
            .field(
                SchemaField::array("family")
                    .default_value(PropertyValue::Array(vec![json!("mob")]))
                    .required(),
            ),
        component("minecraft:nameable", "Identity")
            .field(SchemaField::boolean("always_show").default_value(false))
            .field(SchemaField::boolean("allow_name_tag_renaming").default_value(true)),
        component("minecraft:physics", "Behavior")
            .subcategory("Physics")
            .field(SchemaField::boolean("has_gravity").default_value(true))
            .field(SchemaField::boolean("has_collision").default_value(true)),
        component("minecraft:collision_box", "Behavior")
            .subcategory("Physics")
            .field(SchemaField::number("width").default_number(0.6).min(0.0).required())
            .field(SchemaField::number("height").default_number(1.8).min(0.0).required()),
        component("minecraft:pushable", "Behavior")
            .subcategory("Physics")
            .field(SchemaField::boolean("is_pushable").default_value(true))
            .field(SchemaField::boolean("is_pushable_by_piston").default_value(true)),
        component("minecraft:despawn", "Behavior")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::object("despawn_from_distance")
                    .example(PropertyValue::Object(despawn_distance)),
            ),
        component("minecraft:scale", "Visual")
            .field(SchemaField::number("value").default_number(1.0).min(0.0).required()),
        component("minecraft:loot", "Drops")
            .describe("Loot table rolled when the entity dies.")
            .field(
                SchemaField::string("table")
                    .example("loot_tables/entities/custom_mob.json")
                    .required(),
            ),
        component("minecraft:movement.basic", "Movement")
            .subcategory("Movement types")
            .field(SchemaField::number("max_turn").default_number(30.0).min(0.0)),
        component("minecraft:navigation.walk", "Movement")
            .subcategory("Navigation")
            .difficulty(Difficulty::Intermediate)
            .field(SchemaField::boolean("can_path_over_water").default_value(false))
            .field(SchemaField::boolean("avoid_water").default_value(false))
            .field(SchemaField::boolean("avoid_damage_blocks").default_value(true)),
        component("minecraft:jump.static", "Movement")
            .field(SchemaField::number("jump_power").default_number(0.42).min(0.0)),
        component("minecraft:behavior.random_stroll", "AI Goals")
            .subcategory("Idle")
            .field(priority(6.0))
            .field(SchemaField::number("speed_multiplier").default_number(1.0).min(0.0)),
        component("minecraft:behavior.look_at_player", "AI Goals")
            .subcategory("Idle")
            .field(priority(7.0))
            .field(SchemaField::number("look_distance").default_number(6.0).min(0.0)),
        component("minecraft:behavior.melee_attack", "AI Goals")
            .subcategory("Combat")
            .difficulty(Difficulty::Intermediate)
            .field(priority(3.0))
            .field(SchemaField::number("speed_multiplier").default_number(1.0).min(0.0))
            .field(SchemaField::boolean("track_target").default_value(false)),
        component("minecraft:behavior.nearest_attackable_target", "AI Goals")
            .subcategory("Combat")
            .difficulty(Difficulty::Advanced)
            .field(priority(2.0))
            .field(SchemaField::boolean("must_see").default_value(false))
            .field(
                SchemaField::array("entity_types")
                    .example(PropertyValue::Array(vec![json!({
                        "filters": {"test": "is_family", "subject": "other", "value": "player"},
                        "max_dist": 16
                    })]))
                    .required(),
            ),
    ]
}
