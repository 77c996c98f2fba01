use addonforge_core::PropertyValue;
use serde_json::{json, Map};

use crate::{Difficulty, SchemaEntry, SchemaField, SchemaKind};

fn condition(name: &str, category: &str) -> SchemaEntry {
    SchemaEntry::new(SchemaKind::LootCondition, name, category)
}

/// Loot table `conditions[]` members.
pub fn loot_conditions() -> Vec<SchemaEntry> {
    let mut on_fire = Map::new();
    on_fire.insert("on_fire".into(), json!(true));

    vec![
        condition("killed_by_player", "Killer")
            .describe("Passes only when a player dealt the killing blow."),
        condition("killed_by_player_or_pets", "Killer")
            .describe("Passes when a player or a tamed pet dealt the killing blow."),
        condition("killed_by_entity", "Killer")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::string("entity_type")
                    .example("minecraft:skeleton")
                    .required(),
            ),
        condition("random_chance", "Chance")
            .describe("Passes with a fixed probability.")
            .field(
                SchemaField::number("chance")
                    .default_number(0.5)
                    .bounds(0.0, 1.0)
                    .required(),
            ),
        condition("random_chance_with_looting", "Chance")
            .subcategory("Looting")
            .describe("Probability that grows with the killer's Looting level.")
            .field(
                SchemaField::number("chance")
                    .default_number(0.05)
                    .bounds(0.0, 1.0)
                    .required(),
            )
            .field(
                SchemaField::number("looting_multiplier")
                    .default_number(0.01)
                    .min(0.0),
            ),
        condition("random_difficulty_chance", "Chance")
            .subcategory("Difficulty")
            .difficulty(Difficulty::Intermediate)
            .field(
                SchemaField::number("default_chance")
                    .default_number(0.5)
                    .bounds(0.0, 1.0)
                    .required(),
            )
            .field(SchemaField::number("peaceful").default_number(0.0).bounds(0.0, 1.0))
            .field(SchemaField::number("easy").default_number(0.25).bounds(0.0, 1.0))
            .field(SchemaField::number("normal").default_number(0.5).bounds(0.0, 1.0))
            .field(SchemaField::number("hard").default_number(0.75).bounds(0.0, 1.0)),
        condition("random_regional_difficulty_chance", "Chance")
            .subcategory("Difficulty")
            .difficulty(Difficulty::Advanced)
            .field(
                SchemaField::number("max_chance")
                    .default_number(0.5)
                    .bounds(0.0, 1.0)
                    .required(),
            ),
        condition("match_tool", "Tool")
            .difficulty(Difficulty::Intermediate)
            .describe("Checks the tool used to break the block or kill the mob.")
            .field(SchemaField::string("item").example("minecraft:diamond_pickaxe"))
            .field(SchemaField::number("count").min(1.0))
            .field(SchemaField::range("durability").min(0.0))
            .field(SchemaField::array("enchantments").example(PropertyValue::Array(vec![
                json!({"enchantment": "silk_touch", "levels": {"range_min": 1}}),
            ]))),
        condition("entity_properties", "Entity")
            .difficulty(Difficulty::Advanced)
            .field(
                SchemaField::string("entity")
                    .options(&["this", "killer", "killer_player"])
                    .required(),
            )
            .field(
                SchemaField::object("properties")
                    .example(PropertyValue::Object(on_fire))
                    .required(),
            ),
        condition("has_mark_variant", "Entity")
            .difficulty(Difficulty::Advanced)
            .field(SchemaField::number("value").min(0.0).required()),
    ]
}
