use addonforge_core::{PropertyValue, ValueRange};
use serde_json::json;

use crate::{Difficulty, SchemaEntry, SchemaField, SchemaKind};

fn function(name: &str, category: &str) -> SchemaEntry {
    SchemaEntry::new(SchemaKind::LootFunction, name, category)
}

/// Loot table `functions[]` members.
pub fn loot_functions() -> Vec<SchemaEntry> {
    vec![
        function("set_count", "Quantity")
            .describe("Sets the stack size of the dropped item.")
            .field(
                SchemaField::range("count")
                    .default_value(ValueRange::new(1, 3))
                    .bounds(0.0, 64.0)
                    .required()
                    .describe("Stack size, exact or {min, max}."),
            ),
        function("looting_enchant", "Quantity")
            .subcategory("Looting")
            .describe("Adds extra items per level of Looting on the killing weapon.")
            .field(
                SchemaField::range("count")
                    .default_value(ValueRange::new(0, 1))
                    .min(0.0)
                    .required()
                    .describe("Extra items per Looting level."),
            ),
        function("set_data", "Item Data")
            .describe("Sets the data (aux) value of the item.")
            .field(SchemaField::number("data").min(0.0).required()),
        function("random_aux_value", "Item Data")
            .describe("Picks a random data value.")
            .field(
                SchemaField::range("values")
                    .default_value(ValueRange::new(0, 15))
                    .bounds(0.0, 15.0)
                    .required(),
            ),
        function("set_damage", "Item Data")
            .subcategory("Durability")
            .describe("Sets remaining durability as a fraction of the maximum.")
            .field(
                SchemaField::range("damage")
                    .default_value(ValueRange::fractional(0.2, 0.8))
                    .bounds(0.0, 1.0)
                    .required(),
            ),
        function("random_dye", "Item Data").describe("Dyes leather armor a random color."),
        function("enchant_randomly", "Enchantment")
            .subcategory("Random enchantments")
            .describe("Applies one random enchantment.")
            .field(
                SchemaField::boolean("treasure")
                    .default_value(false)
                    .describe("Allow treasure enchantments such as Mending."),
            ),
        function("enchant_with_levels", "Enchantment")
            .subcategory("Random enchantments")
            .difficulty(Difficulty::Intermediate)
            .describe("Enchants as if using an enchanting table with the given levels.")
            .field(
                SchemaField::range("levels")
                    .default_value(ValueRange::new(5, 30))
                    .bounds(1.0, 50.0)
                    .required(),
            )
            .field(SchemaField::boolean("treasure").default_value(false)),
        function("enchant_random_gear", "Enchantment")
            .subcategory("Random enchantments")
            .difficulty(Difficulty::Intermediate)
            .describe("Enchants gear with a difficulty-scaled chance.")
            .field(
                SchemaField::number("chance")
                    .default_number(0.25)
                    .bounds(0.0, 1.0)
                    .required(),
            ),
        function("specific_enchants", "Enchantment")
            .difficulty(Difficulty::Advanced)
            .describe("Applies an exact list of enchantments.")
            .field(
                SchemaField::array("enchants")
                    .example(PropertyValue::Array(vec![
                        json!({"id": "sharpness", "level": 3}),
                        json!("unbreaking"),
                    ]))
                    .required(),
            ),
        function("set_name", "Naming")
            .describe("Gives the item a custom name.")
            .field(SchemaField::string("name").example("Relic Blade").required()),
        function("set_lore", "Naming")
            .describe("Adds lore lines under the item name.")
            .field(
                SchemaField::array("lore")
                    .example(PropertyValue::Array(vec![json!("Recovered from the deep dark")]))
                    .required(),
            ),
        function("set_book_contents", "Naming")
            .subcategory("Books")
            .difficulty(Difficulty::Intermediate)
            .describe("Fills a written book.")
            .field(SchemaField::string("author").default_value("Anonymous"))
            .field(SchemaField::string("title").example("Field Notes").required())
            .field(
                SchemaField::array("pages")
                    .example(PropertyValue::Array(vec![json!("Page one")]))
                    .required(),
            ),
        function("furnace_smelt", "Special")
            .describe("Drops the smelted form of the item (e.g. cooked meat when on fire)."),
        function("explosion_decay", "Special")
            .describe("Reduces the stack when the drop comes from an explosion."),
        function("exploration_map", "Special")
            .subcategory("Maps")
            .difficulty(Difficulty::Intermediate)
            .describe("Turns an empty map into an explorer map.")
            .field(
                SchemaField::string("destination")
                    .options(&[
                        "buriedtreasure",
                        "monument",
                        "mansion",
                        "village",
                        "shipwreck",
                        "ruins",
                    ])
                    .required(),
            ),
        function("fill_container", "Container")
            .difficulty(Difficulty::Advanced)
            .describe("Fills a container item from another loot table.")
            .field(
                SchemaField::string("loot_table")
                    .example("loot_tables/chests/simple_dungeon.json")
                    .required(),
            ),
        function("set_banner_details", "Container")
            .difficulty(Difficulty::Advanced)
            .describe("Sets banner pattern details.")
            .field(
                SchemaField::number("type")
                    .default_number(1.0)
                    .bounds(0.0, 1.0)
                    .describe("0 = default, 1 = ominous."),
            ),
    ]
}
