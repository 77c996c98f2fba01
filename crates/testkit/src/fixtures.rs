//! Hand-written add-on documents that pass validation without warnings.

/// Loot table with pool- and entry-level modifiers.
pub const LOOT_TABLE: &str = r#"{
  "format_version": "1.21.0",
  "pools": [
    {
      "rolls": {"min": 1, "max": 2},
      "entries": [
        {
          "type": "item",
          "name": "minecraft:rotten_flesh",
          "weight": 3,
          "functions": [
            {"function": "set_count", "count": {"min": 0, "max": 2}},
            {"function": "looting_enchant", "count": {"min": 0, "max": 1}}
          ]
        },
        {"type": "empty", "weight": 1}
      ]
    },
    {
      "rolls": 1,
      "entries": [
        {"type": "item", "name": "minecraft:iron_ingot", "weight": 1, "quality": 0}
      ],
      "conditions": [
        {"condition": "killed_by_player"},
        {"condition": "random_chance_with_looting", "chance": 0.025, "looting_multiplier": 0.01}
      ]
    }
  ]
}"#;

/// Behavior-pack entity.
pub const ENTITY: &str = r#"{
  "format_version": "1.21.0",
  "minecraft:entity": {
    "description": {
      "identifier": "demo:ghoul",
      "is_spawnable": true,
      "is_summonable": true
    },
    "components": {
      "minecraft:health": {"value": 24, "max": 24},
      "minecraft:movement": {"value": 0.23},
      "minecraft:collision_box": {"width": 0.6, "height": 1.9},
      "minecraft:type_family": {"family": ["ghoul", "monster", "mob"]},
      "minecraft:loot": {"table": "loot_tables/entities/ghoul.json"},
      "minecraft:behavior.random_stroll": {"priority": 6, "speed_multiplier": 1}
    }
  }
}"#;

/// Custom block.
pub const BLOCK: &str = r#"{
  "format_version": "1.21.0",
  "minecraft:block": {
    "description": {
      "identifier": "demo:ruby_block",
      "menu_category": {"category": "construction"}
    },
    "components": {
      "minecraft:destructible_by_mining": {"seconds_to_destroy": 3},
      "minecraft:friction": 0.4,
      "minecraft:light_emission": 4,
      "minecraft:geometry": "minecraft:geometry.full_block",
      "minecraft:loot": "loot_tables/blocks/ruby_block.json"
    }
  }
}"#;

/// Custom item.
pub const ITEM: &str = r#"{
  "format_version": "1.21.0",
  "minecraft:item": {
    "description": {
      "identifier": "demo:ruby",
      "menu_category": {"category": "items"}
    },
    "components": {
      "minecraft:max_stack_size": 16,
      "minecraft:icon": {"textures": {"default": "ruby"}},
      "minecraft:glint": true,
      "minecraft:food": {"nutrition": 4, "saturation_modifier": "low"}
    }
  }
}"#;

/// Shaped crafting recipe.
pub const SHAPED_RECIPE: &str = r####"{
  "format_version": "1.21.0",
  "minecraft:recipe_shaped": {
    "description": {"identifier": "demo:ruby_block"},
    "tags": ["crafting_table"],
    "pattern": ["###", "###", "###"],
    "key": {"#": {"item": "demo:ruby"}},
    "result": {"item": "demo:ruby_block", "count": 1}
  }
}"####;

/// Shapeless crafting recipe.
pub const SHAPELESS_RECIPE: &str = r#"{
  "format_version": "1.21.0",
  "minecraft:recipe_shapeless": {
    "description": {"identifier": "demo:ruby_from_block"},
    "tags": ["crafting_table"],
    "ingredients": [{"item": "demo:ruby_block"}],
    "result": {"item": "demo:ruby", "count": 9}
  }
}"#;

/// Furnace recipe.
pub const FURNACE_RECIPE: &str = r#"{
  "format_version": "1.21.0",
  "minecraft:recipe_furnace": {
    "description": {"identifier": "demo:cooked_ghoul_flesh"},
    "tags": ["furnace", "smoker"],
    "input": "demo:ghoul_flesh",
    "output": "minecraft:cooked_beef"
  }
}"#;

/// Behavior-pack manifest.
pub const MANIFEST: &str = r#"{
  "format_version": 2,
  "header": {
    "name": "Ghoul Pack",
    "description": "Adds ghouls and rubies",
    "uuid": "5c6b1c42-3f4e-4a43-9a0b-1f6a7b2e9c01",
    "version": [1, 0, 0],
    "min_engine_version": [1, 21, 0]
  },
  "modules": [
    {
      "type": "data",
      "uuid": "0f1e2d3c-4b5a-4697-8877-665544332211",
      "version": [1, 0, 0]
    }
  ]
}"#;

/// Truncated text that is not JSON at all.
pub const MALFORMED: &str = r#"{ pools: ["#;
