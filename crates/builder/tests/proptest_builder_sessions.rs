//! Property-based tests over random builder sessions.
//!
//! A session is a sequence of builder operations with arbitrary indices;
//! rejected edits are part of the session and must leave the tree intact.

use addonforge_builder::{
    entry_probabilities, project, EntryType, LootTable, ModifierHost, ModifierKind,
};
use addonforge_core::IntRange;
use addonforge_schema::SchemaRegistry;
use proptest::prelude::*;
use serde_json::Value;

#[derive(Debug, Clone)]
enum Target {
    Pool(usize),
    Entry(usize, usize),
}

#[derive(Debug, Clone)]
enum Op {
    AddPool,
    RemovePool(usize),
    SetRolls(usize, i64, i64),
    AddEntry(usize, EntryType, usize),
    RemoveEntry(usize, usize),
    SetWeight(usize, usize, u32),
    SetQuality(usize, usize, Option<i32>),
    SetCount(usize, usize, Option<(i64, i64)>),
    Attach(Target, ModifierKind, usize),
    Toggle(Target, ModifierKind, usize, bool),
    Detach(Target, ModifierKind, usize),
}

const ITEM_NAMES: &[&str] = &[
    "minecraft:bone",
    "arrow",
    "demo:ruby",
    "loot_tables/chests/simple_dungeon.json",
    "",
    "bad name",
];

fn target() -> impl Strategy<Value = Target> {
    prop_oneof![
        (0usize..4).prop_map(Target::Pool),
        (0usize..4, 0usize..4).prop_map(|(p, e)| Target::Entry(p, e)),
    ]
}

fn modifier_kind() -> impl Strategy<Value = ModifierKind> {
    prop_oneof![Just(ModifierKind::Function), Just(ModifierKind::Condition)]
}

fn tree_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddPool),
        (0usize..4).prop_map(Op::RemovePool),
        (0usize..4, -2i64..6, -2i64..6).prop_map(|(p, a, b)| Op::SetRolls(p, a, b)),
        (
            0usize..4,
            prop::sample::select(EntryType::ALL.to_vec()),
            0usize..ITEM_NAMES.len()
        )
            .prop_map(|(p, t, n)| Op::AddEntry(p, t, n)),
        (0usize..4, 0usize..4).prop_map(|(p, e)| Op::RemoveEntry(p, e)),
        (0usize..4, 0usize..4, 0u32..20).prop_map(|(p, e, w)| Op::SetWeight(p, e, w)),
        (0usize..4, 0usize..4, proptest::option::of(-5i32..5))
            .prop_map(|(p, e, q)| Op::SetQuality(p, e, q)),
        (
            0usize..4,
            0usize..4,
            proptest::option::of((-1i64..5, -1i64..5))
        )
            .prop_map(|(p, e, c)| Op::SetCount(p, e, c)),
    ]
}

fn modifier_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (target(), modifier_kind(), 0usize..64).prop_map(|(t, k, n)| Op::Attach(t, k, n)),
        (target(), modifier_kind(), 0usize..3, any::<bool>())
            .prop_map(|(t, k, i, on)| Op::Toggle(t, k, i, on)),
        (target(), modifier_kind(), 0usize..3).prop_map(|(t, k, i)| Op::Detach(t, k, i)),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![tree_op(), modifier_op()]
}

fn host<'a>(table: &'a mut LootTable, target: &Target) -> Option<&'a mut dyn ModifierHost> {
    match *target {
        Target::Pool(p) => table
            .pools
            .get_mut(p)
            .map(|pool| pool as &mut dyn ModifierHost),
        Target::Entry(p, e) => table
            .pools
            .get_mut(p)
            .and_then(|pool| pool.entries.get_mut(e))
            .map(|entry| entry as &mut dyn ModifierHost),
    }
}

/// Apply `op`; returns whether the edit was accepted.
fn apply(table: &mut LootTable, registry: &SchemaRegistry, op: &Op) -> bool {
    match op {
        Op::AddPool => {
            table.add_pool();
            true
        }
        Op::RemovePool(p) => table.remove_pool(*p).is_ok(),
        Op::SetRolls(p, min, max) => table
            .pool_mut(*p)
            .and_then(|pool| pool.set_rolls(IntRange::new(*min, *max)))
            .is_ok(),
        Op::AddEntry(p, entry_type, name) => table
            .pool_mut(*p)
            .and_then(|pool| pool.add_entry(*entry_type, ITEM_NAMES[*name]))
            .is_ok(),
        Op::RemoveEntry(p, e) => table
            .pool_mut(*p)
            .and_then(|pool| pool.remove_entry(*e))
            .is_ok(),
        Op::SetWeight(p, e, w) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .and_then(|entry| entry.set_weight(*w))
            .is_ok(),
        Op::SetQuality(p, e, q) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .map(|entry| entry.set_quality(*q))
            .is_ok(),
        Op::SetCount(p, e, c) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .and_then(|entry| entry.set_count(c.map(|(min, max)| IntRange::new(min, max))))
            .is_ok(),
        Op::Attach(t, kind, n) => {
            let names: Vec<&str> = registry
                .entries(kind.schema_kind())
                .map(|entry| entry.name.as_str())
                .collect();
            let name = names[n % names.len()];
            host(table, t).is_some_and(|host| host.attach(registry, *kind, name).is_ok())
        }
        Op::Toggle(t, kind, i, on) => {
            host(table, t).is_some_and(|host| host.set_enabled(*kind, *i, *on).is_ok())
        }
        Op::Detach(t, kind, i) => {
            host(table, t).is_some_and(|host| host.detach(*kind, *i).is_ok())
        }
    }
}

fn session(ops: &[Op]) -> LootTable {
    let registry = SchemaRegistry::builtin();
    let mut table = LootTable::default();
    for op in ops {
        let before = table.clone();
        if !apply(&mut table, &registry, op) {
            assert_eq!(table, before, "rejected {op:?} changed the tree");
        }
    }
    table
}

fn modifier_lists(document: &Value) -> Vec<&Value> {
    let mut lists = Vec::new();
    for pool in document["pools"].as_array().into_iter().flatten() {
        lists.extend(pool.get("functions"));
        lists.extend(pool.get("conditions"));
        for entry in pool["entries"].as_array().into_iter().flatten() {
            lists.extend(entry.get("functions"));
            lists.extend(entry.get("conditions"));
        }
    }
    lists
}

proptest! {
    /// Property: projecting twice yields byte-identical text.
    #[test]
    fn projection_is_idempotent(ops in prop::collection::vec(op(), 0..40)) {
        let table = session(&ops);
        let first = serde_json::to_string(&project(&table)).unwrap();
        let second = serde_json::to_string(&project(&table)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: every emitted modifier list is non-empty and only holds
    /// enabled members.
    #[test]
    fn modifier_lists_are_never_empty(ops in prop::collection::vec(op(), 0..40)) {
        let table = session(&ops);
        let document = project(&table);
        for list in modifier_lists(&document) {
            prop_assert!(!list.as_array().unwrap().is_empty());
        }
        let enabled: usize = table
            .pools
            .iter()
            .map(|pool| {
                pool.functions.iter().chain(&pool.conditions).filter(|m| m.enabled).count()
                    + pool
                        .entries
                        .iter()
                        .flat_map(|e| e.functions.iter().chain(&e.conditions))
                        .filter(|m| m.enabled)
                        .count()
            })
            .sum();
        let emitted: usize = modifier_lists(&document)
            .iter()
            .map(|list| list.as_array().unwrap().len())
            .sum();
        prop_assert_eq!(enabled, emitted);
    }

    /// Property: session trees keep their structural invariants.
    #[test]
    fn sessions_keep_invariants(ops in prop::collection::vec(op(), 0..60)) {
        let table = session(&ops);
        prop_assert!(!table.pools.is_empty());
        for pool in &table.pools {
            prop_assert!(pool.rolls.min >= 0 && pool.rolls.is_ordered());
            prop_assert!(!pool.entries.is_empty());
            for entry in &pool.entries {
                prop_assert!(entry.weight >= 1);
                if let Some(count) = entry.count {
                    prop_assert!(count.min >= 0 && count.is_ordered());
                }
            }
        }
    }

    /// Property: probabilities follow weights and sum to 100.
    #[test]
    fn probabilities_follow_weights(weights in prop::collection::vec(1u32..500, 1..12)) {
        let mut table = LootTable::default();
        let pool = table.pool_mut(0).unwrap();
        pool.entry_mut(0).unwrap().set_weight(weights[0]).unwrap();
        for weight in &weights[1..] {
            let index = pool.add_entry(EntryType::Empty, "").unwrap();
            pool.entry_mut(index).unwrap().set_weight(*weight).unwrap();
        }
        let total: u32 = weights.iter().sum();
        let probabilities = entry_probabilities(&table.pools[0]);
        for (weight, probability) in weights.iter().zip(&probabilities) {
            let expected = f64::from(*weight) / f64::from(total) * 100.0;
            prop_assert!((probability - expected).abs() < 1e-9);
        }
        prop_assert!((probabilities.iter().sum::<f64>() - 100.0).abs() < 1e-6);
    }
}

#[test]
fn enabling_one_function_reintroduces_the_key() {
    let registry = SchemaRegistry::builtin();
    let mut table = LootTable::default();
    let pool = table.pool_mut(0).unwrap();
    pool.attach(&registry, ModifierKind::Function, "furnace_smelt").unwrap();
    pool.attach(&registry, ModifierKind::Function, "explosion_decay").unwrap();
    pool.set_enabled(ModifierKind::Function, 0, false).unwrap();
    pool.set_enabled(ModifierKind::Function, 1, false).unwrap();
    assert!(project(&table)["pools"][0].get("functions").is_none());

    table
        .pool_mut(0)
        .unwrap()
        .set_enabled(ModifierKind::Function, 1, true)
        .unwrap();
    let document = project(&table);
    let functions = document["pools"][0]["functions"].as_array().unwrap();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0]["function"], "explosion_decay");
}
