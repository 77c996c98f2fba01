//! Builder output must always satisfy the validator, and no input text may
//! make the validator panic.

use addonforge_builder::{
    project, ComponentDocument, ComponentKind, EditError, EntryType, LootTable, ModifierHost,
    ModifierKind,
};
use addonforge_core::{IntRange, PropertyValue, ValueKind, ValueRange};
use addonforge_schema::{SchemaField, SchemaKind, SchemaRegistry};
use serde_json::{json, Map};
use addonforge_validator::{validate, validate_str, ContentKind, KindSelector, Validator};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddPool,
    RemovePool(usize),
    SetRolls(usize, i64, i64),
    SetBonusRolls(usize, i64, i64),
    AddEntry(usize, EntryType, usize),
    RemoveEntry(usize, usize),
    SetWeight(usize, usize, u32),
    SetQuality(usize, usize, Option<i32>),
    SetCount(usize, usize, Option<(i64, i64)>),
    SetType(usize, usize, EntryType),
    AttachToPool(usize, ModifierKind, usize),
    AttachToEntry(usize, usize, ModifierKind, usize),
    TogglePool(usize, ModifierKind, usize, bool),
    Detach(Target, ModifierKind, usize),
    SetProperty(Target, ModifierKind, usize, usize, ValueSeed),
    ClearProperty(Target, ModifierKind, usize, usize),
}

/// A pool, or one entry of a pool.
#[derive(Debug, Clone, Copy)]
struct Target {
    pool: usize,
    entry: Option<usize>,
}

/// Raw randomness turned into a property value once the field is known.
#[derive(Debug, Clone)]
struct ValueSeed {
    unit: (f64, f64),
    flag: bool,
    pick: usize,
    text: String,
    /// Produce a value of the wrong shape, which the builder must refuse.
    stray: bool,
}

#[derive(Debug, Clone)]
enum DocOp {
    Attach(usize),
    Detach(usize),
    Toggle(usize, bool),
    SetProperty(usize, usize, ValueSeed),
    ClearProperty(usize, usize),
    Rename(usize),
}

const IDENTIFIERS: &[&str] = &["demo:other", "minecraft:zombie", "ghoul", "a:b:c", ""];

const NAMES: &[&str] = &[
    "minecraft:bone",
    "arrow",
    "demo:ruby",
    "loot_tables/chests/simple_dungeon.json",
    "",
    " ",
    "a:b:c",
];

fn modifier_kind() -> impl Strategy<Value = ModifierKind> {
    prop_oneof![Just(ModifierKind::Function), Just(ModifierKind::Condition)]
}

fn entry_type() -> impl Strategy<Value = EntryType> {
    prop::sample::select(EntryType::ALL.to_vec())
}

fn tree_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddPool),
        (0usize..3).prop_map(Op::RemovePool),
        (0usize..3, -1i64..5, -1i64..5).prop_map(|(p, a, b)| Op::SetRolls(p, a, b)),
        (0usize..3, -1i64..5, -1i64..5).prop_map(|(p, a, b)| Op::SetBonusRolls(p, a, b)),
        (0usize..3, entry_type(), 0usize..NAMES.len())
            .prop_map(|(p, t, n)| Op::AddEntry(p, t, n)),
        (0usize..3, 0usize..3).prop_map(|(p, e)| Op::RemoveEntry(p, e)),
        (0usize..3, 0usize..3, 0u32..10).prop_map(|(p, e, w)| Op::SetWeight(p, e, w)),
        (0usize..3, 0usize..3, proptest::option::of(-3i32..3))
            .prop_map(|(p, e, q)| Op::SetQuality(p, e, q)),
        (0usize..3, 0usize..3, proptest::option::of((-1i64..4, -1i64..4)))
            .prop_map(|(p, e, c)| Op::SetCount(p, e, c)),
        (0usize..3, 0usize..3, entry_type()).prop_map(|(p, e, t)| Op::SetType(p, e, t)),
    ]
}

fn target() -> impl Strategy<Value = Target> {
    (0usize..3, proptest::option::of(0usize..3)).prop_map(|(pool, entry)| Target { pool, entry })
}

fn value_seed() -> impl Strategy<Value = ValueSeed> {
    (
        0.0f64..1.0,
        0.0f64..1.0,
        any::<bool>(),
        0usize..16,
        "[a-z:._ ]{0,12}",
        prop::bool::weighted(0.1),
    )
        .prop_map(|(a, b, flag, pick, text, stray)| ValueSeed {
            unit: (a, b),
            flag,
            pick,
            text,
            stray,
        })
}

fn modifier_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, modifier_kind(), 0usize..64).prop_map(|(p, k, n)| Op::AttachToPool(p, k, n)),
        (0usize..3, 0usize..3, modifier_kind(), 0usize..64)
            .prop_map(|(p, e, k, n)| Op::AttachToEntry(p, e, k, n)),
        (0usize..3, modifier_kind(), 0usize..3, any::<bool>())
            .prop_map(|(p, k, i, on)| Op::TogglePool(p, k, i, on)),
        (target(), modifier_kind(), 0usize..3).prop_map(|(t, k, i)| Op::Detach(t, k, i)),
        (target(), modifier_kind(), 0usize..3, 0usize..8, value_seed())
            .prop_map(|(t, k, i, f, v)| Op::SetProperty(t, k, i, f, v)),
        (target(), modifier_kind(), 0usize..3, 0usize..8)
            .prop_map(|(t, k, i, f)| Op::ClearProperty(t, k, i, f)),
    ]
}

fn doc_op() -> impl Strategy<Value = DocOp> {
    prop_oneof![
        3 => (0usize..64).prop_map(DocOp::Attach),
        1 => (0usize..6).prop_map(DocOp::Detach),
        1 => (0usize..6, any::<bool>()).prop_map(|(i, on)| DocOp::Toggle(i, on)),
        3 => (0usize..6, 0usize..8, value_seed()).prop_map(|(i, f, v)| DocOp::SetProperty(i, f, v)),
        1 => (0usize..6, 0usize..8).prop_map(|(i, f)| DocOp::ClearProperty(i, f)),
        1 => (0usize..IDENTIFIERS.len()).prop_map(DocOp::Rename),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![tree_op(), modifier_op()]
}

fn schema_name(registry: &SchemaRegistry, kind: ModifierKind, n: usize) -> String {
    let names: Vec<&str> = registry
        .entries(kind.schema_kind())
        .map(|entry| entry.name.as_str())
        .collect();
    names[n % names.len()].to_string()
}

/// A value the field accepts, or a wrongly shaped one for stray seeds.
fn value_for(field: &SchemaField, seed: &ValueSeed) -> PropertyValue {
    if seed.stray {
        return match field.kind {
            ValueKind::String => PropertyValue::Boolean(seed.flag),
            _ => PropertyValue::String(seed.text.clone()),
        };
    }
    let (lo, hi) = match (field.min, field.max) {
        (Some(lo), Some(hi)) => (lo, hi),
        (Some(lo), None) => (lo, lo + 100.0),
        (None, Some(hi)) => (hi - 100.0, hi),
        (None, None) => (-50.0, 50.0),
    };
    let scale = |t: f64| (lo + (hi - lo) * t).clamp(lo, hi);
    match field.kind {
        ValueKind::Number => PropertyValue::number(scale(seed.unit.0)),
        ValueKind::Range => {
            let (a, b) = (scale(seed.unit.0), scale(seed.unit.1));
            PropertyValue::Range(ValueRange::fractional(a.min(b), a.max(b)))
        }
        ValueKind::Boolean => PropertyValue::Boolean(seed.flag),
        ValueKind::String if field.options.is_empty() => PropertyValue::String(seed.text.clone()),
        ValueKind::String => {
            PropertyValue::String(field.options[seed.pick % field.options.len()].clone())
        }
        ValueKind::Array => PropertyValue::Array(vec![json!(seed.text), json!(seed.flag)]),
        ValueKind::Object => {
            let mut map = Map::new();
            map.insert("alpha".into(), json!(seed.text));
            map.insert("beta".into(), json!(seed.flag));
            PropertyValue::Object(map)
        }
    }
}

/// Field `pick` of the schema behind an attached instance.
fn field_of<'r>(
    registry: &'r SchemaRegistry,
    kind: SchemaKind,
    schema_name: Option<&str>,
    pick: usize,
) -> Option<&'r SchemaField> {
    let entry = registry.lookup(kind, schema_name?).ok()?;
    if entry.properties.is_empty() {
        return None;
    }
    Some(&entry.properties[pick % entry.properties.len()])
}

/// Property name and value for an edit; fieldless schemas get a name they
/// do not know, which must be refused.
fn property_edit(field: Option<&SchemaField>, seed: &ValueSeed) -> (String, PropertyValue) {
    match field {
        Some(field) => (field.name.clone(), value_for(field, seed)),
        None => ("unused".to_string(), PropertyValue::Boolean(seed.flag)),
    }
}

fn modifier_host(table: &mut LootTable, target: Target) -> Result<&mut dyn ModifierHost, EditError> {
    let pool = table.pool_mut(target.pool)?;
    match target.entry {
        None => Ok(pool as &mut dyn ModifierHost),
        Some(e) => Ok(pool.entry_mut(e)? as &mut dyn ModifierHost),
    }
}

fn modifier_field<'r>(
    registry: &'r SchemaRegistry,
    host: &dyn ModifierHost,
    kind: ModifierKind,
    index: usize,
    pick: usize,
) -> Option<&'r SchemaField> {
    let name = host
        .modifiers(kind)
        .get(index)
        .map(|item| item.schema_name.as_str());
    field_of(registry, kind.schema_kind(), name, pick)
}

fn apply(table: &mut LootTable, registry: &SchemaRegistry, op: &Op) {
    // Rejected edits are expected; only the surviving tree matters here.
    let _ = match op {
        Op::AddPool => {
            table.add_pool();
            Ok(())
        }
        Op::RemovePool(p) => table.remove_pool(*p).map(drop),
        Op::SetRolls(p, min, max) => table
            .pool_mut(*p)
            .and_then(|pool| pool.set_rolls(IntRange::new(*min, *max))),
        Op::SetBonusRolls(p, min, max) => table
            .pool_mut(*p)
            .and_then(|pool| pool.set_bonus_rolls(Some(IntRange::new(*min, *max)))),
        Op::AddEntry(p, entry_type, n) => table
            .pool_mut(*p)
            .and_then(|pool| pool.add_entry(*entry_type, NAMES[*n]))
            .map(drop),
        Op::RemoveEntry(p, e) => table
            .pool_mut(*p)
            .and_then(|pool| pool.remove_entry(*e))
            .map(drop),
        Op::SetWeight(p, e, w) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .and_then(|entry| entry.set_weight(*w)),
        Op::SetQuality(p, e, q) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .map(|entry| entry.set_quality(*q)),
        Op::SetCount(p, e, c) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .and_then(|entry| entry.set_count(c.map(|(min, max)| IntRange::new(min, max)))),
        Op::SetType(p, e, t) => table
            .pool_mut(*p)
            .and_then(|pool| pool.entry_mut(*e))
            .and_then(|entry| entry.set_type(*t)),
        Op::AttachToPool(p, kind, n) => {
            let name = schema_name(registry, *kind, *n);
            table
                .pool_mut(*p)
                .and_then(|pool| pool.attach(registry, *kind, &name))
                .map(drop)
        }
        Op::AttachToEntry(p, e, kind, n) => {
            let name = schema_name(registry, *kind, *n);
            table
                .pool_mut(*p)
                .and_then(|pool| pool.entry_mut(*e))
                .and_then(|entry| entry.attach(registry, *kind, &name))
                .map(drop)
        }
        Op::TogglePool(p, kind, i, on) => table
            .pool_mut(*p)
            .and_then(|pool| pool.set_enabled(*kind, *i, *on)),
        Op::Detach(target, kind, i) => {
            modifier_host(table, *target).and_then(|host| host.detach(*kind, *i).map(drop))
        }
        Op::SetProperty(target, kind, i, pick, seed) => {
            modifier_host(table, *target).and_then(|host| {
                let field = modifier_field(registry, host, *kind, *i, *pick);
                let (property, value) = property_edit(field, seed);
                host.set_modifier_property(registry, *kind, *i, &property, value)
            })
        }
        Op::ClearProperty(target, kind, i, pick) => {
            modifier_host(table, *target).and_then(|host| {
                let property = modifier_field(registry, host, *kind, *i, *pick)
                    .map_or_else(|| "unused".to_string(), |field| field.name.clone());
                host.clear_modifier_property(registry, *kind, *i, &property)
            })
        }
    };
}

fn apply_doc(document: &mut ComponentDocument, registry: &SchemaRegistry, op: &DocOp) {
    let kind = document.kind.schema_kind();
    let _ = match op {
        DocOp::Attach(n) => {
            let names: Vec<&str> = registry
                .entries(kind)
                .map(|entry| entry.name.as_str())
                .collect();
            document.attach(registry, names[n % names.len()]).map(drop)
        }
        DocOp::Detach(i) => document.detach(*i).map(drop),
        DocOp::Toggle(i, on) => document.set_enabled(*i, *on),
        DocOp::SetProperty(i, pick, seed) => {
            let name = document
                .components
                .get(*i)
                .map(|component| component.schema_name.as_str());
            let (property, value) = property_edit(field_of(registry, kind, name, *pick), seed);
            document.set_property(registry, *i, &property, value)
        }
        DocOp::ClearProperty(i, pick) => {
            let name = document
                .components
                .get(*i)
                .map(|component| component.schema_name.as_str());
            let property = field_of(registry, kind, name, *pick)
                .map_or_else(|| "unused".to_string(), |field| field.name.clone());
            document.clear_property(registry, *i, &property)
        }
        DocOp::Rename(n) => document.set_identifier(IDENTIFIERS[*n]),
    };
}

fn component_kind() -> impl Strategy<Value = ComponentKind> {
    prop_oneof![
        Just(ComponentKind::Entity),
        Just(ComponentKind::Block),
        Just(ComponentKind::Item),
    ]
}

proptest! {
    /// Property: a tree built only through builder operations projects to a
    /// valid loot table.
    #[test]
    fn builder_loot_tables_validate(ops in prop::collection::vec(op(), 0..40)) {
        let registry = SchemaRegistry::builtin();
        let mut table = LootTable::default();
        for op in &ops {
            apply(&mut table, &registry, op);
        }
        let document = project(&table);
        let result = Validator::new(&registry)
            .validate(&document, KindSelector::Explicit(ContentKind::LootTable));
        prop_assert!(result.is_valid, "{:?}\n{}", result.errors, document);

        let detected = validate(&document, KindSelector::Auto);
        prop_assert_eq!(detected.kind, Some(ContentKind::LootTable));
    }

    /// Property: component documents built through document edits are
    /// valid for their kind.
    #[test]
    fn builder_component_documents_validate(
        kind in component_kind(),
        ops in prop::collection::vec(doc_op(), 0..24),
    ) {
        let registry = SchemaRegistry::builtin();
        let mut document = ComponentDocument::new(kind, "demo:subject").unwrap();
        for op in &ops {
            apply_doc(&mut document, &registry, op);
        }
        let projected = document.project();
        let result = validate(&projected, KindSelector::Auto);
        prop_assert!(result.is_valid, "{:?}\n{}", result.errors, projected);
        let expected = match kind {
            ComponentKind::Entity => ContentKind::Entity,
            ComponentKind::Block => ContentKind::Block,
            ComponentKind::Item => ContentKind::Item,
        };
        prop_assert_eq!(result.kind, Some(expected));
    }

    /// Property: arbitrary text never panics and always yields a result.
    #[test]
    fn arbitrary_text_never_panics(text in ".{0,200}") {
        let result = validate_str(&text, KindSelector::Auto);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    /// Property: arbitrary JSON values never panic under any selector.
    #[test]
    fn arbitrary_json_never_panics(
        document in arbitrary_json(),
        kind in prop::sample::select(ContentKind::ALL.to_vec()),
    ) {
        let _ = validate(&document, KindSelector::Auto);
        let result = validate(&document, KindSelector::Explicit(kind));
        prop_assert_eq!(result.kind, Some(kind));
    }
}

fn arbitrary_json() -> impl Strategy<Value = serde_json::Value> {
    use serde_json::{json, Value};
    let key = prop::sample::select(vec![
        "format_version",
        "pools",
        "rolls",
        "entries",
        "type",
        "name",
        "weight",
        "functions",
        "function",
        "minecraft:entity",
        "minecraft:item",
        "minecraft:recipe_shaped",
        "description",
        "identifier",
        "components",
        "header",
        "modules",
        "uuid",
        "version",
        "pattern",
        "key",
    ]);
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..70).prop_map(|n| json!(n)),
        (-1.0f64..2.0).prop_map(|n| json!(n)),
        "[a-z:._ ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key.clone(), inner, 0..5).prop_map(|map| {
                Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect(),
                )
            }),
        ]
    })
}
