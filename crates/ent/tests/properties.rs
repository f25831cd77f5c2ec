//! Property tests for loading, copying, merging and the JSON adapter.

use ent::codec::json;
use ent::{DiffOptions, Ent, EntClass, Map, MergeOptions, Value, diff, load, merge};
use proptest::prelude::*;

/// Plain trees with no nulls and JSON-exact floats.
fn plain_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1000i32..1000).prop_map(|n| Value::Float(f64::from(n) / 4.0)),
        "[a-z ]{0,8}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<Map>())),
        ]
    })
}

fn plain_map() -> impl Strategy<Value = Map> {
    prop::collection::vec(("[a-z]{1,6}", plain_tree()), 0..8)
        .prop_map(|entries| entries.into_iter().collect::<Map>())
}

fn loaded(map: Map) -> Ent {
    match load(&Value::Map(map)) {
        Value::Ent(ent) => ent,
        other => panic!("expected an ent, got {other:?}"),
    }
}

fn assert_all_of_class(value: &Value, class: &EntClass) {
    match value {
        Value::Ent(ent) => {
            assert_eq!(ent.class(), class);
            for (_, child) in ent {
                assert_all_of_class(child, class);
            }
        }
        Value::List(items) => items.iter().for_each(|item| assert_all_of_class(item, class)),
        Value::Map(_) => panic!("mapping left unloaded"),
        _ => {}
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn load_then_encode_restores_plain_tree(tree in plain_tree()) {
        prop_assert_eq!(load(&tree).encode(), tree);
    }

    #[test]
    fn load_turns_every_mapping_into_an_ent(tree in plain_tree()) {
        assert_all_of_class(&load(&tree), &EntClass::base());
    }

    #[test]
    fn class_load_keeps_the_class_all_the_way_down(tree in plain_tree()) {
        let class = EntClass::define("PropertyFoo", &EntClass::base(), &[]).unwrap();
        assert_all_of_class(&class.load(&tree), &class);
    }

    #[test]
    fn json_round_trip_matches_load(tree in plain_tree()) {
        let text = json::dumps(&tree).unwrap();
        prop_assert_eq!(json::loads(&text).unwrap(), load(&tree));
    }

    #[test]
    fn copy_is_equal_and_independent(map in plain_map()) {
        let original = loaded(map);
        let snapshot = original.clone();

        let mut copy = original.copy();
        prop_assert_eq!(&copy, &original);

        let keys: Vec<String> = copy.keys().map(str::to_string).collect();
        for key in &keys {
            if let Some(child) = copy.get_ent_mut(key) {
                child.set("__added", 1);
            }
        }
        copy.set("__added", 1);
        if let Some(key) = keys.first() {
            copy.remove(key);
        }
        prop_assert_eq!(original, snapshot);
    }

    #[test]
    fn merging_an_ent_with_itself_is_identity(map in plain_map(), newkeys in any::<bool>()) {
        let ent = loaded(map);
        let options = MergeOptions::new().newkeys(newkeys);
        prop_assert_eq!(merge(&[&ent], &options).unwrap(), ent.clone());
        prop_assert_eq!(merge(&[&ent, &ent], &options).unwrap(), ent);
    }

    #[test]
    fn diff_of_identical_ents_is_empty(map in plain_map()) {
        let ent = loaded(map);
        let changes = diff(&[&ent, &ent.copy()], &DiffOptions::new().newkeys(true)).unwrap();
        prop_assert!(changes.is_empty());
    }

    #[test]
    fn diff_only_reports_keys_of_the_newer_ent(a in plain_map(), b in plain_map()) {
        let (a, b) = (loaded(a), loaded(b));
        let changes = diff(&[&a, &b], &DiffOptions::new().newkeys(true)).unwrap();
        for key in changes.keys() {
            prop_assert!(b.contains_key(key));
        }
    }

    #[test]
    fn merge_never_changes_existing_types(a in plain_map(), b in plain_map()) {
        let (a, b) = (loaded(a), loaded(b));
        let merged = merge(&[&a, &b], &MergeOptions::default()).unwrap();
        prop_assert_eq!(merged.len(), a.len());
        for (key, value) in &a {
            let after = merged.get(key).unwrap();
            prop_assert!(after.same_type(value));
        }
    }
}

#[test]
fn unsafe_values_load_as_null() {
    assert_eq!(load(&Value::Null), Value::Null);
    assert_eq!(load(&Value::opaque(42u32)), Value::Null);

    let list = Value::List(vec![Value::Int(1), Value::opaque("x")]);
    assert_eq!(load(&list), Value::List(vec![Value::Int(1), Value::Null]));
}
