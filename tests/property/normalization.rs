//! Idempotence, preservation, coverage and per-element independence over generated trees

use fabric_defaults::tree::{apply_to_each, get_path};
use fabric_defaults::{
    classify, normalize, Classification, KeyPath, NormalizeOptions, Normalizer, PathRule,
    RuleTable, Strictness,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const KEYS: [&str; 4] = ["a", "b", "items", "tags"];

fn key() -> impl Strategy<Value = String> {
    prop::sample::select(KEYS.to_vec()).prop_map(String::from)
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..5).prop_map(|n| json!(n)),
        "[xy]{0,2}".prop_map(Value::String),
    ]
}

fn mapping(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::btree_map(key(), inner, 0..4)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
}

fn node() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            mapping(inner),
        ]
    })
}

fn tree() -> impl Strategy<Value = Value> {
    mapping(node())
}

fn table() -> RuleTable {
    RuleTable::new(vec![
        PathRule::group(["a"], ["b", "items"]),
        PathRule::list(["a"], "tags"),
        PathRule::for_each(["a", "items"], ["tags"]),
        PathRule::list(["b"], "tags"),
        PathRule::for_each(["items"], ["a", "b"]),
    ])
    .unwrap()
}

/// Non-for-each target paths of `table()`.
fn list_paths() -> Vec<KeyPath> {
    ["a.b", "a.items", "a.tags", "b.tags"]
        .iter()
        .map(|p| KeyPath::parse_dotted(p))
        .collect()
}

fn normalized(mut tree: Value) -> Value {
    normalize(&mut tree, &table());
    tree
}

fn state(tree: &Value, path: &KeyPath) -> Classification {
    classify(tree, path, Strictness::Lenient).unwrap()
}

proptest! {
    #[test]
    fn prop_normalization_is_idempotent(input in tree()) {
        let once = normalized(input);
        let twice = normalized(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_present_paths_are_preserved(input in tree()) {
        let output = normalized(input.clone());
        // `a.items` is excluded: its elements receive per-element defaults.
        for path in ["a.b", "a.tags", "b.tags"].map(KeyPath::parse_dotted) {
            if state(&input, &path) == Classification::Present {
                prop_assert_eq!(get_path(&input, path.keys()), get_path(&output, path.keys()));
            }
        }
    }

    #[test]
    fn prop_defaulted_paths_hold_sequences(input in tree()) {
        let output = normalized(input.clone());
        for path in list_paths() {
            let keys = path.keys();
            let parent_is_mapping = get_path(&output, &keys[..keys.len() - 1])
                .map(Value::is_object)
                .unwrap_or(false);
            if parent_is_mapping && state(&input, &path) != Classification::Present {
                prop_assert_eq!(state(&output, &path), Classification::Present);
                prop_assert_eq!(get_path(&output, keys), Some(&json!([])));
            }
        }
    }

    #[test]
    fn prop_missing_parent_is_never_created(input in tree()) {
        let output = normalized(input.clone());
        if input.get("b").is_none() {
            prop_assert!(output.get("b").is_none());
        }
        if input.get("items").is_none() {
            prop_assert!(output.get("items").is_none());
        }
    }

    #[test]
    fn prop_elements_are_defaulted_independently(
        elements in prop::collection::vec(node(), 0..6)
    ) {
        let suffix = KeyPath::from(["a", "b"]);
        let default = json!([]);

        let mut together = elements.clone();
        apply_to_each(&mut together, &suffix, &default, Strictness::Lenient).unwrap();

        for (index, element) in elements.into_iter().enumerate() {
            let mut alone = vec![element];
            apply_to_each(&mut alone, &suffix, &default, Strictness::Lenient).unwrap();
            prop_assert_eq!(&together[index], &alone[0]);
        }
    }

    #[test]
    fn prop_strict_success_matches_lenient(input in tree()) {
        let lenient = normalized(input.clone());
        let mut strict = input;
        let result = Normalizer::new(table(), NormalizeOptions::strict()).normalize(&mut strict);
        if result.is_ok() {
            prop_assert_eq!(strict, lenient);
        }
    }
}

/// Same idempotence guarantee over the built-in VXLAN table, with the runner used directly.
#[test]
fn test_vxlan_table_idempotence_property() {
    let vxlan = fabric_defaults::vxlan_rule_table().unwrap();
    let mut runner = proptest::test_runner::TestRunner::default();

    let vxlan_tree = mapping(node()).prop_map(|inner| json!({ "vxlan": inner }));
    runner
        .run(&vxlan_tree, |input| {
            let mut once = input;
            normalize(&mut once, &vxlan);
            let mut twice = once.clone();
            normalize(&mut twice, &vxlan);
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}
