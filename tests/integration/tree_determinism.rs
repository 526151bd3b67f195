use jsontree::tree::{build, parse, Node};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Render `value` as JSON text with object keys in reverse order.
fn reversed_text(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let members: Vec<String> = map
                .iter()
                .rev()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), reversed_text(v)))
                .collect();
            format!("{{{}}}", members.join(","))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(reversed_text).collect();
            format!("[{}]", items.join(","))
        }
        other => other.to_string(),
    }
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e9f64..1.0e9f64).prop_map(|f| json!(f)),
        ".{0,8}".prop_map(Value::String),
        "[:a]{0,3}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(prop_oneof![".{0,8}", "[:a]{0,3}"], inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// Value equality with integral floats equal to the matching integer.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| same_value(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| same_value(v, w)))
        }
        _ => a == b,
    }
}

fn assert_same_tree(a: &Node, b: &Node) {
    assert_eq!(a.hash(), b.hash());
    assert_eq!(a.weight(), b.weight());
    let left: Vec<(&str, usize)> = a.iter().map(|n| (n.hash(), n.weight())).collect();
    let right: Vec<(&str, usize)> = b.iter().map(|n| (n.hash(), n.weight())).collect();
    assert_eq!(left, right);
}

#[test]
fn same_document_builds_identical_trees() {
    let doc = br#"{"a": [1, 2.5, "x"], "b": {"c": null, "d": false}}"#;
    let first = parse(doc).unwrap();
    let second = parse(doc).unwrap();
    assert_same_tree(&first, &second);
    assert_eq!(first, second);
}

#[test]
fn key_order_does_not_change_hash() {
    let a = parse(br#"{"x": 1, "y": 2}"#).unwrap();
    let b = parse(br#"{"y": 2, "x": 1}"#).unwrap();
    assert_same_tree(&a, &b);
    assert_eq!(a.weight(), 3);

    let a = parse(br#"{"a": 1, "b": 2}"#).unwrap();
    let b = parse(br#"{"b": 2, "a": 1}"#).unwrap();
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn array_order_changes_hash() {
    let a = parse(b"[1, 2]").unwrap();
    let b = parse(b"[2, 1]").unwrap();
    assert_ne!(a.hash(), b.hash());
    assert_eq!(a.weight(), 3);
    assert_eq!(b.weight(), 3);

    let a = parse(br#"["a", "b"]"#).unwrap();
    let b = parse(br#"["b", "a"]"#).unwrap();
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn same_value_treats_integral_floats_as_integers() {
    assert!(same_value(&json!({"n": [3.0]}), &json!({"n": [3]})));
    assert!(!same_value(&json!(3.5), &json!(3)));
    assert!(!same_value(&json!({"a": 1}), &json!({"b": 1})));
}

#[test]
fn integral_float_and_integer_hash_equal() {
    let a = parse(b"42").unwrap();
    let b = parse(b"42.0").unwrap();
    assert_eq!(a.hash(), b.hash());
    assert_eq!(a.label().to_string(), "42");
    assert_eq!(b.label().to_string(), "42");

    let a = parse(br#"{"n": 1e2}"#).unwrap();
    let b = parse(br#"{"n": 100}"#).unwrap();
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn empty_object_array_and_null_are_distinct() {
    let object = build(&json!({}));
    let array = build(&json!([]));
    let null = build(&json!(null));
    assert_ne!(object.hash(), array.hash());
    assert_ne!(object.hash(), null.hash());
    assert_ne!(array.hash(), null.hash());
    assert_eq!(object.weight(), 1);
    assert_eq!(array.weight(), 1);
}

#[test]
fn leaf_change_propagates_to_ancestors_only() {
    let before = build(&json!({"a": {"b": 1}, "c": 3}));
    let after = build(&json!({"a": {"b": 2}, "c": 3}));

    assert_ne!(before.hash(), after.hash());
    assert_ne!(
        before.pointer("/a").unwrap().hash(),
        after.pointer("/a").unwrap().hash()
    );
    assert_ne!(
        before.pointer("/a/b").unwrap().hash(),
        after.pointer("/a/b").unwrap().hash()
    );
    assert_eq!(
        before.pointer("/c").unwrap().hash(),
        after.pointer("/c").unwrap().hash()
    );
}

#[test]
fn sibling_leaf_hash_is_stable_across_documents() {
    let small = build(&json!({"a": {"b": 1}}));
    let large = build(&json!({"a": {"b": 1}, "c": 3}));
    assert_eq!(
        small.pointer("/a").unwrap().hash(),
        large.pointer("/a").unwrap().hash()
    );
    let other = build(&json!({"c": 3, "z": []}));
    assert_eq!(
        large.pointer("/c").unwrap().hash(),
        other.pointer("/c").unwrap().hash()
    );
}

#[test]
fn renamed_key_changes_hash() {
    let a = build(&json!({"a": 1}));
    let b = build(&json!({"b": 1}));
    assert_ne!(a.hash(), b.hash());

    let a = build(&json!({"a": {}}));
    let b = build(&json!({"b": {}}));
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn value_kinds_are_not_confused() {
    let pairs = [
        (json!("1"), json!(1)),
        (json!("true"), json!(true)),
        (json!("null"), json!(null)),
        (json!([1]), json!({"": 1})),
        (json!([[]]), json!([{}])),
        (json!({"a": "b:c"}), json!({"a:b": "c"})),
        (json!({"": "x"}), json!({"x": ""})),
        (json!({"k": {"a": "b:c"}}), json!({"k": {"a:b": "c"}})),
        (json!({"a": ["b"]}), json!({"a": "b"})),
        (json!([{"a": 1}]), json!([{"a": "1"}])),
    ];
    for (a, b) in pairs {
        assert_ne!(build(&a).hash(), build(&b).hash(), "{} vs {}", a, b);
    }
}

proptest! {
    #[test]
    fn prop_key_order_invariance(value in arb_json()) {
        let forward = parse(value.to_string().as_bytes()).unwrap();
        let reversed = parse(reversed_text(&value).as_bytes()).unwrap();
        prop_assert_eq!(forward.hash(), reversed.hash());
        prop_assert_eq!(forward.weight(), reversed.weight());
    }

    #[test]
    fn prop_weight_is_subtree_size(value in arb_json()) {
        let root = build(&value);
        for node in root.iter() {
            let sum: usize = node.children().iter().map(Node::weight).sum();
            prop_assert_eq!(node.weight(), 1 + sum);
            prop_assert_eq!(node.iter().count(), node.weight());
        }
    }

    #[test]
    fn prop_build_is_deterministic(value in arb_json()) {
        let a = build(&value);
        let b = build(&value.clone());
        prop_assert_eq!(&a, &b);
    }

    #[test]
    fn prop_equal_hash_iff_equal_value(a in arb_json(), b in arb_json()) {
        let same_hash = build(&a).hash() == build(&b).hash();
        prop_assert_eq!(same_hash, same_value(&a, &b), "{} vs {}", a, b);
    }
}
