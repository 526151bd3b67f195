use jsontree::tree::{build, parse, Label, Node, NodeKind, PathSegment, Scalar};
use serde_json::json;

fn assert_weights(root: &Node) {
    for node in root.iter() {
        let sum: usize = node.children().iter().map(Node::weight).sum();
        assert_eq!(node.weight(), 1 + sum, "weight mismatch at {:?}", node.label());
    }
}

#[test]
fn null_document_is_a_single_leaf() {
    let root = parse(b"null").unwrap();
    assert_eq!(root.kind(), NodeKind::Null);
    assert_eq!(root.weight(), 1);
    assert!(root.children().is_empty());
    assert_eq!(root.label(), &Label::Value(Scalar::Null));
}

#[test]
fn root_weight_counts_every_value() {
    let doc = br#"{
        "user": {
            "id": 123,
            "name": "Juan",
            "email": "juan@example.com",
            "active": true,
            "verified": false,
            "balance": 1500.50,
            "metadata": null
        },
        "hobbies": ["leer", "programar", "correr"],
        "addresses": [
            {"type": "home", "number": 456, "coordinates": {"lat": 19.4326, "lng": -99.1332}},
            {"type": "work", "number": 789, "coordinates": {"lat": 19.4284, "lng": -99.1276}}
        ],
        "empty_array": [],
        "empty_object": {},
        "mixed_array": [1, "text", true, null, {"nested": "value"}]
    }"#;
    let root = parse(doc).unwrap();
    // root 1, user 8, hobbies 4, addresses 1 + 2 * 6, empties 2, mixed 7
    assert_eq!(root.weight(), 1 + 8 + 4 + 13 + 2 + 7);
    assert_eq!(root.iter().count(), root.weight());
    assert_weights(&root);
}

#[test]
fn primitives_never_have_children() {
    let root = build(&json!([1, "a", false, null, {"k": [2.5]}]));
    for node in root.iter() {
        if node.kind().is_primitive() {
            assert!(node.children().is_empty());
            assert!(node.value().is_some());
        } else {
            assert!(node.value().is_none());
        }
    }
}

#[test]
fn object_children_are_sorted_and_keyed() {
    let root = parse(br#"{"delta": 4, "alpha": {"z": 1, "a": 2}, "charlie": [3]}"#).unwrap();
    let keys: Vec<&str> = root.children().iter().filter_map(Node::key).collect();
    assert_eq!(keys, ["alpha", "charlie", "delta"]);

    let alpha = &root.children()[0];
    assert_eq!(alpha.label(), &Label::Key("alpha".into()));
    let inner: Vec<&str> = alpha.children().iter().filter_map(Node::key).collect();
    assert_eq!(inner, ["a", "z"]);

    let delta = root.get(&[PathSegment::Key("delta".into())]).unwrap();
    assert_eq!(delta.kind(), NodeKind::Number);
    assert_eq!(delta.key(), Some("delta"));
    assert_eq!(delta.label().to_string(), "4");
}

#[test]
fn array_elements_are_unlabeled_and_ordered() {
    let root = build(&json!({"list": [{"n": 1}, [], "s"]}));
    let list = root.pointer("/list").unwrap();
    assert_eq!(list.children().len(), 3);
    assert_eq!(list.children()[0].label(), &Label::Element);
    assert_eq!(list.children()[1].label(), &Label::Element);
    assert_eq!(list.children()[1].kind(), NodeKind::Array);
    assert_eq!(list.children()[2].kind(), NodeKind::String);
    assert!(list.children().iter().all(|c| c.key().is_none()));
}

#[test]
fn empty_containers_have_weight_one() {
    for value in [json!({}), json!([])] {
        let root = build(&value);
        assert_eq!(root.weight(), 1);
        assert!(root.is_leaf());
        assert!(!root.is_primitive());
    }
}

#[test]
fn decode_errors_are_propagated() {
    let inputs: [&[u8]; 5] = [b"{", b"[1,]", b"{'a': 1}", b"", b"nul"];
    for bad in inputs {
        assert!(matches!(
            parse(bad),
            Err(jsontree::TreeError::Decode(_))
        ));
    }
}

#[test]
fn deep_nesting_builds_without_recursion() {
    let mut value = json!("leaf");
    for i in 0..20_000 {
        value = if i % 2 == 0 {
            serde_json::Value::Array(vec![value])
        } else {
            let mut map = serde_json::Map::new();
            map.insert("k".to_string(), value);
            serde_json::Value::Object(map)
        };
    }
    let root = build(&value);
    assert_eq!(root.weight(), 20_001);
    assert_eq!(root.depth(), 20_001);
    drop(root);
    let mut pending = vec![value];
    while let Some(mut v) = pending.pop() {
        match &mut v {
            serde_json::Value::Array(items) => pending.append(items),
            serde_json::Value::Object(map) => {
                let keys: Vec<String> = map.keys().cloned().collect();
                for key in keys {
                    if let Some(child) = map.remove(&key) {
                        pending.push(child);
                    }
                }
            }
            _ => {}
        }
    }
}
