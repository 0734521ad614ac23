//! Output mapping evaluation
//!
//! Walks the configured mapping tree against a decoded JSON response and
//! produces the ordered text fragments that make up a tool's result. A
//! node whose key does not resolve, or whose resolved value has the wrong
//! shape, contributes nothing; extraction misses are local, silent, and
//! never fail the call.

use crate::config::{MappingKind, OutputMapping};
use crate::engine::path;
use serde_json::Value;

/// Render a resolved value for inclusion in a fragment.
///
/// Strings print without quotes; numbers, booleans, and null print their
/// JSON token; composite values falling on a primitive node render as
/// compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Evaluate `mappings` against `context` in declaration order.
///
/// A non-object context makes every key lookup miss, so the result is
/// empty rather than an error; this is what makes array items of
/// unexpected shape degrade to empty item bodies instead of failing.
pub fn evaluate(context: &Value, mappings: &[OutputMapping]) -> Vec<String> {
    let mut fragments = Vec::new();

    for mapping in mappings {
        let Some(value) = path::resolve(context, &mapping.key) else {
            continue;
        };

        match mapping.kind {
            MappingKind::Primitive => {
                fragments.push(format!("{}:{}", mapping.label, display_value(value)));
            }
            MappingKind::Array => {
                let Some(items) = value.as_array() else {
                    continue;
                };

                let effective_limit = if mapping.limit == 0 || mapping.limit > items.len() {
                    items.len()
                } else {
                    mapping.limit
                };

                let rendered: Vec<String> = items[..effective_limit]
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let sub = evaluate(item, &mapping.children);
                        format!("项{}:{{{}}}", i + 1, sub.join(", "))
                    })
                    .collect();

                fragments.push(format!("{}:[{}]", mapping.label, rendered.join(" | ")));
            }
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn primitive(key: &str, label: &str) -> OutputMapping {
        OutputMapping {
            key: key.to_string(),
            label: label.to_string(),
            kind: MappingKind::Primitive,
            limit: 0,
            children: Vec::new(),
        }
    }

    fn array(key: &str, label: &str, limit: usize, children: Vec<OutputMapping>) -> OutputMapping {
        OutputMapping {
            key: key.to_string(),
            label: label.to_string(),
            kind: MappingKind::Array,
            limit,
            children,
        }
    }

    #[test]
    fn test_single_primitive_fragment() {
        let context = json!({ "name": "test-user", "id": 123 });
        let fragments = evaluate(&context, &[primitive("name", "Name")]);
        assert_eq!(fragments, vec!["Name:test-user"]);
    }

    #[test]
    fn test_missing_key_is_skipped() {
        let context = json!({ "name": "test-user" });
        let fragments = evaluate(
            &context,
            &[primitive("missing", "Gone"), primitive("name", "Name")],
        );
        assert_eq!(fragments, vec!["Name:test-user"]);
    }

    #[test]
    fn test_nested_array_with_limit() {
        let context = json!({
            "results": [
                { "item": { "name": "A", "value": 1 } },
                { "item": { "name": "B", "value": 2 } },
                { "item": { "name": "C", "value": 3 } }
            ],
            "metadata": { "count": 3 }
        });
        let mappings = vec![
            array(
                "results",
                "Results",
                2,
                vec![
                    primitive("item.name", "Name"),
                    primitive("item.value", "Value"),
                ],
            ),
            primitive("metadata.count", "Count"),
        ];

        let fragments = evaluate(&context, &mappings);
        assert_eq!(
            fragments,
            vec![
                "Results:[项1:{Name:A, Value:1} | 项2:{Name:B, Value:2}]",
                "Count:3"
            ]
        );
    }

    #[test]
    fn test_zero_limit_renders_all_items() {
        let context = json!({ "xs": [ { "v": 1 }, { "v": 2 }, { "v": 3 } ] });
        let fragments = evaluate(&context, &[array("xs", "Xs", 0, vec![primitive("v", "V")])]);
        assert_eq!(fragments, vec!["Xs:[项1:{V:1} | 项2:{V:2} | 项3:{V:3}]"]);
    }

    #[test]
    fn test_limit_beyond_length_is_clamped() {
        let context = json!({ "xs": [ { "v": 1 } ] });
        let fragments = evaluate(&context, &[array("xs", "Xs", 10, vec![primitive("v", "V")])]);
        assert_eq!(fragments, vec!["Xs:[项1:{V:1}]"]);
    }

    #[test]
    fn test_empty_array_renders_empty_brackets() {
        let context = json!({ "xs": [] });
        let fragments = evaluate(&context, &[array("xs", "Xs", 0, vec![primitive("v", "V")])]);
        assert_eq!(fragments, vec!["Xs:[]"]);
    }

    #[test]
    fn test_array_node_on_non_array_value_is_skipped() {
        let context = json!({ "xs": "not-an-array" });
        let fragments = evaluate(&context, &[array("xs", "Xs", 0, vec![])]);
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_non_object_context_produces_nothing() {
        let fragments = evaluate(&json!(42), &[primitive("name", "Name")]);
        assert!(fragments.is_empty());

        let fragments = evaluate(&json!(["a", "b"]), &[primitive("name", "Name")]);
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_scalar_array_items_have_empty_bodies() {
        // Items that are not objects make every child lookup miss.
        let context = json!({ "xs": [1, 2] });
        let fragments = evaluate(&context, &[array("xs", "Xs", 0, vec![primitive("v", "V")])]);
        assert_eq!(fragments, vec!["Xs:[项1:{} | 项2:{}]"]);
    }

    #[test]
    fn test_deeply_nested_arrays() {
        let context = json!({
            "outer": [
                { "inner": [ { "leaf": "x" }, { "leaf": "y" } ] }
            ]
        });
        let mappings = vec![array(
            "outer",
            "Outer",
            0,
            vec![array("inner", "Inner", 0, vec![primitive("leaf", "Leaf")])],
        )];

        let fragments = evaluate(&context, &mappings);
        assert_eq!(
            fragments,
            vec!["Outer:[项1:{Inner:[项1:{Leaf:x} | 项2:{Leaf:y}]}]"]
        );
    }

    #[test]
    fn test_display_value_forms() {
        assert_eq!(display_value(&json!("plain")), "plain");
        assert_eq!(display_value(&json!(3.5)), "3.5");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!({ "k": 1 })), r#"{"k":1}"#);
    }

    proptest! {
        #[test]
        fn prop_item_count_is_min_of_limit_and_length(len in 0usize..20, limit in 0usize..30) {
            let items: Vec<Value> = (0..len).map(|i| json!({ "v": i })).collect();
            let context = json!({ "xs": items });

            let fragments = evaluate(
                &context,
                &[array("xs", "Xs", limit, vec![primitive("v", "V")])],
            );

            let expected = if limit == 0 { len } else { limit.min(len) };
            let body = fragments[0]
                .strip_prefix("Xs:[")
                .and_then(|s| s.strip_suffix(']'))
                .unwrap();
            let count = if body.is_empty() {
                0
            } else {
                body.split(" | ").count()
            };
            prop_assert_eq!(count, expected);
        }
    }
}
