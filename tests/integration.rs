//! Integration tests for Kettei
//!
//! End-to-end tests that take a tree from authoring through persistence to
//! validation.
//!
mod common;
use common::*;
use kettei::prelude::*;
use std::fs;
use std::sync::Arc;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// A storage record with one price threshold and two outcomes.
    struct FlatRule {
        threshold: f64,
        above: String,
        below: String,
    }

    impl IntoTree for FlatRule {
        fn into_tree(self) -> std::result::Result<DecisionTree, TreeConversionError> {
            if self.above.is_empty() || self.below.is_empty() {
                return Err(TreeConversionError::Invalid(
                    "both outcomes must be named".to_string(),
                ));
            }
            Ok(DecisionTree::new(
                vec![
                    Node::start("start", "Start"),
                    Node::condition(
                        "threshold",
                        Condition::new(
                            "price",
                            Operator::Gte,
                            Some(ConditionValue::number(self.threshold)),
                        ),
                    ),
                    Node::result("above", serde_json::json!({ "flow": self.above })),
                    Node::result("below", serde_json::json!({ "flow": self.below })),
                ],
                vec![
                    create_edge("start", "threshold", EdgeType::Default),
                    create_edge("threshold", "above", EdgeType::Yes),
                    create_edge("threshold", "below", EdgeType::No),
                ],
            ))
        }
    }

    fn strict_schema() -> TreeSchema {
        TreeSchema::builder(payment_shape())
            .with_rule(ConditionBranchesRule)
            .with_rule(AcyclicRule)
            .build()
    }

    #[test]
    fn test_stored_tree_parses_and_validates() {
        let tree = DecisionTree::from_json(SIMPLE_TREE_JSON).expect("Failed to parse tree");
        assert_eq!(tree.nodes.len(), 6);
        assert_eq!(tree.edges.len(), 5);

        let check = tree.node("check-price").unwrap().as_condition().unwrap();
        assert_eq!(
            check.data.condition.value,
            Some(ConditionValue::number_range(10.0, 250.0))
        );

        let group = tree.node("recent").unwrap().as_condition_group().unwrap();
        assert_eq!(group.data.label.as_deref(), Some("Recent or VIP"));
        assert_eq!(group.data.group.operator, LogicalOperator::Or);
        let values: Vec<Option<&ConditionValue>> = group
            .data
            .group
            .conditions
            .iter()
            .map(|c| c.value.as_ref())
            .collect();
        assert_eq!(
            values,
            vec![
                Some(&ConditionValue::duration(7.0, DurationUnit::Days)),
                Some(&ConditionValue::Range(RangeValue::Time {
                    from: "09:00".to_string(),
                    to: "17:30".to_string(),
                })),
                None,
            ]
        );

        let branches: Vec<EdgeType> = tree.edges.iter().map(Edge::branch).collect();
        assert_eq!(
            branches,
            vec![
                EdgeType::Default,
                EdgeType::Yes,
                EdgeType::No,
                EdgeType::Yes,
                EdgeType::No
            ]
        );

        strict_schema()
            .validate(&tree)
            .expect("Stored tree should be valid");
    }

    #[test]
    fn test_stored_tree_round_trips() {
        let tree = DecisionTree::from_json(SIMPLE_TREE_JSON).unwrap();
        let json = tree.to_json().unwrap();

        assert!(json.contains("\"max\": 250"));
        assert!(json.contains("\"amount\": 7"));
        assert!(!json.contains("250.0"));

        let reparsed = DecisionTree::from_json(&json).unwrap();
        assert_eq!(reparsed, tree);
    }

    #[test]
    fn test_mis_shaped_stored_values_are_reported_not_repaired() {
        let stored = SIMPLE_TREE_JSON
            .replace(r#""unit": "DAYS""#, r#""unit": "FORTNIGHTS""#)
            .replace(r#"{ "min": 10, "max": 250 }"#, r#"{ "min": 10, "max": null }"#);
        assert!(stored.contains("FORTNIGHTS"));
        assert!(stored.contains(r#""max": null"#));

        let tree = DecisionTree::from_json(&stored).unwrap();
        let err = strict_schema().validate(&tree).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "Node 'check-price': Field 'price' with operator 'BETWEEN' expects a range value",
                "Node 'recent': Condition 1: Field 'createdAt' with operator 'WITHIN_LAST' expects a duration value",
            ]
        );

        let persisted: serde_json::Value = serde_json::from_str(&tree.to_json().unwrap()).unwrap();
        assert_eq!(
            persisted["nodes"][1]["data"]["condition"]["value"],
            serde_json::json!({ "min": 10, "max": null })
        );
        assert_eq!(
            persisted["nodes"][2]["data"]["conditions"][0]["value"],
            serde_json::json!({ "amount": 7, "unit": "FORTNIGHTS" })
        );
    }

    #[test]
    fn test_shape_validator_rejects_undecodable_values() {
        let domain = payment_domain();
        let cases = [
            (
                serde_json::json!({ "field": "createdAt", "operator": "WITHIN_LAST",
                                    "value": { "amount": 5, "unit": "FORTNIGHTS" } }),
                "Field 'createdAt' with operator 'WITHIN_LAST' expects a duration value",
            ),
            (
                serde_json::json!({ "field": "method", "operator": "IN",
                                    "value": [{ "country": "TR" }, { "id": 1, "name": "a" }] }),
                "Field 'method' with operator 'IN' expects a multiSelect value",
            ),
            (
                serde_json::json!({ "field": "country", "operator": "EQ",
                                    "value": { "lat": 1, "lng": 2 } }),
                "Field 'country' with operator 'EQ' expects a location value",
            ),
            (
                serde_json::json!({ "field": "method", "operator": "EQ",
                                    "value": { "id": 1 } }),
                "Field 'method' with operator 'EQ' expects a select value",
            ),
        ];
        for (raw, expected) in cases {
            let condition: Condition = serde_json::from_value(raw).unwrap();
            assert_eq!(domain.validate_condition(&condition), vec![expected]);
        }
    }

    #[test]
    fn test_date_between_with_clock_like_bounds_is_valid() {
        let condition: Condition = serde_json::from_value(serde_json::json!({
            "field": "createdAt",
            "operator": "BETWEEN",
            "value": { "from": "10:00", "to": "11:00" }
        }))
        .unwrap();
        assert!(matches!(
            condition.value,
            Some(ConditionValue::Range(RangeValue::Time { .. }))
        ));
        assert!(payment_domain().validate_condition(&condition).is_empty());

        let clock = Condition::new(
            "cutoff",
            Operator::Between,
            Some(ConditionValue::Range(RangeValue::Date {
                from: Some("2024-01-01".to_string()),
                to: None,
            })),
        );
        assert_eq!(
            payment_domain().validate_condition(&clock),
            vec!["Field 'cutoff' with operator 'BETWEEN' expects a timeRange value"]
        );
    }

    #[test]
    fn test_author_tree_from_registry() {
        let mut registry = DomainRegistry::new();
        registry.register(payment_domain());
        let domain = registry.get("payments").unwrap();

        // Author adds a price condition and switches it to BETWEEN
        let mut price = domain.empty_condition("price").unwrap();
        price.value = domain.convert_value("price", Operator::Between, price.value);
        price.operator = Operator::Between;
        assert_eq!(price.value, Some(ConditionValue::number_range(0.0, 100.0)));

        // ...and a date condition switched to a relative window
        let mut created = domain.empty_condition("createdAt").unwrap();
        created.value = domain.convert_value("createdAt", Operator::WithinLast, created.value);
        created.operator = Operator::WithinLast;

        let start = create_node_id(NodeKind::Start);
        let check = create_node_id(NodeKind::Condition);
        let group = create_node_id(NodeKind::ConditionGroup);
        let card = create_node_id(NodeKind::Result);
        let wallet = create_node_id(NodeKind::Result);
        let review = create_node_id(NodeKind::Result);

        let tree = DecisionTree::new(
            vec![
                Node::start(&start, "Start"),
                Node::condition(&check, price),
                Node::condition_group(&group, LogicalOperator::And, vec![created]),
                Node::result(&card, serde_json::json!({ "flow": "card" })),
                Node::result(&wallet, serde_json::json!({ "flow": "wallet" })),
                Node::result(&review, serde_json::json!({ "flow": "manual_review" })),
            ],
            vec![
                create_edge(&start, &check, EdgeType::Default),
                create_edge(&check, &group, EdgeType::Yes),
                create_edge(&check, &wallet, EdgeType::No),
                create_edge(&group, &card, EdgeType::Yes),
                create_edge(&group, &review, EdgeType::No),
            ],
        );

        let schema = TreeSchema::builder(DomainNodeShape::new(Arc::clone(&domain)))
            .min_result_nodes(3)
            .with_rule(ConditionBranchesRule)
            .build();
        schema.validate(&tree).expect("Authored tree should be valid");

        let reparsed = DecisionTree::from_json(&tree.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, tree);
        assert!(schema.is_valid(&reparsed));
    }

    #[test]
    fn test_every_seeded_condition_is_valid() {
        let domain = payment_domain();
        for field in domain.fields().iter() {
            for option in domain.operators_for(&field.key) {
                let seeded = domain.empty_condition(&field.key).unwrap();
                let value = domain.convert_value(&field.key, option.operator, seeded.value);
                let condition = Condition::new(field.key.clone(), option.operator, value);
                assert_eq!(
                    domain.validate_condition(&condition),
                    Vec::<String>::new(),
                    "{} {}",
                    field.key,
                    option.operator
                );
            }
        }
    }

    #[test]
    fn test_custom_model_conversion() {
        let rule = FlatRule {
            threshold: 500.0,
            above: "bank_transfer".to_string(),
            below: "card".to_string(),
        };
        let tree = rule.into_tree().expect("Conversion should succeed");
        strict_schema()
            .validate(&tree)
            .expect("Converted tree should be valid");

        let broken = FlatRule {
            threshold: 0.0,
            above: String::new(),
            below: "card".to_string(),
        };
        let err = broken.into_tree().unwrap_err();
        assert_eq!(err.to_string(), "Invalid custom data: both outcomes must be named");
    }

    #[test]
    fn test_tree_and_domain_from_files() {
        let dir = std::env::temp_dir().join(format!("kettei-{}", create_edge_id_suffix()));
        fs::create_dir_all(&dir).unwrap();

        let tree_path = dir.join("tree.json");
        fs::write(&tree_path, SIMPLE_TREE_JSON).unwrap();
        let domain_path = dir.join("domain.json");
        let definition = DomainDefinition {
            name: "payments".to_string(),
            fields: payment_fields(),
        };
        fs::write(&domain_path, serde_json::to_string_pretty(&definition).unwrap()).unwrap();
        let config_path = dir.join("config.json");
        fs::write(&config_path, r#"{ "minResultNodes": 4 }"#).unwrap();

        let tree = DecisionTree::from_file(&tree_path).unwrap();
        let loaded = DomainDefinition::from_file(&domain_path).unwrap();
        assert_eq!(loaded, definition);
        let config = EngineConfig::from_file(&config_path).unwrap();

        let schema = TreeSchema::builder(DomainNodeShape::new(Arc::new(loaded.into_domain())))
            .with_config(&config)
            .build();
        let err = schema.validate(&tree).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Tree must have at least 4 result node(s) (found 3)"]
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = DecisionTree::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));

        let err = DecisionTree::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse JSON"));
    }

    fn create_edge_id_suffix() -> String {
        kettei::tree::create_edge_id().trim_start_matches("edge-").to_string()
    }
}
