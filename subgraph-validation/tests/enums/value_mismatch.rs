use insta::assert_snapshot;
use itertools::Itertools;
use rstest::rstest;
use subgraph_validation::CompositionError;

use crate::ServiceDefinition;
use crate::assert_composition_errors;
use crate::parse_services;
use crate::validate_services;

// =============================================================================
// ENUM VALUES - enums defined in several subgraphs must declare the same values
// =============================================================================

#[rstest]
#[case("RED BLUE", "BLUE RED")]
#[case("RED BLUE GREEN", "GREEN RED BLUE")]
#[case("A B C D", "D C B A")]
fn accepts_values_declared_in_any_order(#[case] first: &str, #[case] second: &str) {
    let type_defs_a = format!("enum Color {{ {first} }}");
    let type_defs_b = format!("enum Color {{ {second} }}");
    let result = validate_services(&[
        ServiceDefinition {
            name: "subgraphA",
            type_defs: &type_defs_a,
        },
        ServiceDefinition {
            name: "subgraphB",
            type_defs: &type_defs_b,
        },
    ]);
    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn accepts_identical_enums_in_many_subgraphs() {
    let subgraph_a = ServiceDefinition {
        name: "subgraphA",
        type_defs: r#"
        type Query {
          color: Color
        }

        enum Color {
          RED
          BLUE
        }
        "#,
    };
    let subgraph_b = ServiceDefinition {
        name: "subgraphB",
        type_defs: r#"
        enum Color {
          BLUE
          RED
        }
        "#,
    };
    let subgraph_c = ServiceDefinition {
        name: "subgraphC",
        type_defs: r#"
        enum Color {
          RED
        }

        extend enum Color {
          BLUE
        }
        "#,
    };
    let subgraph_d = ServiceDefinition {
        name: "subgraphD",
        type_defs: r#"
        type Query {
          colors: [Color]
        }

        enum Color {
          BLUE
          RED
        }
        "#,
    };

    let result = validate_services(&[subgraph_a, subgraph_b, subgraph_c, subgraph_d]);
    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn errors_when_values_differ() {
    let subgraph_a = ServiceDefinition {
        name: "A",
        type_defs: r#"
        enum Color {
          RED
          BLUE
        }
        "#,
    };
    let subgraph_b = ServiceDefinition {
        name: "B",
        type_defs: r#"
        enum Color {
          BLUE
          RED
        }
        "#,
    };
    let subgraph_c = ServiceDefinition {
        name: "C",
        type_defs: r#"
        enum Color {
          RED
          GREEN
        }
        "#,
    };

    let result = validate_services(&[subgraph_a, subgraph_b, subgraph_c]);
    assert_composition_errors(
        &result,
        &[(
            "ENUM_MISMATCH",
            "The `Color` enum does not have identical values in all services. Groups of services with identical values are: [A, B], [C]",
        )],
    );
}

#[test]
fn reports_one_group_per_distinct_value_set() {
    let subgraph_a = ServiceDefinition {
        name: "subgraphA",
        type_defs: "enum E { V1 }",
    };
    let subgraph_b = ServiceDefinition {
        name: "subgraphB",
        type_defs: "enum E { V2 }",
    };
    let subgraph_c = ServiceDefinition {
        name: "subgraphC",
        type_defs: "enum E { V1 V2 }",
    };

    let errors = validate_services(&[subgraph_a, subgraph_b, subgraph_c]).unwrap_err();
    assert_eq!(errors.len(), 1);
    let CompositionError::EnumMismatch { groups, .. } = &errors[0] else {
        panic!("expected an enum mismatch, got {:?}", errors[0]);
    };
    assert_eq!(
        groups,
        &vec![
            vec!["subgraphA".to_string()],
            vec!["subgraphB".to_string()],
            vec!["subgraphC".to_string()],
        ]
    );
    assert_snapshot!(errors[0].to_string(), @"The `E` enum does not have identical values in all services. Groups of services with identical values are: [subgraphA], [subgraphB], [subgraphC]");
}

#[test]
fn enum_extensions_take_part_in_the_comparison() {
    let subgraph_a = ServiceDefinition {
        name: "subgraphA",
        type_defs: r#"
        enum Color {
          RED
        }

        extend enum Color {
          GREEN
        }
        "#,
    };
    let subgraph_b = ServiceDefinition {
        name: "subgraphB",
        type_defs: r#"
        enum Color {
          RED
        }
        "#,
    };

    let result = validate_services(&[subgraph_a, subgraph_b]);
    assert_composition_errors(
        &result,
        &[(
            "ENUM_MISMATCH",
            "The `Color` enum does not have identical values in all services. Groups of services with identical values are: [subgraphA], [subgraphB]",
        )],
    );
}

#[test]
fn groups_cover_every_subgraph_defining_the_enum() {
    let services = [
        ServiceDefinition {
            name: "s1",
            type_defs: "enum Size { S M }",
        },
        ServiceDefinition {
            name: "s2",
            type_defs: "enum Size { S M L }",
        },
        ServiceDefinition {
            name: "s3",
            type_defs: "type Query { ok: Boolean }",
        },
        ServiceDefinition {
            name: "s4",
            type_defs: "enum Size { M S }",
        },
        ServiceDefinition {
            name: "s5",
            type_defs: "enum Size { XL }",
        },
    ];

    let errors = validate_services(&services).unwrap_err();
    let CompositionError::EnumMismatch {
        groups,
        impacted_services,
        ..
    } = &errors[0]
    else {
        panic!("expected an enum mismatch, got {:?}", errors[0]);
    };
    let grouped = groups.iter().flatten().sorted().collect_vec();
    assert_eq!(grouped, vec!["s1", "s2", "s4", "s5"]);
    assert_eq!(
        impacted_services.services().collect_vec(),
        vec!["s1", "s4", "s2", "s5"]
    );
}

#[test]
fn validation_is_idempotent() {
    let services = [
        ServiceDefinition {
            name: "a",
            type_defs: "enum Color { RED } enum Status { OPEN }",
        },
        ServiceDefinition {
            name: "b",
            type_defs: "enum Color { BLUE } type Status { open: Boolean }",
        },
    ];
    let subgraphs = parse_services(&services);
    let fragments = subgraphs
        .iter()
        .flat_map(subgraph_validation::Subgraph::type_definitions)
        .collect_vec();

    let first = subgraph_validation::validate_enum_consistency(&fragments);
    let second = subgraph_validation::validate_enum_consistency(&fragments);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn records_the_location_of_each_definition() {
    let subgraph_a = ServiceDefinition {
        name: "subgraphA",
        type_defs: "enum Color { RED }",
    };
    let subgraph_b = ServiceDefinition {
        name: "subgraphB",
        type_defs: "\n\nenum Color { BLUE }",
    };

    let errors = validate_services(&[subgraph_a, subgraph_b]).unwrap_err();
    let impacted = errors[0].impacted_services();
    let start_lines = impacted
        .services()
        .map(|service| {
            impacted
                .locations(service)
                .unwrap()
                .iter()
                .map(|range| range.start.line)
                .collect_vec()
        })
        .collect_vec();
    assert_eq!(start_lines, vec![vec![0], vec![2]]);
}
