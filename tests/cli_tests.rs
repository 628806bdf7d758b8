// tests/cli_tests.rs

use query_walker::QueryError;
use query_walker::ast::TreeError;
use query_walker::cli::{CliError, WalkCommandOptions, execute_sql, execute_trace, list_tags};
use serde_json::json;

const TREE: &str = r#"{
    "tag": "OR",
    "children": [
        {"tag": "EQ", "children": [
            {"tag": "COL", "text": "cmis:name"},
            {"tag": "STRING_LIT", "text": "'report'"}
        ]},
        {"tag": "CONTAINS", "children": [{"tag": "STRING_LIT", "text": "'budget'"}]}
    ]
}"#;

fn options(input: &str) -> WalkCommandOptions {
    WalkCommandOptions {
        input: Some(input.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_sql_command() {
    assert_eq!(
        execute_sql(&options(TREE)).unwrap(),
        "(cmis:name = 'report' OR CONTAINS('budget'))"
    );
}

#[test]
fn test_trace_command() {
    let trace = execute_trace(&options(TREE)).unwrap();
    let hooks: Vec<&str> = trace
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["hook"].as_str().unwrap())
        .collect();

    assert_eq!(
        hooks,
        vec![
            "on_start_processing",
            "on_pre_or",
            "on_equals",
            "on_or",
            "on_contains",
            "on_post_or",
            "on_stop_processing",
        ]
    );
    assert_eq!(trace[4]["operands"], json!([null, "'budget'"]));
}

#[test]
fn test_null_tree_is_an_empty_clause() {
    assert_eq!(execute_sql(&options("null")).unwrap(), "");
    assert_eq!(execute_trace(&options("null")).unwrap(), json!([]));
}

#[test]
fn test_missing_input() {
    let err = execute_sql(&WalkCommandOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_invalid_json_and_tree() {
    assert!(matches!(execute_sql(&options("{")), Err(CliError::Json(_))));
    assert!(matches!(
        execute_sql(&options(r#"{"tag": "NOPE"}"#)),
        Err(CliError::Tree(_))
    ));
}

#[test]
fn test_wrong_child_count_is_an_error_not_a_panic() {
    let err = execute_trace(&options(r#"{"tag": "EQ"}"#)).unwrap_err();
    assert!(matches!(err, CliError::Tree(TreeError::Arity { found: 0, .. })));

    let err = execute_sql(&options(r#"{"tag": "NOT"}"#)).unwrap_err();
    assert_eq!(err.to_string(), "Invalid tree: NOT expects exactly 1 child, found 0");
}

#[test]
fn test_max_depth_option() {
    let mut opts = options(TREE);
    opts.max_depth = Some(2);
    let err = execute_trace(&opts).unwrap_err();
    assert!(matches!(
        err,
        CliError::Query(QueryError::QueryTooComplex { limit: 2 })
    ));
}

#[test]
fn test_tags_listing() {
    let listing = list_tags();
    assert!(listing.contains("EQ"));
    assert!(listing.lines().any(|l| l.starts_with("WHERE") && l.ends_with("root marker")));
    assert!(listing.lines().any(|l| l.starts_with("TIME_LIT") && l.ends_with("literal")));
    assert_eq!(listing.lines().count(), 30);
}
