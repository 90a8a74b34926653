//! Tests for the special operators, NULL handling and pass-through
//! comparison symbols.

mod common;
use common::*;

use serde_json::json;

// ===================================================================
// NULL operands
// ===================================================================

#[test]
fn not_equal_null_is_is_not_null() {
    let (sql, params) = compiled(json!({"col": {"!=": null}}));
    assert_eq!(sql, "col IS NOT NULL");
    assert!(params.is_empty());
}

#[test]
fn other_operator_null_is_is_null() {
    for op in [">", "=", "<>", "-like", "-in", "-between", "-inject"] {
        let (sql, params) = compiled(json!({"col": {op: null}}));
        assert_eq!(sql, "col IS NULL", "operator {op}");
        assert!(params.is_empty());
    }
}

#[test]
fn null_next_to_bound_values() {
    let (sql, params) = compiled(json!({
        "priority": {"<": 2},
        "requestor": {"!=": null},
    }));
    assert_eq!(sql, "priority < ? AND requestor IS NOT NULL");
    assert_eq!(params, vec![int(2)]);
}

#[test]
fn null_inside_operator_list() {
    let (sql, params) = compiled(json!({"col": {"!=": [1, null]}}));
    assert_eq!(sql, "( col != ? OR col IS NOT NULL )");
    assert_eq!(params, vec![int(1)]);
}

// ===================================================================
// LIKE
// ===================================================================

#[test]
fn like() {
    let (sql, params) = compiled(json!({"mail": {"-like": "%@example.com"}}));
    assert_eq!(sql, "mail LIKE ?");
    assert_eq!(params, vec![text("%@example.com")]);
}

#[test]
fn not_like() {
    let (sql, params) = compiled(json!({"mail": {"-not_like": "%@spam.com"}}));
    assert_eq!(sql, "mail NOT LIKE ?");
    assert_eq!(params, vec![text("%@spam.com")]);
}

// ===================================================================
// BETWEEN
// ===================================================================

#[test]
fn between_pair() {
    let (sql, params) = compiled(json!({"age": {"-between": [18, 65]}}));
    assert_eq!(sql, "age BETWEEN ? AND ?");
    assert_eq!(params, vec![int(18), int(65)]);
}

#[test]
fn not_between_pair() {
    let (sql, params) = compiled(json!({
        "user": "nwiger",
        "completion_date": {"-not_between": ["2002-10-01", "2003-02-06"]},
    }));
    assert_eq!(sql, "user = ? AND completion_date NOT BETWEEN ? AND ?");
    assert_eq!(
        params,
        vec![text("nwiger"), text("2002-10-01"), text("2003-02-06")]
    );
}

// A single bound is passed through with one placeholder and one value.
#[test]
fn between_single_bound() {
    let (sql, params) = compiled(json!({"age": {"-between": 18}}));
    assert_eq!(sql, "age BETWEEN ?");
    assert_eq!(params, vec![int(18)]);
}

#[test]
fn not_between_single_bound() {
    let (sql, params) = compiled(json!({"age": {"-not_between": 18}}));
    assert_eq!(sql, "age NOT BETWEEN ?");
    assert_eq!(params, vec![int(18)]);
}

#[test]
fn between_next_to_comparison() {
    let (sql, params) = compiled(json!({"age": {">=": 18, "-between": [1, 2]}}));
    assert_eq!(sql, "( age >= ? AND age BETWEEN ? AND ? )");
    assert_eq!(params, vec![int(18), int(1), int(2)]);
}

// ===================================================================
// IN
// ===================================================================

#[test]
fn in_list() {
    let (sql, params) = compiled(json!({"col": {"-in": ["a", "b", "c"]}}));
    assert_eq!(sql, "col IN (?,?,?)");
    assert_eq!(params, vec![text("a"), text("b"), text("c")]);
}

#[test]
fn in_list_next_to_scalar() {
    let (sql, params) = compiled(json!({
        "status": "completed",
        "reportid": {"-in": [567, 2335, 2]},
    }));
    assert_eq!(sql, "status = ? AND reportid IN (?,?,?)");
    assert_eq!(
        params,
        vec![text("completed"), int(567), int(2335), int(2)]
    );
}

#[test]
fn in_single_element() {
    let (sql, params) = compiled(json!({"id": {"-in": [7]}}));
    assert_eq!(sql, "id IN (?)");
    assert_eq!(params, vec![int(7)]);
}

#[test]
fn in_empty_list_is_passed_through() {
    let (sql, params) = compiled(json!({"id": {"-in": []}}));
    assert_eq!(sql, "id IN ()");
    assert!(params.is_empty());
}

// ===================================================================
// Raw injection
// ===================================================================

#[test]
fn inject_is_verbatim() {
    let (sql, params) = compiled(json!({
        "priority": {"<": 2},
        "requestor": {"-inject": "is not null"},
    }));
    assert_eq!(sql, "priority < ? AND requestor is not null");
    assert_eq!(params, vec![int(2)]);
}

#[test]
fn inject_number() {
    let (sql, params) = compiled(json!({"n": {"-inject": 5}}));
    assert_eq!(sql, "n 5");
    assert!(params.is_empty());
}

// ===================================================================
// Comparison symbols
// ===================================================================

#[test]
fn comparison_symbols_are_verbatim() {
    for op in ["=", "!=", "<>", ">", "<", ">=", "<=", "REGEXP"] {
        let (sql, params) = compiled(json!({"col": {op: 1}}));
        assert_eq!(sql, format!("col {op} ?"));
        assert_eq!(params, vec![int(1)]);
    }
}

#[test]
fn unknown_dash_token_is_a_comparison() {
    assert_eq!(sql(json!({"col": {"-glob": "a*"}})), "col -glob ?");
}
