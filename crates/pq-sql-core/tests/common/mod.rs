#![allow(dead_code)]

use pq_sql_core::{compile, Filter, FilterError, SqlValue};
use serde_json::Value;

pub fn compiled(filter: Value) -> (String, Vec<SqlValue>) {
    let filter = Filter::from(filter);
    compile(&filter)
        .unwrap_or_else(|e| panic!("Failed to compile: {filter}\nError: {e}"))
        .into_parts()
}

pub fn sql(filter: Value) -> String {
    compiled(filter).0
}

pub fn malformed(filter: Value) -> String {
    let filter = Filter::from(filter);
    match compile(&filter) {
        Err(FilterError::MalformedFilter { detail }) => detail,
        Err(other) => panic!("Expected MalformedFilter for: {filter}\nGot: {other}"),
        Ok(fragment) => panic!("Expected MalformedFilter for: {filter}\nGot: {fragment:?}"),
    }
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

pub const fn int(n: i64) -> SqlValue {
    SqlValue::Int(n)
}
