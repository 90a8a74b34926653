//! SELECT / INSERT / UPDATE / DELETE statements around a compiled filter.
//!
//! Table and column names are pasted into the statement as given: nothing
//! here quotes or validates identifiers, so they must never come from
//! untrusted input. Only values are parameterized.
//!
//! A filter that compiles to nothing leaves the WHERE clause out. This
//! includes an empty list of alternatives: `{"id": []}` drops the `id`
//! condition, and when it was the only one, [`update`] and [`delete`] apply
//! to every row of the table. Check list lengths before building a
//! statement from them.
//!
//! ```rust
//! use pq_sql_core::{statement, Filter};
//!
//! let filter = Filter::keyed([("age", Filter::keyed([(">", 20)]))]);
//! let (sql, params) = statement::select("users", &["mail", "name"], &filter, &["updated DESC"])
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT mail, name FROM users WHERE age > ? ORDER BY updated DESC");
//! assert_eq!(params.len(), 1);
//! ```

use indexmap::IndexMap;
use tracing::debug;

use crate::compiler::compile;
use crate::error::{FilterError, Result};
use crate::filter::Filter;
use crate::value::{SqlValue, ToSqlValue};

/// Builds `WHERE <predicate>` followed by ` ORDER BY ...`.
///
/// The `WHERE` part is left out when the filter compiles to nothing, the
/// `ORDER BY` part when `order` is empty. Order expressions are used
/// verbatim.
///
/// # Errors
///
/// Returns [`FilterError::MalformedFilter`] if the filter is malformed.
pub fn where_clause(filter: &Filter, order: &[&str]) -> Result<(String, Vec<SqlValue>)> {
    let (predicate, params) = compile(filter)?.into_parts();

    let mut sql = String::new();
    if !predicate.is_empty() {
        sql.push_str("WHERE ");
        sql.push_str(&predicate);
    }
    if !order.is_empty() {
        if !sql.is_empty() {
            sql.push(' ');
        }
        sql.push_str("ORDER BY ");
        sql.push_str(&order.join(", "));
    }

    Ok((sql, params))
}

/// Builds a SELECT statement. An empty column list selects `*`.
///
/// # Errors
///
/// Returns [`FilterError::MalformedFilter`] if the filter is malformed.
pub fn select(
    table: &str,
    columns: &[&str],
    filter: &Filter,
    order: &[&str],
) -> Result<(String, Vec<SqlValue>)> {
    let projection = if columns.is_empty() {
        String::from("*")
    } else {
        columns.join(", ")
    };
    let (clause, params) = where_clause(filter, order)?;

    let sql = append_clause(format!("SELECT {projection} FROM {table}"), &clause);
    debug!(table, sql = %sql, params = params.len(), "Built SELECT");
    Ok((sql, params))
}

/// Builds an INSERT statement with one placeholder per column.
///
/// A column given twice keeps its first position and its last value.
#[must_use]
pub fn insert<I, K, V>(table: &str, values: I) -> (String, Vec<SqlValue>)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToSqlValue,
{
    let assignments = assignments(values);

    let mut sql = format!("INSERT INTO {table}");
    if !assignments.is_empty() {
        let columns: Vec<&str> = assignments.keys().map(String::as_str).collect();
        sql.push_str(&format!(" ({})", columns.join(", ")));
    }
    let placeholders = vec!["?"; assignments.len()].join(", ");
    sql.push_str(&format!(" VALUES ({placeholders})"));

    let params: Vec<SqlValue> = assignments.into_values().collect();
    debug!(table, sql = %sql, params = params.len(), "Built INSERT");
    (sql, params)
}

/// Builds an UPDATE statement.
///
/// Bind values are the assigned values in column order, then the WHERE
/// values.
///
/// # Errors
///
/// Returns [`FilterError::EmptyAssignments`] if there is no column to set,
/// [`FilterError::MalformedFilter`] if the filter is malformed.
pub fn update<I, K, V>(table: &str, values: I, filter: &Filter) -> Result<(String, Vec<SqlValue>)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToSqlValue,
{
    let assignments = assignments(values);
    if assignments.is_empty() {
        return Err(FilterError::EmptyAssignments {
            table: String::from(table),
        });
    }
    let (clause, where_params) = where_clause(filter, &[])?;

    let set_parts: Vec<String> = assignments
        .keys()
        .map(|column| format!("{column} = ?"))
        .collect();
    let sql = append_clause(
        format!("UPDATE {table} SET {}", set_parts.join(", ")),
        &clause,
    );

    let mut params: Vec<SqlValue> = assignments.into_values().collect();
    params.extend(where_params);
    debug!(table, sql = %sql, params = params.len(), "Built UPDATE");
    Ok((sql, params))
}

/// Builds a DELETE statement.
///
/// Without a WHERE clause every row is deleted; see the module docs for
/// filters that compile to nothing.
///
/// # Errors
///
/// Returns [`FilterError::MalformedFilter`] if the filter is malformed.
pub fn delete(table: &str, filter: &Filter) -> Result<(String, Vec<SqlValue>)> {
    let (clause, params) = where_clause(filter, &[])?;

    let sql = append_clause(format!("DELETE FROM {table}"), &clause);
    debug!(table, sql = %sql, params = params.len(), "Built DELETE");
    Ok((sql, params))
}

fn assignments<I, K, V>(values: I) -> IndexMap<String, SqlValue>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToSqlValue,
{
    values
        .into_iter()
        .map(|(column, value)| (column.into(), value.to_sql_value()))
        .collect()
}

fn append_clause(mut sql: String, clause: &str) -> String {
    if !clause.is_empty() {
        sql.push(' ');
        sql.push_str(clause);
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_empty_filter() {
        let (sql, params) = where_clause(&Filter::empty(), &[]).unwrap();
        assert_eq!(sql, "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_where_clause_order_only() {
        let (sql, _) = where_clause(&Filter::empty(), &["id", "name DESC"]).unwrap();
        assert_eq!(sql, "ORDER BY id, name DESC");
    }

    #[test]
    fn test_select_all_columns() {
        let (sql, params) = select("users", &[], &Filter::empty(), &[]).unwrap();
        assert_eq!(sql, "SELECT * FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn test_insert_duplicate_column_keeps_last_value() {
        let (sql, params) = insert("users", [("name", "a"), ("mail", "m"), ("name", "b")]);
        assert_eq!(sql, "INSERT INTO users (name, mail) VALUES (?, ?)");
        assert_eq!(
            params,
            vec![
                SqlValue::Text(String::from("b")),
                SqlValue::Text(String::from("m")),
            ]
        );
    }

    #[test]
    fn test_update_without_assignments() {
        let filter = Filter::keyed([("a", 1)]);
        let err = update("users", Vec::<(&str, i64)>::new(), &filter).unwrap_err();
        assert_eq!(
            err,
            FilterError::EmptyAssignments {
                table: String::from("users")
            }
        );
        assert_eq!(err.to_string(), "no columns to set in UPDATE users");
    }

    #[test]
    fn test_delete_with_empty_alternatives_has_no_where() {
        let filter = Filter::keyed([("id", Filter::seq(Vec::<i64>::new()))]);
        let (sql, params) = delete("users", &filter).unwrap();
        assert_eq!(sql, "DELETE FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn test_delete_without_filter() {
        let (sql, params) = delete("sessions", &Filter::empty()).unwrap();
        assert_eq!(sql, "DELETE FROM sessions");
        assert!(params.is_empty());
    }
}
