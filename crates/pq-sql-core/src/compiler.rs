//! The WHERE-clause compiler.
//!
//! Walks a [`Filter`] and produces a [`Fragment`]: SQL text with `?`
//! placeholders and the values to bind, in placeholder order.
//!
//! ```rust
//! use pq_sql_core::{compile, Filter, SqlValue};
//!
//! let filter = Filter::keyed([
//!     ("user", Filter::from("nwiger")),
//!     ("status", Filter::keyed([("!=", "completed")])),
//! ]);
//! let fragment = compile(&filter).unwrap();
//!
//! assert_eq!(fragment.sql(), "user = ? AND status != ?");
//! assert_eq!(
//!     fragment.params(),
//!     &[
//!         SqlValue::Text(String::from("nwiger")),
//!         SqlValue::Text(String::from("completed")),
//!     ]
//! );
//! ```
//!
//! Grouping rules:
//!
//! - entries of a keyed node are AND-ed;
//! - elements of a sequence of keyed nodes are OR-ed;
//! - `-nest`, `-and` and `-or` in column position open a parenthesized group;
//! - several comparisons on one column are AND-ed, a list of values for one
//!   column is OR-ed.
//!
//! A fold of two or more fragments is wrapped in `( ... )` unless it is the
//! outermost one; a single fragment is never wrapped by its own fold.

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::{FilterError, Result};
use crate::filter::Filter;
use crate::operator::{logical_join, Control, Join, Operator};
use crate::value::SqlValue;

/// Compiled SQL text and its bind values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    params: Vec<SqlValue>,
}

impl Fragment {
    /// Creates a fragment.
    #[must_use]
    pub const fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    /// Creates a fragment without placeholders.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql.into(), vec![])
    }

    /// The SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind values, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Returns `true` when there is no SQL text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Splits the fragment into text and bind values.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

/// Compiles a filter into a WHERE predicate (without the `WHERE` keyword).
///
/// An empty keyed filter compiles to an empty fragment.
///
/// # Errors
///
/// Returns [`FilterError::MalformedFilter`] when the top-level node is not
/// keyed or a sequence, or when any nested node has a shape its position
/// does not allow.
pub fn compile(filter: &Filter) -> Result<Fragment> {
    let fragment = group(filter, false, Join::And)?;
    trace!(
        sql = %fragment.sql,
        params = fragment.params.len(),
        "Compiled filter"
    );
    Ok(fragment)
}

/// Keyed: AND-ed (or `join`-ed) column conditions.
/// Sequence: OR-ed keyed sub-filters, each bracketed when there are several.
fn group(node: &Filter, bracket: bool, join: Join) -> Result<Fragment> {
    match node {
        Filter::Keyed(entries) => {
            let parts = entries
                .iter()
                .map(|(name, value)| column(name, value))
                .collect::<Result<Vec<_>>>()?;
            Ok(fold(parts, join, bracket))
        }
        Filter::Sequence(items) => {
            let nested = items.len() > 1;
            let parts = items
                .iter()
                .map(|item| match item {
                    Filter::Keyed(_) => group(item, nested, Join::And),
                    other => Err(FilterError::malformed(format!(
                        "expected a keyed filter inside a sequence, found {} {other}",
                        other.kind()
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(fold(parts, Join::Or, bracket))
        }
        other => Err(FilterError::malformed(format!(
            "expected a keyed filter or a sequence, found {} {other}",
            other.kind()
        ))),
    }
}

fn column(name: &str, value: &Filter) -> Result<Fragment> {
    if let Some(control) = Control::parse(name) {
        return group(value, true, control.join()).map_err(|err| {
            FilterError::malformed(format!("in {}: {}", control.token(), err.detail()))
        });
    }

    match value {
        Filter::Scalar(_) | Filter::Null => operator(name, Operator::EQ, value),
        Filter::Sequence(items) => alternatives(name, items, Join::Or),
        Filter::Keyed(ops) => match single_logical_join(ops) {
            Some((token, join)) => {
                if ops.len() > 1 {
                    return Err(FilterError::malformed(format!(
                        "column {name}: {token} must be the only key, found {value}"
                    )));
                }
                match &ops[0] {
                    Filter::Keyed(inner) => operator_set(name, inner, join),
                    Filter::Sequence(items) => alternatives(name, items, join),
                    other => Err(FilterError::malformed(format!(
                        "column {name}: {token} expects a keyed node or a sequence, found {} {other}",
                        other.kind()
                    ))),
                }
            }
            None => operator_set(name, ops, Join::And),
        },
    }
}

/// Returns the join selected by the first key, if it is `-and` / `-or`.
fn single_logical_join(ops: &IndexMap<String, Filter>) -> Option<(&str, Join)> {
    let (token, _) = ops.first()?;
    logical_join(token).map(|join| (token.as_str(), join))
}

/// Alternatives for one column: operator sets, nested lists or bare values.
fn alternatives(column: &str, items: &[Filter], join: Join) -> Result<Fragment> {
    let parts = items
        .iter()
        .map(|item| match item {
            Filter::Keyed(ops) => operator_set(column, ops, Join::And),
            Filter::Sequence(nested) => alternatives(column, nested, Join::Or),
            Filter::Scalar(_) | Filter::Null => operator(column, Operator::EQ, item),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(fold(parts, join, true))
}

/// Every `operator => operand` pair applied to one column.
fn operator_set(column: &str, ops: &IndexMap<String, Filter>, join: Join) -> Result<Fragment> {
    if ops.is_empty() {
        return Err(FilterError::malformed(format!(
            "column {column}: empty operator set"
        )));
    }

    let parts = ops
        .iter()
        .map(|(token, operand)| {
            if Control::parse(token).is_some() {
                return Err(FilterError::malformed(format!(
                    "column {column}: control token {token} used as an operator"
                )));
            }
            operator(column, Operator::parse(token), operand)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(fold(parts, join, true))
}

fn operator(column: &str, op: Operator<'_>, operand: &Filter) -> Result<Fragment> {
    if operand.is_null() {
        let test = if op.negates_null() {
            "IS NOT NULL"
        } else {
            "IS NULL"
        };
        return Ok(Fragment::raw(format!("{column} {test}")));
    }

    match op {
        Operator::Like => single(column, "LIKE", op, operand),
        Operator::NotLike => single(column, "NOT LIKE", op, operand),
        Operator::Between => range(column, "BETWEEN", op, operand),
        Operator::NotBetween => range(column, "NOT BETWEEN", op, operand),
        Operator::In => in_list(column, operand),
        Operator::Inject => match operand {
            Filter::Scalar(text) => Ok(Fragment::raw(format!("{column} {}", text.to_raw_sql()))),
            other => Err(shape_error(column, op, "a scalar", other)),
        },
        Operator::Compare(symbol) => match operand {
            Filter::Scalar(value) => Ok(Fragment::new(
                format!("{column} {symbol} ?"),
                vec![value.clone()],
            )),
            Filter::Sequence(items) => {
                let parts = items
                    .iter()
                    .map(|item| operator(column, op, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(fold(parts, Join::Or, true))
            }
            other => Err(shape_error(column, op, "a scalar or a sequence", other)),
        },
    }
}

fn single(column: &str, keyword: &str, op: Operator<'_>, operand: &Filter) -> Result<Fragment> {
    match operand {
        Filter::Scalar(value) => Ok(Fragment::new(
            format!("{column} {keyword} ?"),
            vec![value.clone()],
        )),
        other => Err(shape_error(column, op, "a scalar", other)),
    }
}

fn range(column: &str, keyword: &str, op: Operator<'_>, operand: &Filter) -> Result<Fragment> {
    match operand {
        Filter::Sequence(bounds) => match bounds.as_slice() {
            [Filter::Scalar(low), Filter::Scalar(high)] if !low.is_null() && !high.is_null() => {
                Ok(Fragment::new(
                    format!("{column} {keyword} ? AND ?"),
                    vec![low.clone(), high.clone()],
                ))
            }
            _ => Err(shape_error(column, op, "a pair of non-null scalars", operand)),
        },
        Filter::Scalar(value) => {
            warn!(column, operator = %op, "Range with a single bound");
            Ok(Fragment::new(
                format!("{column} {keyword} ?"),
                vec![value.clone()],
            ))
        }
        other => Err(shape_error(column, op, "a pair of scalars", other)),
    }
}

fn in_list(column: &str, operand: &Filter) -> Result<Fragment> {
    let Filter::Sequence(items) = operand else {
        return Err(shape_error(column, Operator::In, "a sequence", operand));
    };

    let params = items
        .iter()
        .map(|item| match item {
            Filter::Scalar(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(shape_error(column, Operator::In, "a sequence of scalars", operand)),
        })
        .collect::<Result<Vec<_>>>()?;
    let placeholders = vec!["?"; params.len()].join(",");
    Ok(Fragment::new(format!("{column} IN ({placeholders})"), params))
}

/// Joins non-empty fragments with `join`, bracketing two or more when asked.
fn fold(parts: Vec<Fragment>, join: Join, bracket: bool) -> Fragment {
    let mut parts: Vec<Fragment> = parts.into_iter().filter(|f| !f.is_empty()).collect();
    if parts.len() < 2 {
        return parts.pop().unwrap_or_default();
    }

    let sql = parts
        .iter()
        .map(Fragment::sql)
        .collect::<Vec<_>>()
        .join(join.keyword());
    let params = parts.into_iter().flat_map(|f| f.params).collect();
    let sql = if bracket { format!("( {sql} )") } else { sql };
    Fragment::new(sql, params)
}

fn shape_error(column: &str, op: Operator<'_>, expected: &str, found: &Filter) -> FilterError {
    FilterError::malformed(format!(
        "column {column}: {op} expects {expected}, found {} {found}",
        found.kind()
    ))
}
