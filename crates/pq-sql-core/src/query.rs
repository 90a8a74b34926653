//! Chainable SELECT builder.
//!
//! Collects a table, projection, filters, ordering and paging, then renders
//! them with [`statement::select`](crate::statement::select).
//!
//! ```rust
//! use pq_sql_core::{Filter, Query};
//!
//! let (sql, params) = Query::from_table("users")
//!     .filter(Filter::keyed([("age", Filter::keyed([(">", 20)]))]))
//!     .filter(Filter::keyed([("mail", Filter::keyed([("-like", "%@example.com")]))]))
//!     .fields(&["mail", "name"])
//!     .order_by("updated DESC")
//!     .offset(0)
//!     .limit(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT mail, name FROM users WHERE age > ? AND mail LIKE ? \
//!      ORDER BY updated DESC LIMIT 10 OFFSET 0"
//! );
//! assert_eq!(params.len(), 2);
//! ```

use indexmap::IndexMap;

use crate::error::{FilterError, Result};
use crate::filter::Filter;
use crate::statement;
use crate::value::SqlValue;

/// A SELECT query under construction.
#[derive(Debug, Clone)]
pub struct Query {
    table: String,
    fields: Vec<String>,
    filters: Vec<Filter>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    /// Starts a query on `table`, selecting `*`.
    #[must_use]
    pub fn from_table(table: &str) -> Self {
        Self {
            table: String::from(table),
            fields: vec![],
            filters: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Replaces the selected columns.
    #[must_use]
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Adds a filter.
    ///
    /// Keyed filters are merged entry by entry; a column given again
    /// replaces its earlier condition.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends an ORDER BY expression, used verbatim.
    #[must_use]
    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by.push(String::from(expr));
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// The filter the query will compile.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedFilter`] when several filters were
    /// added and one of them is not keyed.
    pub fn merged_filter(&self) -> Result<Filter> {
        match self.filters.as_slice() {
            [] => Ok(Filter::empty()),
            [single] => Ok(single.clone()),
            filters => {
                let mut merged = IndexMap::new();
                for filter in filters {
                    let Filter::Keyed(entries) = filter else {
                        return Err(FilterError::malformed(format!(
                            "only keyed filters can be merged, found {} {filter}",
                            filter.kind()
                        )));
                    };
                    merged.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Ok(Filter::Keyed(merged))
            }
        }
    }

    /// Builds the SELECT statement and returns SQL with parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedFilter`] if the filters cannot be
    /// merged or compiled.
    pub fn build(&self) -> Result<(String, Vec<SqlValue>)> {
        let filter = self.merged_filter()?;
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        let order: Vec<&str> = self.order_by.iter().map(String::as_str).collect();

        let (mut sql, params) = statement::select(&self.table, &fields, &filter, &order)?;

        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        if let Some(n) = self.offset {
            sql.push_str(&format!(" OFFSET {n}"));
        }

        Ok((sql, params))
    }

    /// Builds the SELECT statement and returns only the SQL string.
    ///
    /// # Errors
    ///
    /// Same as [`Query::build`].
    pub fn build_sql(&self) -> Result<String> {
        self.build().map(|(sql, _)| sql)
    }
}
