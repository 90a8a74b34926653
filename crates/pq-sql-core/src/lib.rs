//! # pq-sql-core
//!
//! Compiles nested filter trees into parameterized SQL WHERE clauses.
//!
//! This crate provides:
//! - [`Filter`], a tree of scalars, NULLs, lists and ordered maps
//! - [`compile`], turning a filter into SQL text plus ordered bind values
//! - [`statement`], SELECT/INSERT/UPDATE/DELETE around a compiled filter
//! - [`Query`], a chainable SELECT builder with ordering and paging
//!
//! ## Filters
//!
//! Keys of a map are AND-ed, elements of a list are OR-ed:
//!
//! ```rust
//! use pq_sql_core::{compile, Filter};
//!
//! let filter = Filter::seq([
//!     Filter::keyed([
//!         ("user", Filter::from("nwiger")),
//!         ("status", Filter::seq(["pending", "dispatched"])),
//!     ]),
//!     Filter::keyed([
//!         ("user", Filter::from("robot")),
//!         ("status", Filter::from("unassigned")),
//!     ]),
//! ]);
//!
//! let (sql, params) = compile(&filter).unwrap().into_parts();
//! assert_eq!(
//!     sql,
//!     "( user = ? AND ( status = ? OR status = ? ) ) OR ( user = ? AND status = ? )"
//! );
//! assert_eq!(params.len(), 5);
//! ```
//!
//! With the default `json` feature, filters can be written as JSON:
//!
//! ```rust
//! # #[cfg(feature = "json")]
//! # {
//! use pq_sql_core::{compile, Filter};
//!
//! let filter: Filter = r#"{
//!     "priority": {"<": 2},
//!     "requestor": {"-inject": "is not null"},
//!     "reportid": {"-in": [567, 2335, 2]}
//! }"#
//! .parse()
//! .unwrap();
//!
//! let fragment = compile(&filter).unwrap();
//! assert_eq!(
//!     fragment.sql(),
//!     "priority < ? AND requestor is not null AND reportid IN (?,?,?)"
//! );
//! # }
//! ```
//!
//! ## Identifiers
//!
//! Only values are bound. Table names, column names, operator symbols,
//! ORDER BY expressions and `-inject` operands are pasted into the SQL as
//! given, so they must come from trusted code.

pub mod compiler;
pub mod error;
pub mod filter;
pub mod operator;
pub mod query;
pub mod statement;
pub mod value;

pub use compiler::{compile, Fragment};
pub use error::{FilterError, Result};
pub use filter::Filter;
pub use operator::{Control, Join, Operator};
pub use query::Query;
pub use value::{SqlValue, ToSqlValue};
