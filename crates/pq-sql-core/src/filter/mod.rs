//! Filter trees.
//!
//! A [`Filter`] describes a WHERE predicate before compilation. Lists and
//! maps are separate variants: whoever builds the tree decides which one a
//! container is, and the compiler never guesses from key contents.
//!
//! ```rust
//! use pq_sql_core::Filter;
//!
//! // user = 'nwiger' AND status IN one of two values
//! let filter = Filter::keyed([
//!     ("user", Filter::from("nwiger")),
//!     ("status", Filter::seq(["pending", "dispatched"])),
//! ]);
//! assert_eq!(
//!     filter.to_string(),
//!     r#"{"user": 'nwiger', "status": ['pending', 'dispatched']}"#
//! );
//! ```

#[cfg(feature = "json")]
mod json;

use std::fmt;

use indexmap::IndexMap;

use crate::value::{SqlValue, ToSqlValue};

/// A node of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// A literal bound to a placeholder.
    Scalar(SqlValue),
    /// SQL NULL. Compiles to `IS NULL` / `IS NOT NULL`, never bound.
    Null,
    /// Positional list: OR-ed sub-filters at group level, alternatives or a
    /// literal list at operand level.
    Sequence(Vec<Filter>),
    /// Column names, control tokens or operator tokens mapped to
    /// sub-expressions, in insertion order.
    Keyed(IndexMap<String, Filter>),
}

impl Filter {
    /// Creates a scalar node. `NULL` values become [`Filter::Null`].
    #[must_use]
    pub fn scalar<T: ToSqlValue>(value: T) -> Self {
        match value.to_sql_value() {
            SqlValue::Null => Self::Null,
            value => Self::Scalar(value),
        }
    }

    /// Creates a sequence node.
    #[must_use]
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Creates a keyed node. A repeated key replaces the earlier value and
    /// keeps the earlier position.
    #[must_use]
    pub fn keyed<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Keyed(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Creates a keyed node with no entries. Compiles to an empty fragment.
    #[must_use]
    pub fn empty() -> Self {
        Self::Keyed(IndexMap::new())
    }

    /// Returns `true` if the node stands for SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Scalar(SqlValue::Null))
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Null => "null",
            Self::Sequence(_) => "sequence",
            Self::Keyed(_) => "keyed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Keyed(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Filter {
                fn from(value: $ty) -> Self {
                    Self::scalar(value)
                }
            }
        )*
    };
}

scalar_from!(SqlValue, bool, i64, i32, i16, i8, u32, u16, u8, f64, f32, String, &str);

impl<T: Into<Self>> From<Option<T>> for Filter {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Filter {
    fn from(items: Vec<T>) -> Self {
        Self::seq(items)
    }
}

impl From<IndexMap<String, Self>> for Filter {
    fn from(entries: IndexMap<String, Self>) -> Self {
        Self::Keyed(entries)
    }
}
