//! Building filters from JSON documents.
//!
//! Objects become keyed nodes (document order preserved), arrays become
//! sequences, `null` becomes [`Filter::Null`].
//!
//! Integers that fit `i64` bind as [`SqlValue::Int`]. Larger unsigned
//! integers bind as [`SqlValue::Text`] holding the exact digits, so the
//! database sees the number that was written rather than a rounded float.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use super::Filter;
use crate::value::SqlValue;

impl From<Value> for Filter {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Scalar(SqlValue::Bool(b)),
            Value::Number(n) => Self::Scalar(number(&n)),
            Value::String(s) => Self::Scalar(SqlValue::Text(s)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Keyed(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

fn number(n: &Number) -> SqlValue {
    if let Some(i) = n.as_i64() {
        SqlValue::Int(i)
    } else if n.is_u64() {
        SqlValue::Text(n.to_string())
    } else {
        SqlValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl FromStr for Filter {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_object_order_is_preserved() {
        let filter = Filter::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let Filter::Keyed(entries) = filter else {
            panic!("expected keyed node");
        };
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(Filter::from(json!(null)), Filter::Null);
        assert_eq!(Filter::from(json!(7)), Filter::Scalar(SqlValue::Int(7)));
        assert_eq!(
            Filter::from(json!(1.5)),
            Filter::Scalar(SqlValue::Float(1.5))
        );
        assert_eq!(
            Filter::from(json!("x")),
            Filter::Scalar(SqlValue::Text(String::from("x")))
        );
    }

    #[test]
    fn test_unsigned_beyond_i64_keeps_exact_digits() {
        assert_eq!(
            Filter::from(json!(18_446_744_073_709_551_615_u64)),
            Filter::Scalar(SqlValue::Text(String::from("18446744073709551615")))
        );
        assert_eq!(
            Filter::from(json!(9_223_372_036_854_775_807_u64)),
            Filter::Scalar(SqlValue::Int(i64::MAX))
        );

        let filter: Filter = r#"{"id": 9223372036854775808}"#.parse().unwrap();
        let fragment = crate::compile(&filter).unwrap();
        assert_eq!(fragment.sql(), "id = ?");
        assert_eq!(
            fragment.params(),
            &[SqlValue::Text(String::from("9223372036854775808"))]
        );
    }

    #[test]
    fn test_parse_from_str() {
        let filter: Filter = r#"[{"user": "a"}, {"user": "b"}]"#.parse().unwrap();
        assert_eq!(filter.kind(), "sequence");

        assert!("{not json".parse::<Filter>().is_err());
    }
}
