//! Deterministic text rendering of structured values
//!
//! Every value that feeds a hash goes through [`canonicalize`] first, so two
//! values that are semantically equal hash identically regardless of how the
//! caller built them (map insertion order in particular).

use chrono::{DateTime, SecondsFormat, Utc};
use hashtegrity_core::Result;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Structured value accepted by the hashing functions
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Raw bytes, rendered as lowercase hex
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Mapping built from key/value pairs
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Convert any serializable value through its JSON representation
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Value::from(json))
    }

    /// Whether this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Render a value into its canonical string form
///
/// - strings pass through unchanged
/// - numbers and booleans use their decimal / `true` / `false` text
/// - timestamps use ISO-8601 UTC with millisecond precision
/// - bytes become lowercase hex
/// - sequences join their canonical elements with `,`
/// - maps render `key:value` pairs in key order joined with `,`
/// - null renders as the empty string
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&canonical_number(n)),
        Value::String(s) => out.push_str(s),
        Value::Timestamp(ts) => out.push_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Bytes(bytes) => out.push_str(&hex::encode(bytes)),
        Value::Seq(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
        }
        Value::Map(entries) => {
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(key);
                out.push(':');
                write_canonical(item, out);
            }
        }
    }
}

// Integral floats render without a fractional part so 2.0 and 2 agree
fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(serde_json::Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(entries: HashMap<String, T>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_scalars() {
        assert_eq!(canonicalize(&Value::from("hello")), "hello");
        assert_eq!(canonicalize(&Value::from(42)), "42");
        assert_eq!(canonicalize(&Value::from(-7i64)), "-7");
        assert_eq!(canonicalize(&Value::from(1.5)), "1.5");
        assert_eq!(canonicalize(&Value::from(2.0)), "2");
        assert_eq!(canonicalize(&Value::from(true)), "true");
        assert_eq!(canonicalize(&Value::from(false)), "false");
        assert_eq!(canonicalize(&Value::Null), "");
    }

    #[test]
    fn test_timestamp_uses_iso_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(canonicalize(&Value::from(ts)), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_bytes_render_as_hex() {
        assert_eq!(canonicalize(&Value::bytes(vec![0xde, 0xad, 0xbe, 0xef])), "deadbeef");
        assert_eq!(canonicalize(&Value::bytes(Vec::new())), "");
    }

    #[test]
    fn test_sequence_preserves_order() {
        let value = Value::from(vec!["b", "a", "c"]);
        assert_eq!(canonicalize(&value), "b,a,c");
    }

    #[test]
    fn test_map_keys_sorted() {
        let value = Value::map([("zeta", Value::from(1)), ("alpha", Value::from("x"))]);
        assert_eq!(canonicalize(&value), "alpha:x,zeta:1");
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a: serde_json::Value =
            serde_json::from_str(r#"{"b": 1, "a": {"y": [1, 2], "x": true}}"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str(r#"{"a": {"x": true, "y": [1, 2]}, "b": 1}"#).unwrap();
        assert_eq!(
            canonicalize(&Value::from(a)),
            canonicalize(&Value::from(b))
        );
    }

    #[test]
    fn test_nested_structure() {
        let value = Value::map([
            ("data", Value::from("item1")),
            ("metadata", Value::map(Vec::<(String, Value)>::new())),
        ]);
        assert_eq!(canonicalize(&value), "data:item1,metadata:");
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Record {
            name: &'static str,
            count: u32,
        }

        let value = Value::from_serialize(&Record {
            name: "widget",
            count: 3,
        })
        .unwrap();
        assert_eq!(canonicalize(&value), "count:3,name:widget");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(Value::from(f64::NAN).is_null());
    }
}
