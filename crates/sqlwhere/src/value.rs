//! Bound parameter values.
//!
//! [`Value`] is what a placeholder is bound to. Values are plain data: they are
//! never sent anywhere by this crate, only collected next to the clause text and
//! rendered as SQL literals by the previewer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Default textual format for date/time values.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A value that renders to text on its own.
///
/// Implement this for domain types that should be bound (and previewed) as
/// quoted strings, e.g. identifiers or money amounts.
pub trait RenderableAsText: fmt::Debug + Send + Sync {
    /// Textual form of the value, unquoted and unescaped.
    fn render_text(&self) -> String;
}

impl RenderableAsText for uuid::Uuid {
    fn render_text(&self) -> String {
        self.hyphenated().to_string()
    }
}

impl RenderableAsText for NaiveDate {
    fn render_text(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl RenderableAsText for NaiveTime {
    fn render_text(&self) -> String {
        self.format("%H:%M:%S").to_string()
    }
}

/// A parameter value bound to a `?` or `:name` placeholder.
#[derive(Clone, Debug)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer that doesn't fit `i64`
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// Date and time, rendered as `YYYY-MM-DD HH:MM:SS`
    DateTime(NaiveDateTime),
    /// Any type exposing its own text conversion
    Renderable(Arc<dyn RenderableAsText>),
    /// Raw bytes. Bindable, but has no textual SQL literal.
    Bytes(Vec<u8>),
}

impl Value {
    /// Wrap a [`RenderableAsText`] implementation.
    pub fn renderable<T: RenderableAsText + 'static>(value: T) -> Self {
        Value::Renderable(Arc::new(value))
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Renderable(_) => "renderable",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Check if this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a plain scalar (text, number or boolean).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) | Value::Text(_)
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Renderable(a), Value::Renderable(b)) => {
                Arc::ptr_eq(a, b) || a.render_text() == b.render_text()
            }
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

/// Plain, unquoted text of the value (`NULL`, `TRUE`, `42`, `foo`).
///
/// This is what gets inlined when a clause is written without placeholders.
/// It performs no escaping; use the previewer for SQL literals.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::DateTime(v) => write!(f, "{}", v.format(DATETIME_FORMAT)),
            Value::Renderable(v) => f.write_str(&v.render_text()),
            Value::Bytes(bytes) => {
                f.write_str("\\x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::DateTime(v) => serializer.collect_str(&v.format(DATETIME_FORMAT)),
            Value::Renderable(v) => serializer.serialize_str(&v.render_text()),
            Value::Bytes(v) => serializer.serialize_bytes(v),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::UInt(v), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

/// Zoned date/times are rendered in their own offset, like a wall clock.
impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::DateTime(v.naive_local())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::renderable(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::renderable(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::renderable(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Arrays and objects are kept as their JSON text.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_collapse_to_int_when_they_fit() {
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(3u8), Value::Int(3));
    }

    #[test]
    fn option_none_is_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("a")), Value::Text("a".into()));
    }

    #[test]
    fn zoned_datetime_keeps_wall_clock() {
        let dt = chrono::FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 31, 10, 30, 0)
            .unwrap();
        assert_eq!(Value::from(dt).to_string(), "2024-01-31 10:30:00");
    }

    #[test]
    fn renderables_compare_by_text() {
        let id = uuid::Uuid::nil();
        assert_eq!(Value::from(id), Value::from(id));
        assert_eq!(
            Value::from(id).to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn json_scalars_map_to_scalars() {
        let json = serde_json::json!({ "n": 1, "f": 1.5, "s": "x", "b": true, "a": [1, 2] });
        assert_eq!(Value::from(json["n"].clone()), Value::Int(1));
        assert_eq!(Value::from(json["f"].clone()), Value::Float(1.5));
        assert_eq!(Value::from(json["s"].clone()), Value::Text("x".into()));
        assert_eq!(Value::from(json["b"].clone()), Value::Bool(true));
        assert_eq!(Value::from(json["a"].clone()), Value::Text("[1,2]".into()));
    }

    #[test]
    fn serializes_to_json() {
        let values = vec![Value::Null, Value::Int(1), Value::Text("a".into())];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[null,1,"a"]"#);
    }
}
