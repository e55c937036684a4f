//! Raw and typed field values
//!
//! A `RawRecord` is what a driver hands in: untyped values keyed by field
//! name. A `NormalizedRecord` is what validation hands back: one typed value
//! per schema field, in schema order.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// An untyped value as produced by an external reader.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Absent / null
    Null,
    Bool(bool),
    Int(i64),
    /// May carry NaN (spreadsheet-style empty numeric cells)
    Float(f64),
    Decimal(Decimal),
    Text(String),
    /// Arrays and objects; never valid for any field kind
    Nested(Value),
}

impl RawValue {
    /// Returns true for the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Returns true for a float holding NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, RawValue::Float(f) if f.is_nan())
    }

    /// Returns the numeric value of numbers and numeric text.
    ///
    /// Floats go through their shortest textual form, so `0.1` becomes
    /// exactly `0.1`. Non-finite floats have no numeric value, and neither
    /// do floats outside the decimal range (a nonzero float never turns
    /// into zero).
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            RawValue::Int(i) => Some(Decimal::from(*i)),
            RawValue::Float(f) if f.is_finite() => parse_number_text(&f.to_string())
                .filter(|d| !d.is_zero() || *f == 0.0),
            RawValue::Decimal(d) => Some(*d),
            RawValue::Text(s) => parse_number_text(s),
            _ => None,
        }
    }

    /// Returns true for a numeric zero. Text is never zero, whatever it holds.
    pub fn is_zero(&self) -> bool {
        match self {
            RawValue::Int(i) => *i == 0,
            RawValue::Float(f) => *f == 0.0,
            RawValue::Decimal(d) => d.is_zero(),
            _ => false,
        }
    }

    /// Short rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Null => "null".to_string(),
            RawValue::Bool(b) => format!("bool {}", b),
            RawValue::Int(i) => format!("integer {}", i),
            RawValue::Float(f) => format!("float {}", f),
            RawValue::Decimal(d) => format!("decimal {}", d),
            RawValue::Text(s) => format!("text '{}'", s),
            RawValue::Nested(v) => format!("nested {}", json_kind(v)),
        }
    }
}

fn parse_number_text(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "scalar",
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawValue::Text(s),
            nested => RawValue::Nested(nested),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(v as i64)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<Decimal> for RawValue {
    fn from(v: Decimal) -> Self {
        RawValue::Decimal(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

/// Field name to raw value mapping for one input row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.values.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a record from a JSON object. Returns `None` for any other
    /// JSON value.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                values: map
                    .into_iter()
                    .map(|(k, v)| (k, RawValue::from(v)))
                    .collect(),
            }),
            _ => None,
        }
    }
}

/// A value converted to its field's declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// Optional field with no value
    Absent,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    /// Member of the field's allowed set
    Enum(String),
}

impl TypedValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, TypedValue::Absent)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            TypedValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Text of string and enum values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) | TypedValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TypedValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Absent => serializer.serialize_none(),
            TypedValue::Integer(i) => serializer.serialize_i64(*i),
            TypedValue::Decimal(d) => Serialize::serialize(d, serializer),
            TypedValue::Text(s) | TypedValue::Enum(s) => serializer.serialize_str(s),
            TypedValue::Date(d) => d.serialize(serializer),
        }
    }
}

/// Successful validation output: typed values in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    values: Vec<(String, TypedValue)>,
}

impl NormalizedRecord {
    pub(crate) fn new(values: Vec<(String, TypedValue)>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
