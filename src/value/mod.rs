use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod detect;

pub use detect::*;

/// A single scalar value as it appears in a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn text(s: impl Into<String>) -> Self {
        Scalar::Text(s.into())
    }

    /// `true` for `null` and the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.is_empty(),
            Scalar::Bool(_) | Scalar::Number(_) => false,
        }
    }

    /// Numeric reading of the scalar: numbers as-is, numeric strings parsed.
    /// Only finite numbers are returned, so `"NaN"` and `"inf"` read as `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Null | Scalar::Bool(_) => None,
        };
        n.filter(|n: &f64| n.is_finite())
    }

    /// Converts a JSON scalar. Arrays and objects are not scalars and yield `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Scalar::Null),
            serde_json::Value::Bool(b) => Some(Scalar::Bool(b)),
            serde_json::Value::Number(n) => n.as_f64().map(Scalar::Number),
            serde_json::Value::String(s) => Some(Scalar::Text(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Number(n) => number_to_json(*n),
            Scalar::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Scalar::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Units for relative-time conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Minutes => "MINUTES",
            DurationUnit::Hours => "HOURS",
            DurationUnit::Days => "DAYS",
            DurationUnit::Weeks => "WEEKS",
            DurationUnit::Months => "MONTHS",
            DurationUnit::Years => "YEARS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationValue {
    pub amount: f64,
    pub unit: DurationUnit,
}

impl DurationValue {
    pub fn new(amount: f64, unit: DurationUnit) -> Self {
        Self { amount, unit }
    }
}

/// The bounds of a `BETWEEN` condition. The concrete variant is chosen by the
/// field type.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeValue {
    Number { min: f64, max: f64 },
    /// Dates are ISO strings; either bound may be unset while authoring.
    Date {
        from: Option<String>,
        to: Option<String>,
    },
    /// Clock times in `HH:MM`.
    Time { from: String, to: String },
}

/// A composite location. Unset parts are not constrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationValue {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl LocationValue {
    pub(crate) const KEYS: [&'static str; 4] = ["country", "state", "city", "postalCode"];
}

/// The value attached to a condition, tagged by value-shape.
///
/// JSON that matches no known shape exactly is kept as [`ConditionValue::Other`]
/// and written back unchanged. No input shape accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum ConditionValue {
    Scalar(Scalar),
    Range(RangeValue),
    Duration(DurationValue),
    List(Vec<Scalar>),
    Location(LocationValue),
    Other(serde_json::Value),
}

impl ConditionValue {
    pub fn number(n: f64) -> Self {
        ConditionValue::Scalar(Scalar::Number(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        ConditionValue::Scalar(Scalar::Text(s.into()))
    }

    pub fn null() -> Self {
        ConditionValue::Scalar(Scalar::Null)
    }

    pub fn number_range(min: f64, max: f64) -> Self {
        ConditionValue::Range(RangeValue::Number { min, max })
    }

    pub fn duration(amount: f64, unit: DurationUnit) -> Self {
        ConditionValue::Duration(DurationValue::new(amount, unit))
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        ConditionValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConditionValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Decodes a plain JSON value, sniffing object shapes by their keys.
    ///
    /// A typed shape is only chosen when it encodes back to the same JSON.
    /// Everything else, such as a range with a `null` bound, an unknown
    /// duration unit or a list of objects, decodes to `Other`.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                let scalars: Option<Vec<Scalar>> =
                    items.iter().cloned().map(Scalar::from_json).collect();
                match scalars {
                    Some(scalars) => ConditionValue::List(scalars),
                    None => ConditionValue::Other(serde_json::Value::Array(items)),
                }
            }
            serde_json::Value::Object(_) => match decode_object(&value) {
                Some(typed) if same_json(&typed.to_json(), &value) => typed,
                _ => ConditionValue::Other(value),
            },
            other => match Scalar::from_json(other.clone()) {
                Some(scalar) => ConditionValue::Scalar(scalar),
                None => ConditionValue::Other(other),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ConditionValue::Scalar(s) => s.to_json(),
            ConditionValue::Range(RangeValue::Number { min, max }) => {
                serde_json::json!({ "min": number_to_json(*min), "max": number_to_json(*max) })
            }
            ConditionValue::Range(RangeValue::Date { from, to }) => {
                serde_json::json!({ "from": from, "to": to })
            }
            ConditionValue::Range(RangeValue::Time { from, to }) => {
                serde_json::json!({ "from": from, "to": to })
            }
            ConditionValue::Duration(d) => {
                serde_json::json!({ "amount": number_to_json(d.amount), "unit": d.unit.as_str() })
            }
            ConditionValue::List(items) => {
                serde_json::Value::Array(items.iter().map(Scalar::to_json).collect())
            }
            ConditionValue::Location(loc) => serde_json::json!({
                "country": loc.country,
                "state": loc.state,
                "city": loc.city,
                "postalCode": loc.postal_code,
            }),
            ConditionValue::Other(raw) => raw.clone(),
        }
    }
}

impl From<serde_json::Value> for ConditionValue {
    fn from(value: serde_json::Value) -> Self {
        ConditionValue::from_json(value)
    }
}

impl From<ConditionValue> for serde_json::Value {
    fn from(value: ConditionValue) -> Self {
        value.to_json()
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Scalar> for ConditionValue {
    fn from(s: Scalar) -> Self {
        ConditionValue::Scalar(s)
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Scalar(s) => write!(f, "{}", s),
            ConditionValue::Range(RangeValue::Number { min, max }) => {
                write!(f, "{}..{}", Scalar::Number(*min), Scalar::Number(*max))
            }
            ConditionValue::Range(RangeValue::Date { from, to }) => write!(
                f,
                "{}..{}",
                from.as_deref().unwrap_or("?"),
                to.as_deref().unwrap_or("?")
            ),
            ConditionValue::Range(RangeValue::Time { from, to }) => write!(f, "{}..{}", from, to),
            ConditionValue::Duration(d) => write!(
                f,
                "{} {}",
                Scalar::Number(d.amount),
                d.unit.as_str().to_lowercase()
            ),
            ConditionValue::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            ConditionValue::Location(loc) => {
                let parts = [&loc.city, &loc.state, &loc.postal_code, &loc.country]
                    .into_iter()
                    .flatten()
                    .join(", ");
                if parts.is_empty() {
                    write!(f, "anywhere")
                } else {
                    write!(f, "{}", parts)
                }
            }
            ConditionValue::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Strict typed reading of an object. Any bound, amount or unit of the wrong
/// JSON type rejects the whole object.
fn decode_object(value: &serde_json::Value) -> Option<ConditionValue> {
    let map = value.as_object()?;
    if is_duration_value(value) {
        let amount = map.get("amount")?.as_f64()?;
        let unit = serde_json::from_value(map.get("unit")?.clone()).ok()?;
        Some(ConditionValue::duration(amount, unit))
    } else if is_range_value(value) {
        let min = map.get("min")?.as_f64()?;
        let max = map.get("max")?.as_f64()?;
        Some(ConditionValue::number_range(min, max))
    } else if is_time_range_value(value) {
        Some(ConditionValue::Range(RangeValue::Time {
            from: map.get("from")?.as_str()?.to_string(),
            to: map.get("to")?.as_str()?.to_string(),
        }))
    } else if is_date_range_value(value) {
        Some(ConditionValue::Range(RangeValue::Date {
            from: optional_string(map, "from")?,
            to: optional_string(map, "to")?,
        }))
    } else if is_location_value(value) {
        Some(ConditionValue::Location(LocationValue {
            country: optional_string(map, "country")?,
            state: optional_string(map, "state")?,
            city: optional_string(map, "city")?,
            postal_code: optional_string(map, "postalCode")?,
        }))
    } else {
        None
    }
}

/// `Some(None)` for a missing or `null` key, `None` for a non-string value.
fn optional_string(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<Option<String>> {
    match map.get(key) {
        None | Some(serde_json::Value::Null) => Some(None),
        Some(serde_json::Value::String(s)) => Some(Some(s.clone())),
        Some(_) => None,
    }
}

/// JSON equality where numbers compare by value, so `5.0` matches `5`.
fn same_json(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_json(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| same_json(x, y)))
        }
        _ => a == b,
    }
}

/// Integral numbers go out without a fractional part so stored documents
/// read the way they were authored.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}
