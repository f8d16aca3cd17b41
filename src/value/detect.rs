//! Shape detectors for plain JSON values.
//!
//! Stored trees carry condition values as untyped JSON. These predicates decide
//! which typed shape an object represents, using key presence and, for date
//! versus time ranges, whether both bounds look like `HH:MM` clock times.

use super::LocationValue;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock pattern"));

/// `true` if `s` is a 24-hour `HH:MM` clock time.
pub fn is_clock_time(s: &str) -> bool {
    CLOCK_TIME.is_match(s)
}

fn has_keys(value: &Value, keys: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|map| keys.iter().all(|k| map.contains_key(*k)))
}

pub fn is_duration_value(value: &Value) -> bool {
    has_keys(value, &["amount", "unit"])
}

pub fn is_range_value(value: &Value) -> bool {
    has_keys(value, &["min", "max"])
}

pub fn is_time_range_value(value: &Value) -> bool {
    if !has_keys(value, &["from", "to"]) {
        return false;
    }
    ["from", "to"]
        .iter()
        .all(|k| value[*k].as_str().is_some_and(is_clock_time))
}

/// A `{from, to}` object whose bounds are not both clock times. Unset bounds
/// (`null`) are allowed.
pub fn is_date_range_value(value: &Value) -> bool {
    has_keys(value, &["from", "to"]) && !is_time_range_value(value)
}

/// An object made only of location keys, with at least one present.
pub fn is_location_value(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        !map.is_empty() && map.keys().all(|k| LocationValue::KEYS.contains(&k.as_str()))
    })
}
