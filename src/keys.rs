//! Case-tolerant key lookup over generic JSON objects.
//!
//! Producers of the supported payloads do not agree on one key casing
//! convention, so field population tries, in priority order:
//!
//! 1. the exact key (`TopicArn`)
//! 2. the lower-camel-cased key (`topicArn`)
//! 3. the fully-lowercased key (`topicarn`)
//!
//! The first present, non-null value wins. Priority matters: a payload
//! carrying both `TopicArn` and `topicArn` resolves to the exact match.
use serde_json::{Map, Value};

/// Looks up `key` in `map` with casing fallbacks, skipping JSON nulls.
pub fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    for candidate in [key.to_string(), uncapitalize(key), key.to_lowercase()] {
        match map.get(&candidate) {
            Some(Value::Null) | None => continue,
            Some(value) => return Some(value),
        }
    }
    None
}

/// Looks up a string-valued field, cloning it out of the payload.
pub fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    lookup(map, key).and_then(Value::as_str).map(str::to_owned)
}

/// Looks up a field that must be a JSON object.
pub fn object_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    lookup(map, key).and_then(Value::as_object)
}

/// Looks up a field that must be a JSON array.
pub fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    lookup(map, key).and_then(Value::as_array).map(Vec::as_slice)
}

fn uncapitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
