// ABOUTME: Detection and rendering of custom camelCase payload fields
// ABOUTME: Surfaces upstream extension data the per-kind formatters do not know about
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Custom field detection and rendering
//!
//! The upstream API lets users attach arbitrary fields to activities and
//! wellness entries. By convention those are lower camelCase, which separates
//! them from the snake_case (and small fixed camelCase) schema the formatters
//! render natively. This is a heuristic, not a classifier: a known camelCase
//! field missing from a known-field set will be flagged, and a snake_case
//! extension field will not.

use serde_json::{Map, Value};

use super::{render_value, Payload};

/// Check if a field name is camelCase: starts with a lowercase letter and
/// contains at least one uppercase letter after it.
#[must_use]
pub fn is_camel_case(field_name: &str) -> bool {
    let mut chars = field_name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => chars.any(|c| c.is_ascii_uppercase()),
        _ => false,
    }
}

/// Collect every payload key that is not in `known_fields` and looks like a
/// custom camelCase field, preserving original values.
#[must_use]
pub fn detect_custom_fields(payload: &Payload, known_fields: &[&str]) -> Map<String, Value> {
    payload
        .iter()
        .filter(|(key, _)| !known_fields.contains(&key.as_str()) && is_camel_case(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Turn a camelCase key into a report label: `customFieldName` becomes
/// `Custom Field Name`. Empty keys render as `Unknown`.
fn humanize_key(key: &str) -> String {
    if key.is_empty() {
        return "Unknown".into();
    }

    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        prev_lower = c.is_ascii_lowercase();
        spaced.push(c);
    }

    let mut chars = spaced.chars();
    chars.next().map_or_else(
        || spaced.clone(),
        |first| first.to_uppercase().chain(chars).collect(),
    )
}

/// Format custom fields into report lines of the shape `- <Label>: <value>`.
///
/// Keys are emitted in ascending lexicographic order so output is stable for
/// snapshot-style assertions. An empty input yields an empty vec, which
/// callers take as the signal to omit the `Custom Fields:` section entirely.
#[must_use]
pub fn format_custom_fields(custom_fields: &Map<String, Value>) -> Vec<String> {
    if custom_fields.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<(&String, &Value)> = custom_fields.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    entries
        .into_iter()
        .map(|(key, value)| format!("- {}: {}", humanize_key(key), render_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().map(Clone::clone).unwrap_or_default()
    }

    #[test]
    fn test_is_camel_case_truth_table() {
        assert!(is_camel_case("customField"));
        assert!(is_camel_case("myCustomMetric"));
        assert!(is_camel_case("avgPower"));
        assert!(is_camel_case("restingHR"));

        assert!(!is_camel_case("custom_field"));
        assert!(!is_camel_case("CustomField"));
        assert!(!is_camel_case("customfield"));
        assert!(!is_camel_case("CUSTOMFIELD"));
        assert!(!is_camel_case(""));
        assert!(!is_camel_case("custom"));
    }

    #[test]
    fn test_detect_custom_fields_filters_known_and_snake_case() {
        let payload = as_map(json!({
            "name": "Test Activity",
            "id": 1,
            "customField": "custom value",
            "anotherCustomMetric": 123,
            "knownField": "known value",
            "custom_field": "snake",
        }));
        let custom = detect_custom_fields(&payload, &["name", "id", "knownField"]);
        assert!(custom.contains_key("customField"));
        assert!(custom.contains_key("anotherCustomMetric"));
        assert!(!custom.contains_key("name"));
        assert!(!custom.contains_key("knownField"));
        assert!(!custom.contains_key("custom_field"));
    }

    #[test]
    fn test_detect_custom_fields_preserves_null_values() {
        let payload = as_map(json!({"customField": null, "anotherField": "value"}));
        let custom = detect_custom_fields(&payload, &[]);
        assert_eq!(custom.get("customField"), Some(&Value::Null));
        assert!(custom.contains_key("anotherField"));
    }

    #[test]
    fn test_humanize_key_inserts_spaces() {
        assert_eq!(humanize_key("customFieldName"), "Custom Field Name");
        assert_eq!(humanize_key("a"), "A");
        assert_eq!(humanize_key(""), "Unknown");
        assert_eq!(humanize_key("restingHR"), "Resting HR");
    }
}
