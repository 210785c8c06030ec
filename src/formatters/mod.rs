// ABOUTME: Formatting layer turning upstream API payloads into readable text reports
// ABOUTME: One formatter per payload kind plus shared field access and rendering helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Payload Formatters
//!
//! This module converts JSON payloads from the Intervals.icu API into
//! deterministic, human-readable multi-section text reports. Formatters never
//! fail: every field access has an explicit fallback (`N/A` for most kinds,
//! `0` for interval metrics), so a partially-missing payload still renders a
//! complete report.
//!
//! Each formatter ends by scanning the payload for custom camelCase fields
//! that are not part of its known-field set and appends a `Custom Fields:`
//! section when any are found.

/// Activity summary formatting
pub mod activity;
/// Custom camelCase field detection and rendering
pub mod custom_fields;
/// Calendar event formatting (summary and details)
pub mod events;
/// Interval analysis formatting
pub mod intervals;
/// Wellness entry formatting
pub mod wellness;
/// Workout formatting
pub mod workout;

pub use activity::format_activity_summary;
pub use custom_fields::{detect_custom_fields, format_custom_fields, is_camel_case};
pub use events::{format_event_details, format_event_summary};
pub use intervals::format_intervals;
pub use wellness::format_wellness_entry;
pub use workout::format_workout;

use serde_json::{Map, Value};

/// Payload type consumed by every formatter: one JSON object from the API
pub type Payload = Map<String, Value>;

/// Render a JSON value the way it appears in a report line.
///
/// Nulls become `N/A`, booleans `True`/`False`, numbers their decimal text,
/// strings pass through verbatim. Arrays and objects fall back to their
/// generic JSON text; no stable format is promised for those beyond
/// "renders without error".
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".into(),
        Value::Bool(true) => "True".into(),
        Value::Bool(false) => "False".into(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First non-null value among the given alias keys.
pub(crate) fn lookup<'a>(payload: &'a Payload, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find(|value| !value.is_null())
}

/// Render the first non-null alias, or the default when every alias is
/// missing or null.
pub(crate) fn text_or(payload: &Payload, keys: &[&str], default: &str) -> String {
    lookup(payload, keys).map_or_else(|| default.into(), render_value)
}

/// Render a single interval metric, defaulting to `0` when missing.
///
/// Interval analysis uses a numeric zero as its missing-value sentinel where
/// the other formatters use `N/A`; downstream consumers rely on the
/// numeric-typed form, so the asymmetry is kept.
pub(crate) fn metric_or_zero(payload: &Payload, key: &str) -> String {
    payload
        .get(key)
        .filter(|value| !value.is_null())
        .map_or_else(|| "0".into(), render_value)
}

/// Truthiness of a JSON value as the upstream API means it: null, false,
/// zero, and empty strings/arrays/objects all count as absent.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
