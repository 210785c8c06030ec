// ABOUTME: Workout formatter producing the compact workout report
// ABOUTME: Renders name, sport, duration, TSS, and the interval count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Workout formatting

use serde_json::Value;

use super::{text_or, Payload};

/// Format a workout into a readable report.
#[must_use]
pub fn format_workout(workout: &Payload) -> String {
    let name = text_or(workout, &["name"], "Unnamed");
    let description = text_or(workout, &["description"], "No description");
    let sport = text_or(workout, &["sport"], "Unknown");
    let duration = text_or(workout, &["duration"], "0");
    let tss = text_or(workout, &["tss"], "N/A");
    let interval_count = workout
        .get("intervals")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    format!(
        "\nWorkout: {name}\n\
         Description: {description}\n\
         Sport: {sport}\n\
         Duration: {duration} seconds\n\
         TSS: {tss}\n\
         Intervals: {interval_count}\n"
    )
}
