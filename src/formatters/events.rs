// ABOUTME: Calendar event formatters for summary listings and detail views
// ABOUTME: Derives the event type label and renders conditional workout/race/calendar blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Calendar event formatting

use serde_json::Value;

use super::{is_truthy, text_or, Payload};

/// Derive the event type label: a truthy `workout` field wins, then a truthy
/// `race` field, otherwise `Other`.
fn event_type_label(event: &Payload) -> &'static str {
    if event.get("workout").is_some_and(is_truthy) {
        "Workout"
    } else if event.get("race").is_some_and(is_truthy) {
        "Race"
    } else {
        "Other"
    }
}

/// Format a basic event summary into a readable report.
#[must_use]
pub fn format_event_summary(event: &Payload) -> String {
    let event_date = text_or(event, &["start_date_local", "date"], "Unknown");
    let event_type = event_type_label(event);
    let event_name = text_or(event, &["name"], "Unnamed");
    let event_id = text_or(event, &["id"], "N/A");
    let event_desc = text_or(event, &["description"], "No description");

    format!(
        "Date: {event_date}\n\
         ID: {event_id}\n\
         Type: {event_type}\n\
         Name: {event_name}\n\
         Description: {event_desc}"
    )
}

/// Format detailed event information into a readable report.
///
/// Appends a `Workout Information` block when the event carries a non-empty
/// workout object, a `Race Information` block when it is a race, and a
/// `Calendar` block when a calendar object is attached.
#[must_use]
pub fn format_event_details(event: &Payload) -> String {
    let id = text_or(event, &["id"], "N/A");
    let date = text_or(event, &["date"], "Unknown");
    let name = text_or(event, &["name"], "Unnamed");
    let description = text_or(event, &["description"], "No description");

    let mut details = format!(
        "Event Details:\n\n\
         ID: {id}\n\
         Date: {date}\n\
         Name: {name}\n\
         Description: {description}"
    );

    if let Some(workout) = event
        .get("workout")
        .filter(|w| is_truthy(w))
        .and_then(Value::as_object)
    {
        let workout_id = text_or(workout, &["id"], "N/A");
        let sport = text_or(workout, &["sport"], "Unknown");
        let duration = text_or(workout, &["duration"], "0");
        let tss = text_or(workout, &["tss"], "N/A");

        details.push_str(&format!(
            "\n\nWorkout Information:\n\
             Workout ID: {workout_id}\n\
             Sport: {sport}\n\
             Duration: {duration} seconds\n\
             TSS: {tss}"
        ));

        if let Some(intervals) = workout.get("intervals").and_then(Value::as_array) {
            details.push_str(&format!("\nIntervals: {}", intervals.len()));
        }
    }

    if event.get("race").is_some_and(is_truthy) {
        let priority = text_or(event, &["priority"], "N/A");
        let result = text_or(event, &["result"], "N/A");
        details.push_str(&format!(
            "\n\nRace Information:\n\
             Priority: {priority}\n\
             Result: {result}"
        ));
    }

    if let Some(calendar) = event.get("calendar").and_then(Value::as_object) {
        details.push_str(&format!(
            "\n\nCalendar: {}",
            text_or(calendar, &["name"], "N/A")
        ));
    }

    details
}
