// ABOUTME: Wellness entry formatter covering training, vitals, sleep, and lifestyle data
// ABOUTME: Sections are emitted only when they have content; custom fields trail the report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Wellness entry formatting

use serde_json::Value;

use super::custom_fields::{detect_custom_fields, format_custom_fields};
use super::{is_truthy, render_value, text_or, Payload};

/// Wellness fields already rendered through a dedicated report slot.
const KNOWN_WELLNESS_FIELDS: &[&str] = &[
    "id",
    "date",
    "ctl",
    "atl",
    "rampRate",
    "ctlLoad",
    "atlLoad",
    "sportInfo",
    "updated",
    "weight",
    "restingHR",
    "hrv",
    "hrvSDNN",
    "avgSleepingHR",
    "spO2",
    "systolic",
    "diastolic",
    "respiration",
    "bloodGlucose",
    "lactate",
    "vo2max",
    "bodyFat",
    "abdomen",
    "baevskySI",
    "sleepSecs",
    "sleepHours",
    "sleepQuality",
    "sleepScore",
    "readiness",
    "menstrualPhase",
    "menstrualPhasePredicted",
    "soreness",
    "fatigue",
    "stress",
    "mood",
    "motivation",
    "injury",
    "kcalConsumed",
    "hydrationVolume",
    "hydration",
    "steps",
    "comments",
    "locked",
];

fn present<'a>(entries: &'a Payload, key: &str) -> Option<&'a Value> {
    entries.get(key).filter(|value| !value.is_null())
}

fn training_metrics(entries: &Payload) -> Vec<String> {
    [
        ("ctl", "Fitness (CTL)"),
        ("atl", "Fatigue (ATL)"),
        ("rampRate", "Ramp Rate"),
        ("ctlLoad", "CTL Load"),
        ("atlLoad", "ATL Load"),
    ]
    .iter()
    .filter_map(|(key, label)| {
        present(entries, key).map(|value| format!("- {label}: {}", render_value(value)))
    })
    .collect()
}

fn sport_info(entries: &Payload) -> Vec<String> {
    let Some(sports) = entries.get("sportInfo").and_then(Value::as_array) else {
        return Vec::new();
    };
    sports
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|sport| {
            sport
                .get("eftp")
                .filter(|eftp| !eftp.is_null())
                .map(|eftp| {
                    format!(
                        "- {}: eFTP = {}",
                        text_or(sport, &["type"], "N/A"),
                        render_value(eftp)
                    )
                })
        })
        .collect()
}

fn vital_signs(entries: &Payload) -> Vec<String> {
    let metrics: &[(&str, &str, &str)] = &[
        ("weight", "Weight", "kg"),
        ("restingHR", "Resting HR", "bpm"),
        ("hrv", "HRV", ""),
        ("hrvSDNN", "HRV SDNN", ""),
        ("avgSleepingHR", "Average Sleeping HR", "bpm"),
        ("spO2", "SpO2", "%"),
        ("systolic", "Systolic BP", ""),
        ("diastolic", "Diastolic BP", ""),
        ("respiration", "Respiration", "breaths/min"),
        ("bloodGlucose", "Blood Glucose", "mmol/L"),
        ("lactate", "Lactate", "mmol/L"),
        ("vo2max", "VO2 Max", "ml/kg/min"),
        ("bodyFat", "Body Fat", "%"),
        ("abdomen", "Abdomen", "cm"),
        ("baevskySI", "Baevsky Stress Index", ""),
    ];

    let mut lines = Vec::new();
    for (key, label, unit) in metrics {
        let Some(value) = present(entries, key) else {
            continue;
        };
        // Systolic and diastolic merge into one combined blood-pressure line;
        // either one alone renders nothing.
        if *key == "systolic" {
            if let Some(diastolic) = present(entries, "diastolic") {
                lines.push(format!(
                    "- Blood Pressure: {}/{} mmHg",
                    render_value(value),
                    render_value(diastolic)
                ));
            }
        } else if *key != "diastolic" {
            let suffix = if unit.is_empty() {
                String::new()
            } else {
                format!(" {unit}")
            };
            lines.push(format!("- {label}: {}{suffix}", render_value(value)));
        }
    }
    lines
}

fn sleep_quality_label(value: &Value) -> String {
    match value.as_i64() {
        Some(1) => "Great".into(),
        Some(2) => "Good".into(),
        Some(3) => "Average".into(),
        Some(4) => "Poor".into(),
        _ => render_value(value),
    }
}

fn sleep_recovery(entries: &Payload) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(secs) = present(entries, "sleepSecs") {
        let rendered = secs
            .as_f64()
            .map_or_else(|| render_value(secs), |s| format!("{:.2}", s / 3600.0));
        lines.push(format!("  Sleep: {rendered} hours"));
    } else if let Some(hours) = present(entries, "sleepHours") {
        lines.push(format!("  Sleep: {} hours", render_value(hours)));
    }

    if let Some(quality) = present(entries, "sleepQuality") {
        lines.push(format!(
            "  Sleep Quality: {} ({})",
            render_value(quality),
            sleep_quality_label(quality)
        ));
    }

    if let Some(score) = present(entries, "sleepScore") {
        lines.push(format!("  Device Sleep Score: {}/100", render_value(score)));
    }

    if let Some(readiness) = present(entries, "readiness") {
        lines.push(format!("  Readiness: {}/10", render_value(readiness)));
    }

    lines
}

/// First character uppercased, the rest lowercased, like a phase name.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

fn menstrual_tracking(entries: &Payload) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(phase) = present(entries, "menstrualPhase") {
        lines.push(format!(
            "  Menstrual Phase: {}",
            capitalize(&render_value(phase))
        ));
    }
    if let Some(predicted) = present(entries, "menstrualPhasePredicted") {
        lines.push(format!(
            "  Predicted Phase: {}",
            capitalize(&render_value(predicted))
        ));
    }
    lines
}

fn subjective_feelings(entries: &Payload) -> Vec<String> {
    [
        ("soreness", "Soreness"),
        ("fatigue", "Fatigue"),
        ("stress", "Stress"),
        ("mood", "Mood"),
        ("motivation", "Motivation"),
        ("injury", "Injury Level"),
    ]
    .iter()
    .filter_map(|(key, label)| {
        present(entries, key).map(|value| format!("  {label}: {}/10", render_value(value)))
    })
    .collect()
}

fn nutrition_hydration(entries: &Payload) -> Vec<String> {
    let mut lines = Vec::new();
    for (key, label) in [
        ("kcalConsumed", "Calories Consumed"),
        ("hydrationVolume", "Hydration Volume"),
    ] {
        if let Some(value) = present(entries, key) {
            lines.push(format!("- {label}: {}", render_value(value)));
        }
    }
    if let Some(score) = present(entries, "hydration") {
        lines.push(format!("  Hydration Score: {}/10", render_value(score)));
    }
    lines
}

/// Append a section with its title and a trailing blank line, but only when
/// the section has content.
fn push_section(lines: &mut Vec<String>, section_lines: Vec<String>, title: &str) {
    if !section_lines.is_empty() {
        lines.push(title.into());
        lines.extend(section_lines);
        lines.push(String::new());
    }
}

/// Format a wellness entry into a readable report.
///
/// Covers training metrics, sport-specific eFTP, vital signs, sleep and
/// recovery, menstrual tracking, subjective feelings, nutrition, steps,
/// comments, and locked status. Sections without data are omitted entirely.
#[must_use]
pub fn format_wellness_entry(entries: &Payload) -> String {
    let mut lines = vec![
        "Wellness Data:".into(),
        format!("Date: {}", text_or(entries, &["id"], "N/A")),
        String::new(),
    ];

    push_section(&mut lines, training_metrics(entries), "Training Metrics:");
    push_section(&mut lines, sport_info(entries), "Sport-Specific Info:");
    push_section(&mut lines, vital_signs(entries), "Vital Signs:");
    push_section(&mut lines, sleep_recovery(entries), "Sleep & Recovery:");
    push_section(&mut lines, menstrual_tracking(entries), "Menstrual Tracking:");
    push_section(&mut lines, subjective_feelings(entries), "Subjective Feelings:");
    push_section(&mut lines, nutrition_hydration(entries), "Nutrition & Hydration:");

    if let Some(steps) = present(entries, "steps") {
        lines.push("Activity:".into());
        lines.push(format!("- Steps: {}", render_value(steps)));
        lines.push(String::new());
    }

    if let Some(comments) = entries.get("comments").filter(|c| is_truthy(c)) {
        lines.push(format!("Comments: {}", render_value(comments)));
    }
    if let Some(locked) = entries.get("locked") {
        let status = if is_truthy(locked) { "Locked" } else { "Unlocked" };
        lines.push(format!("Status: {status}"));
    }

    let custom_lines = format_custom_fields(&detect_custom_fields(entries, KNOWN_WELLNESS_FIELDS));
    if !custom_lines.is_empty() {
        lines.push(String::new());
        lines.push("Custom Fields:".into());
        lines.extend(custom_lines);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Payload {
        value.as_object().map(Clone::clone).unwrap_or_default()
    }

    #[test]
    fn test_sleep_seconds_convert_to_hours() {
        let entry = as_map(json!({"sleepSecs": 28800}));
        let lines = sleep_recovery(&entry);
        assert_eq!(lines, vec!["  Sleep: 8.00 hours"]);
    }

    #[test]
    fn test_sleep_hours_used_when_no_seconds() {
        let entry = as_map(json!({"sleepHours": 7.5}));
        let lines = sleep_recovery(&entry);
        assert_eq!(lines, vec!["  Sleep: 7.5 hours"]);
    }

    #[test]
    fn test_sleep_quality_labels() {
        let entry = as_map(json!({"sleepQuality": 2}));
        assert_eq!(sleep_recovery(&entry), vec!["  Sleep Quality: 2 (Good)"]);

        let unknown = as_map(json!({"sleepQuality": 99}));
        assert_eq!(sleep_recovery(&unknown), vec!["  Sleep Quality: 99 (99)"]);
    }

    #[test]
    fn test_blood_pressure_combines_when_both_present() {
        let entry = as_map(json!({"systolic": 120, "diastolic": 80}));
        assert_eq!(vital_signs(&entry), vec!["- Blood Pressure: 120/80 mmHg"]);

        // Either one alone renders nothing
        let sys_only = as_map(json!({"systolic": 120}));
        assert!(vital_signs(&sys_only).is_empty());
        let dia_only = as_map(json!({"diastolic": 80}));
        assert!(vital_signs(&dia_only).is_empty());
    }

    #[test]
    fn test_menstrual_phase_capitalized() {
        let entry = as_map(json!({"menstrualPhase": "FOLLICULAR"}));
        assert_eq!(
            menstrual_tracking(&entry),
            vec!["  Menstrual Phase: Follicular"]
        );
    }

    #[test]
    fn test_locked_status() {
        let locked = as_map(json!({"locked": true}));
        assert!(format_wellness_entry(&locked).contains("Status: Locked"));
        let unlocked = as_map(json!({"locked": false}));
        assert!(format_wellness_entry(&unlocked).contains("Status: Unlocked"));
        let absent = as_map(json!({}));
        assert!(!format_wellness_entry(&absent).contains("Status:"));
    }
}
