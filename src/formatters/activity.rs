// ABOUTME: Activity summary formatter producing the multi-section activity report
// ABOUTME: Handles alias fallback chains, timestamp normalization, and custom fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Activity summary formatting

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use super::custom_fields::{detect_custom_fields, format_custom_fields};
use super::{lookup, render_value, text_or, Payload};

/// Activity fields already rendered through a dedicated report slot.
/// Anything else that looks camelCase is surfaced as a custom field.
const KNOWN_ACTIVITY_FIELDS: &[&str] = &[
    "name",
    "id",
    "type",
    "startTime",
    "start_date",
    "description",
    "distance",
    "duration",
    "elapsed_time",
    "moving_time",
    "elevationGain",
    "total_elevation_gain",
    "total_elevation_loss",
    "perceived_exertion",
    "icu_rpe",
    "feel",
    "avgPower",
    "icu_average_watts",
    "average_watts",
    "icu_weighted_avg_watts",
    "trainingLoad",
    "icu_training_load",
    "icu_ftp",
    "icu_joules",
    "icu_intensity",
    "icu_power_hr",
    "icu_variability_index",
    "avgHr",
    "average_heartrate",
    "max_heartrate",
    "lthr",
    "icu_resting_hr",
    "decoupling",
    "average_cadence",
    "calories",
    "average_speed",
    "max_speed",
    "average_stride",
    "avg_lr_balance",
    "icu_weight",
    "session_rpe",
    "trainer",
    "average_temp",
    "min_temp",
    "max_temp",
    "average_wind_speed",
    "headwind_percent",
    "tailwind_percent",
    "icu_ctl",
    "icu_atl",
    "trimp",
    "polarization_index",
    "power_load",
    "hr_load",
    "pace_load",
    "icu_efficiency_factor",
    "device_name",
    "power_meter",
    "file_type",
];

/// Reformat a full timestamp as `YYYY-MM-DD HH:MM:SS`. A trailing `Z` means
/// UTC. Returns `None` when the string does not parse; callers keep the raw
/// value in that case.
fn parse_timestamp(raw: &str) -> Option<String> {
    let normalized = raw.replace('Z', "+00:00");
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    normalized
        .parse::<NaiveDateTime>()
        .ok()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Format the activity start time. Only strings longer than 10 characters
/// carry a time component worth parsing; pure dates pass through unchanged,
/// and so does anything that fails to parse.
fn format_start_time(activity: &Payload) -> String {
    let Some(value) = lookup(activity, &["startTime", "start_date"]) else {
        return "Unknown".into();
    };
    if let Value::String(raw) = value {
        if raw.len() > 10 {
            return parse_timestamp(raw).unwrap_or_else(|| raw.clone());
        }
        return raw.clone();
    }
    render_value(value)
}

/// Format perceived exertion, scaled `/10` when numeric.
fn format_rpe(activity: &Payload) -> String {
    lookup(activity, &["perceived_exertion", "icu_rpe"]).map_or_else(
        || "N/A".into(),
        |value| match value {
            Value::Number(n) => format!("{n}/10"),
            other => render_value(other),
        },
    )
}

/// Format the feel value, scaled `/5` when it is an integer code.
fn format_feel(activity: &Payload) -> String {
    activity
        .get("feel")
        .filter(|value| !value.is_null())
        .map_or_else(
            || "N/A".into(),
            |value| match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => format!("{n}/5"),
                other => render_value(other),
            },
        )
}

/// Format an activity into a readable multi-section report.
#[must_use]
pub fn format_activity_summary(activity: &Payload) -> String {
    let name = text_or(activity, &["name"], "Unnamed");
    let id = text_or(activity, &["id"], "N/A");
    let activity_type = text_or(activity, &["type"], "Unknown");
    let start_time = format_start_time(activity);
    let description = text_or(activity, &["description"], "N/A");
    let distance = text_or(activity, &["distance"], "0");
    let duration = text_or(activity, &["duration", "elapsed_time"], "0");
    let moving_time = text_or(activity, &["moving_time"], "N/A");
    let elevation_gain = text_or(activity, &["elevationGain", "total_elevation_gain"], "0");
    let elevation_loss = text_or(activity, &["total_elevation_loss"], "N/A");

    let mut report = format!(
        "\nActivity: {name}\n\
         ID: {id}\n\
         Type: {activity_type}\n\
         Date: {start_time}\n\
         Description: {description}\n\
         Distance: {distance} meters\n\
         Duration: {duration} seconds\n\
         Moving Time: {moving_time} seconds\n\
         Elevation Gain: {elevation_gain} meters\n\
         Elevation Loss: {elevation_loss} meters\n"
    );

    let avg_power = text_or(
        activity,
        &["avgPower", "icu_average_watts", "average_watts"],
        "N/A",
    );
    let weighted_power = text_or(activity, &["icu_weighted_avg_watts"], "N/A");
    let training_load = text_or(activity, &["trainingLoad", "icu_training_load"], "N/A");
    let ftp = text_or(activity, &["icu_ftp"], "N/A");
    let joules = text_or(activity, &["icu_joules"], "N/A");
    let intensity = text_or(activity, &["icu_intensity"], "N/A");
    let power_hr = text_or(activity, &["icu_power_hr"], "N/A");
    let variability = text_or(activity, &["icu_variability_index"], "N/A");

    report.push_str(&format!(
        "\nPower Data:\n\
         Average Power: {avg_power} watts\n\
         Weighted Avg Power: {weighted_power} watts\n\
         Training Load: {training_load}\n\
         FTP: {ftp} watts\n\
         Kilojoules: {joules}\n\
         Intensity: {intensity}\n\
         Power:HR Ratio: {power_hr}\n\
         Variability Index: {variability}\n"
    ));

    let avg_hr = text_or(activity, &["avgHr", "average_heartrate"], "N/A");
    let max_hr = text_or(activity, &["max_heartrate"], "N/A");
    let lthr = text_or(activity, &["lthr"], "N/A");
    let resting_hr = text_or(activity, &["icu_resting_hr"], "N/A");
    let decoupling = text_or(activity, &["decoupling"], "N/A");

    report.push_str(&format!(
        "\nHeart Rate Data:\n\
         Average Heart Rate: {avg_hr} bpm\n\
         Max Heart Rate: {max_hr} bpm\n\
         LTHR: {lthr} bpm\n\
         Resting HR: {resting_hr} bpm\n\
         Decoupling: {decoupling}\n"
    ));

    let cadence = text_or(activity, &["average_cadence"], "N/A");
    let calories = text_or(activity, &["calories"], "N/A");
    let avg_speed = text_or(activity, &["average_speed"], "N/A");
    let max_speed = text_or(activity, &["max_speed"], "N/A");
    let stride = text_or(activity, &["average_stride"], "N/A");
    let lr_balance = text_or(activity, &["avg_lr_balance"], "N/A");
    let weight = text_or(activity, &["icu_weight"], "N/A");
    let rpe = format_rpe(activity);
    let session_rpe = text_or(activity, &["session_rpe"], "N/A");
    let feel = format_feel(activity);

    report.push_str(&format!(
        "\nOther Metrics:\n\
         Cadence: {cadence} rpm\n\
         Calories: {calories}\n\
         Average Speed: {avg_speed} m/s\n\
         Max Speed: {max_speed} m/s\n\
         Average Stride: {stride}\n\
         L/R Balance: {lr_balance}\n\
         Weight: {weight} kg\n\
         RPE: {rpe}\n\
         Session RPE: {session_rpe}\n\
         Feel: {feel}\n"
    ));

    let trainer = text_or(activity, &["trainer"], "N/A");
    let avg_temp = text_or(activity, &["average_temp"], "N/A");
    let min_temp = text_or(activity, &["min_temp"], "N/A");
    let max_temp = text_or(activity, &["max_temp"], "N/A");
    let wind_speed = text_or(activity, &["average_wind_speed"], "N/A");
    let headwind = text_or(activity, &["headwind_percent"], "N/A");
    let tailwind = text_or(activity, &["tailwind_percent"], "N/A");

    report.push_str(&format!(
        "\nEnvironment:\n\
         Trainer: {trainer}\n\
         Average Temp: {avg_temp}°C\n\
         Min Temp: {min_temp}°C\n\
         Max Temp: {max_temp}°C\n\
         Avg Wind Speed: {wind_speed} km/h\n\
         Headwind %: {headwind}%\n\
         Tailwind %: {tailwind}%\n"
    ));

    let ctl = text_or(activity, &["icu_ctl"], "N/A");
    let atl = text_or(activity, &["icu_atl"], "N/A");
    let trimp = text_or(activity, &["trimp"], "N/A");
    let polarization = text_or(activity, &["polarization_index"], "N/A");
    let power_load = text_or(activity, &["power_load"], "N/A");
    let hr_load = text_or(activity, &["hr_load"], "N/A");
    let pace_load = text_or(activity, &["pace_load"], "N/A");
    let efficiency = text_or(activity, &["icu_efficiency_factor"], "N/A");

    report.push_str(&format!(
        "\nTraining Metrics:\n\
         Fitness (CTL): {ctl}\n\
         Fatigue (ATL): {atl}\n\
         TRIMP: {trimp}\n\
         Polarization Index: {polarization}\n\
         Power Load: {power_load}\n\
         HR Load: {hr_load}\n\
         Pace Load: {pace_load}\n\
         Efficiency Factor: {efficiency}\n"
    ));

    let device = text_or(activity, &["device_name"], "N/A");
    let power_meter = text_or(activity, &["power_meter"], "N/A");
    let file_type = text_or(activity, &["file_type"], "N/A");

    report.push_str(&format!(
        "\nDevice Info:\n\
         Device: {device}\n\
         Power Meter: {power_meter}\n\
         File Type: {file_type}"
    ));

    let custom_lines = format_custom_fields(&detect_custom_fields(activity, KNOWN_ACTIVITY_FIELDS));
    if !custom_lines.is_empty() {
        report.push_str("\n\nCustom Fields:\n");
        report.push_str(&custom_lines.join("\n"));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: serde_json::Value) -> Payload {
        value.as_object().map(Clone::clone).unwrap_or_default()
    }

    #[test]
    fn test_start_time_parses_full_timestamp() {
        let activity = as_map(json!({"startTime": "2024-01-01T08:00:00Z"}));
        assert_eq!(format_start_time(&activity), "2024-01-01 08:00:00");
    }

    #[test]
    fn test_start_time_passes_pure_dates_through() {
        let activity = as_map(json!({"start_date": "2024-01-01"}));
        assert_eq!(format_start_time(&activity), "2024-01-01");
    }

    #[test]
    fn test_start_time_preserves_unparseable_strings() {
        let activity = as_map(json!({"startTime": "yesterday morning"}));
        assert_eq!(format_start_time(&activity), "yesterday morning");
    }

    #[test]
    fn test_rpe_scaling() {
        let activity = as_map(json!({"perceived_exertion": 7}));
        assert_eq!(format_rpe(&activity), "7/10");
        let fallback = as_map(json!({"icu_rpe": 4.5}));
        assert_eq!(format_rpe(&fallback), "4.5/10");
        assert_eq!(format_rpe(&as_map(json!({}))), "N/A");
    }

    #[test]
    fn test_feel_scaling() {
        assert_eq!(format_feel(&as_map(json!({"feel": 3}))), "3/5");
        assert_eq!(format_feel(&as_map(json!({}))), "N/A");
    }
}
