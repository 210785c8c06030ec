// ABOUTME: Interval analysis formatter for per-interval and per-group metric blocks
// ABOUTME: Uses a numeric 0 as the missing-value sentinel instead of N/A
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Interval analysis formatting
//!
//! Missing metrics render as `0` here, not `N/A`: downstream consumers of
//! interval reports expect numeric-typed values in every metric slot.

use serde_json::{Map, Value};

use super::{is_truthy, metric_or_zero, render_value, text_or, Payload};

fn object_or_empty(value: &Value) -> Map<String, Value> {
    value.as_object().map_or_else(Map::new, Clone::clone)
}

fn format_interval(interval: &Payload, index: usize) -> String {
    let label = interval
        .get("label")
        .filter(|v| !v.is_null())
        .map_or_else(|| format!("Interval {index}"), render_value);
    let interval_type = text_or(interval, &["type"], "Unknown");
    let m = |key: &str| metric_or_zero(interval, key);
    let zone = text_or(interval, &["zone"], "N/A");

    format!(
        "[{index}] {label} ({interval_type})\n\
         Duration: {elapsed} seconds (moving: {moving} seconds)\n\
         Distance: {distance} meters\n\
         Start-End Indices: {start}-{end}\n\
         \n\
         Power Metrics:\n\
         \x20 Average Power: {avg_watts} watts ({avg_watts_kg} W/kg)\n\
         \x20 Max Power: {max_watts} watts ({max_watts_kg} W/kg)\n\
         \x20 Weighted Avg Power: {weighted_watts} watts\n\
         \x20 Intensity: {intensity}\n\
         \x20 Training Load: {training_load}\n\
         \x20 Joules: {joules}\n\
         \x20 Joules > FTP: {joules_above_ftp}\n\
         \x20 Power Zone: {zone} ({zone_min}-{zone_max} watts)\n\
         \x20 W' Balance: Start {wbal_start}, End {wbal_end}\n\
         \x20 L/R Balance: {lr_balance}\n\
         \x20 Variability: {variability}\n\
         \x20 Torque: Avg {avg_torque}, Min {min_torque}, Max {max_torque}\n\
         \n\
         Heart Rate & Metabolic:\n\
         \x20 Heart Rate: Avg {avg_hr}, Min {min_hr}, Max {max_hr} bpm\n\
         \x20 Decoupling: {decoupling}\n\
         \x20 DFA α1: {dfa_a1}\n\
         \x20 Respiration: {respiration} breaths/min\n\
         \x20 EPOC: {epoc}\n\
         \x20 SmO2: {smo2}% / {smo2_2}%\n\
         \x20 THb: {thb} / {thb_2}\n\
         \n\
         Speed & Cadence:\n\
         \x20 Speed: Avg {avg_speed}, Min {min_speed}, Max {max_speed} m/s\n\
         \x20 GAP: {gap} m/s\n\
         \x20 Cadence: Avg {avg_cadence}, Min {min_cadence}, Max {max_cadence} rpm\n\
         \x20 Stride: {stride}\n\
         \n\
         Elevation & Environment:\n\
         \x20 Elevation Gain: {elevation_gain} meters\n\
         \x20 Altitude: Min {min_altitude}, Max {max_altitude} meters\n\
         \x20 Gradient: {gradient}%\n\
         \x20 Temperature: {temp}°C (Weather: {weather_temp}°C, Feels like: {feels_like}°C)\n\
         \x20 Wind: Speed {wind_speed} km/h, Gust {wind_gust} km/h, Direction {wind_deg}°\n\
         \x20 Headwind: {headwind}%, Tailwind: {tailwind}%\n\
         \n",
        elapsed = m("elapsed_time"),
        moving = m("moving_time"),
        distance = m("distance"),
        start = m("start_index"),
        end = m("end_index"),
        avg_watts = m("average_watts"),
        avg_watts_kg = m("average_watts_kg"),
        max_watts = m("max_watts"),
        max_watts_kg = m("max_watts_kg"),
        weighted_watts = m("weighted_average_watts"),
        intensity = m("intensity"),
        training_load = m("training_load"),
        joules = m("joules"),
        joules_above_ftp = m("joules_above_ftp"),
        zone_min = m("zone_min_watts"),
        zone_max = m("zone_max_watts"),
        wbal_start = m("wbal_start"),
        wbal_end = m("wbal_end"),
        lr_balance = m("avg_lr_balance"),
        variability = m("w5s_variability"),
        avg_torque = m("average_torque"),
        min_torque = m("min_torque"),
        max_torque = m("max_torque"),
        avg_hr = m("average_heartrate"),
        min_hr = m("min_heartrate"),
        max_hr = m("max_heartrate"),
        decoupling = m("decoupling"),
        dfa_a1 = m("average_dfa_a1"),
        respiration = m("average_respiration"),
        epoc = m("average_epoc"),
        smo2 = m("average_smo2"),
        smo2_2 = m("average_smo2_2"),
        thb = m("average_thb"),
        thb_2 = m("average_thb_2"),
        avg_speed = m("average_speed"),
        min_speed = m("min_speed"),
        max_speed = m("max_speed"),
        gap = m("gap"),
        avg_cadence = m("average_cadence"),
        min_cadence = m("min_cadence"),
        max_cadence = m("max_cadence"),
        stride = m("average_stride"),
        elevation_gain = m("total_elevation_gain"),
        min_altitude = m("min_altitude"),
        max_altitude = m("max_altitude"),
        gradient = m("average_gradient"),
        temp = m("average_temp"),
        weather_temp = m("average_weather_temp"),
        feels_like = m("average_feels_like"),
        wind_speed = m("average_wind_speed"),
        wind_gust = m("average_wind_gust"),
        wind_deg = m("prevailing_wind_deg"),
        headwind = m("headwind_percent"),
        tailwind = m("tailwind_percent"),
    )
}

fn format_group(group: &Payload, index: usize) -> String {
    let id = group
        .get("id")
        .filter(|v| !v.is_null())
        .map_or_else(|| format!("Group {index}"), render_value);
    let m = |key: &str| metric_or_zero(group, key);

    format!(
        "Group: {id} (Contains {count} intervals)\n\
         Duration: {elapsed} seconds (moving: {moving} seconds)\n\
         Distance: {distance} meters\n\
         Start-End Indices: {start}-N/A\n\
         \n\
         Power: Avg {avg_watts} watts ({avg_watts_kg} W/kg), Max {max_watts} watts\n\
         W. Avg Power: {weighted_watts} watts, Intensity: {intensity}\n\
         Heart Rate: Avg {avg_hr}, Max {max_hr} bpm\n\
         Speed: Avg {avg_speed}, Max {max_speed} m/s\n\
         Cadence: Avg {avg_cadence}, Max {max_cadence} rpm\n\
         \n",
        count = m("count"),
        elapsed = m("elapsed_time"),
        moving = m("moving_time"),
        distance = m("distance"),
        start = m("start_index"),
        avg_watts = m("average_watts"),
        avg_watts_kg = m("average_watts_kg"),
        max_watts = m("max_watts"),
        weighted_watts = m("weighted_average_watts"),
        intensity = m("intensity"),
        avg_hr = m("average_heartrate"),
        max_hr = m("max_heartrate"),
        avg_speed = m("average_speed"),
        max_speed = m("max_speed"),
        avg_cadence = m("average_cadence"),
        max_cadence = m("max_cadence"),
    )
}

/// Format an interval analysis payload into a readable report with one
/// numbered block per interval and one block per interval group.
#[must_use]
pub fn format_intervals(intervals_data: &Payload) -> String {
    let id = text_or(intervals_data, &["id"], "N/A");
    let analyzed = text_or(intervals_data, &["analyzed"], "N/A");

    let mut result = format!(
        "Intervals Analysis:\n\n\
         ID: {id}\n\
         Analyzed: {analyzed}\n\n"
    );

    if let Some(intervals) = intervals_data
        .get("icu_intervals")
        .filter(|v| is_truthy(v))
        .and_then(Value::as_array)
    {
        result.push_str("Individual Intervals:\n\n");
        for (i, entry) in intervals.iter().enumerate() {
            result.push_str(&format_interval(&object_or_empty(entry), i + 1));
        }
    }

    if let Some(groups) = intervals_data
        .get("icu_groups")
        .filter(|v| is_truthy(v))
        .and_then(Value::as_array)
    {
        result.push_str("Interval Groups:\n\n");
        for (i, entry) in groups.iter().enumerate() {
            result.push_str(&format_group(&object_or_empty(entry), i + 1));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Payload {
        value.as_object().map(Clone::clone).unwrap_or_default()
    }

    #[test]
    fn test_missing_metrics_render_as_zero() {
        let block = format_interval(&Payload::new(), 1);
        assert!(block.contains("[1] Interval 1 (Unknown)"));
        assert!(block.contains("Average Power: 0 watts (0 W/kg)"));
        assert!(block.contains("Power Zone: N/A (0-0 watts)"));
    }

    #[test]
    fn test_interval_label_and_numbering() {
        let interval = as_map(json!({"label": "Rep 1", "type": "Work"}));
        let block = format_interval(&interval, 3);
        assert!(block.starts_with("[3] Rep 1 (Work)"));
    }

    #[test]
    fn test_group_end_index_is_open() {
        let group = as_map(json!({"id": "g1", "count": 4, "start_index": 10}));
        let block = format_group(&group, 1);
        assert!(block.contains("Start-End Indices: 10-N/A"));
        assert!(block.contains("Contains 4 intervals"));
    }

    #[test]
    fn test_sections_omitted_when_empty() {
        let data = as_map(json!({"id": 9, "analyzed": true, "icu_intervals": []}));
        let result = format_intervals(&data);
        assert!(result.contains("Analyzed: True"));
        assert!(!result.contains("Individual Intervals:"));
        assert!(!result.contains("Interval Groups:"));
    }
}
