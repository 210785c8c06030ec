// ABOUTME: Intervals.icu tool operations and their registry wiring
// ABOUTME: Read tools fetch and format payloads; post_events writes a planned workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Intervals.icu Tools
//!
//! Each tool is an ordinary async function over the [`IntervalsApi`] trait so
//! it stays testable with a fake transport; [`register_tools`] wraps them
//! into registry handlers that parse JSON arguments.

use std::sync::Arc;

use chrono::{Duration, Utc};
use futures_util::FutureExt;
use serde_json::{json, Map, Value};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::formatters::{
    format_activity_summary, format_event_details, format_event_summary, format_intervals,
    format_wellness_entry,
};
use crate::providers::IntervalsApi;
use crate::utils::validation::{validate_athlete_id, validate_date};

use super::registry::ToolRegistry;

/// Resolve and validate the athlete ID for one call: an explicit parameter
/// wins over the configured default.
fn resolve_athlete(config: &ServerConfig, explicit: Option<&str>) -> AppResult<String> {
    let athlete_id = config.resolve_athlete_id(explicit);
    if athlete_id.is_empty() {
        return Err(AppError::invalid_input(
            "no athlete ID provided and no default ATHLETE_ID configured",
        ));
    }
    validate_athlete_id(athlete_id)?;
    Ok(athlete_id.to_owned())
}

/// Resolve a date range, defaulting to the last 30 days.
fn resolve_date_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> AppResult<(String, String)> {
    let today = Utc::now().date_naive();
    let oldest = match start_date {
        Some(date) => validate_date(date)?.to_owned(),
        None => (today - Duration::days(30)).to_string(),
    };
    let newest = match end_date {
        Some(date) => validate_date(date)?.to_owned(),
        None => today.to_string(),
    };
    Ok((oldest, newest))
}

/// List recent activities for an athlete as formatted summaries.
///
/// Unnamed activities are skipped unless `include_unnamed` is set; at most
/// `limit` activities are rendered.
///
/// # Errors
///
/// Returns [`AppError`] for invalid parameters or upstream failures.
pub async fn get_activities(
    api: &dyn IntervalsApi,
    config: &ServerConfig,
    athlete_id: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: usize,
    include_unnamed: bool,
) -> AppResult<String> {
    let athlete = resolve_athlete(config, athlete_id)?;
    let (oldest, newest) = resolve_date_range(start_date, end_date)?;

    let response = api
        .fetch(
            &format!("/athlete/{athlete}/activities"),
            &[("oldest", oldest), ("newest", newest)],
        )
        .await?;

    let Some(items) = response.as_array() else {
        return Ok("No activities found.".into());
    };

    let mut rendered = Vec::new();
    for item in items {
        let Some(activity) = item.as_object() else {
            continue;
        };
        if !include_unnamed {
            let named = activity
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| !name.is_empty());
            if !named {
                continue;
            }
        }
        rendered.push(format_activity_summary(activity));
        if rendered.len() >= limit {
            break;
        }
    }

    if rendered.is_empty() {
        return Ok("No activities found.".into());
    }
    Ok(format!("Activities:\n{}", rendered.join("\n")))
}

/// Fetch one activity and format its full summary.
///
/// # Errors
///
/// Returns [`AppError`] for upstream failures.
pub async fn get_activity_details(api: &dyn IntervalsApi, activity_id: &str) -> AppResult<String> {
    let response = api.fetch(&format!("/activity/{activity_id}"), &[]).await?;
    response.as_object().map_or_else(
        || Ok(format!("No details found for activity {activity_id}.")),
        |activity| Ok(format_activity_summary(activity)),
    )
}

/// List calendar events for an athlete as formatted summaries.
///
/// # Errors
///
/// Returns [`AppError`] for invalid parameters or upstream failures.
pub async fn get_events(
    api: &dyn IntervalsApi,
    config: &ServerConfig,
    athlete_id: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> AppResult<String> {
    let athlete = resolve_athlete(config, athlete_id)?;
    let (oldest, newest) = resolve_date_range(start_date, end_date)?;

    let response = api
        .fetch(
            &format!("/athlete/{athlete}/events"),
            &[("oldest", oldest), ("newest", newest)],
        )
        .await?;

    let summaries: Vec<String> = response
        .as_array()
        .map(|events| {
            events
                .iter()
                .filter_map(Value::as_object)
                .map(format_event_summary)
                .collect()
        })
        .unwrap_or_default();

    if summaries.is_empty() {
        return Ok("No events found.".into());
    }
    Ok(format!("Events:\n\n{}", summaries.join("\n\n")))
}

/// Fetch one calendar event and format its details.
///
/// # Errors
///
/// Returns [`AppError`] for invalid parameters or upstream failures.
pub async fn get_event_by_id(
    api: &dyn IntervalsApi,
    config: &ServerConfig,
    event_id: &str,
    athlete_id: Option<&str>,
) -> AppResult<String> {
    let athlete = resolve_athlete(config, athlete_id)?;
    let response = api
        .fetch(&format!("/athlete/{athlete}/events/{event_id}"), &[])
        .await?;
    response.as_object().map_or_else(
        || Ok(format!("No details found for event {event_id}.")),
        |event| Ok(format_event_details(event)),
    )
}

/// Fetch wellness entries for an athlete and format each one.
///
/// The upstream API returns either a date-keyed object or an array; both are
/// handled, object entries in ascending date order.
///
/// # Errors
///
/// Returns [`AppError`] for invalid parameters or upstream failures.
pub async fn get_wellness_data(
    api: &dyn IntervalsApi,
    config: &ServerConfig,
    athlete_id: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> AppResult<String> {
    let athlete = resolve_athlete(config, athlete_id)?;
    let (oldest, newest) = resolve_date_range(start_date, end_date)?;

    let response = api
        .fetch(
            &format!("/athlete/{athlete}/wellness"),
            &[("oldest", oldest), ("newest", newest)],
        )
        .await?;

    let reports: Vec<String> = match &response {
        Value::Object(by_date) => {
            let mut dated: Vec<(&String, &Value)> = by_date.iter().collect();
            dated.sort_by(|(a, _), (b, _)| a.cmp(b));
            dated
                .into_iter()
                .filter_map(|(date, entry)| {
                    entry.as_object().map(|fields| {
                        // Entries arrive keyed by date; label each report by it
                        let mut fields = fields.clone();
                        fields.insert("id".into(), json!(date));
                        format_wellness_entry(&fields)
                    })
                })
                .collect()
        }
        Value::Array(entries) => entries
            .iter()
            .filter_map(Value::as_object)
            .map(format_wellness_entry)
            .collect(),
        _ => Vec::new(),
    };

    if reports.is_empty() {
        return Ok("No wellness data found.".into());
    }
    Ok(reports.join("\n\n"))
}

/// Fetch the interval analysis for one activity and format it.
///
/// # Errors
///
/// Returns [`AppError`] for upstream failures.
pub async fn get_activity_intervals(
    api: &dyn IntervalsApi,
    activity_id: &str,
) -> AppResult<String> {
    let response = api
        .fetch(&format!("/activity/{activity_id}/intervals"), &[])
        .await?;
    response.as_object().map_or_else(
        || Ok(format!("No intervals found for activity {activity_id}.")),
        |intervals| Ok(format_intervals(intervals)),
    )
}

/// Detect the workout sport: an explicit `type` in the workout data wins,
/// otherwise the workout name is matched for sport keywords, defaulting to
/// `Run`.
fn detect_workout_type(name: &str, data: &Value) -> String {
    if let Some(explicit) = data.get("type").and_then(Value::as_str) {
        return explicit.to_owned();
    }
    let lowered = name.to_lowercase();
    let sport = if lowered.contains("run") {
        "Run"
    } else if lowered.contains("bike") || lowered.contains("ride") {
        "Ride"
    } else if lowered.contains("swim") {
        "Swim"
    } else {
        "Run"
    };
    sport.to_owned()
}

/// Create a planned workout event on the athlete's calendar.
///
/// Returns the upstream response payload unmodified so callers see the
/// created event's ID and normalized fields.
///
/// # Errors
///
/// Returns [`AppError`] for invalid parameters or upstream failures.
pub async fn post_events(
    api: &dyn IntervalsApi,
    config: &ServerConfig,
    athlete_id: Option<&str>,
    start_date: &str,
    name: &str,
    data: &Value,
) -> AppResult<Value> {
    let athlete = resolve_athlete(config, athlete_id)?;
    validate_date(start_date)?;

    // Carry the caller's structured workout (steps, description, ...) through
    // and overlay the event envelope fields.
    let mut body = data.as_object().map_or_else(Map::new, Clone::clone);
    body.insert("category".into(), json!("WORKOUT"));
    body.insert(
        "start_date_local".into(),
        json!(format!("{start_date}T00:00:00")),
    );
    body.insert("name".into(), json!(name));
    body.insert("type".into(), json!(detect_workout_type(name, data)));

    api.submit(&format!("/athlete/{athlete}/events"), &Value::Object(body))
        .await
}

fn opt_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn req_str(args: &Value, key: &str) -> AppResult<String> {
    opt_str(args, key)
        .ok_or_else(|| AppError::invalid_input(format!("missing required argument '{key}'")))
}

/// Register every Intervals.icu tool on the registry.
///
/// Handlers parse their JSON arguments, delegate to the plain async
/// functions above, and render results as report text.
pub fn register_tools(
    registry: &mut ToolRegistry,
    api: Arc<dyn IntervalsApi>,
    config: Arc<ServerConfig>,
) {
    let (api_ref, config_ref) = (Arc::clone(&api), Arc::clone(&config));
    registry.tool(
        "get_activities",
        "List recent activities for an athlete with power, heart rate, and training metrics",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            let config = Arc::clone(&config_ref);
            async move {
                let athlete_id = opt_str(&args, "athlete_id");
                let start_date = opt_str(&args, "start_date");
                let end_date = opt_str(&args, "end_date");
                let limit = args.get("limit").and_then(Value::as_u64).unwrap_or(10) as usize;
                let include_unnamed = args
                    .get("include_unnamed")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                get_activities(
                    api.as_ref(),
                    &config,
                    athlete_id.as_deref(),
                    start_date.as_deref(),
                    end_date.as_deref(),
                    limit,
                    include_unnamed,
                )
                .await
            }
            .boxed()
        }),
    );

    let api_ref = Arc::clone(&api);
    registry.tool(
        "get_activity_details",
        "Get the full formatted summary of one activity by ID",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            async move {
                let activity_id = req_str(&args, "activity_id")?;
                get_activity_details(api.as_ref(), &activity_id).await
            }
            .boxed()
        }),
    );

    let (api_ref, config_ref) = (Arc::clone(&api), Arc::clone(&config));
    registry.tool(
        "get_events",
        "List calendar events (workouts, races) for an athlete in a date range",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            let config = Arc::clone(&config_ref);
            async move {
                let athlete_id = opt_str(&args, "athlete_id");
                let start_date = opt_str(&args, "start_date");
                let end_date = opt_str(&args, "end_date");
                get_events(
                    api.as_ref(),
                    &config,
                    athlete_id.as_deref(),
                    start_date.as_deref(),
                    end_date.as_deref(),
                )
                .await
            }
            .boxed()
        }),
    );

    let (api_ref, config_ref) = (Arc::clone(&api), Arc::clone(&config));
    registry.tool(
        "get_event_by_id",
        "Get detailed information for one calendar event, including workout and race blocks",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            let config = Arc::clone(&config_ref);
            async move {
                let event_id = req_str(&args, "event_id")?;
                let athlete_id = opt_str(&args, "athlete_id");
                get_event_by_id(api.as_ref(), &config, &event_id, athlete_id.as_deref()).await
            }
            .boxed()
        }),
    );

    let (api_ref, config_ref) = (Arc::clone(&api), Arc::clone(&config));
    registry.tool(
        "get_wellness_data",
        "Get wellness entries (sleep, HRV, vitals, subjective feelings) for an athlete",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            let config = Arc::clone(&config_ref);
            async move {
                let athlete_id = opt_str(&args, "athlete_id");
                let start_date = opt_str(&args, "start_date");
                let end_date = opt_str(&args, "end_date");
                get_wellness_data(
                    api.as_ref(),
                    &config,
                    athlete_id.as_deref(),
                    start_date.as_deref(),
                    end_date.as_deref(),
                )
                .await
            }
            .boxed()
        }),
    );

    let api_ref = Arc::clone(&api);
    registry.tool(
        "get_activity_intervals",
        "Get the interval-by-interval analysis of one activity",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            async move {
                let activity_id = req_str(&args, "activity_id")?;
                get_activity_intervals(api.as_ref(), &activity_id).await
            }
            .boxed()
        }),
    );

    let (api_ref, config_ref) = (Arc::clone(&api), Arc::clone(&config));
    registry.tool(
        "post_events",
        "Create a planned workout event on the athlete's calendar",
        Arc::new(move |args| {
            let api = Arc::clone(&api_ref);
            let config = Arc::clone(&config_ref);
            async move {
                let athlete_id = opt_str(&args, "athlete_id");
                let start_date = req_str(&args, "start_date")?;
                let name = req_str(&args, "name")?;
                let data = args.get("data").cloned().unwrap_or_else(|| json!({}));
                let created = post_events(
                    api.as_ref(),
                    &config,
                    athlete_id.as_deref(),
                    &start_date,
                    &name,
                    &data,
                )
                .await?;
                serde_json::to_string_pretty(&created).map_err(Into::into)
            }
            .boxed()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_workout_type_from_name() {
        let steps = json!({"steps": []});
        assert_eq!(detect_workout_type("Morning Run", &steps), "Run");
        assert_eq!(detect_workout_type("Bike Intervals", &steps), "Ride");
        assert_eq!(detect_workout_type("Swimming Session", &steps), "Swim");
        assert_eq!(detect_workout_type("VO2 Max Intervals", &steps), "Run");
    }

    #[test]
    fn test_explicit_type_overrides_name() {
        let data = json!({"steps": [], "type": "Swim"});
        assert_eq!(detect_workout_type("Bike Workout", &data), "Swim");
    }
}
