// ABOUTME: Integration tests for the Intervals.icu tool functions
// ABOUTME: Uses a fake API transport so no network access is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use intervals_mcp_server::config::ServerConfig;
use intervals_mcp_server::errors::AppResult;
use intervals_mcp_server::providers::IntervalsApi;
use intervals_mcp_server::tools::implementations::{
    get_activities, get_activity_details, get_activity_intervals, get_event_by_id, get_events,
    get_wellness_data, post_events, register_tools,
};
use intervals_mcp_server::tools::ToolRegistry;
use serde_json::{json, Value};

/// Fake transport returning a canned payload and recording submissions
struct FakeApi {
    response: Value,
    fetched: Mutex<Vec<String>>,
    submitted: Mutex<Option<(String, Value)>>,
}

impl FakeApi {
    fn returning(response: Value) -> Self {
        Self {
            response,
            fetched: Mutex::new(Vec::new()),
            submitted: Mutex::new(None),
        }
    }

    fn submitted_body(&self) -> Option<Value> {
        self.submitted.lock().unwrap().as_ref().map(|(_, b)| b.clone())
    }
}

#[async_trait]
impl IntervalsApi for FakeApi {
    async fn fetch(&self, path: &str, _params: &[(&str, String)]) -> AppResult<Value> {
        self.fetched.lock().unwrap().push(path.to_owned());
        Ok(self.response.clone())
    }

    async fn submit(&self, path: &str, body: &Value) -> AppResult<Value> {
        *self.submitted.lock().unwrap() = Some((path.to_owned(), body.clone()));
        Ok(json!({
            "id": "e123",
            "start_date_local": body["start_date_local"],
            "category": body["category"],
            "name": body["name"],
            "type": body["type"],
        }))
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        api_key: "test".into(),
        athlete_id: "i1".into(),
        base_url: "https://intervals.icu/api/v1".into(),
        user_agent: "intervals-mcp-server/test".into(),
    }
}

fn sample_activity() -> Value {
    json!({
        "name": "Morning Ride",
        "id": 123,
        "type": "Ride",
        "startTime": "2024-01-01T08:00:00Z",
        "distance": 1000,
        "duration": 3600,
    })
}

#[tokio::test]
async fn test_get_activities() {
    let api = FakeApi::returning(json!([sample_activity()]));
    let config = test_config();
    let result = get_activities(&api, &config, Some("1"), None, None, 1, true)
        .await
        .unwrap();
    assert!(result.contains("Activities:"));
    assert!(result.contains("Morning Ride"));
    assert_eq!(
        api.fetched.lock().unwrap().as_slice(),
        ["/athlete/1/activities"]
    );
}

#[tokio::test]
async fn test_get_activities_skips_unnamed_by_default() {
    let api = FakeApi::returning(json!([
        {"id": 1, "distance": 500},
        sample_activity(),
    ]));
    let config = test_config();

    let named_only = get_activities(&api, &config, None, None, None, 10, false)
        .await
        .unwrap();
    assert!(named_only.contains("Morning Ride"));
    assert!(!named_only.contains("ID: 1\n"));

    let all = get_activities(&api, &config, None, None, None, 10, true)
        .await
        .unwrap();
    assert!(all.contains("ID: 1\n"));
}

#[tokio::test]
async fn test_get_activities_rejects_bad_dates() {
    let api = FakeApi::returning(json!([]));
    let config = test_config();
    let result = get_activities(&api, &config, None, Some("01-01-2024"), None, 10, false).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_activity_details() {
    let api = FakeApi::returning(sample_activity());
    let result = get_activity_details(&api, "123").await.unwrap();
    assert!(result.contains("Activity: Morning Ride"));
}

#[tokio::test]
async fn test_get_events() {
    let api = FakeApi::returning(json!([{
        "date": "2024-01-01",
        "id": "e1",
        "name": "Test Event",
        "description": "desc",
        "race": true,
    }]));
    let config = test_config();
    let result = get_events(&api, &config, Some("1"), Some("2024-01-01"), Some("2024-01-02"))
        .await
        .unwrap();
    assert!(result.contains("Events:"));
    assert!(result.contains("Test Event"));
    assert!(result.contains("Type: Race"));
}

#[tokio::test]
async fn test_get_event_by_id() {
    let api = FakeApi::returning(json!({
        "id": "e1",
        "date": "2024-01-01",
        "name": "Test Event",
        "description": "desc",
        "race": true,
    }));
    let config = test_config();
    let result = get_event_by_id(&api, &config, "e1", Some("1")).await.unwrap();
    assert!(result.contains("Event Details:"));
    assert!(result.contains("Test Event"));
}

#[tokio::test]
async fn test_get_wellness_data() {
    let api = FakeApi::returning(json!({
        "2024-01-01": {
            "id": "w1",
            "date": "2024-01-01",
            "ctl": 75,
            "sleepSecs": 28800,
        }
    }));
    let config = test_config();
    let result = get_wellness_data(&api, &config, Some("1"), None, None)
        .await
        .unwrap();
    assert!(result.contains("Wellness Data:"));
    assert!(result.contains("2024-01-01"));
    assert!(result.contains("Sleep: 8.00 hours"));
}

#[tokio::test]
async fn test_get_activity_intervals() {
    let api = FakeApi::returning(json!({
        "id": 123,
        "analyzed": true,
        "icu_intervals": [{"label": "Rep 1", "type": "Work", "elapsed_time": 60}],
    }));
    let result = get_activity_intervals(&api, "123").await.unwrap();
    assert!(result.contains("Intervals Analysis:"));
    assert!(result.contains("Rep 1"));
}

#[tokio::test]
async fn test_post_events_returns_upstream_response() {
    let api = FakeApi::returning(Value::Null);
    let config = test_config();
    let data = json!({
        "steps": [
            {"duration": "15m", "power": "80%", "description": "Warm-up"},
            {"duration": "3m", "power": "110%", "description": "High-intensity interval"},
        ]
    });

    let created = post_events(&api, &config, Some("i1"), "2024-01-15", "Test Workout", &data)
        .await
        .unwrap();
    assert_eq!(created["id"], "e123");
    assert_eq!(created["name"], "Test Workout");

    let body = api.submitted_body().unwrap();
    assert_eq!(body["category"], "WORKOUT");
    assert_eq!(body["start_date_local"], "2024-01-15T00:00:00");
    assert!(body["steps"].is_array());
}

#[tokio::test]
async fn test_post_events_type_detection() {
    let cases = [
        ("Morning Run", json!({"steps": [{"duration": "10m"}]}), "Run"),
        ("Bike Intervals", json!({"steps": [{"duration": "10m"}]}), "Ride"),
        ("Swimming Session", json!({"steps": [{"duration": "10m"}]}), "Swim"),
        ("VO2 Max Intervals", json!({"steps": [{"duration": "10m"}]}), "Run"),
        ("Intervals", json!({"steps": [{"duration": "10m"}], "type": "Run"}), "Run"),
        ("Bike Workout", json!({"steps": [{"duration": "10m"}], "type": "Swim"}), "Swim"),
    ];

    let config = test_config();
    for (name, data, expected) in cases {
        let api = FakeApi::returning(Value::Null);
        post_events(&api, &config, Some("i1"), "2024-01-15", name, &data)
            .await
            .unwrap();
        let body = api.submitted_body().unwrap();
        assert_eq!(
            body["type"], *expected,
            "expected type '{expected}' for workout '{name}'"
        );
    }
}

#[tokio::test]
async fn test_post_events_rejects_bad_date() {
    let api = FakeApi::returning(Value::Null);
    let config = test_config();
    let result = post_events(&api, &config, None, "Jan 15", "Workout", &json!({})).await;
    assert!(result.is_err());
    assert!(api.submitted_body().is_none());
}

#[tokio::test]
async fn test_registered_handlers_parse_arguments() {
    let api: Arc<dyn IntervalsApi> = Arc::new(FakeApi::returning(sample_activity()));
    let config = Arc::new(test_config());

    let mut registry = ToolRegistry::new("intervals-icu");
    register_tools(&mut registry, api, config);
    assert_eq!(registry.len(), 7);

    let details = registry
        .get_tools()
        .iter()
        .find(|t| t.name == "get_activity_details")
        .unwrap();
    let result = (details.handler)(json!({"activity_id": "123"})).await.unwrap();
    assert!(result.contains("Activity: Morning Ride"));

    // Missing required argument is an input error, not a panic
    let missing = (details.handler)(json!({})).await;
    assert!(missing.is_err());
}
