// ABOUTME: Intervals.icu REST API client with HTTP Basic authentication
// ABOUTME: The IntervalsApi trait is the seam tools use, so tests can fake transports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Intervals.icu API Client
//!
//! Thin REST client for the Intervals.icu API. Authentication is HTTP Basic
//! with the literal username `API_KEY` and the key as password. Tools depend
//! on the [`IntervalsApi`] trait rather than the concrete client, which keeps
//! them testable without network access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};

/// Upstream service label used in error messages
const SERVICE: &str = "intervals.icu";

/// Basic-auth username the Intervals.icu API expects for key authentication
const BASIC_AUTH_USER: &str = "API_KEY";

/// Read and write access to the Intervals.icu REST API
#[async_trait]
pub trait IntervalsApi: Send + Sync {
    /// GET a path (relative to the API base) with query parameters and
    /// decode the JSON response
    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> AppResult<Value>;

    /// POST a JSON body to a path and decode the JSON response
    async fn submit(&self, path: &str, body: &Value) -> AppResult<Value>;
}

/// Concrete `reqwest`-backed client
pub struct IntervalsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl IntervalsClient {
    /// Build a client from server configuration
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode(response: reqwest::Response) -> AppResult<Value> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::rate_limited(SERVICE));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                SERVICE,
                format!("HTTP {status}: {body}"),
            ));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("invalid JSON response: {e}")))
    }
}

#[async_trait]
impl IntervalsApi for IntervalsClient {
    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> AppResult<Value> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .basic_auth(BASIC_AUTH_USER, Some(&self.api_key))
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;
        Self::decode(response).await
    }

    async fn submit(&self, path: &str, body: &Value) -> AppResult<Value> {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .basic_auth(BASIC_AUTH_USER, Some(&self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            api_key: "test-key".into(),
            athlete_id: "i1".into(),
            base_url: base_url.into(),
            user_agent: "intervals-mcp-server/test".into(),
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = IntervalsClient::new(&test_config("https://intervals.icu/api/v1/"));
        assert_eq!(
            client.url("/athlete/i1/activities"),
            "https://intervals.icu/api/v1/athlete/i1/activities"
        );
    }
}
