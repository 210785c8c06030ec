// ABOUTME: Server configuration loaded from environment variables at startup
// ABOUTME: Holds API credentials, athlete ID, and upstream base URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Environment-based server configuration
//!
//! Environment variables:
//! - `API_KEY` - Intervals.icu API key (HTTP Basic password)
//! - `ATHLETE_ID` - default athlete ID, all digits or `i`-prefixed digits
//! - `INTERVALS_API_BASE_URL` - upstream API base, defaults to the public API

use std::env;

use crate::errors::AppResult;
use crate::utils::validation::validate_athlete_id;

/// Default upstream API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://intervals.icu/api/v1";

/// Configuration settings for the Intervals MCP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Intervals.icu API key
    pub api_key: String,
    /// Default athlete ID (may be empty when every call supplies its own)
    pub athlete_id: String,
    /// Upstream API base URL
    pub base_url: String,
    /// User-Agent header sent on every upstream request
    pub user_agent: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ATHLETE_ID` is set but malformed.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var("API_KEY").unwrap_or_default();
        let athlete_id = env::var("ATHLETE_ID").unwrap_or_default();
        validate_athlete_id(&athlete_id)?;

        let base_url = env::var("INTERVALS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());

        Ok(Self {
            api_key,
            athlete_id,
            base_url,
            user_agent: format!("intervals-mcp-server/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Resolve an athlete ID: an explicit parameter wins over the configured
    /// default. An empty result means neither was supplied.
    #[must_use]
    pub fn resolve_athlete_id<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        match explicit {
            Some(id) if !id.is_empty() => id,
            _ => &self.athlete_id,
        }
    }
}
