// ABOUTME: Unit tests for environment-based server configuration
// ABOUTME: Validates defaults, athlete ID validation, and env var overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use intervals_mcp_server::config::environment::DEFAULT_API_BASE_URL;
use intervals_mcp_server::config::ServerConfig;
use serial_test::serial;

fn clear_config_env() {
    env::remove_var("API_KEY");
    env::remove_var("ATHLETE_ID");
    env::remove_var("INTERVALS_API_BASE_URL");
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_config_env();
    let config = ServerConfig::from_env().unwrap();
    assert!(config.api_key.is_empty());
    assert!(config.athlete_id.is_empty());
    assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
    assert!(config.user_agent.starts_with("intervals-mcp-server/"));
}

#[test]
#[serial]
fn test_loads_values_from_env() {
    clear_config_env();
    env::set_var("API_KEY", "secret");
    env::set_var("ATHLETE_ID", "i123456");
    env::set_var("INTERVALS_API_BASE_URL", "http://localhost:9000/api/v1");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.api_key, "secret");
    assert_eq!(config.athlete_id, "i123456");
    assert_eq!(config.base_url, "http://localhost:9000/api/v1");

    clear_config_env();
}

#[test]
#[serial]
fn test_malformed_athlete_id_fails_construction() {
    clear_config_env();
    env::set_var("ATHLETE_ID", "not-an-id");

    let result = ServerConfig::from_env();
    assert!(result.is_err());

    clear_config_env();
}

#[test]
#[serial]
fn test_resolve_athlete_id_prefers_explicit() {
    clear_config_env();
    env::set_var("ATHLETE_ID", "i111");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.resolve_athlete_id(Some("i222")), "i222");
    assert_eq!(config.resolve_athlete_id(Some("")), "i111");
    assert_eq!(config.resolve_athlete_id(None), "i111");

    clear_config_env();
}
