// ABOUTME: Main server binary: load config, register tools, bind to a host runtime
// ABOUTME: With no external host candidates the registry binds to the stdio fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Intervals MCP server entry point

#![allow(clippy::print_stderr)]

use std::process;
use std::sync::Arc;

use tracing::info;

use intervals_mcp_server::config::ServerConfig;
use intervals_mcp_server::logging::{self, LoggingConfig};
use intervals_mcp_server::providers::{IntervalsApi, IntervalsClient};
use intervals_mcp_server::tools::implementations::register_tools;
use intervals_mcp_server::tools::ToolRegistry;

fn main() {
    if let Err(error) = run() {
        eprintln!("intervals-mcp-server: {error}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    logging::init(&LoggingConfig::from_env())?;

    let config = Arc::new(ServerConfig::from_env()?);
    if config.api_key.is_empty() {
        tracing::warn!("API_KEY is not set; upstream requests will be rejected");
    }

    let api: Arc<dyn IntervalsApi> = Arc::new(IntervalsClient::new(&config));

    let mut registry = ToolRegistry::new("intervals-icu");
    register_tools(&mut registry, api, Arc::clone(&config));
    info!(
        "registered {} tools for athlete '{}'",
        registry.len(),
        config.athlete_id
    );

    // No external host candidates are probed from a stock build; the
    // registry binds straight to the built-in stdio server.
    registry.run(Vec::new())?;
    Ok(())
}
