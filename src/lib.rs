// ABOUTME: Main library entry point for the Intervals MCP server
// ABOUTME: Exposes formatters, the tool registry shim, and the Intervals.icu client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

#![deny(unsafe_code)]

//! # Intervals MCP Server
//!
//! A Model Context Protocol (MCP) server for the Intervals.icu fitness
//! platform. It exposes activities, calendar events, wellness entries, and
//! interval analyses as MCP tools whose results are human-readable text
//! reports.
//!
//! ## Architecture
//!
//! - **Formatters**: pure functions turning API payloads into deterministic
//!   text reports, degrading gracefully on missing fields
//! - **Tools**: a registry facade collecting named async operations, bound
//!   into a host runtime at startup via a fixed priority of binding
//!   strategies, with a built-in stdio server as the fallback host
//! - **Providers**: the Intervals.icu REST client behind a trait seam
//! - **Config**: environment-only configuration built once at startup and
//!   passed by parameter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use intervals_mcp_server::config::ServerConfig;
//! use intervals_mcp_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Intervals MCP server configured for {}", config.base_url);
//!     Ok(())
//! }
//! ```

/// Configuration management loaded from the environment
pub mod config;

/// Unified error handling with standard error codes
pub mod errors;

/// Payload formatting into human-readable text reports
pub mod formatters;

/// Logging configuration and structured output
pub mod logging;

/// Model Context Protocol wire types and the stdio transport
pub mod mcp;

/// Upstream API clients
pub mod providers;

/// Tool registry, host binding, and tool implementations
pub mod tools;

/// Utility functions and helpers
pub mod utils;
