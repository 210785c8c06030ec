// ABOUTME: Configuration management loaded once at process start
// ABOUTME: Exposes ServerConfig built from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Configuration management
//!
//! Configuration is environment-only: a [`environment::ServerConfig`] value
//! is constructed once at startup and passed by parameter to every consumer.
//! There is no process-global configuration state.

/// Environment-based server configuration
pub mod environment;

pub use environment::ServerConfig;
