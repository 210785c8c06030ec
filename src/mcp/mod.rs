// ABOUTME: Model Context Protocol support: wire types and the stdio transport
// ABOUTME: Hosts the built-in fallback server the tool registry binds to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Model Context Protocol server support

/// JSON-RPC 2.0 and MCP schema types
pub mod protocol;
/// Stdio JSON-RPC transport, the built-in fallback host
pub mod stdio;

pub use stdio::StdioServer;
