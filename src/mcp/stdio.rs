// ABOUTME: Built-in stdio JSON-RPC server, the known-good fallback host
// ABOUTME: Serves initialize, tools/list, and tools/call over stdin/stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Stdio Transport
//!
//! A minimal MCP server speaking newline-delimited JSON-RPC 2.0 over
//! stdin/stdout. The tool registry falls back to this server when no external
//! host runtime accepts its tools, so clients like Claude Desktop can always
//! connect via the stdio transport. Diagnostics go to stderr; stdout carries
//! only protocol frames.

use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::tools::registry::{ToolEntry, ToolHandler};

use super::protocol::{
    JsonRpcRequest, JsonRpcResponse, ToolResponse, ToolSchema, MCP_PROTOCOL_VERSION,
};

/// Minimal stdio MCP server holding natively registered tools
pub struct StdioServer {
    name: String,
    tools: Vec<ToolEntry>,
}

impl StdioServer {
    /// Create a new server with no tools registered
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            tools: Vec::new(),
        }
    }

    /// Server name reported in the initialize response
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native decorator-style registration: record one tool handler.
    /// Re-registering a name replaces the previous entry.
    pub fn register(&mut self, name: &str, description: &str, handler: ToolHandler) {
        let entry = ToolEntry {
            name: name.to_owned(),
            description: description.to_owned(),
            handler,
        };
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name == name) {
            *existing = entry;
        } else {
            self.tools.push(entry);
        }
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Serve stdin until EOF.
    ///
    /// Builds a current-thread tokio runtime internally so callers stay
    /// synchronous; tool futures are awaited one request at a time, which is
    /// all the stdio transport can deliver anyway.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the runtime cannot be built or stdio I/O
    /// fails. Individual request failures are answered in-band and do not
    /// stop the server.
    pub fn run(&self) -> AppResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::internal(format!("failed to build async runtime: {e}")))?;
        runtime.block_on(self.serve_loop())
    }

    async fn serve_loop(&self) -> AppResult<()> {
        info!(
            "stdio server '{}' serving {} tools",
            self.name,
            self.tools.len()
        );

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("stdin read failed: {e}")))?
        {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(trimmed).await else {
                continue;
            };
            let payload = serde_json::to_string(&response)?;
            stdout
                .write_all(payload.as_bytes())
                .await
                .map_err(|e| AppError::internal(format!("stdout write failed: {e}")))?;
            stdout
                .write_all(b"\n")
                .await
                .map_err(|e| AppError::internal(format!("stdout write failed: {e}")))?;
            stdout
                .flush()
                .await
                .map_err(|e| AppError::internal(format!("stdout flush failed: {e}")))?;
        }

        info!("stdin closed, stdio server '{}' shutting down", self.name);
        Ok(())
    }

    /// Parse one frame and dispatch it. Notifications produce no response.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => {
                let is_notification = request.is_notification();
                let response = self.handle_request(request).await;
                (!is_notification).then_some(response)
            }
            Err(e) => Some(JsonRpcResponse::error(
                None,
                -32700,
                format!("Parse error: {e}"),
            )),
        }
    }

    /// Dispatch one JSON-RPC request to its handler.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": MCP_PROTOCOL_VERSION,
                    "capabilities": {"tools": {}},
                    "serverInfo": {
                        "name": self.name,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            ),
            "notifications/initialized" => JsonRpcResponse::success(id, Value::Null),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            other => {
                JsonRpcResponse::error(id, -32601, format!("Method not found: {other}"))
            }
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<ToolSchema> = self
            .tools
            .iter()
            .map(|tool| ToolSchema {
                name: tool.name.clone(),
                description: tool.description.clone(),
                input_schema: json!({"type": "object", "additionalProperties": true}),
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = params.unwrap_or(Value::Null);
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, -32602, "tools/call requires a tool name");
        };
        let Some(tool) = self.tools.iter().find(|t| t.name == name) else {
            let error = AppError::not_found(format!("tool '{name}'"));
            return JsonRpcResponse::error(id, error.code.jsonrpc_code(), error.to_string());
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let tool_response = match (tool.handler)(arguments).await {
            Ok(text) => ToolResponse::text(text),
            Err(error) => {
                warn!("tool '{name}' failed: {error}");
                ToolResponse::error_text(error.to_string())
            }
        };

        match serde_json::to_value(tool_response) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, -32603, format!("result serialization: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::sync::Arc;

    fn echo_server() -> StdioServer {
        let mut server = StdioServer::new("test-server");
        server.register(
            "echo",
            "Echo the 'text' argument back",
            Arc::new(|args| {
                async move {
                    Ok(args
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or("nothing")
                        .to_owned())
                }
                .boxed()
            }),
        );
        server
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let server = echo_server();
        let request = JsonRpcRequest::new("initialize", None);
        let response = server.handle_request(request).await;
        let result = response.result.unwrap_or_default();
        assert_eq!(result["serverInfo"]["name"], "test-server");
        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tools_list_includes_registered_tools() {
        let server = echo_server();
        let response = server
            .handle_request(JsonRpcRequest::new("tools/list", None))
            .await;
        let result = response.result.unwrap_or_default();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .map(|tools| {
                tools
                    .iter()
                    .filter_map(|t| t["name"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(names, vec!["echo"]);
    }

    #[tokio::test]
    async fn test_tool_call_runs_handler() {
        let server = echo_server();
        let request = JsonRpcRequest::new(
            "tools/call",
            Some(json!({"name": "echo", "arguments": {"text": "hi"}})),
        );
        let response = server.handle_request(request).await;
        let result = response.result.unwrap_or_default();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let server = echo_server();
        let request =
            JsonRpcRequest::new("tools/call", Some(json!({"name": "missing"})));
        let response = server.handle_request(request).await;
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn test_unknown_method_is_an_error() {
        let server = echo_server();
        let response = server
            .handle_request(JsonRpcRequest::new("bogus/method", None))
            .await;
        assert_eq!(response.error.map(|e| e.code), Some(-32601));
    }
}
