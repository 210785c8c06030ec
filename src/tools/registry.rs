// ABOUTME: Tool collection facade with the bind/run sequence against host runtimes
// ABOUTME: Falls back to the built-in stdio server when no candidate host binds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Tool Registry
//!
//! A minimal "register a named async operation, describe it, later bind it
//! into exactly one real host runtime" facade. Tool definition code targets
//! this registry instead of a specific host API; [`ToolRegistry::run`]
//! resolves the host at startup.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::mcp::StdioServer;

use super::binding::{BindError, HostRuntime, HostServer, BINDING_PRIORITY};

/// Future returned by a tool handler
pub type ToolFuture = BoxFuture<'static, AppResult<String>>;

/// A registered async tool operation: JSON arguments in, report text out
pub type ToolHandler = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// One registered tool: name, handler, and description for LLM consumption
#[derive(Clone)]
pub struct ToolEntry {
    /// Unique tool name (registry identity)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// The async operation itself
    pub handler: ToolHandler,
}

impl fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Setup/teardown pair invoked around the bound host's active lifetime
pub trait LifecycleHook: Send + Sync {
    /// Called after binding succeeds, before the host starts serving
    fn startup(&self);
    /// Called after the host's run method returns
    fn shutdown(&self);
}

/// Raised when every host candidate and the built-in fallback fail.
///
/// The message enumerates every registered tool name plus the last underlying
/// failure so an operator has enough information to wire tools in by hand.
#[derive(Debug, Error)]
#[error(
    "could not start any host runtime or fall back to the built-in stdio server. \
     Registered tools: [{tool_names}]. Last error: {last_error}"
)]
pub struct ShimError {
    /// Comma-separated registered tool names
    pub tool_names: String,
    /// Text of the last underlying failure
    pub last_error: String,
}

impl ShimError {
    /// Build the exhaustion error from the registry's state
    #[must_use]
    pub fn exhausted(tool_names: &[&str], last_error: impl Into<String>) -> Self {
        Self {
            tool_names: tool_names.join(", "),
            last_error: last_error.into(),
        }
    }
}

/// Central registry for MCP tools.
///
/// Populated once at startup via [`Self::tool`], read thereafter. Identity is
/// by name: registering a second handler under an existing name replaces the
/// prior entry in place, so enumeration order stays stable for a given
/// registration order.
pub struct ToolRegistry {
    /// Registry name, forwarded to host server instances
    name: String,
    /// Registered tools in registration order
    tools: Vec<ToolEntry>,
    /// Optional lifecycle hook around the host's active lifetime
    lifecycle: Option<Arc<dyn LifecycleHook>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
            lifecycle: None,
        }
    }

    /// Create a registry with a lifecycle hook
    #[must_use]
    pub fn with_lifecycle(name: impl Into<String>, hook: Arc<dyn LifecycleHook>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
            lifecycle: Some(hook),
        }
    }

    /// Registry name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a tool handler under a name with a description.
    ///
    /// Returns the handler unchanged so it stays independently callable in
    /// tests and by other tools. Re-registering a name replaces the previous
    /// entry.
    pub fn tool(&mut self, name: &str, description: &str, handler: ToolHandler) -> ToolHandler {
        let entry = ToolEntry {
            name: name.to_owned(),
            description: description.to_owned(),
            handler: handler.clone(),
        };

        if let Some(existing) = self.tools.iter_mut().find(|t| t.name == name) {
            warn!("tool '{}' is already registered, replacing", name);
            *existing = entry;
        } else {
            debug!("registered tool '{}'", name);
            self.tools.push(entry);
        }

        handler
    }

    /// Every registered tool, in registration order
    #[must_use]
    pub fn get_tools(&self) -> &[ToolEntry] {
        &self.tools
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All registered tool names
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Bind every tool into the first candidate host that accepts them all,
    /// then start that host. When every candidate fails, fall back to the
    /// built-in stdio server.
    ///
    /// # Errors
    ///
    /// Returns [`ShimError`] when every candidate and the fallback fail. The
    /// error lists all registered tool names and the last underlying failure.
    pub fn run(&self, candidates: Vec<Box<dyn HostRuntime>>) -> Result<(), ShimError> {
        let mut last_error: Option<String> = None;

        for mut host in candidates {
            let label = host.name().to_owned();
            match self.bind_and_run(host.as_mut()) {
                Ok(()) => return Ok(()),
                Err(reason) => {
                    warn!("host '{label}' failed: {reason}");
                    last_error = Some(reason);
                }
            }
        }

        info!("no host candidate succeeded, falling back to built-in stdio server");
        self.run_fallback().map_err(|fallback_error| {
            // Prefer the candidate-phase failure in the message; the fallback
            // error stands in when there were no candidates at all.
            let reason = last_error.unwrap_or(fallback_error);
            ShimError::exhausted(&self.tool_names(), reason)
        })
    }

    /// Try every binding strategy per tool against one host, then locate and
    /// invoke its run entry point.
    fn bind_and_run(&self, host: &mut dyn HostRuntime) -> Result<(), String> {
        let mut server_instance: Option<Box<dyn HostServer>> = None;

        for tool in &self.tools {
            let bound = BINDING_PRIORITY
                .iter()
                .any(|strategy| strategy.apply(host, &mut server_instance, &self.name, tool));
            if !bound {
                return Err(format!(
                    "no binding strategy accepted tool '{}' on host '{}'",
                    tool.name,
                    host.name()
                ));
            }
        }

        self.run_with_lifecycle(|| Self::invoke_run_entry(host, server_instance))
    }

    /// Find a `run`- or `serve`-shaped entry point and invoke it. The server
    /// instance created by the server-class strategy is the last resort.
    fn invoke_run_entry(
        host: &mut dyn HostRuntime,
        mut server_instance: Option<Box<dyn HostServer>>,
    ) -> Result<(), String> {
        match host.run() {
            Ok(()) => return Ok(()),
            Err(BindError::Unsupported) => {}
            Err(e) => return Err(format!("host '{}' run failed: {e}", host.name())),
        }
        match host.serve() {
            Ok(()) => return Ok(()),
            Err(BindError::Unsupported) => {}
            Err(e) => return Err(format!("host '{}' serve failed: {e}", host.name())),
        }
        match server_instance.as_mut() {
            Some(server) => server
                .run()
                .map_err(|e| format!("host '{}' server instance failed: {e}", host.name())),
            None => Err(format!(
                "host '{}' exposes no run or serve entry point",
                host.name()
            )),
        }
    }

    /// Re-register every tool on the built-in stdio server via its native
    /// decorator and run it.
    fn run_fallback(&self) -> Result<(), String> {
        let mut server = StdioServer::new(&self.name);
        for tool in &self.tools {
            server.register(&tool.name, &tool.description, tool.handler.clone());
        }
        self.run_with_lifecycle(|| server.run().map_err(|e| e.to_string()))
    }

    /// Invoke the lifecycle hook around the host's active lifetime
    fn run_with_lifecycle(&self, serve: impl FnOnce() -> Result<(), String>) -> Result<(), String> {
        if let Some(hook) = &self.lifecycle {
            hook.startup();
        }
        let outcome = serve();
        if let Some(hook) = &self.lifecycle {
            hook.shutdown();
        }
        outcome
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("name", &self.name)
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    fn noop_handler(tag: &'static str) -> ToolHandler {
        Arc::new(move |_args| async move { Ok(tag.to_owned()) }.boxed())
    }

    #[test]
    fn test_last_registration_wins_in_place() {
        let mut registry = ToolRegistry::new("test");
        registry.tool("first", "first tool", noop_handler("a"));
        registry.tool("second", "second tool", noop_handler("b"));
        registry.tool("first", "replacement", noop_handler("c"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.tool_names(), vec!["first", "second"]);
        assert_eq!(registry.get_tools()[0].description, "replacement");
    }

    #[tokio::test]
    async fn test_registered_handler_stays_callable() {
        let mut registry = ToolRegistry::new("test");
        let handler = registry.tool("echo", "echoes", noop_handler("hello"));
        let result = handler(serde_json::Value::Null).await;
        assert_eq!(result.ok(), Some("hello".to_owned()));
    }

    #[test]
    fn test_shim_error_enumerates_tools() {
        let error = ShimError::exhausted(&["get_activities", "get_events"], "boom");
        let text = error.to_string();
        assert!(text.contains("get_activities"));
        assert!(text.contains("get_events"));
        assert!(text.contains("boom"));
    }
}
