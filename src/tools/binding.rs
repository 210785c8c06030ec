// ABOUTME: Host runtime trait and the closed set of tool binding strategies
// ABOUTME: Each strategy is one calling convention tried in fixed priority order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Host Binding Strategies
//!
//! The shape of external MCP host runtimes is not controlled by this
//! codebase, so registration is best-effort: every known calling convention
//! is modeled as one [`BindingStrategy`], and the registry tries them in
//! [`BINDING_PRIORITY`] order until one accepts the tool. A host implements
//! only the conventions it actually supports; everything else reports
//! [`BindError::Unsupported`] through the trait's default methods.
//!
//! This keeps the adapter testable with fake hosts that expose exactly one
//! convention at a time.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use super::registry::{ToolEntry, ToolHandler};

/// Failure modes when probing a host registration convention
#[derive(Debug, Clone, Error)]
pub enum BindError {
    /// The host does not expose this convention at all
    #[error("convention not supported by this host")]
    Unsupported,
    /// The host exposes the convention but rejected the full-arity call;
    /// the strategy retries its reduced form
    #[error("call arity not accepted by this host")]
    ArityMismatch,
    /// The host accepted the call shape but registration or startup failed
    #[error("{0}")]
    Rejected(String),
}

/// A server object handed out by a host runtime (strategy 3). The host's own
/// decorator-style registration lives on the instance, as does its runner.
pub trait HostServer: Send {
    /// Register one tool handler through the server's native decorator
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when the server rejects the tool.
    fn attach(&mut self, name: &str, handler: ToolHandler) -> Result<(), BindError>;

    /// Start serving
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when the server fails to start or exits abnormally.
    fn run(&mut self) -> Result<(), BindError>;
}

/// One candidate host runtime the registry may bind tools into.
///
/// Every method defaults to [`BindError::Unsupported`]; a host overrides only
/// the conventions it genuinely speaks. The registry never assumes any
/// particular subset.
pub trait HostRuntime: Send {
    /// Host label used in log and error messages
    fn name(&self) -> &str;

    /// `register(name, handler, description)`-shaped registration
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when unsupported or rejected.
    fn register_tool(
        &mut self,
        _name: &str,
        _handler: ToolHandler,
        _description: &str,
    ) -> Result<(), BindError> {
        Err(BindError::Unsupported)
    }

    /// `register(name, handler)`-shaped registration, the reduced-arity form
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when unsupported or rejected.
    fn register_tool_basic(&mut self, _name: &str, _handler: ToolHandler) -> Result<(), BindError> {
        Err(BindError::Unsupported)
    }

    /// Decorator-factory registration: `tool(name, description)(handler)`.
    /// The reduced-arity form passes `None` for the description.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when unsupported or rejected.
    fn bind_decorator(
        &mut self,
        _name: &str,
        _description: Option<&str>,
        _handler: ToolHandler,
    ) -> Result<(), BindError> {
        Err(BindError::Unsupported)
    }

    /// Instantiate the host's own server class for decorator-style
    /// registration and running
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when the host provides no server class.
    fn new_server(&mut self, _registry_name: &str) -> Result<Box<dyn HostServer>, BindError> {
        Err(BindError::Unsupported)
    }

    /// `run`-shaped entry point on the host object
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when unsupported or when the host fails at run time.
    fn run(&mut self) -> Result<(), BindError> {
        Err(BindError::Unsupported)
    }

    /// `serve`-shaped entry point on the host object
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when unsupported or when the host fails at run time.
    fn serve(&mut self) -> Result<(), BindError> {
        Err(BindError::Unsupported)
    }
}

/// The closed set of registration conventions, in no particular order.
/// Priority lives in [`BINDING_PRIORITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStrategy {
    /// `register(name, handler, description)`, retried without description
    /// on an arity mismatch
    RegisterCall,
    /// `tool(name, description)(handler)`, retried with only the name on an
    /// arity mismatch
    DecoratorFactory,
    /// Instantiate the host's server class and use its native decorator
    ServerClass,
}

/// Fixed priority order in which strategies are attempted per tool
pub const BINDING_PRIORITY: [BindingStrategy; 3] = [
    BindingStrategy::RegisterCall,
    BindingStrategy::DecoratorFactory,
    BindingStrategy::ServerClass,
];

impl fmt::Display for BindingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RegisterCall => "register-call",
            Self::DecoratorFactory => "decorator-factory",
            Self::ServerClass => "server-class",
        };
        write!(f, "{label}")
    }
}

impl BindingStrategy {
    /// Attempt to bind one tool into the host via this convention.
    ///
    /// `server_instance` carries the server object created by the
    /// [`Self::ServerClass`] strategy so later tools (and the final run
    /// phase) reuse it instead of instantiating one per tool.
    ///
    /// Returns `true` when the tool is bound; `false` advances the caller to
    /// the next strategy.
    pub fn apply(
        self,
        host: &mut dyn HostRuntime,
        server_instance: &mut Option<Box<dyn HostServer>>,
        registry_name: &str,
        tool: &ToolEntry,
    ) -> bool {
        let bound = match self {
            Self::RegisterCall => {
                match host.register_tool(&tool.name, tool.handler.clone(), &tool.description) {
                    Ok(()) => true,
                    Err(BindError::ArityMismatch) => host
                        .register_tool_basic(&tool.name, tool.handler.clone())
                        .is_ok(),
                    Err(_) => false,
                }
            }
            Self::DecoratorFactory => {
                match host.bind_decorator(
                    &tool.name,
                    Some(tool.description.as_str()),
                    tool.handler.clone(),
                ) {
                    Ok(()) => true,
                    Err(BindError::ArityMismatch) => host
                        .bind_decorator(&tool.name, None, tool.handler.clone())
                        .is_ok(),
                    Err(_) => false,
                }
            }
            Self::ServerClass => {
                if server_instance.is_none() {
                    match host.new_server(registry_name) {
                        Ok(server) => *server_instance = Some(server),
                        Err(_) => return false,
                    }
                }
                server_instance
                    .as_mut()
                    .is_some_and(|server| server.attach(&tool.name, tool.handler.clone()).is_ok())
            }
        };

        if bound {
            debug!(
                "bound tool '{}' into host '{}' via {} strategy",
                tool.name,
                host.name(),
                self
            );
        }
        bound
    }
}
